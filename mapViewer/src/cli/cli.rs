use std::path::PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use crate::config::constants::{DEFAULT_PAN_STEPS, DEFAULT_PAN_STEP_KM};

#[derive(Parser)]
#[command(author, version, about = "Nearest-mosque map viewer core", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "Catalog file (.json or .csv); the built-in sample is used otherwise")]
    catalog: Option<PathBuf>,

    #[arg(long, global = true, help = "Viewer config JSON")]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false)]
    enable_timing: bool,

    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank the catalog around a reference point and show the detail card
    Nearest {
        #[arg(long, allow_hyphen_values = true, requires = "lon", help = "Reference latitude (defaults to the map centre)")]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "lat", help = "Reference longitude")]
        lon: Option<f64>,

        #[arg(short = 'k', long, allow_hyphen_values = true, help = "Number of nearest mosques to list")]
        limit: Option<i64>,

        #[arg(long, help = "Select a mosque by id, as if its marker was clicked")]
        select: Option<String>,

        #[arg(long, default_value_t = false)]
        show_card: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(long, default_value_t = false, help = "Also print the connecting-line overlay as JSON")]
        lines: bool,

        #[arg(long, help = "Write the ranking to a timestamped CSV directory")]
        export: Option<PathBuf>,
    },
    /// Simulate panning the map and re-ranking at every stop
    Pan {
        #[arg(short = 'n', long, default_value_t = DEFAULT_PAN_STEPS)]
        steps: usize,

        #[arg(long, help = "Random seed for a reproducible path")]
        seed: Option<u64>,

        #[arg(long, default_value_t = DEFAULT_PAN_STEP_KM)]
        step_km: f64,

        #[arg(short = 'k', long, allow_hyphen_values = true)]
        limit: Option<i64>,

        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List the loaded catalog
    Catalog,
}

impl Args {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn catalog(&self) -> Option<&PathBuf> {
        self.catalog.as_ref()
    }

    pub fn config(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nearest_with_negative_longitude() {
        let args = Args::try_parse_from([
            "mosque-map", "nearest", "--lat", "51.5", "--lon", "-0.12", "-k", "5", "--format", "json",
        ]).unwrap();
        match args.command() {
            Command::Nearest { lat, lon, limit, format, .. } => {
                assert_eq!(*lat, Some(51.5));
                assert_eq!(*lon, Some(-0.12));
                assert_eq!(*limit, Some(5));
                assert_eq!(*format, OutputFormat::Json);
            }
            _ => panic!("expected nearest"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Args::try_parse_from(["mosque-map", "nearest", "--lat", "51.5"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from(["mosque-map", "catalog", "--catalog", "pois.csv", "--enable-timing"]).unwrap();
        assert_eq!(args.catalog().unwrap(), &PathBuf::from("pois.csv"));
        assert!(args.enable_timing());
        assert!(matches!(args.command(), Command::Catalog));
    }

    #[test]
    fn pan_defaults() {
        let args = Args::try_parse_from(["mosque-map", "pan", "--seed", "3"]).unwrap();
        match args.command() {
            Command::Pan { steps, seed, step_km, limit, export } => {
                assert_eq!(*steps, DEFAULT_PAN_STEPS);
                assert_eq!(*seed, Some(3));
                assert_eq!(*step_km, DEFAULT_PAN_STEP_KM);
                assert!(limit.is_none());
                assert!(export.is_none());
            }
            _ => panic!("expected pan"),
        }
    }
}
