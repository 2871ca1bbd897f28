use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use mosque_map::analysis::reporting;
use mosque_map::cli::cli::{Args, Command, OutputFormat};
use mosque_map::config::viewer_config::ViewerConfig;
use mosque_map::core::pan::{random_walk, simulate_pan, summarize_pan};
use mosque_map::core::ranking::validate_limit;
use mosque_map::core::view_state::ViewState;
use mosque_map::data::catalog_loader;
use mosque_map::data::sample_catalog::sample_catalog;
use mosque_map::models::poi::{Coordinate, PointOfInterest, POI};
use mosque_map::utils::csv_export::CsvExporter;
use mosque_map::utils::logging;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.verbose());

    let mut config = match args.config() {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(path) = args.catalog() {
        config.catalog_path = Some(path.clone());
    }

    let catalog = load_catalog_or_sample(&config);

    match args.command() {
        Command::Nearest { lat, lon, limit, select, show_card, format, lines, export } => {
            if let Some(limit) = limit {
                config.line_count = validate_limit(*limit)?;
            }
            let mut state = ViewState::new(catalog, config)?;

            if let (Some(lat), Some(lon)) = (lat, lon) {
                state.use_location(Coordinate::new(*lat, *lon))?;
            }
            if let Some(id) = select {
                match state.select(id) {
                    Some(poi) if *format == OutputFormat::Text => println!("{}", reporting::render_popup(poi)),
                    Some(poi) => debug!(id = %poi.get_id(), "Selected mosque"),
                    None => warn!(id = %id, "No mosque with that id; keeping the nearest selected"),
                }
            }
            if *show_card {
                state.toggle_card();
            }

            match format {
                OutputFormat::Text => {
                    reporting::print_view_summary(&state);
                    if *lines {
                        println!("{}", state.overlay().to_json()?);
                    }
                }
                OutputFormat::Json => println!("{}", reporting::view_to_json(&state, *lines)?),
            }
            if let Some(dir) = export {
                let exporter = CsvExporter::new(dir)
                    .with_context(|| format!("failed to create export directory under {}", dir.display()))?;
                let path = exporter.export_ranking(state.center(), state.nearest())?;
                match format {
                    OutputFormat::Text => println!("Ranking exported to {}", path.display()),
                    OutputFormat::Json => info!(path = %path.display(), "Ranking exported"),
                }
            }
        }
        Command::Pan { steps, seed, step_km, limit, export } => {
            let limit = match limit {
                Some(limit) => validate_limit(*limit)?,
                None => config.line_count,
            };
            if !step_km.is_finite() || *step_km <= 0.0 {
                anyhow::bail!("--step-km must be a positive number, got {}", step_km);
            }

            let path = random_walk(config.default_center, *steps, *step_km, *seed);
            let records = simulate_pan(&path, &catalog, limit, true)?;
            let summary = summarize_pan(&records);

            println!("\nPan Summary");
            println!("----------------------------------------");
            println!("Positions ranked: {}", summary.steps);
            println!("Nearest mosque changed: {} times", summary.nearest_changes);
            println!("Distinct nearest mosques: {}", summary.distinct_nearest);
            if let Some(last) = records.last() {
                println!("Final centre: ({:.4}, {:.4})", last.center.lat, last.center.lon);
                for line in reporting::format_nearest_list(&last.ranked, limit) {
                    println!("  {}", line);
                }
            }

            if let Some(dir) = export {
                let exporter = CsvExporter::new(dir)
                    .with_context(|| format!("failed to create export directory under {}", dir.display()))?;
                let path = exporter.export_pan(&records)?;
                println!("Pan steps exported to {}", path.display());
            }
        }
        Command::Catalog => reporting::print_catalog(&catalog),
    }

    logging::print_timing_report();
    Ok(())
}

// A missing or broken catalog falls back to the built-in sample
fn load_catalog_or_sample(config: &ViewerConfig) -> Vec<PointOfInterest> {
    let Some(path) = config.catalog_path.as_ref() else {
        return sample_catalog();
    };

    match catalog_loader::load_catalog(path) {
        Ok(catalog) => {
            info!(path = %path.display(), count = catalog.len(), "Loaded catalog");
            catalog
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load catalog; using the built-in sample");
            sample_catalog()
        }
    }
}
