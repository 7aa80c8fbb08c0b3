use std::path::Path;
use std::sync::Arc;

use almanac_app::loader::load_directory;
use almanac_app::output::render_events;
use almanac_chronology::ChronologyRegistry;
use almanac_core::config::load_config;
use almanac_engine::EventGenerator;
use almanac_spec::SpecificationResolver;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let loaded = load_directory(Path::new(&config.catalog.path))?;

    let registry = Arc::new(ChronologyRegistry::with_defaults());
    loaded.register_chronologies(&registry)?;

    let resolver = SpecificationResolver::new(loaded.catalog);
    let generator = EventGenerator::new(registry);

    let events = generator.resolve_and_generate(
        &resolver,
        &config.generate.calendar,
        config.generate.from,
        config.generate.to,
    )?;

    tracing::info!(
        calendar = %config.generate.calendar,
        events = events.len(),
        "Calendar compiled"
    );

    println!("{}", render_events(&events, config.output.pretty)?);

    Ok(())
}
