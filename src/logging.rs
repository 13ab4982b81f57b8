use crate::error::GameError;

/// Terminal logger for the service and the one-shot CLI.
///
/// # Errors
/// Fails if a global logger is already installed.
pub fn init_logging(level: log::LevelFilter) -> Result<(), GameError> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| GameError::Other(format!("logger already initialized: {e}")))
}
