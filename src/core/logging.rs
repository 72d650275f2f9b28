//! Logging initialization

/// Initialize the logging system for the `generate_tree` binary
///
/// Uses env_logger with a default filter level of `info`.
/// Override with the RUST_LOG environment variable, e.g. `RUST_LOG=tubetree=trace`
/// to see every suppressed branch and foliage cluster.
///
/// # Example
/// ```
/// tubetree::core::logging::init();
/// log::info!("Generating tree");
/// ```
pub fn init() {
    // A second call (tests, doctests) keeps the first logger.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init();
}
