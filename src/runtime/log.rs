use env_logger::Env;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install env_logger as the global logger. `RUST_LOG` overrides the default filter.
pub fn setup_global_logger() {
    let env = Env::default().default_filter_or(DEFAULT_LOG_FILTER);
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .try_init();
}
