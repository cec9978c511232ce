use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger. `RUST_LOG` wins over `verbose`, which only
/// moves the default from info to debug.
pub fn init(verbose: bool) {
    let default = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(default.to_string());

    // A logger may already be installed when run under a test harness.
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}
