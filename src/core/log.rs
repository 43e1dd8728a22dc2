use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events are shown with `--verbose`: the app itself and the
/// HTTP request traces of `serve`.
const LOGGED_TARGETS: [&str; 2] = ["fintrack", "tower_http"];

fn app_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    LOGGED_TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| targets.with_target(*target, level))
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag. Events go to stderr.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "off" }));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_targets(verbose))
        .with(env_filter)
        .init();
}
