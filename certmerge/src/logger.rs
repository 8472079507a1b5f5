use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber; `RUST_LOG` takes precedence over `verbose`
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "certmerge=debug,certmerge_core=debug"
    } else {
        "certmerge=info,certmerge_core=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
