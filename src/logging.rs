use std::backtrace::Backtrace;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, filter::Directive, fmt};

use crate::config::defaults::DEFAULT_RUST_LOG;

/// sqlx logs every statement at info; keep it quiet unless asked for.
const SQLX_QUERY_DIRECTIVE: &str = "sqlx::query=warn";

/// Installs the global subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(from_env) => build_filter(&from_env),
        Err(_) => build_filter(log_level),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install tracing subscriber")?;
    set_panic_hook();
    Ok(())
}

/// Parses `directives`, falling back to the default level when they are
/// malformed, and mutes sqlx statement logging unless sqlx is named.
pub fn build_filter(directives: &str) -> EnvFilter {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|err| {
        eprintln!("ignoring invalid log filter {directives:?}: {err}");
        EnvFilter::new(DEFAULT_RUST_LOG)
    });

    if directives.contains("sqlx") {
        return filter;
    }
    match SQLX_QUERY_DIRECTIVE.parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

fn set_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic");
        let location = info
            .location()
            .map(|location| location.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        tracing::error!(
            panic = %message,
            %location,
            backtrace = %Backtrace::capture(),
            "request handler or task panicked"
        );
    }));
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn configured_level_gains_quiet_sqlx_directive() {
        let filter = build_filter("debug").to_string();

        assert!(filter.contains("debug"));
        assert!(filter.contains("sqlx::query=warn"));
    }

    #[test]
    fn explicit_sqlx_directive_is_left_alone() {
        let filter = build_filter("info,sqlx=debug").to_string();

        assert!(filter.contains("sqlx=debug"));
        assert!(!filter.contains("sqlx::query=warn"));
    }

    #[test]
    fn malformed_directives_fall_back_to_default_level() {
        let filter = build_filter("todo_api=loud").to_string();

        assert!(!filter.contains("loud"));
        assert!(filter.contains("info"));
    }
}
