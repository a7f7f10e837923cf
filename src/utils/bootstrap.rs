//! Bootstrap utilities for the receiver binary.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig, LOG_ENV_VAR};

/// Initialize tracing.
///
/// The filter comes from the RECEIVER_LOG environment variable, falling back
/// to `logging.level`. `logging.format` picks plain text or JSON lines.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Config file path from the command line: `--config <path>`, `-c <path>`,
/// or a lone positional argument.
pub fn parse_config_path() -> Option<String> {
    parse_config_arg(std::env::args().skip(1))
}

fn parse_config_arg(mut args: impl Iterator<Item = String>) -> Option<String> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => return args.next(),
            _ => {
                if let Some(path) = arg.strip_prefix("--config=") {
                    return Some(path.to_string());
                }
                if !arg.starts_with('-') {
                    return Some(arg);
                }
            }
        }
    }
    None
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_config_arg() {
        assert_eq!(parse_config_arg(args(&[])), None);
        assert_eq!(
            parse_config_arg(args(&["--config", "prod.yaml"])),
            Some("prod.yaml".to_string())
        );
        assert_eq!(
            parse_config_arg(args(&["-c", "prod.yaml"])),
            Some("prod.yaml".to_string())
        );
        assert_eq!(
            parse_config_arg(args(&["--config=prod.yaml"])),
            Some("prod.yaml".to_string())
        );
        assert_eq!(
            parse_config_arg(args(&["prod.yaml"])),
            Some("prod.yaml".to_string())
        );
        assert_eq!(parse_config_arg(args(&["--config"])), None);
        assert_eq!(parse_config_arg(args(&["--verbose"])), None);
    }
}
