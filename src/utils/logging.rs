//! Logging helpers
//!
//! Subscriber setup plus the few banner/formatting helpers used across the app.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks debug or info for this crate.
///
/// # Arguments
/// - `verbose`: default to debug output for this crate and tower-http
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "table_comparator=debug,tower_http=debug,info"
    } else {
        "table_comparator=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

/// Log startup information
///
/// # Arguments
/// - `config`: effective configuration; the API key is never printed
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Table comparator starting");
    info!("🌐 Listening on: {}", config.bind_addr);
    info!("📁 Upload folder: {}", config.upload_folder);
    info!(
        "🤖 Model: {} (timeout: {}s)",
        config.llm_model_name, config.llm_timeout_secs
    );
    info!("{}", "=".repeat(60));
}

/// Truncate long text for log display
///
/// # Arguments
/// - `text`: original text
/// - `max_len`: maximum number of characters kept
///
/// # Returns
/// The text itself, or its first `max_len` characters followed by `...`
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("relatório", 20), "relatório");
        assert_eq!(truncate_text("relatório completo", 9), "relatório...");
    }
}
