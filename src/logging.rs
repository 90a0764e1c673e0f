//! Tracing subscriber setup.
//!
//! Logs always go to stderr so stdout stays clean for reports and exports.

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_FILTER: &str = "eu_indicators=info";

/// The TUI owns the terminal; only warnings and errors get through.
pub const TUI_FILTER: &str = "eu_indicators=warn";

/// Install the global subscriber. Safe to call more than once.
///
/// Precedence: explicit `--log-level` / `EUDASH_LOG`, then `RUST_LOG`, then
/// the mode default.
pub fn init(level: Option<&str>, tui: bool) {
    let filter = build_filter(level, tui);
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_filter(level: Option<&str>, tui: bool) -> EnvFilter {
    let fallback = if tui { TUI_FILTER } else { DEFAULT_FILTER };
    match level {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(fallback)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_wins() {
        let filter = build_filter(Some("eu_indicators=debug"), true);
        assert_eq!(filter.to_string(), "eu_indicators=debug");
    }

    #[test]
    fn invalid_level_falls_back_to_mode_default() {
        let filter = build_filter(Some("eu_indicators=loud"), true);
        assert_eq!(filter.to_string(), TUI_FILTER);
    }
}
