pub const LOG_ENV: &str = "ARB_CORE_LOG";
pub const FLUTTER_ENV: &str = "ARB_CORE_FLUTTER";

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_FLUTTER_PROGRAM: &str = "flutter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// `tracing` filter directive (e.g. `info`, `arb_core=debug`).
    pub log_filter: String,

    /// Executable invoked for `gen-l10n`.
    pub flutter_program: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            flutter_program: DEFAULT_FLUTTER_PROGRAM.to_string(),
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Blank values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            log_filter: pick(LOG_ENV, DEFAULT_LOG_FILTER),
            flutter_program: pick(FLUTTER_ENV, DEFAULT_FLUTTER_PROGRAM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = CoreConfig::from_lookup(|_| None);
        assert_eq!(cfg, CoreConfig::default());
        assert_eq!(cfg.flutter_program, "flutter");
    }

    #[test]
    fn reads_overrides_and_ignores_blank() {
        let cfg = CoreConfig::from_lookup(|name| match name {
            LOG_ENV => Some("arb_core=debug".to_string()),
            FLUTTER_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(cfg.log_filter, "arb_core=debug");
        assert_eq!(cfg.flutter_program, "flutter");
    }
}
