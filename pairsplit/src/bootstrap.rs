use pairsplit_domain::{AggregationOptions, MemberId, OrphanPolicy, RoundingMode};
use std::env;
use tracing_subscriber::EnvFilter;

const ROUNDING_KEY: &str = "PAIRSPLIT_ROUNDING";
const ORPHAN_POLICY_KEY: &str = "PAIRSPLIT_ORPHAN_POLICY";
const VIEWER_KEY: &str = "PAIRSPLIT_VIEWER";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid; expected one of {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settlement options and the viewer whose row actions are shown.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub options: AggregationOptions,
    pub viewer: Option<MemberId>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let rounding_mode = match lookup(ROUNDING_KEY).as_deref().map(str::trim) {
            None | Some("") | Some("half_up") => RoundingMode::HalfUp,
            Some("half_even") => RoundingMode::HalfEven,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: ROUNDING_KEY,
                    value: other.to_string(),
                    expected: "half_up, half_even",
                });
            }
        };

        let orphan_policy = match lookup(ORPHAN_POLICY_KEY).as_deref().map(str::trim) {
            None | Some("") | Some("reject") => OrphanPolicy::Reject,
            Some("ignore") => OrphanPolicy::Ignore,
            Some("guest") => OrphanPolicy::IncludeAsGuest,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: ORPHAN_POLICY_KEY,
                    value: other.to_string(),
                    expected: "reject, ignore, guest",
                });
            }
        };

        let viewer = lookup(VIEWER_KEY)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(MemberId::new);

        Ok(Self {
            options: AggregationOptions {
                rounding_mode,
                orphan_policy,
            },
            viewer,
        })
    }
}

/// Logs go to stderr so stdout only carries the rendered tables.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), Ok(AppConfig::default()));
    }

    #[rstest]
    #[case::half_even(&[(ROUNDING_KEY, "half_even")], RoundingMode::HalfEven, OrphanPolicy::Reject)]
    #[case::ignore(&[(ORPHAN_POLICY_KEY, "ignore")], RoundingMode::HalfUp, OrphanPolicy::Ignore)]
    #[case::guest_padded(&[(ORPHAN_POLICY_KEY, " guest ")], RoundingMode::HalfUp, OrphanPolicy::IncludeAsGuest)]
    #[case::blank_is_default(&[(ROUNDING_KEY, ""), (ORPHAN_POLICY_KEY, "")], RoundingMode::HalfUp, OrphanPolicy::Reject)]
    fn reads_options(
        #[case] vars: &[(&str, &str)],
        #[case] rounding_mode: RoundingMode,
        #[case] orphan_policy: OrphanPolicy,
    ) {
        let config = config_from(vars).expect("valid config");
        assert_eq!(
            config.options,
            AggregationOptions {
                rounding_mode,
                orphan_policy,
            }
        );
    }

    #[rstest]
    #[case::rounding(ROUNDING_KEY, "bankers")]
    #[case::orphan_policy(ORPHAN_POLICY_KEY, "drop")]
    fn rejects_unknown_values(#[case] key: &'static str, #[case] value: &str) {
        let ConfigError::InvalidValue {
            key: actual_key,
            value: actual_value,
            ..
        } = config_from(&[(key, value)]).expect_err("invalid value");
        assert_eq!(actual_key, key);
        assert_eq!(actual_value, value);
    }

    #[rstest]
    #[case::set(Some("uid-aki"), Some("uid-aki"))]
    #[case::blank(Some("  "), None)]
    #[case::unset(None, None)]
    fn reads_viewer(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let vars: Vec<(&str, &str)> = raw.map(|value| (VIEWER_KEY, value)).into_iter().collect();
        let config = config_from(&vars).expect("valid config");
        assert_eq!(config.viewer, expected.map(MemberId::new));
    }
}
