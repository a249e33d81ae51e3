//! Configuration for the reset worker

use core_config::{
    app_info, env_optional, env_or_default, env_parse, server::ServerConfig, AppInfo, ConfigError,
    Environment, FromEnv,
};
use database::postgres::PostgresConfig;
use std::time::Duration;

/// Five past midnight UTC, every day
pub const DEFAULT_CRON: &str = "0 5 0 * * *";

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub reset: ResetConfig,
    /// Apply pending migrations before doing anything else
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            reset: ResetConfig::from_env()?,
            run_migrations: env_parse("RUN_MIGRATIONS", false)?,
        })
    }
}

/// Knobs for the reset run itself
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetConfig {
    /// Shared secret for `POST /reset`; the endpoint is open when unset
    pub trigger_token: Option<String>,
    pub deadline: Option<Duration>,
    pub concurrency: usize,
    pub cron: String,
    /// Persist one `reset_executions` row per run
    pub audit_log: bool,
}

impl FromEnv for ResetConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let deadline = match env_optional("RESET_DEADLINE_SECS") {
            Some(_) => Some(Duration::from_secs(env_parse("RESET_DEADLINE_SECS", 0u64)?)),
            None => None,
        };

        let concurrency = env_parse("RESET_CONCURRENCY", 1usize)?;
        if concurrency == 0 {
            return Err(ConfigError::ParseError {
                key: "RESET_CONCURRENCY".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            trigger_token: env_optional("RESET_TRIGGER_TOKEN"),
            deadline,
            concurrency,
            cron: env_or_default("RESET_CRON", DEFAULT_CRON),
            audit_log: env_parse("RESET_AUDIT_LOG", true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESET_VARS: [&str; 5] = [
        "RESET_TRIGGER_TOKEN",
        "RESET_DEADLINE_SECS",
        "RESET_CONCURRENCY",
        "RESET_CRON",
        "RESET_AUDIT_LOG",
    ];

    #[test]
    fn test_reset_config_defaults() {
        temp_env::with_vars_unset(RESET_VARS, || {
            let config = ResetConfig::from_env().unwrap();
            assert_eq!(
                config,
                ResetConfig {
                    trigger_token: None,
                    deadline: None,
                    concurrency: 1,
                    cron: DEFAULT_CRON.to_string(),
                    audit_log: true,
                }
            );
        });
    }

    #[test]
    fn test_reset_config_custom_values() {
        temp_env::with_vars(
            [
                ("RESET_TRIGGER_TOKEN", Some("s3cret")),
                ("RESET_DEADLINE_SECS", Some("90")),
                ("RESET_CONCURRENCY", Some("4")),
                ("RESET_CRON", Some("0 0 1 * * *")),
                ("RESET_AUDIT_LOG", Some("false")),
            ],
            || {
                let config = ResetConfig::from_env().unwrap();
                assert_eq!(config.trigger_token.as_deref(), Some("s3cret"));
                assert_eq!(config.deadline, Some(Duration::from_secs(90)));
                assert_eq!(config.concurrency, 4);
                assert_eq!(config.cron, "0 0 1 * * *");
                assert!(!config.audit_log);
            },
        );
    }

    #[test]
    fn test_blank_token_leaves_trigger_open() {
        temp_env::with_var("RESET_TRIGGER_TOKEN", Some("   "), || {
            assert_eq!(ResetConfig::from_env().unwrap().trigger_token, None);
        });
    }

    #[test]
    fn test_reset_config_rejects_bad_values() {
        for (key, value) in [
            ("RESET_CONCURRENCY", "0"),
            ("RESET_CONCURRENCY", "many"),
            ("RESET_DEADLINE_SECS", "-5"),
            ("RESET_AUDIT_LOG", "sometimes"),
        ] {
            temp_env::with_var(key, Some(value), || {
                let err = ResetConfig::from_env().unwrap_err();
                assert!(err.to_string().contains(key), "{key}={value}");
            });
        }
    }
}
