use core_config::{AppInfo, FromEnv, app_info, env_parse, security::SecurityConfig, server::ServerConfig};
use core_i18n::I18nConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub security: SecurityConfig,
    pub i18n: I18nConfig,
    /// Apply pending migrations before serving (RUN_MIGRATIONS, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let security = SecurityConfig::from_env()?;
        let i18n = I18nConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            security,
            i18n,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/hub")),
                ("APP_ENV", None),
                ("PORT", None),
                ("RUN_MIGRATIONS", None),
                ("SECURITY_TOKEN_EXPIRATION_SECS", None),
                ("DEFAULT_LOCALE", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "hub_api");
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.url(), "postgresql://localhost/hub");
                assert_eq!(config.security.token_expiration, Duration::from_secs(3600));
                assert_eq!(config.i18n.default_locale.language_tag(), "en-US");
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_config_disables_migrations() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/hub")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                assert!(!Config::from_env().unwrap().run_migrations);
            },
        );
    }

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        });
    }
}
