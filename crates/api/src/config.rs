use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Comma-separated list of allowed CORS origins.
    /// If empty or unset, defaults to common development origins.
    pub cors_origins: Vec<String>,
    /// Key space for `pg_advisory_xact_lock`, so this service's per-draft
    /// locks never collide with advisory locks taken by an unrelated
    /// process sharing the database.
    pub advisory_lock_namespace: i32,
    /// How often the tick scheduler scans for expired pick deadlines.
    pub tick_cadence_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_advisory_lock_namespace() -> i32 {
    // Arbitrary but fixed so locks survive process restarts.
    0x4452_4654 // "DRFT" in ASCII, packed into an i32
}

fn default_tick_cadence_seconds() -> u64 {
    5
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let host = std::env::var("API_HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("API_PORT")
            .unwrap_or_else(|_| default_port().to_string())
            .parse()
            .expect("API_PORT must be a valid number");

        let cors_origins = std::env::var("CORS_ORIGINS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:3000".to_string(),
                    "http://localhost:8080".to_string(),
                ]
            });

        let advisory_lock_namespace = std::env::var("ADVISORY_LOCK_NAMESPACE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_advisory_lock_namespace);

        let tick_cadence_seconds = std::env::var("TICK_CADENCE_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_tick_cadence_seconds);

        Ok(Config {
            server: ServerConfig { host, port },
            database: DatabaseConfig { url: database_url },
            cors_origins,
            advisory_lock_namespace,
            tick_cadence_seconds,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8000);
    }

    #[test]
    fn test_server_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
            },
            cors_origins: vec!["http://localhost:5173".to_string()],
            advisory_lock_namespace: default_advisory_lock_namespace(),
            tick_cadence_seconds: default_tick_cadence_seconds(),
        };

        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }
}
