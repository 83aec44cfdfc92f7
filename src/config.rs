use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Station served to clients that have not picked one yet
    pub default_station: String,

    pub db_max_connections: u32,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let server_addr = match env::var("SERVER_ADDR") {
            Ok(addr) => addr,
            Err(_) => {
                let port: u16 = env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?;
                format!("0.0.0.0:{}", port)
            }
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr,
            default_station: env::var("DEFAULT_STATION")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Vaishali".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/station_ops_test".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            default_station: "Vaishali".to_string(),
            db_max_connections: 1,
            log_dir: "logs".to_string(),
        }
    }
}
