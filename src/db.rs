use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

pub async fn init_db(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
}

/// Pool that only dials the server once a query runs. Handlers that fail
/// validation never touch it; the rest give up quickly without a server.
#[cfg(test)]
pub fn lazy_pool(config: &Config) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy(&config.database_url)
        .expect("test database url must parse")
}
