//! Connection pool construction, the one piece of runtime configuration
//! the write pipeline needs: a single Postgres connection string.

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

use crate::error::Result;

pub fn build_pool(database_url: &str) -> Result<Pool> {
    let pg_config: tokio_postgres::Config = database_url.parse()?;
    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let manager = Manager::from_config(pg_config, NoTls, mgr_config);
    let pool = Pool::builder(manager)
        .runtime(Runtime::Tokio1)
        .max_size(16)
        .build()?;
    Ok(pool)
}
