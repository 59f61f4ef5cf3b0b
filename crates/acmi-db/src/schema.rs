//! Fixed schema bootstrap. Not a declarative generator — just the one
//! migration this write pipeline requires to exist, applied once for
//! local development and integration tests.

use deadpool_postgres::GenericClient;

use crate::error::Result;

pub const SCHEMA_SQL: &str = include_str!("../migrations/0001_schema.sql");

pub async fn apply(client: &impl GenericClient) -> Result<()> {
    client.batch_execute(SCHEMA_SQL).await?;
    Ok(())
}
