use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("session with start_time {0} already processed; re-run with --overwrite")]
    DuplicateSession(String),

    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),

    #[error("pool build error: {0}")]
    PoolBuild(#[from] deadpool_postgres::BuildError),
}
