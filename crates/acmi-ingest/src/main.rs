mod cli;
mod consumer;

use acmi_types::RunConfig;
use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "acmi_ingest=info,acmi_core=info,acmi_db=info,info".into()
        }))
        .init();

    let args = cli::Args::parse();
    let initdb = args.initdb;
    let config: RunConfig = args.into();

    let pool = acmi_db::build_pool(&config.database_url).context("building connection pool")?;

    if initdb {
        let client = pool.get().await.context("acquiring connection for initdb")?;
        acmi_db::schema::apply(&client).await.context("applying schema")?;
        tracing::info!("schema applied");
    }

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = cancel_tx.send(true);
    });

    consumer::run(config, pool, cancel_rx).await
}
