use acmi_types::RunConfig;
use clap::Parser;

/// Connect to a live or file-served ACMI telemetry stream and ingest it
/// into Postgres.
#[derive(Debug, Parser)]
#[command(name = "acmi-ingest", version)]
pub struct Args {
    /// Telemetry source host.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Telemetry source port.
    #[arg(long, default_value_t = 42_674)]
    pub port: u16,

    /// Client name presented during the handshake.
    #[arg(long, default_value = "acmi-ingest")]
    pub client_name: String,

    /// Client password presented during the handshake.
    #[arg(long, default_value = "0")]
    pub client_password: String,

    /// Events buffered before a promote flush is forced.
    #[arg(long, default_value_t = 500_000)]
    pub batch_size: usize,

    /// Stop after this many frames (mainly for bench/test runs).
    #[arg(long)]
    pub max_iters: Option<u64>,

    /// Delete a prior session row with the same start_time instead of
    /// failing with DuplicateSession.
    #[arg(long)]
    pub overwrite: bool,

    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Apply the fixed schema migration before connecting.
    #[arg(long)]
    pub initdb: bool,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        RunConfig {
            host: args.host,
            port: args.port,
            client_name: args.client_name,
            client_password: args.client_password,
            batch_size: args.batch_size,
            max_iters: args.max_iters,
            overwrite: args.overwrite,
            database_url: args.database_url,
        }
    }
}
