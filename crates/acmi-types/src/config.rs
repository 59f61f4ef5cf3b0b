use serde::{Deserialize, Serialize};

/// Run configuration shared between the consumer loop and the bulk writer.
///
/// Built by `clap` in the `acmi-ingest` binary; kept here so `acmi-core`
/// and `acmi-db` can take it by reference without depending on `clap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub host: String,
    pub port: u16,
    pub client_name: String,
    pub client_password: String,
    pub batch_size: usize,
    pub max_iters: Option<u64>,
    pub overwrite: bool,
    pub database_url: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            host: "127.0.0.1".to_string(),
            port: 42_674,
            client_name: "acmi-ingest".to_string(),
            client_password: "0".to_string(),
            batch_size: 500_000,
            max_iters: None,
            overwrite: false,
            database_url: "postgresql://localhost:5432/acmi".to_string(),
        }
    }
}
