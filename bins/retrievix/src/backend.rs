//! Item store selection and per-run settings.

use crate::OutputFormat;
use anyhow::Context as _;
use retrievix_api_client::{ClientConfig, HttpItemStore, RetrievixClient};
use retrievix_core::config::Config;
use retrievix_match::MatchConfig;
use retrievix_store::{MatchService, MemoryStore};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Settings every command reads.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub format: OutputFormat,
    pub per_page: usize,
    /// Draw spinners around remote calls
    pub spinner: bool,
}

impl Context {
    pub fn new(config: &Config, format: OutputFormat, remote: bool) -> Self {
        Self {
            format,
            per_page: config.schema.browse.items_per_page,
            spinner: remote && format == OutputFormat::Text && std::io::stderr().is_terminal(),
        }
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// The store a command runs against.
pub enum Backend {
    /// JSON snapshot, written back after changes
    Local {
        service: MatchService<MemoryStore>,
        path: PathBuf,
    },
    Remote(MatchService<HttpItemStore>),
}

impl Backend {
    /// `--remote` wins; otherwise `--data`, then `[store] data_file`.
    /// A snapshot path that does not exist yet starts an empty store.
    pub async fn open(config: &Config, data: Option<&Path>, remote: bool) -> anyhow::Result<Self> {
        let matching = &config.schema.matching;
        let match_config =
            MatchConfig::new(matching.threshold, matching.max_suggestions, matching.max_similar)?;
        let fetch_timeout = Duration::from_secs(config.schema.store.fetch_timeout_secs);

        if remote {
            let store = HttpItemStore::new(remote_client(config)?);
            info!(base_url = %store.client().base_url(), "using remote item service");
            let service = MatchService::new(store)
                .with_config(match_config)
                .with_fetch_timeout(fetch_timeout);
            return Ok(Self::Remote(service));
        }

        let path = data
            .map(Path::to_path_buf)
            .or_else(|| config.schema.store.data_file.as_deref().map(PathBuf::from))
            .ok_or_else(|| {
                retrievix_core::Error::config("no item store selected").with_suggestion(
                    "pass --data <file>, set [store] data_file, or use --remote",
                )
            })?;

        let store = if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            MemoryStore::from_json_file(&path).await?
        } else {
            info!(path = %path.display(), "snapshot does not exist yet, starting empty");
            MemoryStore::new()
        };

        let service = MatchService::new(store)
            .with_config(match_config)
            .with_fetch_timeout(fetch_timeout);
        Ok(Self::Local { service, path })
    }
}

/// HTTP client from the `[api]` section and `RETRIEVIX_*` variables.
pub fn remote_client(config: &Config) -> anyhow::Result<RetrievixClient> {
    let client_config = ClientConfig::from_api_config(&config.schema.api)?;
    RetrievixClient::with_config(client_config).context("building HTTP client")
}
