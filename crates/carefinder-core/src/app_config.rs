use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which service-matching strategy the triage engine uses.
///
/// `Embedding` requires an embedding endpoint and always falls back to
/// `Keyword` on any internal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    Keyword,
    Embedding,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Upstream facility catalog endpoint returning `{"locations": [...]}`.
    pub catalog_url: String,
    pub catalog_request_timeout_secs: u64,
    pub catalog_user_agent: String,
    pub catalog_max_retries: u32,
    pub catalog_retry_backoff_base_secs: u64,
    /// Path to the precomputed ZIP→coordinate JSON dataset.
    pub zip_table_path: PathBuf,
    /// Maximum facilities returned per triage query.
    pub result_limit: usize,
    pub matcher: MatcherKind,
    /// Base URL of the embedding service, required when `matcher` is
    /// `Embedding`.
    pub embedding_url: Option<String>,
}
