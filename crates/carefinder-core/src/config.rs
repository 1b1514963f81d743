use crate::app_config::{AppConfig, Environment, MatcherKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or the matcher selection
/// is inconsistent (embedding matcher without an endpoint).
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or the matcher selection
/// is inconsistent.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("CAREFINDER_ENV", "development"));
    let log_level = or_default("CAREFINDER_LOG_LEVEL", "info");

    let catalog_url = or_default(
        "CAREFINDER_CATALOG_URL",
        "https://providencekyruus.azurewebsites.net/api/searchlocationsbyservices",
    );
    let catalog_request_timeout_secs = parse_u64("CAREFINDER_CATALOG_TIMEOUT_SECS", "10")?;
    let catalog_user_agent = or_default("CAREFINDER_CATALOG_USER_AGENT", "carefinder/0.1 (triage)");
    let catalog_max_retries = parse_u32("CAREFINDER_CATALOG_MAX_RETRIES", "2")?;
    let catalog_retry_backoff_base_secs =
        parse_u64("CAREFINDER_CATALOG_RETRY_BACKOFF_BASE_SECS", "1")?;

    let zip_table_path = PathBuf::from(or_default(
        "CAREFINDER_ZIP_TABLE_PATH",
        "./config/zip_coords.json",
    ));
    let result_limit = parse_usize("CAREFINDER_RESULT_LIMIT", "7")?;

    let matcher = parse_matcher(&or_default("CAREFINDER_MATCHER", "keyword"));
    let embedding_url = lookup("CAREFINDER_EMBEDDING_URL").ok();

    if matcher == MatcherKind::Embedding && embedding_url.is_none() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CAREFINDER_MATCHER".to_string(),
            reason: "embedding matcher requires CAREFINDER_EMBEDDING_URL".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        catalog_url,
        catalog_request_timeout_secs,
        catalog_user_agent,
        catalog_max_retries,
        catalog_retry_backoff_base_secs,
        zip_table_path,
        result_limit,
        matcher,
        embedding_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Parse a string into a `MatcherKind`.
///
/// Unrecognized values default to the keyword matcher; the engine must never
/// fail to start over a matcher typo.
fn parse_matcher(s: &str) -> MatcherKind {
    match s {
        "embedding" | "semantic" => MatcherKind::Embedding,
        _ => MatcherKind::Keyword,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_variants() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn parse_matcher_variants() {
        assert_eq!(parse_matcher("keyword"), MatcherKind::Keyword);
        assert_eq!(parse_matcher("embedding"), MatcherKind::Embedding);
        assert_eq!(parse_matcher("semantic"), MatcherKind::Embedding);
        assert_eq!(parse_matcher("typo"), MatcherKind::Keyword);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.catalog_request_timeout_secs, 10);
        assert_eq!(cfg.catalog_max_retries, 2);
        assert_eq!(cfg.catalog_retry_backoff_base_secs, 1);
        assert_eq!(cfg.result_limit, 7);
        assert_eq!(cfg.matcher, MatcherKind::Keyword);
        assert!(cfg.embedding_url.is_none());
        assert!(cfg.catalog_url.contains("searchlocationsbyservices"));
    }

    #[test]
    fn build_app_config_overrides_catalog_url() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CAREFINDER_CATALOG_URL", "http://localhost:9000/locations");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.catalog_url, "http://localhost:9000/locations");
    }

    #[test]
    fn build_app_config_rejects_invalid_timeout() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CAREFINDER_CATALOG_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAREFINDER_CATALOG_TIMEOUT_SECS"),
            "expected InvalidEnvVar(CAREFINDER_CATALOG_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_invalid_result_limit() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CAREFINDER_RESULT_LIMIT", "-3");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAREFINDER_RESULT_LIMIT"),
            "expected InvalidEnvVar(CAREFINDER_RESULT_LIMIT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_embedding_requires_url() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CAREFINDER_MATCHER", "embedding");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAREFINDER_MATCHER"),
            "expected InvalidEnvVar(CAREFINDER_MATCHER), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_embedding_with_url() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CAREFINDER_MATCHER", "embedding");
        map.insert("CAREFINDER_EMBEDDING_URL", "http://localhost:8080");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.matcher, MatcherKind::Embedding);
        assert_eq!(cfg.embedding_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn build_app_config_zip_table_path_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CAREFINDER_ZIP_TABLE_PATH", "/data/zips.json");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.zip_table_path.to_str(), Some("/data/zips.json"));
    }
}
