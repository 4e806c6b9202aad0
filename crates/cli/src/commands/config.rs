use std::env;
use std::fs;
use std::path::Path;

use safari_core::config::{resolve_config_path, AppConfig, LoadOptions};
use serde::Serialize;
use serde_json::json;
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: String,
    pub source: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                EXIT_CONFIG,
            );
        }
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = config_file_path.as_deref().and_then(load_config_file_doc);
    let file_label = config_file_path.as_ref().map(|path| path.display().to_string());

    let entries = fields(&config)
        .into_iter()
        .map(|(key, value, env_keys)| ConfigEntry {
            key,
            value,
            source: field_source(key, env_keys, config_file_doc.as_ref(), file_label.as_deref()),
        })
        .collect::<Vec<_>>();

    CommandResult::success_with_data(
        "config",
        "effective config (source precedence: env > file > default)",
        json!({ "config_file": file_label, "entries": entries }),
    )
}

type Field = (&'static str, String, &'static [&'static str]);

fn fields(config: &AppConfig) -> Vec<Field> {
    let fields: [Field; 13] = [
        ("database.url", config.database.url.clone(), &["SAFARI_DATABASE_URL"]),
        (
            "database.max_connections",
            config.database.max_connections.to_string(),
            &["SAFARI_DATABASE_MAX_CONNECTIONS"],
        ),
        (
            "database.timeout_secs",
            config.database.timeout_secs.to_string(),
            &["SAFARI_DATABASE_TIMEOUT_SECS"],
        ),
        ("server.bind_address", config.server.bind_address.clone(), &["SAFARI_SERVER_BIND_ADDRESS"]),
        ("server.port", config.server.port.to_string(), &["SAFARI_SERVER_PORT"]),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            &["SAFARI_SERVER_GRACEFUL_SHUTDOWN_SECS"],
        ),
        (
            "server.allowed_origins",
            config.server.allowed_origins.join(","),
            &["SAFARI_SERVER_ALLOWED_ORIGINS"],
        ),
        (
            "pricing.child_discount_pct",
            config.pricing.child_discount_pct.to_string(),
            &["SAFARI_PRICING_CHILD_DISCOUNT_PCT"],
        ),
        (
            "pricing.resident_currency",
            config.pricing.resident_currency.clone(),
            &["SAFARI_PRICING_RESIDENT_CURRENCY"],
        ),
        (
            "pricing.non_resident_currency",
            config.pricing.non_resident_currency.clone(),
            &["SAFARI_PRICING_NON_RESIDENT_CURRENCY"],
        ),
        (
            "recommendations.max_results",
            config.recommendations.max_results.to_string(),
            &["SAFARI_RECOMMENDATIONS_MAX_RESULTS"],
        ),
        ("logging.level", config.logging.level.clone(), &["SAFARI_LOGGING_LEVEL", "SAFARI_LOG_LEVEL"]),
        (
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            &["SAFARI_LOGGING_FORMAT", "SAFARI_LOG_FORMAT"],
        ),
    ];
    Vec::from(fields)
}

fn load_config_file_doc(path: &Path) -> Option<Value> {
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_label: Option<&str>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            return format!("file ({})", config_file_label.unwrap_or("config file"));
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

#[cfg(test)]
mod tests {
    use toml::Value;

    use super::{contains_path, field_source};

    #[test]
    fn file_source_is_reported_for_keys_present_in_the_document() {
        let doc = "[pricing]\nchild_discount_pct = 25\n".parse::<Value>().expect("toml");

        assert!(contains_path(&doc, "pricing.child_discount_pct"));
        assert!(!contains_path(&doc, "pricing.resident_currency"));
        assert_eq!(
            field_source(
                "pricing.child_discount_pct",
                &["SAFARI_TEST_UNSET_CHILD_DISCOUNT"],
                Some(&doc),
                Some("safari.toml"),
            ),
            "file (safari.toml)"
        );
        assert_eq!(
            field_source("pricing.resident_currency", &[], Some(&doc), Some("safari.toml")),
            "default"
        );
    }
}
