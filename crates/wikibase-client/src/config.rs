//! Client configuration.

use serde::Deserialize;

use crate::model::EntityId;

/// Resolved configuration for a Wikibase deployment.
///
/// `api_url`, `summary`, and `is_bot` are consumed by transport
/// implementations; `base_url` and `language` are used by the object model
/// itself (quantity-unit URLs and default term language).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API endpoint URL.
    pub api_url: String,
    /// Concept base URL, the prefix of entity URLs. Varies per deployment.
    pub base_url: String,
    /// Default language for labels, descriptions, aliases, and searches.
    pub language: String,
    /// Edit summary attached to mutating calls.
    pub summary: String,
    /// Whether edits are marked as bot edits.
    pub is_bot: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            api_url: "https://www.wikidata.org/w/api.php".to_owned(),
            base_url: "http://www.wikidata.org".to_owned(),
            language: "en".to_owned(),
            summary: "Edited with wikibase-client".to_owned(),
            is_bot: false,
        }
    }
}

impl Config {
    /// Returns the fully-qualified entity URL for an ID
    /// (`"<base_url>/entity/Q7"`).
    pub fn entity_url(&self, id: EntityId) -> String {
        format!("{}/entity/{}", self.base_url.trim_end_matches('/'), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_url_from_config() {
        let mut config = Config::default();
        config.base_url = "http://localhost:8181/".to_owned();
        assert_eq!(
            config.entity_url(EntityId::item(7)),
            "http://localhost:8181/entity/Q7"
        );
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"base_url": "https://kb.example.org"}"#).unwrap();
        assert_eq!(config.base_url, "https://kb.example.org");
        assert_eq!(config.language, "en");
    }
}
