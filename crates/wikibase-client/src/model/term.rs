//! Entity terms: labels, descriptions, and aliases, keyed by language.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::client::Client;
use crate::codec::record::TermRecord;
use crate::error::{EditError, Error};
use crate::model::EntityId;

/// Reads the confirmed term value out of a `wbsetlabel`/`wbsetdescription`
/// response.
fn confirmed_term<'a>(
    response: &'a serde_json::Value,
    group: &str,
    language: &str,
) -> Option<&'a str> {
    response
        .get("entity")?
        .get(group)?
        .get(language)?
        .get("value")?
        .as_str()
}

/// The labels of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    entity_id: EntityId,
    values: FxHashMap<String, String>,
}

impl Labels {
    pub(crate) fn empty(entity_id: EntityId) -> Labels {
        Labels {
            entity_id,
            values: FxHashMap::default(),
        }
    }

    pub(crate) fn from_terms(
        entity_id: EntityId,
        terms: &FxHashMap<String, TermRecord>,
    ) -> Labels {
        Labels {
            entity_id,
            values: terms
                .iter()
                .map(|(lang, term)| (lang.clone(), term.value.clone()))
                .collect(),
        }
    }

    /// The label in the given language, if any.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.values.get(language).map(String::as_str)
    }

    /// Updates the label, remotely then locally. `language` defaults to the
    /// client's language.
    pub fn set(
        &mut self,
        client: &Client,
        text: &str,
        language: Option<&str>,
    ) -> Result<(), Error> {
        let language = language.unwrap_or(client.language());
        let response = client
            .api()
            .label_set(self.entity_id, text, language)
            .map_err(|e| EditError::from_api("update label", e))?;

        if confirmed_term(&response, "labels", language) != Some(text) {
            return Err(EditError::UnexpectedResponse {
                operation: "update label",
                field: "labels",
            }
            .into());
        }

        debug!(entity_id = %self.entity_id, language, "updated label");
        self.values.insert(language.to_owned(), text.to_owned());
        Ok(())
    }

    pub fn to_dict(&self) -> &FxHashMap<String, String> {
        &self.values
    }
}

/// The descriptions of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptions {
    entity_id: EntityId,
    values: FxHashMap<String, String>,
}

impl Descriptions {
    pub(crate) fn empty(entity_id: EntityId) -> Descriptions {
        Descriptions {
            entity_id,
            values: FxHashMap::default(),
        }
    }

    pub(crate) fn from_terms(
        entity_id: EntityId,
        terms: &FxHashMap<String, TermRecord>,
    ) -> Descriptions {
        Descriptions {
            entity_id,
            values: terms
                .iter()
                .map(|(lang, term)| (lang.clone(), term.value.clone()))
                .collect(),
        }
    }

    /// The description in the given language, if any.
    pub fn get(&self, language: &str) -> Option<&str> {
        self.values.get(language).map(String::as_str)
    }

    /// Updates the description, remotely then locally. `language` defaults
    /// to the client's language.
    pub fn set(
        &mut self,
        client: &Client,
        text: &str,
        language: Option<&str>,
    ) -> Result<(), Error> {
        let language = language.unwrap_or(client.language());
        let response = client
            .api()
            .description_set(self.entity_id, text, language)
            .map_err(|e| EditError::from_api("update description", e))?;

        if confirmed_term(&response, "descriptions", language) != Some(text) {
            return Err(EditError::UnexpectedResponse {
                operation: "update description",
                field: "descriptions",
            }
            .into());
        }

        debug!(entity_id = %self.entity_id, language, "updated description");
        self.values.insert(language.to_owned(), text.to_owned());
        Ok(())
    }

    pub fn to_dict(&self) -> &FxHashMap<String, String> {
        &self.values
    }
}

/// The aliases of one entity: any number per language.
#[derive(Debug, Clone, PartialEq)]
pub struct Aliases {
    entity_id: EntityId,
    values: FxHashMap<String, Vec<String>>,
}

impl Aliases {
    pub(crate) fn empty(entity_id: EntityId) -> Aliases {
        Aliases {
            entity_id,
            values: FxHashMap::default(),
        }
    }

    pub(crate) fn from_terms(
        entity_id: EntityId,
        terms: &FxHashMap<String, Vec<TermRecord>>,
    ) -> Aliases {
        Aliases {
            entity_id,
            values: terms
                .iter()
                .map(|(lang, list)| {
                    (
                        lang.clone(),
                        list.iter().map(|term| term.value.clone()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// The aliases in the given language.
    pub fn get(&self, language: &str) -> &[String] {
        self.values
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Adds an alias, remotely then locally. `language` defaults to the
    /// client's language.
    pub fn add(
        &mut self,
        client: &Client,
        alias: &str,
        language: Option<&str>,
    ) -> Result<(), Error> {
        let language = language.unwrap_or(client.language());
        let response = client
            .api()
            .alias_add(self.entity_id, alias, language)
            .map_err(|e| EditError::from_api("add alias", e))?;

        self.refresh_from(&response, "add alias")?;
        debug!(entity_id = %self.entity_id, language, alias, "added alias");
        Ok(())
    }

    /// Removes an alias, remotely then locally. `language` defaults to the
    /// client's language.
    pub fn remove(
        &mut self,
        client: &Client,
        alias: &str,
        language: Option<&str>,
    ) -> Result<(), Error> {
        let language = language.unwrap_or(client.language());
        let response = client
            .api()
            .alias_remove(self.entity_id, alias, language)
            .map_err(|e| EditError::from_api("remove alias", e))?;

        if response.get("success").is_none() {
            return Err(EditError::UnexpectedResponse {
                operation: "remove alias",
                field: "success",
            }
            .into());
        }

        if let Some(list) = self.values.get_mut(language) {
            list.retain(|a| a != alias);
            if list.is_empty() {
                self.values.remove(language);
            }
        }
        debug!(entity_id = %self.entity_id, language, alias, "removed alias");
        Ok(())
    }

    /// Replaces the affected languages with the server's returned alias
    /// map; the response is authoritative after a successful edit.
    fn refresh_from(
        &mut self,
        response: &serde_json::Value,
        operation: &'static str,
    ) -> Result<(), Error> {
        let aliases = response
            .get("entity")
            .and_then(|entity| entity.get("aliases"))
            .ok_or(EditError::UnexpectedResponse {
                operation,
                field: "aliases",
            })?;

        let terms: FxHashMap<String, Vec<TermRecord>> = serde_json::from_value(aliases.clone())
            .map_err(|_| EditError::UnexpectedResponse {
                operation,
                field: "aliases",
            })?;

        for (lang, list) in &terms {
            self.values.insert(
                lang.clone(),
                list.iter().map(|term| term.value.clone()).collect(),
            );
        }
        Ok(())
    }

    pub fn to_dict(&self) -> &FxHashMap<String, Vec<String>> {
        &self.values
    }
}
