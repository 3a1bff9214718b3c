//! Client handle: transport plus resolved configuration.

use crate::api::ApiClient;
use crate::config::Config;

/// A connected Wikibase client.
///
/// Owns the transport and the deployment configuration. The object model
/// takes a `&Client` on every remote operation; nothing is resolved through
/// globals.
pub struct Client {
    api: Box<dyn ApiClient>,
    config: Config,
}

impl Client {
    pub fn new(api: impl ApiClient + 'static, config: Config) -> Client {
        Client {
            api: Box::new(api),
            config,
        }
    }

    pub fn api(&self) -> &dyn ApiClient {
        self.api.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default language for terms and searches.
    pub fn language(&self) -> &str {
        &self.config.language
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
