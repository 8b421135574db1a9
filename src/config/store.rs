//! Store configuration loading from config.toml
//!
//! The configuration file seeds the catalog and the dashboard accounts on startup and
//! carries the assistant's persona and fallback messages. Every section is optional;
//! a missing `[assistant]` table falls back to the built-in defaults.

use crate::entities::Role;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    /// Products to seed into the catalog
    #[serde(default)]
    pub products: Vec<ProductConfig>,
    /// Dashboard accounts to seed
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    /// Assistant persona and fallback strings
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Configuration for a single catalog product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Floor price in whole currency units
    pub price: i64,
    /// Image URL; derived from the name when absent
    #[serde(default)]
    pub image: Option<String>,
    pub category: String,
}

/// Configuration for a single dashboard account
#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Display name
    pub name: String,
}

/// Persona and fallback strings for the text-completion assistant
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AssistantConfig {
    /// System instruction sent with every chat message
    pub persona: String,
    /// Returned when the chat collaborator replies with nothing
    pub chat_empty_reply: String,
    /// Returned when the chat collaborator fails
    pub chat_error_reply: String,
    /// Returned when description generation yields nothing
    pub description_empty_reply: String,
    /// Returned when description generation fails
    pub description_error_reply: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            persona: "You are a smart assistant for the Matjari online store. You help customers \
                      find products and answer their questions about cash on delivery. Speak in \
                      simple, friendly language."
                .to_string(),
            chat_empty_reply: "Sorry, I can't reply right now.".to_string(),
            chat_error_reply: "Sorry, I ran into a technical problem.".to_string(),
            description_empty_reply: "Failed to generate the description.".to_string(),
            description_error_reply: "An error occurred while contacting the assistant."
                .to_string(),
        }
    }
}

/// Loads store configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<StoreConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses store configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<StoreConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads store configuration from the path in `MATJARI_CONFIG`, or `./config.toml`.
pub fn load_default_config() -> Result<StoreConfig> {
    let path = std::env::var("MATJARI_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
