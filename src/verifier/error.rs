use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use crate::utils;

#[derive(thiserror::Error)]
pub enum VerificationError {
    #[error("No element found for {0}")]
    ElementNotFound(String),

    #[error("Found {count} elements for {description}, expected exactly one")]
    AmbiguousElement { description: String, count: usize },

    #[error("{description} cannot be {action}")]
    NotInteractable {
        description: String,
        action: &'static str,
    },

    #[error("Step `{step}` did not complete within {timeout:?}")]
    VerificationTimeout {
        step: &'static str,
        timeout: Duration,
    },

    #[error("Expected the page title to match `{pattern}`, found `{actual}`")]
    TitleMismatch { pattern: String, actual: String },

    #[error("Failed to load {url}")]
    Navigation {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{0}` is not a valid URL")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("`{0}` is not a valid title pattern")]
    InvalidPattern(String, #[source] regex::Error),

    #[error("Failed to build the HTTP client")]
    Client(#[source] reqwest::Error),
}

impl Debug for VerificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}
