//! Author metadata and the provider seam the renderers read it through.
//!
//! Metadata is resolved before rendering. Renderers never fetch it
//! themselves; they receive an [`AuthorMetadata`] from whichever
//! [`MetadataProvider`] the caller wires in.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Author information shown on every post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorMetadata {
    /// Display name of the author.
    #[serde(default)]
    pub author: String,

    /// Social accounts.
    #[serde(default)]
    pub social: Social,
}

/// Social account handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    /// Twitter handle without the leading `@`. Not validated.
    #[serde(default)]
    pub twitter: String,
}

impl AuthorMetadata {
    /// Create metadata from an author name and Twitter handle.
    pub fn new(author: impl Into<String>, twitter: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            social: Social {
                twitter: twitter.into(),
            },
        }
    }

    /// Check that every field a bio needs is present.
    pub fn validate(&self) -> Result<()> {
        if self.author.trim().is_empty() {
            return Err(CoreError::MissingField("author"));
        }
        if self.social.twitter.trim().is_empty() {
            return Err(CoreError::MissingField("social.twitter"));
        }
        Ok(())
    }
}

/// Source of resolved site metadata.
pub trait MetadataProvider {
    /// Return the site's author metadata.
    fn site_metadata(&self) -> Result<AuthorMetadata>;
}

/// Provider that always returns the same metadata.
#[derive(Debug, Clone)]
pub struct StaticMetadata(pub AuthorMetadata);

impl MetadataProvider for StaticMetadata {
    fn site_metadata(&self) -> Result<AuthorMetadata> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_complete_metadata() {
        let meta = AuthorMetadata::new("Jane Doe", "janedoe");
        assert!(meta.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_author() {
        let meta = AuthorMetadata::new("  ", "janedoe");
        let err = meta.validate().unwrap_err();
        assert!(matches!(err, CoreError::MissingField("author")));
    }

    #[test]
    fn test_validate_missing_twitter() {
        let meta = AuthorMetadata::new("Jane Doe", "");
        let err = meta.validate().unwrap_err();
        assert!(matches!(err, CoreError::MissingField("social.twitter")));
    }

    #[test]
    fn test_twitter_handle_passes_through() {
        let meta = AuthorMetadata::new("Jane Doe", "@janedoe");
        assert!(meta.validate().is_ok());
        assert_eq!(meta.social.twitter, "@janedoe");
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticMetadata(AuthorMetadata::new("Jane Doe", "janedoe"));
        let meta = provider.site_metadata().expect("metadata");
        assert_eq!(meta.author, "Jane Doe");
        assert_eq!(meta.social.twitter, "janedoe");
    }
}
