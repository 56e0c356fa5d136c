//! Folio Core Library
//!
//! Core types, configuration, and error handling for the Folio blog toolkit.

pub mod config;
pub mod error;
pub mod metadata;

pub use config::{BioConfig, BioVariant, Config, Environment};
pub use error::{CoreError, Result};
pub use metadata::{AuthorMetadata, MetadataProvider, Social, StaticMetadata};
