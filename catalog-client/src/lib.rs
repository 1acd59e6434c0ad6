//! Catalog Client - HTTP client for the remote catalog service
//!
//! Provides network-based HTTP calls to the catalog REST API and the
//! external geography lookup API.

pub mod backend;
pub mod config;
pub mod error;
pub mod geo;
pub mod http;

pub use backend::{CatalogBackend, RemoteBackend};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use geo::GeoClient;
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::changes::{ChangeOp, ChangeSet, SubmitOutcome};
