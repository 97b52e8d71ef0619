//! Route table access and POST path extraction.
//!
//! # Data Flow
//! ```text
//! route source (config TOML / JSON export file)
//!     → descriptor.rs (RouteDescriptor: methods + URI pattern)
//!     → extractor.rs (filter POST, strip placeholders, dedupe)
//!     → ordered set of path prefixes
//! ```
//!
//! # Design Decisions
//! - The route table is an external collaborator behind the RouteSource
//!   trait; only method set and URI pattern are consumed
//! - Extraction is a pure function for deterministic expressions

pub mod descriptor;
pub mod extractor;
pub mod source;

pub use descriptor::RouteDescriptor;
pub use extractor::post_path_prefixes;
pub use source::{JsonRouteSource, RouteSource, RouteSourceError, StaticRouteSource};
