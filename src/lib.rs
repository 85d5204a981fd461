//! # idaru
//!
//! Groups candidate URLs into a scheme/domain/path sitemap and rewrites their
//! query strings in bulk.
//!
//! ## Architecture
//!
//! - **validate**: Coarse URL-shape check, with an optional `?key=` requirement
//! - **decompose**: Permissive split of a URL into scheme, domain, path, query and fragment
//! - **sitemap**: Typed scheme → domain → path → queries tree
//! - **query**: Add, set and merge operations over raw query strings
//! - **render**: Flat lines, indented tree and JSON output
//! - **input**: Input source discovery, spool file ingestion and read-back
//! - **cli**: Command-line surface and legacy flag rewriting
//! - **config**: Output and spool location resolution
//! - **logging**: Opt-in `tracing` subscriber
//! - **error**: Fatal error taxonomy

pub mod cli;
pub mod config;
pub mod decompose;
pub mod error;
pub mod input;
pub mod logging;
pub mod query;
pub mod render;
pub mod sitemap;
pub mod validate;
