//! Domain logic for municipal election tallying.
//!
//! This crate has no internal dependencies and no I/O beyond image
//! transcoding, so it can be shared by the repository layer, the HTTP server
//! and any future tooling.

pub mod acta;
pub mod ballot;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod navigator;
pub mod roles;
pub mod storage;
pub mod tally;
pub mod text;
pub mod types;
