//! Input/output helpers.
//!
//! - header location (`header`), wide-table parsing (`table`)
//! - wide → long reshape (`reshape`) and value cleaning (`clean`)
//! - per-file pipeline (`ingest`) and directory scan (`loader`)
//! - tidy exports (CSV/JSON) (`export`)

pub mod clean;
pub mod export;
pub mod header;
pub mod ingest;
pub mod loader;
pub mod reshape;
pub mod table;

pub use export::*;
pub use ingest::*;
pub use loader::*;
