//! Domain types shared across the zbib crates
//!
//! This crate provides the canonical models for the bibliography client:
//! - CatalogItem: a bibliographic record in the Zotero item schema
//! - Creator: an author/editor/etc., personal or institutional
//! - CslItem, CslName, CslDate: the CSL-JSON projection of a CatalogItem
//! - StructuredDate: a free-text date broken into year/month/day

pub mod csl;
pub mod date;
pub mod item;

pub use csl::*;
pub use date::*;
pub use item::*;
