//! zbib-core: bibliography store and Zotero translation-server client
//!
//! This crate maintains an in-memory, optionally persisted collection of
//! bibliographic items in the Zotero schema and drives the
//! translation-server protocol that resolves URLs and identifiers into
//! items:
//! - Free-text date parsing into structured dates
//! - Zotero item → CSL-JSON conversion, recomputed on every mutation
//! - Snapshot persistence through a pluggable key/value backend
//! - URL/identifier translation, including the HTTP 300 "multiple
//!   choices" follow-up, and server-side export
//!
//! The top-level entry point is [`Bib`], built from a [`BibConfig`].

pub mod bib;
pub mod client;
pub mod csl;
pub mod dates;
pub mod error;
pub mod http;
pub mod storage;
pub mod store;

pub use bib::{Bib, BibConfig, DEFAULT_STORAGE_PREFIX, DEFAULT_TRANSLATION_SERVER_URL};
pub use client::{
    interpret_translation_response, is_exportable, TranslationClient, TranslationResult,
};
pub use csl::to_csl;
pub use dates::parse_date;
pub use error::{Error, Result};
pub use http::{HttpResponse, ReqwestTransport, Transport};
pub use storage::{ItemStorage, MemoryStorage, StorageAdapter, StorageError};
pub use store::ItemStore;

// Re-export the domain types so callers need only one crate
pub use zbib_domain::{
    CatalogItem, Creator, CreatorName, CslDate, CslItem, CslName, StructuredDate,
};
