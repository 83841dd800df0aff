//! Top-level bibliography: item store + translation client

use crate::client::{TranslationClient, TranslationResult};
use crate::error::{Error, Result};
use crate::http::{ReqwestTransport, Transport};
use crate::storage::{ItemStorage, StorageAdapter};
use crate::store::ItemStore;
use std::collections::BTreeMap;
use tracing::debug;
use zbib_domain::{CatalogItem, CslItem};

/// Public translation server run by Zotero
pub const DEFAULT_TRANSLATION_SERVER_URL: &str = "https://translate.zotero.org";

/// Default namespace for persisted snapshots
pub const DEFAULT_STORAGE_PREFIX: &str = "zotero-bib";

/// Configuration for [`Bib`]. Builder-style; `BibConfig::default()` gives
/// a non-persisting bibliography against the public translation server.
pub struct BibConfig {
    pub storage: Option<Box<dyn ItemStorage>>,
    /// Defaults to true when a storage backend is provided
    pub persist: Option<bool>,
    pub storage_prefix: String,
    pub initial_items: Vec<CatalogItem>,
    /// When set, initial items replace a persisted snapshot instead of
    /// appending to it
    pub override_items: bool,
    pub translation_server_url: String,
    pub translation_server_prefix: String,
    pub transport: Option<Box<dyn Transport>>,
}

impl Default for BibConfig {
    fn default() -> Self {
        Self {
            storage: None,
            persist: None,
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            initial_items: Vec::new(),
            override_items: false,
            translation_server_url: DEFAULT_TRANSLATION_SERVER_URL.to_string(),
            translation_server_prefix: String::new(),
            transport: None,
        }
    }
}

impl BibConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, storage: impl ItemStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = Some(persist);
        self
    }

    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    pub fn with_initial_items(mut self, items: Vec<CatalogItem>) -> Self {
        self.initial_items = items;
        self
    }

    pub fn with_override_items(mut self, override_items: bool) -> Self {
        self.override_items = override_items;
        self
    }

    pub fn with_translation_server_url(mut self, url: impl Into<String>) -> Self {
        self.translation_server_url = url.into();
        self
    }

    pub fn with_translation_server_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.translation_server_prefix = prefix.into();
        self
    }

    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }
}

/// A bibliography: an optionally persisted item collection plus the
/// translation-server operations that feed it.
pub struct Bib {
    store: ItemStore,
    client: TranslationClient,
}

impl Bib {
    /// Build a bibliography from configuration.
    ///
    /// When persistence is enabled a prior snapshot becomes the base
    /// collection and `initial_items` append to it, unless
    /// `override_items` replaces it outright. The merged collection is
    /// persisted before this returns.
    pub fn new(config: BibConfig) -> Result<Self> {
        let persist = config.persist.unwrap_or(config.storage.is_some());
        if persist && config.storage.is_none() {
            return Err(Error::Configuration(
                "persistence enabled but no storage backend provided".into(),
            ));
        }

        let adapter = if persist {
            config
                .storage
                .map(|backend| StorageAdapter::new(backend, config.storage_prefix))
        } else {
            None
        };

        let mut items = Vec::new();
        if let Some(adapter) = &adapter {
            if !config.override_items {
                if let Some(saved) = adapter.load_items()? {
                    debug!(count = saved.len(), "loaded persisted items");
                    items = saved;
                }
            }
        }
        items.extend(config.initial_items);

        let mut store = ItemStore::new(adapter);
        store.replace_items(items)?;

        let transport = config
            .transport
            .unwrap_or_else(|| Box::new(ReqwestTransport::new()));
        let client = TranslationClient::new(
            transport,
            config.translation_server_url,
            config.translation_server_prefix,
        );

        Ok(Self { store, client })
    }

    // ===== Translation operations =====

    /// Resolve a URL. On a successful translation with `add` set, every
    /// returned item is appended to the collection. The full result is
    /// returned either way so the caller can branch on `Choices`.
    pub async fn translate_url(&mut self, url: &str, add: bool) -> Result<TranslationResult> {
        let result = self.client.translate_url(url).await?;
        if add {
            if let TranslationResult::Translated(items) = &result {
                for item in items {
                    self.store.add_item(item.clone())?;
                }
            }
        }
        Ok(result)
    }

    /// Resolve an identifier; translated items are always added
    pub async fn translate_identifier(&mut self, identifier: &str) -> Result<TranslationResult> {
        let result = self.client.translate_identifier(identifier).await?;
        if let TranslationResult::Translated(items) = &result {
            for item in items {
                self.store.add_item(item.clone())?;
            }
        }
        Ok(result)
    }

    /// Follow up an ambiguous translation with selected candidate keys;
    /// the resolved items are appended and returned
    pub async fn translate_url_items(
        &mut self,
        url: &str,
        selection: &BTreeMap<String, String>,
    ) -> Result<Vec<CatalogItem>> {
        let items = self.client.translate_url_items(url, selection).await?;
        for item in &items {
            self.store.add_item(item.clone())?;
        }
        Ok(items)
    }

    /// Export the current collection through the server
    pub async fn export_items(&self, format: &str) -> Result<String> {
        self.client.export(self.store.items(), format).await
    }

    // ===== Store pass-throughs =====

    pub fn add_item(&mut self, item: CatalogItem) -> Result<()> {
        self.store.add_item(item)
    }

    pub fn update_item(&mut self, index: usize, item: CatalogItem) -> Result<()> {
        self.store.update_item(index, item)
    }

    pub fn remove_item(&mut self, item: &CatalogItem) -> Result<bool> {
        self.store.remove_item(item)
    }

    pub fn clear_items(&mut self) -> Result<()> {
        self.store.clear_items()
    }

    pub fn items(&self) -> &[CatalogItem] {
        self.store.items()
    }

    /// The raw items exactly as persisted (alias of [`Bib::items`])
    pub fn raw_items(&self) -> &[CatalogItem] {
        self.store.items()
    }

    pub fn csl_items(&self) -> &[CslItem] {
        self.store.csl_items()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
