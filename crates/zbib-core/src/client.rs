//! Translation-server protocol client
//!
//! Server docs: https://github.com/zotero/translation-server
//!
//! One resolution attempt is a single POST to the `web` endpoint. The
//! server either answers with a JSON array of items, or with HTTP 300
//! and a key → label map when the page offers several candidates. The
//! follow-up re-submits the original URL together with the selected
//! keys; the server holds no session state between the two calls.

use crate::error::{Error, Result};
use crate::http::{HttpResponse, Transport};
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;
use zbib_domain::CatalogItem;

/// Sentinel the server leaves in `accessDate` for "now"
const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// Outcome of a resolution attempt the caller must branch on
#[derive(Clone, Debug, PartialEq)]
pub enum TranslationResult {
    /// The server resolved the input into zero or more items
    Translated(Vec<CatalogItem>),
    /// The server needs the caller to pick among candidate pages
    Choices(BTreeMap<String, String>),
}

/// Client for the translation/export endpoints of a translation server
pub struct TranslationClient {
    transport: Box<dyn Transport>,
    base_url: String,
    prefix: String,
}

impl TranslationClient {
    pub fn new(
        transport: Box<dyn Transport>,
        base_url: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            prefix: prefix.into(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            self.prefix,
            name
        )
    }

    /// Resolve a URL into items or a candidate set
    pub async fn translate_url(&self, url: &str) -> Result<TranslationResult> {
        self.submit(json!({ "url": url })).await
    }

    /// Resolve an identifier (DOI, ISBN, PMID, arXiv ID)
    pub async fn translate_identifier(&self, identifier: &str) -> Result<TranslationResult> {
        self.submit(json!({ "identifier": identifier })).await
    }

    /// Follow up an ambiguous result with the caller's selection.
    ///
    /// A second ambiguous answer is an error here; there is no recursive
    /// disambiguation.
    pub async fn translate_url_items(
        &self,
        url: &str,
        selection: &BTreeMap<String, String>,
    ) -> Result<Vec<CatalogItem>> {
        match self.submit(json!({ "url": url, "items": selection })).await? {
            TranslationResult::Translated(items) => Ok(items),
            TranslationResult::Choices(_) => Err(Error::Translation {
                status: 300,
                body: "server returned choices for a selection follow-up".into(),
            }),
        }
    }

    async fn submit(&self, payload: serde_json::Value) -> Result<TranslationResult> {
        let endpoint = self.endpoint("web");
        debug!(%endpoint, "submitting translation request");
        let response = self.transport.post_json(&endpoint, payload.to_string()).await?;
        debug!(status = response.status, "translation response received");
        let mut result = interpret_translation_response(&response)?;
        if let TranslationResult::Translated(items) = &mut result {
            stamp_access_dates(items);
        }
        Ok(result)
    }

    /// Export items through the server's export endpoint.
    ///
    /// Non-exportable items (notes, attachments) are filtered out before
    /// submission. The response body is the serialized bibliography and
    /// is returned verbatim.
    pub async fn export(&self, items: &[CatalogItem], format: &str) -> Result<String> {
        let exportable: Vec<&CatalogItem> =
            items.iter().filter(|item| is_exportable(item)).collect();
        let endpoint = format!(
            "{}?format={}",
            self.endpoint("export"),
            urlencoding::encode(format)
        );
        debug!(%endpoint, count = exportable.len(), "submitting export request");
        let response = self
            .transport
            .post_json(&endpoint, serde_json::to_string(&exportable)?)
            .await?;
        if !(200..300).contains(&response.status) {
            return Err(Error::Export {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }
}

/// Interpret a `web` endpoint response.
///
/// 2xx with a JSON array is a translation (zero items is valid); 300
/// with a JSON object is a candidate set; anything else, including an
/// unparseable body, fails with the status and raw body attached.
pub fn interpret_translation_response(response: &HttpResponse) -> Result<TranslationResult> {
    let failed = || Error::Translation {
        status: response.status,
        body: response.body.clone(),
    };

    if (200..300).contains(&response.status) {
        serde_json::from_str(&response.body)
            .map(TranslationResult::Translated)
            .map_err(|_| failed())
    } else if response.status == 300 {
        serde_json::from_str(&response.body)
            .map(TranslationResult::Choices)
            .map_err(|_| failed())
    } else {
        Err(failed())
    }
}

/// Notes and attachments carry no exportable bibliographic record
pub fn is_exportable(item: &CatalogItem) -> bool {
    !matches!(item.item_type.as_str(), "note" | "attachment")
}

/// Replace the server's `CURRENT_TIMESTAMP` sentinel with the current
/// UTC time, uniformly across the whole result
fn stamp_access_dates(items: &mut [CatalogItem]) {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    for item in items {
        if item.access_date.as_deref() == Some(CURRENT_TIMESTAMP) {
            item.access_date = Some(now.clone());
        }
    }
}
