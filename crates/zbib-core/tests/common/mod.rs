//! Shared fixtures and a scripted transport for the integration tests

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use zbib_core::{CatalogItem, Error, HttpResponse, Transport};

pub fn book() -> CatalogItem {
    serde_json::from_value(json!({
        "key": "ABCD2345",
        "itemType": "book",
        "title": "Dune",
        "creators": [
            { "creatorType": "author", "firstName": "Frank", "lastName": "Herbert" }
        ],
        "date": "1965",
        "publisher": "Chilton Books"
    }))
    .unwrap()
}

pub fn paper() -> CatalogItem {
    serde_json::from_value(json!({
        "key": "EFGH6789",
        "itemType": "journalArticle",
        "title": "On Computable Numbers",
        "creators": [
            { "creatorType": "author", "firstName": "Alan", "lastName": "Turing" }
        ],
        "date": "1936-11-12",
        "publicationTitle": "Proceedings of the London Mathematical Society",
        "accessDate": "CURRENT_TIMESTAMP"
    }))
    .unwrap()
}

pub fn note() -> CatalogItem {
    serde_json::from_value(json!({
        "key": "IJKL0123",
        "itemType": "note",
        "note": "<p>Lorem ipsum</p>"
    }))
    .unwrap()
}

pub fn choices() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("u30044".to_string(), "First candidate page".to_string()),
        ("u30045".to_string(), "Second candidate page".to_string()),
    ])
}

/// Transport that answers like a translation server and records every
/// request it sees. Clones share the request log.
#[derive(Clone, Default)]
pub struct FakeTransport {
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    fn ok_items(items: &[CatalogItem]) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: serde_json::to_string(items).unwrap(),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, Error> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));

        if url.contains("export") {
            return Ok(HttpResponse {
                status: 200,
                body: "RESULT".to_string(),
            });
        }

        let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
        if payload.get("identifier").is_some() {
            return Ok(Self::ok_items(&[paper()]));
        }

        let target = payload["url"].as_str().unwrap_or_default();
        if target.contains("choice") {
            let selected_known = payload
                .get("items")
                .and_then(|items| items.as_object())
                .map(|items| items.keys().any(|key| choices().contains_key(key)))
                .unwrap_or(false);
            if selected_known {
                return Ok(Self::ok_items(&[book()]));
            }
            return Ok(HttpResponse {
                status: 300,
                body: serde_json::to_string(&choices()).unwrap(),
            });
        }

        let response = if target.contains("multi") {
            Self::ok_items(&[book(), paper()])
        } else if target.contains("book") {
            Self::ok_items(&[book()])
        } else if target.contains("paper") {
            Self::ok_items(&[paper()])
        } else if target.contains("note") {
            Self::ok_items(&[paper(), note()])
        } else {
            HttpResponse {
                status: 501,
                body: "No translators available".to_string(),
            }
        };
        Ok(response)
    }
}
