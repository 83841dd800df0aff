//! Catalog item representation (Zotero item schema)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A bibliographic record as stored by the bibliography and exchanged
/// with the translation server.
///
/// The Zotero schema is open-ended: which fields an item carries depends
/// on its `item_type`. The fields the library itself inspects live on the
/// struct directly; everything else (publicationTitle, ISBN, volume, ...)
/// goes through the `fields` bag untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub key: String,
    #[serde(rename = "itemType")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<Creator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "accessDate", skip_serializing_if = "Option::is_none")]
    pub access_date: Option<String>,
    #[serde(rename = "dateAdded", skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(rename = "dateModified", skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    /// Type-specific fields not modeled above, preserved verbatim.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl CatalogItem {
    /// Create a bare item with just a key and type
    pub fn new(key: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            item_type: item_type.into(),
            title: None,
            creators: Vec::new(),
            date: None,
            access_date: None,
            date_added: None,
            date_modified: None,
            fields: BTreeMap::new(),
        }
    }

    /// Notes carry no bibliographic identity of their own
    pub fn is_note(&self) -> bool {
        self.item_type == "note"
    }

    /// Look up a string field from the type-specific bag
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// A creator entry on a catalog item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "creatorType")]
    pub creator_type: String,
    #[serde(flatten)]
    pub name: CreatorName,
}

/// The two wire shapes a creator name takes: a first/last split for
/// people, a single `name` field for institutions and other literals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatorName {
    Personal {
        #[serde(rename = "firstName")]
        first_name: String,
        #[serde(rename = "lastName")]
        last_name: String,
    },
    Literal { name: String },
}

impl Creator {
    pub fn personal(
        creator_type: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            creator_type: creator_type.into(),
            name: CreatorName::Personal {
                first_name: first_name.into(),
                last_name: last_name.into(),
            },
        }
    }

    pub fn literal(creator_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            creator_type: creator_type.into(),
            name: CreatorName::Literal { name: name.into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_serde_round_trip() {
        let raw = json!({
            "key": "ABCD2345",
            "itemType": "book",
            "title": "Dune",
            "creators": [
                { "creatorType": "author", "firstName": "Frank", "lastName": "Herbert" }
            ],
            "date": "1965",
            "publisher": "Chilton Books",
            "numPages": "412"
        });
        let item: CatalogItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.key, "ABCD2345");
        assert_eq!(item.title.as_deref(), Some("Dune"));
        assert_eq!(item.field("publisher"), Some("Chilton Books"));
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn creator_shapes() {
        let personal: Creator = serde_json::from_value(json!({
            "creatorType": "author", "firstName": "Frank", "lastName": "Herbert"
        }))
        .unwrap();
        assert_eq!(
            personal.name,
            CreatorName::Personal {
                first_name: "Frank".into(),
                last_name: "Herbert".into()
            }
        );

        let literal: Creator = serde_json::from_value(json!({
            "creatorType": "author", "name": "Chilton Books"
        }))
        .unwrap();
        assert_eq!(
            literal.name,
            CreatorName::Literal {
                name: "Chilton Books".into()
            }
        );
    }

    #[test]
    fn absent_fields_stay_absent() {
        let item = CatalogItem::new("AAAA0000", "webpage");
        let value = serde_json::to_value(&item).unwrap();
        let map = value.as_object().unwrap();
        assert!(!map.contains_key("title"));
        assert!(!map.contains_key("creators"));
        assert!(!map.contains_key("dateAdded"));
    }

    #[test]
    fn note_detection() {
        assert!(CatalogItem::new("N", "note").is_note());
        assert!(!CatalogItem::new("B", "book").is_note());
    }
}
