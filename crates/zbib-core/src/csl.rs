//! Zotero item → CSL-JSON conversion

use crate::dates::parse_date;
use zbib_domain::{CatalogItem, CreatorName, CslDate, CslItem, CslName, StructuredDate};

/// Map a Zotero item type to its CSL-JSON type.
///
/// Unmapped types pass through unchanged so new item types degrade
/// gracefully instead of being dropped.
fn map_type(item_type: &str) -> &str {
    match item_type {
        "artwork" => "graphic",
        "blogPost" => "post-weblog",
        "book" => "book",
        "bookSection" => "chapter",
        "conferencePaper" => "paper-conference",
        "document" => "article",
        "film" => "motion_picture",
        "interview" => "interview",
        "journalArticle" => "article-journal",
        "letter" => "personal_communication",
        "magazineArticle" => "article-magazine",
        "manuscript" => "manuscript",
        "map" => "map",
        "newspaperArticle" => "article-newspaper",
        "presentation" => "speech",
        "report" => "report",
        "thesis" => "thesis",
        "webpage" => "webpage",
        other => other,
    }
}

/// Project a catalog item into the CSL-JSON schema.
///
/// Pure: the input is not mutated and converting an unchanged item twice
/// yields equal output. Absent catalog fields are omitted, never
/// null-filled.
pub fn to_csl(item: &CatalogItem) -> CslItem {
    let mut csl = CslItem {
        id: item.key.clone(),
        csl_type: map_type(&item.item_type).to_string(),
        title: item.title.clone(),
        ..Default::default()
    };

    for creator in &item.creators {
        let name = match &creator.name {
            CreatorName::Personal {
                first_name,
                last_name,
            } => CslName {
                family: Some(last_name.clone()),
                given: Some(first_name.clone()),
                literal: None,
            },
            // Institutional creators stay literal, never split
            CreatorName::Literal { name } => CslName {
                family: None,
                given: None,
                literal: Some(name.clone()),
            },
        };
        if creator.creator_type == "editor" {
            csl.editor.push(name);
        } else {
            csl.author.push(name);
        }
    }

    csl.issued = item.date.as_deref().map(to_csl_date);
    csl.accessed = item.access_date.as_deref().map(to_csl_date);

    csl.container_title = ["publicationTitle", "bookTitle", "websiteTitle"]
        .iter()
        .find_map(|field| item.field(field))
        .map(str::to_string);
    csl.publisher = item.field("publisher").map(str::to_string);
    csl.volume = item.field("volume").map(str::to_string);
    csl.issue = item.field("issue").map(str::to_string);
    csl.page = item.field("pages").map(str::to_string);
    csl.url = item.field("url").map(str::to_string);
    csl.doi = item.field("DOI").map(str::to_string);
    csl.isbn = item.field("ISBN").map(str::to_string);

    csl
}

/// Build a CSL date from free text.
///
/// The internal month is zero-based; CSL date-parts are 1-based. Only the
/// leading run of known parts is emitted (a day without a month would be
/// meaningless positionally).
fn to_csl_date(text: &str) -> CslDate {
    let parsed: StructuredDate = parse_date(text);
    let mut parts: Vec<i32> = Vec::new();
    if let Some(year) = parsed.year.as_deref().and_then(|y| y.parse().ok()) {
        parts.push(year);
        if let Some(month) = parsed.month {
            parts.push(month as i32 + 1);
            if let Some(day) = parsed.day {
                parts.push(day as i32);
            }
        }
    }
    CslDate {
        date_parts: if parts.is_empty() {
            Vec::new()
        } else {
            vec![parts]
        },
        raw: Some(parsed.raw),
    }
}
