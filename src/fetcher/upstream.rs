//! Upstream wire format and normalization.
//!
//! The upstream response is richer than the domain model: pagination metadata,
//! many rendition sizes, analytics fields. Only the pieces the domain needs are
//! declared here; everything else is ignored by serde.

use crate::domain::{Item, ItemKind, Rendition};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Top-level response body.
#[derive(Debug, Deserialize)]
pub struct UpstreamResponse {
    pub data: UpstreamData,

    /// Present on list endpoints; only its existence matters.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `data` is an array on search/trending and a single object on random.
///
/// Records stay as raw JSON here so that one malformed record is skipped in
/// [`normalize`] instead of rejecting the whole body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UpstreamData {
    Many(Vec<Value>),
    One(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamRecord {
    pub id: String,
    /// `null` and absent both mean untitled.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub images: Option<UpstreamImages>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamImages {
    #[serde(default)]
    pub fixed_height: Option<UpstreamRendition>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamRendition {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<Dimension>,
    #[serde(default)]
    pub height: Option<Dimension>,
}

/// Pixel dimension; the upstream sends numbers as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(u32),
    Text(String),
}

impl Dimension {
    fn pixels(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl UpstreamRecord {
    /// Converts a record into a domain item.
    ///
    /// Returns `None` if the record has no usable fixed-height rendition or an
    /// unknown type.
    fn into_item(self) -> Option<Item> {
        let kind = match self.kind.as_deref() {
            Some(raw) => ItemKind::from_upstream(raw)?,
            None => ItemKind::Gif,
        };
        let fixed = self.images?.fixed_height?;
        let url = fixed.url.filter(|url| !url.is_empty())?;
        let rendition = Rendition {
            width: fixed.width.as_ref().and_then(Dimension::pixels)?,
            height: fixed.height.as_ref().and_then(Dimension::pixels)?,
            url,
        };
        Some(Item::new(self.id, self.title.unwrap_or_default(), rendition, kind))
    }
}

fn decode(raw: Value) -> Option<Item> {
    let record = match serde_json::from_value::<UpstreamRecord>(raw) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed record");
            return None;
        }
    };
    let id = record.id.clone();
    let item = record.into_item();
    if item.is_none() {
        tracing::debug!(id = %id, "skipping record without usable rendition or type");
    }
    item
}

/// Normalizes a response into an ordered, id-unique item list.
///
/// Unusable records are skipped with a diagnostic log. The first occurrence of
/// a duplicated id wins.
#[must_use]
pub fn normalize(response: UpstreamResponse) -> Vec<Item> {
    let records = match response.data {
        UpstreamData::Many(records) => records,
        UpstreamData::One(record) => vec![Value::Object(record)],
    };
    let total = records.len();

    let mut seen = HashSet::with_capacity(total);
    let items: Vec<Item> = records
        .into_iter()
        .filter_map(decode)
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    tracing::debug!(
        received = total,
        kept = items.len(),
        total_count = response.pagination.as_ref().map(|p| p.total_count),
        "upstream response normalized"
    );

    items
}
