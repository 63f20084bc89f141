//! Playable catalog entries.

use crate::popularity::{self, Weighted};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One music video as stored in a yearly catalog file.
///
/// The popularity weight is computed once when the item is built, so the
/// scheduler never re-parses view counts while drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawItem", into = "RawItem")]
pub struct Item {
    id: String,
    name: String,
    url: Option<String>,
    date: Option<String>,
    popularity: Value,
    weight: f64,
}

/// Wire shape of a catalog entry.
///
/// `visitas` is the current field name; older files use `Cantidad de visitas`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawItem {
    #[serde(rename = "youtubeId", default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(rename = "youtubeUrl", default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(rename = "visitas", default, skip_serializing_if = "Value::is_null")]
    views: Value,
    #[serde(rename = "Cantidad de visitas", default, skip_serializing_if = "Value::is_null")]
    legacy_views: Value,
}

impl TryFrom<RawItem> for Item {
    type Error = String;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let id = match raw.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(format!("catalog entry '{}' has no youtubeId", raw.name)),
        };

        let popularity = if popularity::is_present(&raw.views) {
            raw.views
        } else {
            raw.legacy_views
        };

        Ok(Self {
            id,
            name: raw.name,
            url: raw.url,
            date: raw.date,
            weight: popularity::weight_from_value(&popularity),
            popularity,
        })
    }
}

impl From<Item> for RawItem {
    fn from(item: Item) -> Self {
        Self {
            id: Some(item.id),
            name: item.name,
            url: item.url,
            date: item.date,
            views: item.popularity,
            legacy_views: Value::Null,
        }
    }
}

impl Item {
    /// Create an item with no popularity information.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            date: None,
            popularity: Value::Null,
            weight: 0.0,
        }
    }

    /// Attach a raw view count; the weight is recomputed from it.
    #[must_use]
    pub fn with_popularity(mut self, popularity: impl Into<Value>) -> Self {
        self.popularity = popularity.into();
        self.weight = popularity::weight_from_value(&self.popularity);
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// The view count exactly as the catalog stored it.
    pub fn popularity_raw(&self) -> &Value {
        &self.popularity
    }

    /// Watch URL, derived from the id when the catalog omits it.
    pub fn watch_url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", self.id))
    }
}

impl Weighted for Item {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_entry() {
        let item: Item = serde_json::from_value(json!({
            "youtubeId": "dQw4w9WgXcQ",
            "name": "Rick Astley - Never Gonna Give You Up",
            "youtubeUrl": "https://youtu.be/dQw4w9WgXcQ",
            "fecha": "1987-07-27",
            "visitas": "1.234.567"
        }))
        .expect("entry should deserialize");

        assert_eq!(item.id(), "dQw4w9WgXcQ");
        assert_eq!(item.date(), Some("1987-07-27"));
        assert_eq!(item.weight(), 1_234_567.0);
        assert_eq!(item.watch_url(), "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn test_legacy_view_field_is_a_fallback() {
        let item: Item = serde_json::from_value(json!({
            "youtubeId": "abc",
            "Cantidad de visitas": "2,500"
        }))
        .unwrap();
        assert_eq!(item.weight(), 2500.0);

        let item: Item = serde_json::from_value(json!({
            "youtubeId": "abc",
            "visitas": "",
            "Cantidad de visitas": "10"
        }))
        .unwrap();
        assert_eq!(item.weight(), 10.0);

        let item: Item = serde_json::from_value(json!({
            "youtubeId": "abc",
            "visitas": "null",
            "Cantidad de visitas": "10"
        }))
        .unwrap();
        assert_eq!(item.weight(), 0.0, "a literal \"null\" is still the primary field");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<Item, _> = serde_json::from_value(json!({ "name": "Nameless" }));
        assert!(result.is_err());

        let result: Result<Item, _> = serde_json::from_value(json!({ "youtubeId": "  " }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_popularity_weighs_zero() {
        let item: Item = serde_json::from_value(json!({ "youtubeId": "x" })).unwrap();
        assert_eq!(item.weight(), 0.0);
        assert!(item.popularity_raw().is_null());
    }

    #[test]
    fn test_serialize_keeps_wire_names() {
        let item = Item::new("x1", "Song").with_popularity("1.000").with_date("1991");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["youtubeId"], "x1");
        assert_eq!(value["visitas"], "1.000");
        assert_eq!(value["fecha"], "1991");
        assert!(value.get("youtubeUrl").is_none());
    }

    #[test]
    fn test_watch_url_and_display() {
        let item = Item::new("x1", "");
        assert_eq!(item.watch_url(), "https://www.youtube.com/watch?v=x1");
        assert_eq!(item.to_string(), "x1");
        assert_eq!(Item::new("x1", "Song").to_string(), "Song (x1)");
    }
}
