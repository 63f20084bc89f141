//! # Catalog Loading
//!
//! Channels are decades. Every year of a decade lives in its own file,
//! `<data_dir>/<year>.json`, shaped as `{ "<year>": [ item, ... ] }`.
//!
//! Loading is forgiving. Yearly files are added gradually, so a missing
//! file, an HTML error page saved in its place, or a broken document simply
//! contributes no items. Individual entries without an id are dropped the
//! same way. The only hard error is asking for a channel that does not exist.

use crate::item::Item;
use anyhow::Result;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::ops::{Deref, RangeInclusive};
use std::path::Path;

/// A decade channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub key: &'static str,
    pub name: &'static str,
    pub years: RangeInclusive<u16>,
}

/// Every channel the application knows about.
pub static CHANNELS: [Channel; 3] = [
    Channel {
        key: "MTV80",
        name: "MTV 80",
        years: 1980..=1989,
    },
    Channel {
        key: "MTV90",
        name: "MTV 90",
        years: 1990..=1999,
    },
    Channel {
        key: "MTV00",
        name: "MTV 00",
        years: 2000..=2009,
    },
];

lazy_static::lazy_static! {
    /// Channel lookup by upper-cased key.
    static ref CHANNEL_INDEX: HashMap<String, &'static Channel> = CHANNELS
        .iter()
        .map(|channel| (channel.key.to_ascii_uppercase(), channel))
        .collect();
}

/// Look up a channel by key, ignoring case.
///
/// # Errors
///
/// Returns an error naming the known channels when `key` matches none of them.
pub fn find_channel(key: &str) -> Result<&'static Channel> {
    CHANNEL_INDEX
        .get(&key.trim().to_ascii_uppercase())
        .copied()
        .ok_or_else(|| {
            let known: Vec<_> = CHANNELS.iter().map(|c| c.key).collect();
            anyhow::anyhow!("Unknown channel '{key}'. Known channels: {}", known.join(", "))
        })
}

/// The candidate items for one channel (or several merged).
///
/// Immutable once loaded; reloading builds a new catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    label: String,
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(label: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Load a single channel from `data_dir`.
    ///
    /// # Errors
    ///
    /// Only an unknown channel key is an error; unreadable years are skipped.
    pub fn load(data_dir: &Path, channel_key: &str) -> Result<Self> {
        Self::load_channels(data_dir, &[channel_key])
    }

    /// Load several channels into one catalog, in the order given.
    ///
    /// # Errors
    ///
    /// Fails if any key is unknown.
    pub fn load_channels(data_dir: &Path, channel_keys: &[&str]) -> Result<Self> {
        let channels = channel_keys
            .iter()
            .map(|key| find_channel(key))
            .collect::<Result<Vec<_>>>()?;

        let years: Vec<u16> = channels.iter().flat_map(|c| c.years.clone()).collect();
        let items = load_years(data_dir, &years);

        let label = channels.iter().map(|c| c.name).collect::<Vec<_>>().join(" + ");
        info!("Loaded {} items for {label} from {}", items.len(), data_dir.display());

        Ok(Self::new(label, items))
    }
}

impl Deref for Catalog {
    type Target = [Item];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// Load the given years in parallel and concatenate them in input order.
pub fn load_years(data_dir: &Path, years: &[u16]) -> Vec<Item> {
    years
        .par_iter()
        .map(|&year| load_year(data_dir, year))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Items of one yearly file. Never fails; problems are logged and yield nothing.
pub fn load_year(data_dir: &Path, year: u16) -> Vec<Item> {
    let path = data_dir.join(format!("{year}.json"));

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No catalog file for {year} at {}", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            return Vec::new();
        }
    };

    let items = parse_year_document(&text, year);
    debug!("{} items from {}", items.len(), path.display());
    items
}

/// Extract the items stored under `year` from a yearly document.
pub fn parse_year_document(text: &str, year: u16) -> Vec<Item> {
    let trimmed = text.trim_start();

    if looks_like_html(trimmed) {
        debug!("Catalog file for {year} is an HTML page, skipping");
        return Vec::new();
    }
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        debug!("Catalog file for {year} is not JSON, skipping");
        return Vec::new();
    }

    let document: Value = match serde_json::from_str(trimmed) {
        Ok(document) => document,
        Err(e) => {
            warn!("Catalog file for {year} is not valid JSON: {e}");
            return Vec::new();
        }
    };

    let Some(entries) = document.get(year.to_string()).and_then(Value::as_array) else {
        debug!("Catalog file for {year} has no \"{year}\" list");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<Item>(entry.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Dropping catalog entry from {year}: {e}");
                None
            }
        })
        .collect()
}

fn looks_like_html(text: &str) -> bool {
    let head = text.get(..9).unwrap_or(text).to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html") || (text.contains("<!DOCTYPE") && text.contains("<html"))
}
