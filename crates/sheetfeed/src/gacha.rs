//! Random-pick video pool fed by an `Item,YT_URL,enabled,...` sheet

use rand::Rng;

use crate::decode::header::HeaderNormalization;
use crate::error::{Error, Result};
use crate::table::Table;
use crate::video::{self, EmbedOptions};

const ITEM: &[&str] = &["item"];
const YT_URL: &[&str] = &["yt_url", "yturl"];
const ENABLED: &[&str] = &["enabled"];
const MERCHANT: &[&str] = &["merchant"];
const MERCHANT_URL: &[&str] = &["merchant_url"];
const VIEWS: &[&str] = &["views"];

/// Kilograms of CO2 attributed to a single view
pub const CO2_PER_VIEW_KG: f64 = 0.06;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GachaItem {
    pub item: String,
    pub yt_url: String,
    pub merchant: String,
    pub merchant_url: String,
    pub views: f64,
}

impl GachaItem {
    pub fn embed_url(&self) -> String {
        video::embed_for(&self.yt_url, &EmbedOptions::autoplay())
    }
}

/// `TRUE` in any case, surrounding whitespace ignored
pub fn is_enabled(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("TRUE")
}

/// Numeric cell with thousands separators; anything unparseable counts as 0
pub fn safe_number(s: &str) -> f64 {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GachaPool {
    items: Vec<GachaItem>,
}

impl GachaPool {
    /// Enabled rows with both an item name and a video URL. Fails only when a
    /// required column is missing from the header.
    pub fn from_table(table: &Table) -> Result<Self> {
        let records = table.records(HeaderNormalization::SnakeKey);
        let header = records.header();
        for (name, aliases) in [("Item", ITEM), ("YT_URL", YT_URL), ("enabled", ENABLED)] {
            if !aliases.iter().any(|a| header.contains(a)) {
                tracing::warn!(column = name, "gacha sheet is missing a required column");
                return Err(Error::missing_column(name));
            }
        }

        let mut items = Vec::new();
        for (i, rec) in records.iter().enumerate() {
            if !is_enabled(rec.get_any(ENABLED)) {
                tracing::trace!(row = i + 2, "skipping disabled row");
                continue;
            }
            let item = rec.get_any(ITEM);
            let yt_url = rec.get_any(YT_URL);
            if item.is_empty() || yt_url.is_empty() {
                tracing::trace!(row = i + 2, "skipping row without item or url");
                continue;
            }
            items.push(GachaItem {
                item: item.trim().to_string(),
                yt_url: yt_url.trim().to_string(),
                merchant: rec.get_any(MERCHANT).trim().to_string(),
                merchant_url: rec.get_any(MERCHANT_URL).trim().to_string(),
                views: safe_number(rec.get_any(VIEWS)),
            });
        }
        Ok(Self { items })
    }

    pub fn from_csv(text: &str) -> Result<Self> {
        Self::from_table(&crate::parse(text))
    }

    pub fn items(&self) -> &[GachaItem] {
        &self.items
    }

    pub fn get(&self, idx: usize) -> Option<&GachaItem> {
        self.items.get(idx)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_views(&self) -> f64 {
        self.items.iter().map(|i| i.views).sum()
    }
}

/// Picks from a pool without handing out the same entry twice in a row
/// (unless the pool has a single entry).
#[derive(Debug, Clone, Default)]
pub struct Picker {
    pool: GachaPool,
    last: Option<usize>,
}

impl Picker {
    pub fn new(pool: GachaPool) -> Self {
        Self { pool, last: None }
    }

    pub fn pool(&self) -> &GachaPool {
        &self.pool
    }

    /// Swap in a freshly loaded pool; the repeat guard starts over
    pub fn reload(&mut self, pool: GachaPool) {
        self.pool = pool;
        self.last = None;
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last
    }

    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&GachaItem> {
        let len = self.pool.len();
        if len == 0 {
            return None;
        }
        let mut idx = rng.gen_range(0..len);
        while len > 1 && Some(idx) == self.last {
            idx = rng.gen_range(0..len);
        }
        self.last = Some(idx);
        self.pool.get(idx)
    }

    /// Direct pick from the table; does not move the repeat guard
    pub fn play(&self, idx: usize) -> Option<&GachaItem> {
        self.pool.get(idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactSummary {
    pub total_views: f64,
    pub co2_kg: f64,
}

impl ImpactSummary {
    pub fn from_views(total_views: f64) -> Self {
        Self {
            total_views,
            co2_kg: total_views * CO2_PER_VIEW_KG,
        }
    }

    /// Views of enabled rows across every feed; a feed without the columns
    /// contributes nothing.
    pub fn from_tables<'a, I: IntoIterator<Item = &'a Table>>(tables: I) -> Self {
        let mut total = 0.0;
        for table in tables {
            let records = table.records(HeaderNormalization::SnakeKey);
            for rec in records.iter() {
                if is_enabled(rec.get_any(ENABLED)) {
                    total += safe_number(rec.get_any(VIEWS));
                }
            }
        }
        Self::from_views(total)
    }

    /// CO2 rounded to one decimal, the way the counter displays it
    pub fn co2_display(&self) -> String {
        format!("{:.1}", self.co2_kg)
    }
}
