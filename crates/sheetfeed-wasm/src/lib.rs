use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use sheetfeed::articles::{Catalog, GUIDE_LIMIT, Tab};
use sheetfeed::gacha::{GachaPool, ImpactSummary, Picker};
use sheetfeed::songs::{Player, WordType};
use sheetfeed::video::{self, EmbedOptions};
use sheetfeed::{HeaderNormalization, Options, Table};
use wasm_bindgen::prelude::*;

mod js_table;
mod store;

use store::LocalStore;

/// Smaller binary with wee_alloc as the global allocator
#[cfg(feature = "size_opt")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Maximum input size in bytes (10 MB)
const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

const LOAD_FAILED: &str = "載入失敗 / failed to load";

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn check_size(text: &str) -> Result<(), String> {
    if text.len() > MAX_INPUT_SIZE {
        return Err(format!(
            "Input exceeds maximum size limit of {} bytes",
            MAX_INPUT_SIZE
        ));
    }
    Ok(())
}

fn options(raw: bool) -> Options {
    if raw { Options::raw() } else { Options::default() }
}

fn normalization(name: &str) -> Result<HeaderNormalization, String> {
    match name {
        "" | "snake" => Ok(HeaderNormalization::SnakeKey),
        "alnum" => Ok(HeaderNormalization::Alphanumeric),
        "trim" => Ok(HeaderNormalization::Trimmed),
        "collapse" => Ok(HeaderNormalization::CollapseWhitespace),
        other => Err(format!("unknown header normalization '{}'", other)),
    }
}

fn word_type(key: &str) -> Result<WordType, String> {
    WordType::from_key(key).ok_or_else(|| format!("unknown word type '{}'", key))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(Into::into)
}

fn parse_checked(text: &str, raw: bool) -> Result<Table, String> {
    check_size(text)?;
    Ok(sheetfeed::parse_with(text, &options(raw)))
}

/// CSV text to an array of string arrays
#[wasm_bindgen]
pub fn parse_csv(text: &str, raw: bool) -> Result<JsValue, JsValue> {
    let table = parse_checked(text, raw)?;
    Ok(js_table::table_to_js(&table))
}

/// CSV text to header-keyed objects
#[wasm_bindgen]
pub fn parse_records(text: &str, headers: &str) -> Result<JsValue, JsValue> {
    let table = parse_checked(text, false)?;
    let records = sheetfeed::records_to_json(&table, normalization(headers)?);
    to_js(&records)
}

/// Same as `parse_records`, as a JSON string
#[wasm_bindgen]
pub fn parse_records_json(text: &str, headers: &str, pretty: bool) -> Result<String, String> {
    let table = parse_checked(text, false)?;
    let records = sheetfeed::records_to_json(&table, normalization(headers)?);
    let out = if pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    };
    out.map_err(|e| format!("JSON encoding error: {}", e))
}

#[wasm_bindgen]
pub fn canonical_csv(text: &str, raw: bool) -> Result<String, String> {
    let table = parse_checked(text, raw)?;
    Ok(sheetfeed::to_csv_string(&table, &options(raw)))
}

/// Enabled gacha entries; a feed without the required columns reports a load failure
#[wasm_bindgen]
pub fn gacha_pool(text: &str) -> Result<JsValue, JsValue> {
    let pool = load_pool(text)?;
    to_js(&pool)
}

fn load_pool(text: &str) -> Result<GachaPool, String> {
    let table = parse_checked(text, false)?;
    GachaPool::from_table(&table).map_err(|e| format!("{}: {}", LOAD_FAILED, e))
}

/// Views and CO2 across several gacha feeds, as `{ total_views, co2_kg }`
#[wasm_bindgen]
pub fn impact(feeds: Vec<String>) -> Result<JsValue, JsValue> {
    to_js(&impact_summary(&feeds)?)
}

fn impact_summary(feeds: &[String]) -> Result<ImpactSummary, String> {
    let mut tables = Vec::with_capacity(feeds.len());
    for text in feeds {
        tables.push(parse_checked(text, false)?);
    }
    Ok(ImpactSummary::from_tables(&tables))
}

/// Random-pick session over one gacha feed
#[wasm_bindgen]
pub struct GachaSession {
    picker: Picker,
    rng: StdRng,
}

#[wasm_bindgen]
impl GachaSession {
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> Result<GachaSession, String> {
        Ok(Self {
            picker: Picker::new(load_pool(text)?),
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the feed after a reload; the repeat guard starts over
    pub fn reload(&mut self, text: &str) -> Result<(), String> {
        self.picker.reload(load_pool(text)?);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.picker.pool().len()
    }

    pub fn is_empty(&self) -> bool {
        self.picker.pool().is_empty()
    }

    /// Index of the next pick, never the same as the previous one
    pub fn spin(&mut self) -> Option<usize> {
        self.picker.spin(&mut self.rng)?;
        self.picker.last_index()
    }

    pub fn item(&self, idx: usize) -> Option<String> {
        self.picker.play(idx).map(|i| i.item.clone())
    }

    pub fn merchant(&self, idx: usize) -> Option<String> {
        self.picker.play(idx).map(|i| i.merchant.clone())
    }

    pub fn merchant_url(&self, idx: usize) -> Option<String> {
        self.picker.play(idx).map(|i| i.merchant_url.clone())
    }

    /// Autoplaying embed for an entry; empty when its URL has no video id
    pub fn embed_url(&self, idx: usize) -> String {
        self.picker
            .play(idx)
            .map(|i| i.embed_url())
            .unwrap_or_default()
    }
}

#[wasm_bindgen]
pub fn youtube_id(url: &str) -> Option<String> {
    video::youtube_id(url)
}

#[wasm_bindgen]
pub fn embed_url(url: &str, autoplay: bool) -> String {
    let opts = if autoplay {
        EmbedOptions::autoplay()
    } else {
        EmbedOptions::default()
    };
    video::embed_for(url, &opts)
}

/// `answers` is one letter per question, `-` when skipped
#[wasm_bindgen]
pub fn quiz_result_url(answers: &str, base: Option<String>) -> Result<String, String> {
    let answers = sheetfeed::quiz::parse_answers(answers).map_err(|e| e.to_string())?;
    let base = base.as_deref().unwrap_or(sheetfeed::quiz::RESULT_URL);
    sheetfeed::quiz::result_url(base, &answers).map_err(|e| e.to_string())
}

/// Articles shown under a tab (`explain` or `tools`)
#[wasm_bindgen]
pub fn articles(text: &str, tab: &str) -> Result<JsValue, JsValue> {
    check_size(text)?;
    let tab = Tab::from_key(tab).unwrap_or_default();
    let catalog = Catalog::from_csv(text);
    to_js(&catalog.visible(tab))
}

#[wasm_bindgen]
pub fn related_articles(text: &str, id: &str) -> Result<JsValue, JsValue> {
    check_size(text)?;
    let catalog = Catalog::from_csv(text);
    let related = match catalog.get(id) {
        Some(article) => catalog.related(article),
        None => Vec::new(),
    };
    to_js(&related)
}

#[wasm_bindgen]
pub fn reading_guide(text: &str) -> Result<JsValue, JsValue> {
    check_size(text)?;
    let catalog = Catalog::from_csv(text);
    to_js(&catalog.guide(GUIDE_LIMIT))
}

#[wasm_bindgen]
pub fn vocab_categories(text: &str) -> Result<JsValue, JsValue> {
    let table = parse_checked(text, false)?;
    to_js(&sheetfeed::vocab::categories(&table))
}

#[wasm_bindgen]
pub fn vocab_entries(text: &str) -> Result<JsValue, JsValue> {
    let table = parse_checked(text, false)?;
    to_js(&sheetfeed::vocab::entries(&table))
}

/// Song/vocabulary player with playlists kept in `localStorage`
#[wasm_bindgen]
pub struct SongPlayer {
    inner: Player<LocalStore>,
}

#[wasm_bindgen]
impl SongPlayer {
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> Result<SongPlayer, String> {
        let table = parse_checked(text, false)?;
        let songs = sheetfeed::songs::songs(&table);
        Ok(Self {
            inner: Player::new(LocalStore::new(), songs),
        })
    }

    pub fn songs(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.songs())
    }

    pub fn select(&mut self, song_id: &str, word_type_key: &str) -> Result<(), String> {
        let word_type = word_type(word_type_key)?;
        self.inner
            .select_manual(song_id, word_type)
            .map_err(|e| e.to_string())
    }

    /// `{ frames: { mv_src, vocab_src } | null, play }`, or `null` with nothing selected
    pub fn press_load(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.press_load())
    }

    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        let frames = self.inner.next().map_err(|e| e.to_string())?;
        to_js(&frames)
    }

    pub fn prev(&mut self) -> Result<JsValue, JsValue> {
        let frames = self.inner.prev().map_err(|e| e.to_string())?;
        to_js(&frames)
    }

    pub fn jump(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let frames = self.inner.jump(index).map_err(|e| e.to_string())?;
        to_js(&frames)
    }

    pub fn toggle_loop(&mut self) -> Result<bool, String> {
        self.inner.toggle_loop().map_err(|e| e.to_string())
    }

    /// Re-read loop flag and active playlist from localStorage
    pub fn restore(&mut self) {
        self.inner.restore();
    }

    #[wasm_bindgen(getter)]
    pub fn loop_enabled(&self) -> bool {
        self.inner.loop_enabled()
    }

    pub fn save_playlist(
        &mut self,
        name: &str,
        song_ids: Vec<String>,
        word_type_key: &str,
    ) -> Result<JsValue, JsValue> {
        let word_type = word_type(word_type_key)?;
        let seed = js_sys::Date::now() as u64;
        let frames = self
            .inner
            .save_playlist(name, &song_ids, word_type, seed)
            .map_err(|e| e.to_string())?;
        to_js(&frames)
    }

    pub fn load_playlist(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let frames = self.inner.load_playlist(id).map_err(|e| e.to_string())?;
        to_js(&frames)
    }

    pub fn delete_playlist(&mut self, id: &str) -> Result<(), String> {
        self.inner.delete_playlist(id).map_err(|e| e.to_string())
    }

    pub fn playlists(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.playlists())
    }

    pub fn now_playing(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.now_playing())
    }
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
