//! Client side of the vocabulary lookup proxy: request URLs, response shapes,
//! table sorting, search debounce and stale-response protection.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::Result;

pub const APP_VERSION: &str = "2026-01-02.01";
pub const ROUTE: &str = "voca/v1/charge";
pub const DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct ChargeApi {
    base: Url,
    version: String,
}

impl ChargeApi {
    /// `rest_root` is the site's REST root (`https://example.org/wp-json/`)
    pub fn new(rest_root: &str) -> Result<Self> {
        let root = Url::parse(rest_root)?;
        Ok(Self {
            base: root.join(ROUTE)?,
            version: APP_VERSION.to_string(),
        })
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, key: &str, value: &str) -> String {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair(key, value)
            .append_pair("v", &self.version);
        url.into()
    }

    pub fn letters_url(&self) -> String {
        self.url("letters", "1")
    }

    pub fn init_url(&self) -> String {
        self.url("init", "1")
    }

    pub fn letter_url(&self, letter: &str) -> String {
        self.url("letter", letter)
    }

    pub fn search_url(&self, query: &str) -> String {
        self.url("q", query)
    }

    pub fn meta_url(&self) -> String {
        self.url("meta", "1")
    }
}

/// Cell text from the proxy; `null` is empty, numbers and booleans keep their JSON text
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> core::result::Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn null_as_default<'de, D, T>(d: D) -> core::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Word {
    #[serde(deserialize_with = "lenient_string")]
    pub en: String,
    #[serde(deserialize_with = "lenient_string")]
    pub zh: String,
    #[serde(deserialize_with = "lenient_string")]
    pub img: String,
    #[serde(deserialize_with = "lenient_string")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Word>,
    pub count: Option<u64>,
}

impl Page {
    /// Server count when present, else the number of rows received
    pub fn count(&self) -> u64 {
        self.count.unwrap_or(self.data.len() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LettersResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub letters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitResponse {
    pub ok: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub meta: Meta,
    #[serde(deserialize_with = "null_as_default")]
    pub letters: Vec<String>,
    pub first_letter: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub first_data: Page,
}

impl InitResponse {
    /// Explicit first letter, else the first listed one, else `A`; upper-cased
    pub fn first_letter(&self) -> String {
        self.first_letter
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.letters.first().map(String::as_str))
            .unwrap_or("A")
            .to_uppercase()
    }
}

pub fn parse_init(body: &str) -> Result<InitResponse> {
    Ok(serde_json::from_str(body)?)
}

pub fn parse_page(body: &str) -> Result<Page> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    En,
    Zh,
    Img,
    Note,
}

impl SortKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "en" => Some(SortKey::En),
            "zh" => Some(SortKey::Zh),
            "img" => Some(SortKey::Img),
            "note" => Some(SortKey::Note),
            _ => None,
        }
    }

    fn field(self, word: &Word) -> &str {
        match self {
            SortKey::En => &word.en,
            SortKey::Zh => &word.zh,
            SortKey::Img => &word.img,
            SortKey::Note => &word.note,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub dir: SortDir,
}

impl Default for SortState {
    /// English, A to Z
    fn default() -> Self {
        Self {
            key: Some(SortKey::En),
            dir: SortDir::Asc,
        }
    }
}

impl SortState {
    /// Same column flips the direction, another column starts ascending
    pub fn toggle(&mut self, key: SortKey) {
        if self.key != Some(key) {
            self.key = Some(key);
            self.dir = SortDir::Asc;
            return;
        }
        self.dir = match self.dir {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        };
    }

    /// Header arrow for a column
    pub fn mark(&self, key: SortKey) -> &'static str {
        match (self.key == Some(key), self.dir) {
            (false, _) => "",
            (true, SortDir::Asc) => " ▲",
            (true, SortDir::Desc) => " ▼",
        }
    }

    pub fn sorted(&self, rows: &[Word]) -> Vec<Word> {
        let mut out = rows.to_vec();
        if let Some(key) = self.key {
            out.sort_by(|a, b| {
                let ord = natural_cmp(key.field(a), key.field(b));
                match self.dir {
                    SortDir::Asc => ord,
                    SortDir::Desc => ord.reverse(),
                }
            });
        }
        out
    }
}

/// Case-insensitive comparison where digit runs compare by numeric value
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_digits(&mut a);
                let nb = take_digits(&mut b);
                let ord = na
                    .trim_start_matches('0')
                    .len()
                    .cmp(&nb.trim_start_matches('0').len())
                    .then_with(|| na.trim_start_matches('0').cmp(nb.trim_start_matches('0')));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_digits<I: Iterator<Item = char>>(it: &mut std::iter::Peekable<I>) -> String {
    let mut s = String::new();
    while let Some(c) = it.peek().copied().filter(char::is_ascii_digit) {
        s.push(c);
        it.next();
    }
    s
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Letter,
    Search,
}

/// What the list shows and what to fall back to when the search box is cleared
#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: ViewMode,
    pub sort: SortState,
    pub last_letter: Option<String>,
    pub last_letter_rows: Vec<Word>,
    pub rows: Vec<Word>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Letter,
            sort: SortState::default(),
            last_letter: None,
            last_letter_rows: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl ViewState {
    /// Every freshly loaded page resets to the default sort
    pub fn show_letter(&mut self, letter: &str, rows: Vec<Word>) {
        self.mode = ViewMode::Letter;
        self.sort = SortState::default();
        self.last_letter = Some(letter.to_string());
        self.last_letter_rows = rows.clone();
        self.rows = rows;
    }

    pub fn show_search(&mut self, rows: Vec<Word>) {
        self.mode = ViewMode::Search;
        self.sort = SortState::default();
        self.rows = rows;
    }

    /// Search box emptied: back to the last letter page, if there was one
    pub fn clear_search(&mut self) -> bool {
        if self.last_letter.is_none() {
            return false;
        }
        self.mode = ViewMode::Letter;
        self.rows = self.last_letter_rows.clone();
        true
    }

    pub fn visible(&self) -> Vec<Word> {
        self.sort.sorted(&self.rows)
    }
}

/// Trailing-edge debounce over caller-supplied instants; each input restarts the wait
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEBOUNCE)
    }
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Returns false when the trimmed input is empty (nothing is scheduled)
    pub fn input(&mut self, query: &str, now: Instant) -> bool {
        let q = query.trim();
        if q.is_empty() {
            self.pending = None;
            return false;
        }
        self.pending = Some((q.to_string(), now + self.delay));
        true
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The query to run once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if !ready {
            return None;
        }
        self.pending.take().map(|(q, _)| q)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Generation counter: only the response to the latest request may update state
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}
