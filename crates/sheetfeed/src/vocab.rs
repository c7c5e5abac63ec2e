//! Multilingual vocabulary sheets: category README tab plus one tab per category

use crate::decode::header::{HeaderNormalization, Record};
use crate::table::Table;

pub const README_GID: &str = "0";

const ZH: &[&str] = &["Chinese (ZH)", "word_zh", "中文", "zh", "Chinese"];
const EN: &[&str] = &["English (EN)", "word_en", "English", "英文", "en"];
const JP_KANA: &[&str] = &["Japanese Kana (JA)", "kana", "jp_kana", "jp_k", "假名"];
const JP_KANJI: &[&str] = &[
    "Japanese Kanji (JA)",
    "kanji",
    "jp_kanji",
    "Japanese",
    "日文",
    "日語",
    "日本語",
];
const JP_KANJI_FALLBACK: &[&str] = &["word_jp", "jp"];
const KR: &[&str] = &["Korean (KO)", "word_kr", "한국어", "韓文", "kr", "Korean"];
const TH: &[&str] = &["Thai (TH)", "thai", "th", "泰文", "泰語"];

/// Published CSV export of one tab of a published spreadsheet
pub fn sheet_csv_url(sheet_id: &str, gid: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/e/{}/pub?gid={}&single=true&output=csv",
        sheet_id, gid
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub tag: String,
    pub gid: String,
    pub label: String,
}

/// README tab rows are `tag,gid,label`; rows missing any of the three are ignored
pub fn categories(table: &Table) -> Vec<Category> {
    table
        .iter()
        .filter_map(|row| {
            let (tag, gid, label) = (row.cell(0).trim(), row.cell(1).trim(), row.cell(2).trim());
            if tag.is_empty() || gid.is_empty() || label.is_empty() {
                return None;
            }
            Some(Category {
                tag: tag.to_string(),
                gid: gid.to_string(),
                label: label.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LinkLabel {
    Video,
    ZhEnJa,
    ZhEnKo,
    ZhEnTh,
    ZhKoJa,
    ZhKoTh,
    Zh,
    En,
    Ja,
    Ko,
    Th,
    Link,
}

impl LinkLabel {
    /// Label guessed from the column header holding the URL
    pub fn from_header(key: &str) -> Self {
        let k = key.to_lowercase();
        let combo = |a: &str, b: &str| k.contains(a) || k.contains(b);
        if k.contains("yt") || k.contains("you") {
            LinkLabel::Video
        } else if combo("zh・en・ja", "zh en ja") {
            LinkLabel::ZhEnJa
        } else if combo("zh・en・ko", "zh en ko") {
            LinkLabel::ZhEnKo
        } else if combo("zh・en・th", "zh en th") {
            LinkLabel::ZhEnTh
        } else if combo("zh・ko・ja", "zh ko ja") {
            LinkLabel::ZhKoJa
        } else if combo("zh・ko・th", "zh ko th") {
            LinkLabel::ZhKoTh
        } else if k.contains("zh") {
            LinkLabel::Zh
        } else if k.contains("en") {
            LinkLabel::En
        } else if k.contains("ja") {
            LinkLabel::Ja
        } else if k.contains("ko") {
            LinkLabel::Ko
        } else if k.contains("th") {
            LinkLabel::Th
        } else {
            LinkLabel::Link
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            LinkLabel::Zh => "ZH (中)",
            LinkLabel::En => "EN (英)",
            LinkLabel::Ja => "JA (日)",
            LinkLabel::Ko => "KO (韓)",
            LinkLabel::Th => "TH (泰)",
            LinkLabel::ZhEnJa => "ZH/EN/JA (中/英/日)",
            LinkLabel::ZhEnKo => "ZH/EN/KO (中/英/韓)",
            LinkLabel::ZhEnTh => "ZH/EN/TH (中/英/泰)",
            LinkLabel::ZhKoJa => "ZH/KO/JA (中/韓/日)",
            LinkLabel::ZhKoTh => "ZH/KO/TH (中/韓/泰)",
            LinkLabel::Video => "🎧 影片",
            LinkLabel::Link => "🔗 連結",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocabLink {
    pub label: LinkLabel,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocabEntry {
    pub zh: String,
    pub en: String,
    pub jp_kana: String,
    pub jp_kanji: String,
    pub kr: String,
    pub th: String,
    pub links: Vec<VocabLink>,
}

impl VocabEntry {
    pub fn from_record(rec: &Record<'_>) -> Self {
        let text = |aliases: &[&str]| rec.get_loose(aliases).to_string();
        let jp_kanji = match rec.get_loose(JP_KANJI) {
            "" => rec.get_loose(JP_KANJI_FALLBACK),
            v => v,
        };
        let links = rec
            .distinct()
            .into_iter()
            .filter(|(_, v)| v.starts_with("http"))
            .map(|(k, v)| VocabLink {
                label: LinkLabel::from_header(k),
                url: v.to_string(),
            })
            .collect();
        Self {
            zh: text(ZH),
            en: text(EN),
            jp_kana: text(JP_KANA),
            jp_kanji: jp_kanji.to_string(),
            kr: text(KR),
            th: text(TH),
            links,
        }
    }

    pub fn has_video(&self) -> bool {
        self.links.iter().any(|l| l.label == LinkLabel::Video)
    }

    /// Caption of the collapsed link cell: headphones when any link is a video
    pub fn link_summary(&self) -> &'static str {
        if self.links.is_empty() {
            ""
        } else if self.has_video() {
            "🎧"
        } else {
            "連結"
        }
    }
}

/// Category tab rows; headers are matched loosely, so drifted column names still resolve
pub fn entries(table: &Table) -> Vec<VocabEntry> {
    let records = table.records(HeaderNormalization::Alphanumeric);
    records
        .iter()
        .map(|r| VocabEntry::from_record(&r))
        .collect()
}
