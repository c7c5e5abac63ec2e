//! Article index sheet: tabs, publishing platforms and related reading

use std::collections::HashMap;

use crate::decode::header::{HeaderNormalization, Record, collapse_whitespace};
use crate::table::Table;

pub const ID: &str = "ID";
pub const TITLE: &str = "文章標題";
pub const CATEGORY: &str = "主題分類";
pub const KEYWORDS: &str = "主題關鍵字";
pub const RELATED_IDS: &str = "延伸閱讀相關ID";
pub const PUBLISH_PLATFORM: &str = "發布平台";
pub const MEDIUM_URL: &str = "Medium_URL";
pub const FANGEZI_URL: &str = "方格子_URL";
pub const YOUTUBE_URL: &str = "YouTube_URL";

/// Category the reading guide draws from
pub const GUIDE_CATEGORY: &str = "生活與程式";
pub const GUIDE_LIMIT: usize = 5;

/// Folds the header spellings editors have used over time onto one name
pub fn normalize_article_header(name: &str) -> String {
    let normalized = collapse_whitespace(name);
    let lower = normalized.to_lowercase();
    if lower.contains("延伸") && lower.contains("id") {
        return RELATED_IDS.to_string();
    }
    if lower.contains("主題") && lower.contains("關鍵") {
        return KEYWORDS.to_string();
    }
    if lower.contains("文章") && (lower.contains("標題") || lower.contains("名稱")) {
        return TITLE.to_string();
    }
    normalized
}

pub const ARTICLE_HEADERS: HeaderNormalization =
    HeaderNormalization::Custom(normalize_article_header);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Article {
    pub id: String,
    pub title: String,
    pub category: String,
    pub keywords: String,
    pub related_ids: String,
    pub publish_platform: String,
    pub medium_url: String,
    pub fangezi_url: String,
    pub youtube_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlatformLink {
    pub name: &'static str,
    pub url: String,
}

impl Article {
    pub fn from_record(rec: &Record<'_>) -> Self {
        let field = |key: &str| rec.get(key).trim().to_string();
        Self {
            id: field(ID),
            title: field(TITLE),
            category: field(CATEGORY),
            keywords: field(KEYWORDS),
            related_ids: field(RELATED_IDS),
            publish_platform: field(PUBLISH_PLATFORM),
            medium_url: field(MEDIUM_URL),
            fangezi_url: field(FANGEZI_URL),
            youtube_url: field(YOUTUBE_URL),
        }
    }

    pub fn platforms(&self) -> Vec<PlatformLink> {
        [
            ("Medium", &self.medium_url),
            ("方格子", &self.fangezi_url),
            ("YouTube", &self.youtube_url),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .map(|(name, url)| PlatformLink {
            name,
            url: url.clone(),
        })
        .collect()
    }

    /// Preferred reading link: 方格子, then Medium, else `#`
    pub fn url(&self) -> &str {
        [&self.fangezi_url, &self.medium_url]
            .into_iter()
            .find(|u| !u.is_empty())
            .map(String::as_str)
            .unwrap_or("#")
    }

    pub fn tags(&self) -> Vec<&str> {
        parse_tags(&self.keywords)
    }
}

/// Category cell split on `,` or `/`; a category matches exactly or as a substring
pub fn matches_categories(value: &str, categories: &[&str]) -> bool {
    if value.is_empty() {
        return false;
    }
    let items: Vec<&str> = value
        .split([',', '/'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    categories
        .iter()
        .any(|cat| items.iter().any(|item| item == cat || item.contains(cat)))
}

/// Every run of ASCII digits, whatever separates them
pub fn parse_related_ids(v: &str) -> Vec<&str> {
    v.split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse_tags(v: &str) -> Vec<&str> {
    v.split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '，' | '；'))
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Explain,
    Tools,
}

impl Tab {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "explain" => Some(Tab::Explain),
            "tools" => Some(Tab::Tools),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Explain => "說明文章",
            Tab::Tools => "程式工具",
        }
    }

    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Tab::Explain => &["生活與程式"],
            Tab::Tools => &["程式工具"],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: Vec<Article>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_table(table: Table) -> Self {
        let table = table.trim_blank_edges();
        let records = table.records(ARTICLE_HEADERS);
        let articles: Vec<Article> = records.iter().map(|r| Article::from_record(&r)).collect();
        let mut by_id = HashMap::new();
        for (i, a) in articles.iter().enumerate() {
            if !a.id.is_empty() {
                by_id.insert(a.id.clone(), i);
            }
        }
        Self { articles, by_id }
    }

    pub fn from_csv(text: &str) -> Self {
        Self::from_table(crate::parse_with(text, &crate::Options::raw()))
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.by_id.get(id).map(|&i| &self.articles[i])
    }

    /// Titled articles belonging to the tab's categories
    pub fn visible(&self, tab: Tab) -> Vec<&Article> {
        let categories = tab.categories();
        self.articles
            .iter()
            .filter(|a| !a.title.is_empty())
            .filter(|a| categories.is_empty() || matches_categories(&a.category, categories))
            .collect()
    }

    /// Hand-listed ids first, then articles sharing a tag; never the article itself
    pub fn related_ids(&self, article: &Article) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        let mut push = |id: &str| {
            if !id.is_empty() && !ids.iter().any(|x| x == id) {
                ids.push(id.to_string());
            }
        };
        for id in parse_related_ids(&article.related_ids) {
            push(id);
        }
        let mine = article.tags();
        if !mine.is_empty() {
            for other in &self.articles {
                if other.id == article.id {
                    continue;
                }
                if other.tags().iter().any(|t| mine.contains(t)) {
                    push(&other.id);
                }
            }
        }
        ids.retain(|id| *id != article.id);
        ids
    }

    /// Related ids resolved to articles; ids with no row are dropped
    pub fn related(&self, article: &Article) -> Vec<&Article> {
        self.related_ids(article)
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Starter list: titled guide-category articles with a Medium link, by id
    pub fn guide(&self, limit: usize) -> Vec<&Article> {
        let mut picked: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| !a.title.is_empty() && !a.medium_url.is_empty())
            .filter(|a| a.category == GUIDE_CATEGORY)
            .collect();
        picked.sort_by_key(|a| a.id.trim().parse::<i64>().unwrap_or(i64::MAX));
        picked.truncate(limit);
        picked
    }
}
