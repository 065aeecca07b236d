//! Domain types shared by every linkpeek crate
//!
//! Titles, namespaces, page summaries and gallery items as the preview sees
//! them. None of these know how they were fetched.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Characters escaped in the path segment of an article URI.
const TITLE_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// ─────────────────────────────────────────────────────────────────────────────
// Namespace
// ─────────────────────────────────────────────────────────────────────────────

/// MediaWiki namespace of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Namespace {
    Media,
    Special,
    #[default]
    Main,
    Talk,
    User,
    UserTalk,
    Project,
    ProjectTalk,
    File,
    FileTalk,
    Template,
    Help,
    Category,
    /// Any namespace without a dedicated variant, keyed by its numeric code.
    Other(i32),
}

impl Namespace {
    /// Numeric namespace code as used by the MediaWiki API.
    pub fn code(&self) -> i32 {
        match self {
            Namespace::Media => -2,
            Namespace::Special => -1,
            Namespace::Main => 0,
            Namespace::Talk => 1,
            Namespace::User => 2,
            Namespace::UserTalk => 3,
            Namespace::Project => 4,
            Namespace::ProjectTalk => 5,
            Namespace::File => 6,
            Namespace::FileTalk => 7,
            Namespace::Template => 10,
            Namespace::Help => 12,
            Namespace::Category => 14,
            Namespace::Other(code) => *code,
        }
    }

    /// Canonical English prefix, without the trailing colon.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Namespace::Media => Some("Media"),
            Namespace::Special => Some("Special"),
            Namespace::Main | Namespace::Other(_) => None,
            Namespace::Talk => Some("Talk"),
            Namespace::User => Some("User"),
            Namespace::UserTalk => Some("User talk"),
            Namespace::Project => Some("Wikipedia"),
            Namespace::ProjectTalk => Some("Wikipedia talk"),
            Namespace::File => Some("File"),
            Namespace::FileTalk => Some("File talk"),
            Namespace::Template => Some("Template"),
            Namespace::Help => Some("Help"),
            Namespace::Category => Some("Category"),
        }
    }

    /// Look up a namespace by its canonical prefix (case-insensitive, `_` == ` `).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let normalized = prefix.replace('_', " ").to_lowercase();
        [
            Namespace::Media,
            Namespace::Special,
            Namespace::Talk,
            Namespace::User,
            Namespace::UserTalk,
            Namespace::Project,
            Namespace::ProjectTalk,
            Namespace::File,
            Namespace::FileTalk,
            Namespace::Template,
            Namespace::Help,
            Namespace::Category,
        ]
        .into_iter()
        .find(|ns| {
            ns.prefix()
                .map(|p| p.to_lowercase() == normalized)
                .unwrap_or(false)
        })
    }

    /// Talk pages live in the odd-numbered namespaces.
    pub fn is_talk(&self) -> bool {
        let code = self.code();
        code > 0 && code % 2 == 1
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Namespace::User)
    }
}

impl From<i32> for Namespace {
    fn from(code: i32) -> Self {
        match code {
            -2 => Namespace::Media,
            -1 => Namespace::Special,
            0 => Namespace::Main,
            1 => Namespace::Talk,
            2 => Namespace::User,
            3 => Namespace::UserTalk,
            4 => Namespace::Project,
            5 => Namespace::ProjectTalk,
            6 => Namespace::File,
            7 => Namespace::FileTalk,
            10 => Namespace::Template,
            12 => Namespace::Help,
            14 => Namespace::Category,
            other => Namespace::Other(other),
        }
    }
}

impl From<Namespace> for i32 {
    fn from(ns: Namespace) -> Self {
        ns.code()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WikiSite / PageTitle
// ─────────────────────────────────────────────────────────────────────────────

/// The wiki a title belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiSite {
    pub language_code: String,
    pub domain: String,
}

impl WikiSite {
    pub fn for_language(language_code: impl Into<String>) -> Self {
        let language_code = language_code.into();
        let domain = format!("{}.wikipedia.org", language_code);
        Self {
            language_code,
            domain,
        }
    }

    /// Database name used by analytics, e.g. `enwiki`.
    pub fn db_name(&self) -> String {
        format!("{}wiki", self.language_code.replace('-', "_"))
    }
}

impl Default for WikiSite {
    fn default() -> Self {
        Self::for_language("en")
    }
}

/// A page title on a specific wiki.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTitle {
    /// Prefixed title text, e.g. `Talk:Rust (programming language)`.
    pub text: String,
    /// Display form; may contain inline HTML.
    pub display_text: String,
    #[serde(default)]
    pub wiki_site: WikiSite,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PageTitle {
    /// Create a title from prefixed text.
    ///
    /// Underscores are normalized to spaces. Empty titles are rejected.
    pub fn new(text: &str, wiki_site: WikiSite) -> Result<Self> {
        let text = text.trim().replace('_', " ");
        if text.is_empty() {
            return Err(Error::invalid_title("title text is empty"));
        }
        Ok(Self {
            display_text: text.clone(),
            text,
            wiki_site,
            thumb_url: None,
            description: None,
        })
    }

    pub fn with_thumb_url(mut self, thumb_url: Option<String>) -> Self {
        self.thumb_url = thumb_url;
        self
    }

    /// Namespace derived from the prefix of `text`.
    pub fn namespace(&self) -> Namespace {
        self.text
            .split_once(':')
            .and_then(|(prefix, _)| Namespace::from_prefix(prefix))
            .unwrap_or(Namespace::Main)
    }

    /// Canonical article URI on the title's wiki.
    pub fn uri(&self) -> String {
        let path = utf8_percent_encode(&self.text.replace(' ', "_"), TITLE_PATH).to_string();
        match url::Url::parse(&format!("https://{}/", self.wiki_site.domain))
            .and_then(|base| base.join(&format!("wiki/{}", path)))
        {
            Ok(url) => url.to_string(),
            Err(_) => format!("https://{}/wiki/{}", self.wiki_site.domain, path),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

/// Where the user came from when a preview was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySource {
    #[default]
    InternalLink,
    ExternalLink,
    Search,
    Random,
    Feed,
    Places,
}

impl HistorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistorySource::InternalLink => "internal_link",
            HistorySource::ExternalLink => "external_link",
            HistorySource::Search => "search",
            HistorySource::Random => "random",
            HistorySource::Feed => "feed",
            HistorySource::Places => "places",
        }
    }
}

/// A visit to `title`, carried along to navigation requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: PageTitle,
    pub source: HistorySource,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(title: PageTitle, source: HistorySource) -> Self {
        Self {
            title,
            source,
            timestamp: Utc::now(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Summary / gallery
// ─────────────────────────────────────────────────────────────────────────────

/// Page summary as delivered by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page_id: i64,
    /// Display title; may contain inline HTML.
    pub display_title: String,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub namespace: Option<Namespace>,
    /// `standard`, `disambiguation`, ...
    #[serde(default = "default_page_type")]
    pub page_type: String,
}

fn default_page_type() -> String {
    "standard".to_string()
}

impl PageSummary {
    pub fn is_disambiguation(&self) -> bool {
        self.page_type == "disambiguation"
    }
}

/// One thumbnail of the gallery strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// File name of the image, e.g. `File:Ferris.png`.
    pub name: String,
    pub thumb_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A user reading list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingList {
    pub id: i64,
    pub title: String,
}
