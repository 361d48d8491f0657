use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Digit groups used to order page tokens: up to four digits starting at a
/// word boundary, so `"12345"` keys as `[1234]` and `"65a2"` as `[65]`.
static PAGE_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,4}").expect("valid page key pattern"));

/// Date formats accepted for a record's `date` field, tried in order.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y"];

/// The page component of a record number.
///
/// Most records start on a numbered page of their volume. Cases of original
/// jurisdiction and a few unusual dockets carry an alphanumeric token
/// instead (`"22orig"`, `"65a2"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Page {
    Number(u32),
    Token(String),
}

impl Page {
    /// Classifies a docket token. All-digit tokens that fit in a `u32` become
    /// `Number`; everything else is kept verbatim as a `Token`.
    pub fn parse(token: &str) -> Self {
        let trimmed = token.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<u32>() {
                return Page::Number(n);
            }
        }
        Page::Token(trimmed.to_string())
    }

    /// Ordering key shared by every page representation.
    pub fn sort_key(&self) -> Vec<u32> {
        let text = self.to_string();
        PAGE_KEY_PATTERN
            .find_iter(&text)
            .filter_map(|m| m.as_str().parse().ok())
            .collect()
    }

    /// First digit group of the page, if any. This is the value a cited page
    /// is compared against when falling back to a starting page.
    pub fn leading_number(&self) -> Option<u32> {
        self.sort_key().first().copied()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Number(n) => write!(f, "{}", n),
            Page::Token(t) => f.write_str(t),
        }
    }
}

impl From<u32> for Page {
    fn from(n: u32) -> Self {
        Page::Number(n)
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Page::Number(n) => serializer.serialize_u32(*n),
            Page::Token(t) => serializer.serialize_str(t),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPage {
    Number(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for Page {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawPage::deserialize(deserializer)? {
            RawPage::Number(n) => Page::Number(n),
            RawPage::Text(s) => Page::parse(&s),
        })
    }
}

/// Canonical identity of a record: its volume and starting page.
///
/// Serialized as a two-element array `[volume, page]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u32, Page)", into = "(u32, Page)")]
pub struct CaseNumber {
    pub volume: u32,
    pub page: Page,
}

impl CaseNumber {
    pub fn new(volume: u32, page: impl Into<Page>) -> Self {
        Self {
            volume,
            page: page.into(),
        }
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} U. S. {}", self.volume, self.page)
    }
}

impl TryFrom<(u32, Page)> for CaseNumber {
    type Error = String;

    fn try_from((volume, page): (u32, Page)) -> Result<Self, Self::Error> {
        if volume == 0 {
            return Err(format!("volume must be positive (page {})", page));
        }
        Ok(Self { volume, page })
    }
}

impl From<CaseNumber> for (u32, Page) {
    fn from(number: CaseNumber) -> Self {
        (number.volume, number.page)
    }
}

/// Decision date of a record. Unparseable dates are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl CaseDate {
    /// Parses `raw` with each of [`DATE_FORMATS`], falling back to the raw
    /// string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .map(CaseDate::Parsed)
            .unwrap_or_else(|| CaseDate::Raw(raw.to_string()))
    }

    pub fn as_naive(&self) -> Option<NaiveDate> {
        match self {
            CaseDate::Parsed(d) => Some(*d),
            CaseDate::Raw(_) => None,
        }
    }
}

impl Serialize for CaseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CaseDate::Parsed(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            CaseDate::Raw(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for CaseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(CaseDate::parse(&raw))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextSegments {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match TextSegments::deserialize(deserializer)? {
        TextSegments::One(s) => vec![s],
        TextSegments::Many(v) => v,
    })
}

/// One opinion in the corpus, as supplied by the acquisition layer.
///
/// Fields the acquisition layer adds beyond these (media links, summaries)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub url: String,
    pub number: CaseNumber,
    #[serde(rename = "txt", deserialize_with = "one_or_many")]
    pub text: Vec<String>,
    pub vol: u32,
    #[serde(default)]
    pub date: Option<CaseDate>,
}

impl Record {
    /// All text segments joined by a single space, the form name
    /// corroboration searches in.
    pub fn full_text(&self) -> String {
        self.text.join(" ")
    }
}

/// A record of the output artifact: the identifying fields of the input
/// record plus its resolved citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedRecord {
    pub name: String,
    pub url: String,
    #[serde(rename = "txt", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    pub number: CaseNumber,
    pub citations: Vec<CaseNumber>,
    pub vol: u32,
    pub date: Option<CaseDate>,
}

/// A raw `(volume, page)` pair lifted from opinion text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateCitation {
    pub volume: u32,
    pub page: u32,
}

impl CandidateCitation {
    pub fn as_number(&self) -> CaseNumber {
        CaseNumber::new(self.volume, self.page)
    }
}

/// Outcome of resolving one candidate citation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The candidate names a record number present in the corpus.
    Exact(CaseNumber),
    /// The candidate was mapped to a starting page by the fallback policy.
    Approximate(CaseNumber),
    Unresolved,
}

impl Resolution {
    pub fn target(&self) -> Option<&CaseNumber> {
        match self {
            Resolution::Exact(n) | Resolution::Approximate(n) => Some(n),
            Resolution::Unresolved => None,
        }
    }

    /// Whether resolution needed the fallback ("modified" in metrics).
    pub fn is_modified(&self) -> bool {
        matches!(self, Resolution::Approximate(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Exact(_) => "exact",
            Resolution::Approximate(_) => "approximate",
            Resolution::Unresolved => "unresolved",
        }
    }
}
