use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use walkdir::WalkDir;

use crate::config::{should_include_file, write_atomic, CiteGraphConfig};
use crate::digest::content_hash;
use crate::errors::{CiteGraphError, Result};
use crate::types::*;

/// Page number used in place of docket tokens when ordering records.
const TOKEN_PAGE_ORDER: u32 = 9999;

/// The opinions a run resolves citations against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Loads a corpus from a JSON file holding an array of records, or from
    /// a directory of such files.
    ///
    /// Directory shards are selected with the configuration's include
    /// patterns and concatenated in path order. Any unreadable or malformed
    /// shard fails the whole load.
    pub fn load(path: &Path, config: &CiteGraphConfig) -> Result<Self> {
        if !path.exists() {
            return Err(CiteGraphError::File {
                message: "corpus input does not exist".to_string(),
                path: path.display().to_string(),
            });
        }

        let records = if path.is_dir() {
            let mut records = Vec::new();
            let shards = scan_shards(path, config)?;
            if shards.is_empty() {
                return Err(CiteGraphError::Parse {
                    message: "no corpus files matched the include patterns".to_string(),
                    path: path.display().to_string(),
                });
            }
            for shard in &shards {
                records.extend(load_file(shard)?);
            }
            records
        } else {
            load_file(path)?
        };

        for record in &records {
            if record.vol != record.number.volume {
                tracing::warn!(
                    name = %record.name,
                    vol = record.vol,
                    number = %record.number,
                    "record 'vol' disagrees with its number; using the number"
                );
            }
        }

        tracing::info!(records = records.len(), path = %path.display(), "corpus loaded");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Orders records by volume, then date (unparseable dates after parsed
    /// ones, undated last), then page (docket tokens last).
    pub fn sort_canonical(&mut self) {
        self.records
            .sort_by_key(|r| canonical_key(&r.number, r.date.as_ref()));
    }
}

impl From<Vec<Record>> for Corpus {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

/// Date component of [`canonical_key`]: parsed dates in calendar order,
/// then unparseable dates by their raw text, then undated records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateOrder {
    Parsed(NaiveDate),
    Raw(String),
    Missing,
}

/// Sort key shared by input records and output records.
pub fn canonical_key(number: &CaseNumber, date: Option<&CaseDate>) -> (u32, DateOrder, u32) {
    let date = match date {
        Some(CaseDate::Parsed(d)) => DateOrder::Parsed(*d),
        Some(CaseDate::Raw(s)) => DateOrder::Raw(s.clone()),
        None => DateOrder::Missing,
    };
    let page = match number.page {
        Page::Number(n) => n,
        Page::Token(_) => TOKEN_PAGE_ORDER,
    };
    (number.volume, date, page)
}

/// Serializes the output artifact as pretty JSON, writes it atomically and
/// returns the content hash of what was written.
pub fn write_artifact(path: &Path, records: &[CitedRecord]) -> Result<String> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, json.as_bytes()).map_err(|e| CiteGraphError::File {
        message: format!("failed to write output artifact: {}", e),
        path: path.display().to_string(),
    })?;
    Ok(content_hash(&json))
}

fn load_file(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|e| CiteGraphError::File {
        message: e.to_string(),
        path: path.display().to_string(),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CiteGraphError::Parse {
        message: e.to_string(),
        path: path.display().to_string(),
    })
}

/// Lists the shard files under `root`. Any entry the walk cannot read
/// (broken symlink, unreadable directory, link loop) fails the scan, so a
/// partial corpus is never loaded.
fn scan_shards(root: &Path, config: &CiteGraphConfig) -> Result<Vec<PathBuf>> {
    let mut shards = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| CiteGraphError::File {
            message: format!("failed to scan corpus directory: {}", e),
            path: e
                .path()
                .unwrap_or(root)
                .display()
                .to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let included = entry
            .path()
            .strip_prefix(root)
            .map(|rel| should_include_file(&rel.to_string_lossy(), config))
            .unwrap_or(false);
        if included {
            shards.push(entry.into_path());
        }
    }
    shards.sort();
    Ok(shards)
}
