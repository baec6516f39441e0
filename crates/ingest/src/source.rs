use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use mailstats_core::{HourWindow, Message};
use serde::{Deserialize, Serialize};
use tracing::warn;
use walkdir::WalkDir;

use crate::types::{IngestIssue, SourceError};

/// A message as delivered by a mailbox source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub ts: i64,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl SourceMessage {
    pub fn to_message(&self) -> Message {
        Message::new(self.from.clone(), self.to.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub messages: Vec<SourceMessage>,
    pub issues: Vec<IngestIssue>,
}

/// Supplies the messages an account sent or received inside one window.
pub trait MessageSource {
    fn fetch(&self, account: &str, window: HourWindow) -> Result<SourceBatch, SourceError>;
}

/// Messages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct VecMessageSource {
    messages: Vec<SourceMessage>,
}

impl VecMessageSource {
    pub fn new(messages: Vec<SourceMessage>) -> Self {
        Self { messages }
    }
}

impl MessageSource for VecMessageSource {
    fn fetch(&self, _account: &str, window: HourWindow) -> Result<SourceBatch, SourceError> {
        Ok(SourceBatch {
            messages: self
                .messages
                .iter()
                .filter(|message| window.contains(message.ts))
                .cloned()
                .collect(),
            issues: Vec::new(),
        })
    }
}

/// Reads newline-delimited JSON messages from a file or from every
/// `.jsonl`/`.ndjson` file under a directory.
#[derive(Debug, Clone)]
pub struct JsonlMessageSource {
    root: PathBuf,
}

impl JsonlMessageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn files(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }
        let mut files = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_message_path(entry.path()))
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>();
        files.sort();
        files
    }
}

fn is_message_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|value| value.to_str()),
        Some("jsonl") | Some("ndjson")
    )
}

impl MessageSource for JsonlMessageSource {
    fn fetch(&self, _account: &str, window: HourWindow) -> Result<SourceBatch, SourceError> {
        if !self.root.exists() {
            return Err(SourceError::Unavailable(format!(
                "{} does not exist",
                self.root.display()
            )));
        }
        let mut batch = SourceBatch::default();
        for path in self.files() {
            let file_path = path.to_string_lossy().to_string();
            let file = File::open(&path).map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
            for (index, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<SourceMessage>(line) {
                    Ok(message) if window.contains(message.ts) => batch.messages.push(message),
                    Ok(_) => {}
                    Err(err) => {
                        warn!(file = %file_path, line = index + 1, error = %err, "skipping message line");
                        batch.issues.push(IngestIssue {
                            file_path: file_path.clone(),
                            message: format!("line {}: {}", index + 1, err),
                        });
                    }
                }
            }
        }
        Ok(batch)
    }
}
