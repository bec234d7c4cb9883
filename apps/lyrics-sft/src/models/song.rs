//! Song records as read from the lyrics corpus.
//!
//! Input lines are loosely typed. `SongRecord::from_value` is the explicit
//! parse step: it tolerates absent or oddly typed metadata, but reports missing lyrics as
//! `RecordError::MissingField` so the pipeline can skip the record, and
//! reports structurally wrong input as a hard error.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

pub const RAPPER_KEY: &str = "rapper";
pub const TITLE_KEY: &str = "title";
pub const YEAR_KEY: &str = "year";
pub const LYRICS_KEY: &str = "lyrics";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has unexpected type: expected {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Release year. The corpus carries both `"1996"` and `1996`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongYear {
    Number(i64),
    Text(String),
}

impl fmt::Display for SongYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SongYear::Number(n) => write!(f, "{n}"),
            SongYear::Text(s) => f.write_str(s),
        }
    }
}

/// A single song entry. Metadata is optional; lyrics are always present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    pub rapper_name: Option<String>,
    pub song_title: Option<String>,
    pub song_year: Option<SongYear>,
    pub song_lyrics: String,
}

impl SongRecord {
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let obj = value
            .as_object()
            .ok_or_else(|| RecordError::NotAnObject(type_name(value)))?;

        let song_lyrics = lyrics(obj)?;

        Ok(SongRecord {
            rapper_name: metadata_text(obj, RAPPER_KEY),
            song_title: metadata_text(obj, TITLE_KEY),
            song_year: year(obj),
            song_lyrics,
        })
    }
}

/// Lyrics must be a non-empty string; absent, null or empty means "missing".
fn lyrics(obj: &Map<String, Value>) -> Result<String, RecordError> {
    match obj.get(LYRICS_KEY) {
        None | Some(Value::Null) => Err(RecordError::MissingField(LYRICS_KEY)),
        Some(Value::String(s)) if s.is_empty() => Err(RecordError::MissingField(LYRICS_KEY)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(RecordError::WrongType {
            field: LYRICS_KEY,
            expected: "string",
            found: type_name(other),
        }),
    }
}

/// Metadata never fails a record: non-string values render as their JSON text.
fn metadata_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn year(obj: &Map<String, Value>) -> Option<SongYear> {
    match obj.get(YEAR_KEY)? {
        Value::Null => None,
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => SongYear::Number(i),
            None => SongYear::Text(n.to_string()),
        }),
        Value::String(s) => Some(SongYear::Text(s.clone())),
        other => Some(SongYear::Text(other.to_string())),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
