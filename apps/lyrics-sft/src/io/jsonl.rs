//! JSON Lines reading and writing.
//!
//! `JsonlReader` yields one `serde_json::Value` per non-blank line, lazily.
//! `JsonlWriter` truncates its target on construction and reopens it in append
//! mode for every batch, so nothing already flushed is lost if the run dies.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::errors::PipelineError;
use crate::models::training_pair::TrainingPair;

/// Destination for flushed batches of training pairs.
pub trait PairSink {
    fn write_many(&mut self, rows: &[TrainingPair]) -> Result<(), PipelineError>;
}

pub struct JsonlReader {
    path: PathBuf,
}

impl JsonlReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the file and returns a forward-only iterator over its records.
    pub fn read(&self) -> Result<JsonlRecords, PipelineError> {
        let file = File::open(&self.path).map_err(|e| PipelineError::io(&self.path, e))?;
        Ok(JsonlRecords {
            path: self.path.clone(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
            done: false,
        })
    }
}

/// Iterator returned by `JsonlReader::read`. Stops after the first error.
pub struct JsonlRecords {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    done: bool,
}

impl Iterator for JsonlRecords {
    type Item = Result<Value, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(PipelineError::io(&self.path, e)));
                }
            };
            self.line_no += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            return Some(serde_json::from_str(line).map_err(|source| {
                self.done = true;
                PipelineError::InvalidJson {
                    line: self.line_no,
                    source,
                }
            }));
        }
    }
}

pub struct JsonlWriter {
    path: PathBuf,
}

impl JsonlWriter {
    /// Creates the writer, truncating (or creating) the target file.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        File::create(&path).map_err(|e| PipelineError::io(&path, e))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one JSON line per row, in order.
    pub fn append<T: Serialize>(&self, rows: &[T]) -> Result<(), PipelineError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| PipelineError::io(&self.path, e))?;
        let mut out = BufWriter::new(file);

        for row in rows {
            let line = serde_json::to_string(row).map_err(PipelineError::Serialize)?;
            writeln!(out, "{line}").map_err(|e| PipelineError::io(&self.path, e))?;
        }
        out.flush().map_err(|e| PipelineError::io(&self.path, e))
    }
}

impl PairSink for JsonlWriter {
    fn write_many(&mut self, rows: &[TrainingPair]) -> Result<(), PipelineError> {
        self.append(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn write_input(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("input.txt");
        fs::write(&path, body).unwrap();
        path
    }

    fn pair(n: usize) -> TrainingPair {
        TrainingPair {
            prompt: format!("p{n}"),
            completion: format!("c{n}"),
        }
    }

    #[test]
    fn test_reads_records_in_order_skipping_blank_lines() {
        let dir = tempdir().unwrap();
        let path = write_input(dir.path(), "{\"a\":1}\n\n   \n{\"a\":2}\n{\"a\":3}");

        let values: Vec<Value> = JsonlReader::new(&path)
            .read()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(values, vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 3})]);
    }

    #[test]
    fn test_malformed_line_reports_line_number_and_stops() {
        let dir = tempdir().unwrap();
        let path = write_input(dir.path(), "{\"a\":1}\n\n{not json}\n{\"a\":3}\n");

        let mut records = JsonlReader::new(&path).read().unwrap();
        assert!(records.next().unwrap().is_ok());

        let err = records.next().unwrap().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidJson { line: 3, .. }));
        assert!(err.to_string().starts_with("Invalid JSON on line 3:"));

        assert!(records.next().is_none());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let err = JsonlReader::new(dir.path().join("nope.txt")).read().err().unwrap();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn test_writer_truncates_on_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jsonl");
        fs::write(&path, "stale\n").unwrap();

        let writer = JsonlWriter::create(&path).unwrap();
        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "");
    }

    #[test]
    fn test_writer_appends_across_calls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jsonl");

        let mut writer = JsonlWriter::create(&path).unwrap();
        writer.write_many(&[pair(1), pair(2)]).unwrap();
        writer.write_many(&[pair(3)]).unwrap();

        let body = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"prompt":"p1","completion":"c1"}"#,
                r#"{"prompt":"p2","completion":"c2"}"#,
                r#"{"prompt":"p3","completion":"c3"}"#,
            ]
        );
    }

    #[test]
    fn test_round_trip_through_reader() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jsonl");

        let mut writer = JsonlWriter::create(&path).unwrap();
        writer.write_many(&[pair(7)]).unwrap();

        let values: Vec<Value> = JsonlReader::new(&path)
            .read()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(values, vec![json!({"prompt": "p7", "completion": "c7"})]);
    }
}
