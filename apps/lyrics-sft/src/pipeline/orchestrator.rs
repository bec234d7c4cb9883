//! Lyrics pipeline — drives records one at a time through
//! summarize → prompt → completion → batch buffer → flush.
//!
//! Policies:
//! - records are numbered from 1; with a cap of N the run ends once N records
//!   have been read, skipped ones included, and record N+1 is never read
//! - records without lyrics are skipped silently
//! - the throttle runs after every emitted pair
//! - the buffer is flushed at `FLUSH_THRESHOLD` pairs and once more at the end
//!
//! Any error other than a skip aborts the run. Buffered pairs that were not
//! yet flushed are dropped in that case.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::PipelineError;
use crate::io::jsonl::{JsonlReader, JsonlWriter, PairSink};
use crate::models::song::{RecordError, SongRecord};
use crate::models::training_pair::TrainingPair;
use crate::pipeline::completion::add_title_to_lyrics;
use crate::pipeline::prompt::build_prompt;
use crate::pipeline::summarizer::Summarizer;
use crate::pipeline::throttle::Throttle;

/// Buffered pairs are written out once this many have accumulated.
pub const FLUSH_THRESHOLD: usize = 100;

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Highest record position accepted for processing.
    pub seen: usize,
    pub emitted: usize,
    pub skipped: usize,
    pub flushes: usize,
    /// The cap was reached; further input, if any, was left unread.
    pub stopped_by_cap: bool,
}

pub struct LyricsPipeline {
    summarizer: Arc<dyn Summarizer>,
    throttle: Arc<dyn Throttle>,
}

impl LyricsPipeline {
    pub fn new(summarizer: Arc<dyn Summarizer>, throttle: Arc<dyn Throttle>) -> Self {
        Self {
            summarizer,
            throttle,
        }
    }

    /// Truncates `output`, then converts every record of `input` into it.
    pub async fn run_files(
        &self,
        input: &Path,
        output: &Path,
        max_items: Option<usize>,
    ) -> Result<RunStats, PipelineError> {
        let mut writer = JsonlWriter::create(output)?;
        let records = JsonlReader::new(input).read()?;
        info!(
            "Converting {} -> {}",
            input.display(),
            writer.path().display()
        );
        self.run(records, &mut writer, max_items).await
    }

    /// Processes `records` in order, writing pairs to `sink` in batches.
    ///
    /// A `max_items` of `None` or `Some(0)` means no cap.
    pub async fn run<I>(
        &self,
        records: I,
        sink: &mut dyn PairSink,
        max_items: Option<usize>,
    ) -> Result<RunStats, PipelineError>
    where
        I: IntoIterator<Item = Result<Value, PipelineError>>,
    {
        let cap = max_items.filter(|&max| max > 0);
        let mut stats = RunStats::default();
        let mut batch: Vec<TrainingPair> = Vec::with_capacity(FLUSH_THRESHOLD);

        let mut records = records.into_iter();
        let mut index = 0;

        loop {
            if cap.is_some_and(|max| index >= max) {
                info!("Reached max_items={index}; not reading song NO. {}", index + 1);
                stats.stopped_by_cap = true;
                break;
            }
            let Some(raw) = records.next() else {
                break;
            };
            index += 1;
            let raw = raw?;
            stats.seen = index;
            info!("Calling API for song NO. {index}");

            let record = match SongRecord::from_value(&raw) {
                Ok(record) => record,
                Err(RecordError::MissingField(field)) => {
                    debug!("Skipping song NO. {index}: no {field}");
                    stats.skipped += 1;
                    continue;
                }
                Err(source) => return Err(PipelineError::Record { index, source }),
            };

            let summary = self.summarizer.summarize(&record.song_lyrics).await?;
            info!("Got summary from song NO. {index}");

            let prompt = build_prompt(&record, &summary);
            let completion = add_title_to_lyrics(
                record.song_title.as_deref().unwrap_or_default(),
                &record.song_lyrics,
            );
            batch.push(TrainingPair { prompt, completion });
            stats.emitted += 1;

            self.throttle.wait().await;

            if batch.len() >= FLUSH_THRESHOLD {
                flush(&mut batch, sink, &mut stats)?;
            }
        }

        if !batch.is_empty() {
            flush(&mut batch, sink, &mut stats)?;
        }

        Ok(stats)
    }
}

fn flush(
    batch: &mut Vec<TrainingPair>,
    sink: &mut dyn PairSink,
    stats: &mut RunStats,
) -> Result<(), PipelineError> {
    sink.write_many(batch)?;
    stats.flushes += 1;
    info!("Flushed {} training pairs ({} total)", batch.len(), stats.emitted);
    batch.clear();
    Ok(())
}
