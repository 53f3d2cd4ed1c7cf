use crate::app::ports::{SinkOutcome, TourSinkPort};
use crate::constants::{FAILURE_MESSAGE_LIMIT, PROGRESS_NAME_LIMIT};
use crate::metrics::ImportMetrics;
use crate::normalize::RowNormalizer;
use crate::source::IndexedRow;
use crate::types::TourRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Counts for one import run. Skipped rows (blank id) are neither created nor failed.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ImportSummary {
    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Where human-readable progress lines go. Stderr keeps stdout free for
/// JSON lines when a dry run writes records to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressOutput {
    #[default]
    Stdout,
    Stderr,
}

impl ProgressOutput {
    pub fn line(&self, text: impl std::fmt::Display) {
        match self {
            ProgressOutput::Stdout => println!("{}", text),
            ProgressOutput::Stderr => eprintln!("{}", text),
        }
    }
}

/// Sequential row loop: normalize, send once, count, move on.
pub struct ImportPipeline {
    normalizer: RowNormalizer,
    sink: Box<dyn TourSinkPort>,
    preview: Option<String>,
    progress: ProgressOutput,
}

impl ImportPipeline {
    pub fn new(sink: Box<dyn TourSinkPort>) -> Self {
        Self {
            normalizer: RowNormalizer::new(),
            sink,
            preview: None,
            progress: ProgressOutput::default(),
        }
    }

    pub fn with_progress_output(mut self, progress: ProgressOutput) -> Self {
        self.progress = progress;
        self
    }

    /// Log the economics of every tour whose name contains `needle` (case-insensitive).
    pub fn with_preview(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into().trim().to_lowercase();
        self.preview = (!needle.is_empty()).then_some(needle);
        self
    }

    #[instrument(skip_all, fields(rows = rows.len()))]
    pub async fn run(&self, rows: &[IndexedRow]) -> ImportSummary {
        let started_at = Utc::now();
        let total_rows = rows.len();
        let (mut created, mut failed, mut skipped) = (0usize, 0usize, 0usize);

        for row in rows {
            let Some(record) = self.normalizer.normalize(&row.cells) else {
                debug!("Row {} has no id, skipping", row.index);
                ImportMetrics::record_skipped();
                skipped += 1;
                continue;
            };

            self.maybe_preview(&record);

            match self.sink.send(&record).await {
                SinkOutcome::Created { status } => {
                    created += 1;
                    ImportMetrics::record_created();
                    debug!("Tour {} accepted with status {}", record.id, status);
                    self.progress.line(format_args!(
                        "[OK] {}/{}: {}...",
                        row.index,
                        total_rows,
                        truncate(&record.name, PROGRESS_NAME_LIMIT)
                    ));
                }
                SinkOutcome::Rejected { status } => {
                    failed += 1;
                    ImportMetrics::record_failed();
                    warn!("Tour {} rejected with status {}", record.id, status);
                    self.progress.line(format_args!("[FAIL] {}/{}: Failed - {}", row.index, total_rows, status));
                }
                SinkOutcome::Failed { message } => {
                    failed += 1;
                    ImportMetrics::record_failed();
                    let short = truncate(&message, FAILURE_MESSAGE_LIMIT);
                    warn!("Tour {} not sent: {}", record.id, short);
                    self.progress.line(format_args!("[ERROR] {}/{}: Error - {}", row.index, total_rows, short));
                }
            }
        }

        let summary = ImportSummary {
            total_rows,
            created,
            failed,
            skipped,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            created = summary.created,
            failed = summary.failed,
            skipped = summary.skipped,
            "Import finished in {:.1}s",
            summary.duration_secs()
        );
        summary
    }

    fn maybe_preview(&self, record: &TourRecord) {
        let Some(needle) = &self.preview else {
            return;
        };
        if record.name.to_lowercase().contains(needle.as_str()) {
            info!(
                tour = %record.id,
                net_rate = record.net_rate,
                public_price = record.public_price,
                factor_shared = record.factor_shared,
                infant_age = %record.infant_age,
                net_private = record.net_private,
                "Preview: {}",
                record.name
            );
        }
    }
}

/// Cuts `text` to at most `limit` characters without splitting a code point.
pub fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays scripted outcomes and remembers which ids were sent.
    struct ScriptedSink {
        outcomes: Mutex<VecDeque<SinkOutcome>>,
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedSink {
        fn new(outcomes: Vec<SinkOutcome>) -> (Self, Arc<Mutex<Vec<String>>>) {
            let sent = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    outcomes: Mutex::new(outcomes.into()),
                    sent: sent.clone(),
                },
                sent,
            )
        }
    }

    #[async_trait]
    impl TourSinkPort for ScriptedSink {
        async fn send(&self, record: &TourRecord) -> SinkOutcome {
            self.sent.lock().unwrap().push(record.id.clone());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(SinkOutcome::Created { status: 201 })
        }
    }

    fn row(index: usize, cells: &[&str]) -> IndexedRow {
        IndexedRow {
            index,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_counts_created_failed_and_skipped() {
        let (sink, sent) = ScriptedSink::new(vec![
            SinkOutcome::Created { status: 201 },
            SinkOutcome::Failed {
                message: "error trying to connect: tcp connect error: Connection refused (os error 111)".to_string(),
            },
            SinkOutcome::Rejected { status: 500 },
            SinkOutcome::Created { status: 200 },
        ]);
        let pipeline = ImportPipeline::new(Box::new(sink));

        let rows = vec![
            row(1, &["T1", "Holbox Tour"]),
            row(2, &["T2", "Cenote Swim"]),
            row(3, &["", "No id"]),
            row(4, &["T3", "Chichen Itza"]),
            row(5, &["T4"]),
        ];

        let summary = pipeline.run(&rows).await;
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.created, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(*sent.lock().unwrap(), vec!["T1", "T2", "T3", "T4"]);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_rows() {
        let (sink, sent) = ScriptedSink::new(vec![
            SinkOutcome::Failed { message: "timeout".to_string() },
            SinkOutcome::Failed { message: "timeout".to_string() },
        ]);
        let pipeline = ImportPipeline::new(Box::new(sink));

        let rows = vec![row(1, &["T1"]), row(2, &["T2"]), row(3, &["T3"])];
        let summary = pipeline.run(&rows).await;

        assert_eq!(summary.failed, 2);
        assert_eq!(summary.created, 1);
        assert_eq!(sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (sink, _) = ScriptedSink::new(Vec::new());
        let summary = ImportPipeline::new(Box::new(sink)).with_preview("holbox").run(&[]).await;
        assert_eq!(summary.total_rows, 0);
        assert_eq!(summary.created + summary.failed + summary.skipped, 0);
        assert!(summary.finished_at >= summary.started_at);
    }

    #[test]
    fn test_progress_defaults_to_stdout() {
        let (sink, _) = ScriptedSink::new(Vec::new());
        let pipeline = ImportPipeline::new(Box::new(sink));
        assert_eq!(pipeline.progress, ProgressOutput::Stdout);
        let pipeline = pipeline.with_progress_output(ProgressOutput::Stderr);
        assert_eq!(pipeline.progress, ProgressOutput::Stderr);
    }

    #[test]
    fn test_blank_preview_is_disabled() {
        let (sink, _) = ScriptedSink::new(Vec::new());
        let pipeline = ImportPipeline::new(Box::new(sink)).with_preview("   ");
        assert!(pipeline.preview.is_none());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("Excursión a Holbox", 9), "Excursión");
        assert_eq!(truncate("short", 50), "short");
    }
}
