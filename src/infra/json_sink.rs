use crate::app::ports::{SinkOutcome, TourSinkPort};
use crate::types::TourRecord;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

/// Dry-run sink: writes each tour as one JSON line instead of calling the API.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_line(&self, record: &TourRecord) -> std::result::Result<(), String> {
        let line = serde_json::to_string(record).map_err(|e| e.to_string())?;
        let mut writer = self.writer.lock().map_err(|e| e.to_string())?;
        writeln!(writer, "{}", line).map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())
    }
}

#[async_trait]
impl<W: Write + Send> TourSinkPort for JsonLinesSink<W> {
    async fn send(&self, record: &TourRecord) -> SinkOutcome {
        match self.write_line(record) {
            Ok(()) => SinkOutcome::Created { status: 200 },
            Err(message) => SinkOutcome::Failed { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RowNormalizer;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn record(id: &str) -> TourRecord {
        RowNormalizer::new()
            .normalize(&[id.to_string(), "Holbox Tour".to_string()])
            .unwrap()
    }

    #[tokio::test]
    async fn test_writes_one_line_per_record() {
        let sink = JsonLinesSink::new(Vec::new());
        assert!(sink.send(&record("T1")).await.is_created());
        assert!(sink.send(&record("T2")).await.is_created());

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], "T1");
        assert_eq!(first["channels"]["gyg"], "Inactive");
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let sink = JsonLinesSink::new(BrokenWriter);
        let outcome = sink.send(&record("T1")).await;
        assert!(matches!(outcome, SinkOutcome::Failed { message } if message.contains("pipe closed")));
    }
}
