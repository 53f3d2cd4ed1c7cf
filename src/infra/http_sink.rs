use crate::app::ports::{SinkOutcome, TourSinkPort};
use crate::error::{ImporterError, Result};
use crate::metrics::ImportMetrics;
use crate::types::TourRecord;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::debug;

/// POSTs each tour as JSON to the tours API. One attempt per record, no retries.
pub struct HttpTourSink {
    client: reqwest::Client,
    api_url: reqwest::Url,
    timeout: Duration,
}

impl HttpTourSink {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url = reqwest::Url::parse(api_url)
            .map_err(|e| ImporterError::Config(format!("Invalid API URL '{}': {}", api_url, e)))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url,
            timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }
}

#[async_trait]
impl TourSinkPort for HttpTourSink {
    async fn send(&self, record: &TourRecord) -> SinkOutcome {
        let started = Instant::now();
        let result = self
            .client
            .post(self.api_url.clone())
            .json(record)
            .send()
            .await;
        ImportMetrics::record_request_duration(started.elapsed().as_secs_f64());

        match result {
            Ok(resp) => {
                let status = resp.status().as_u16();
                debug!("POST {} for tour {} -> {}", self.api_url, record.id, status);
                match status {
                    200 | 201 => SinkOutcome::Created { status },
                    _ => SinkOutcome::Rejected { status },
                }
            }
            Err(e) if e.is_timeout() => SinkOutcome::Failed {
                message: format!("request timed out after {}s", self.timeout.as_secs()),
            },
            Err(e) => SinkOutcome::Failed {
                message: e.to_string(),
            },
        }
    }
}
