use crate::types::TourRecord;
use async_trait::async_trait;

/// Destination for normalized tours. Implementations report every problem
/// through [`SinkOutcome`] so the import loop never stops on a bad row.
#[async_trait]
pub trait TourSinkPort: Send + Sync {
    async fn send(&self, record: &TourRecord) -> SinkOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Accepted with 200 or 201
    Created { status: u16 },
    /// The endpoint answered with any other status
    Rejected { status: u16 },
    /// Transport error, timeout, or local write failure
    Failed { message: String },
}

impl SinkOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SinkOutcome::Created { .. })
    }
}
