//! Anomaly sink trait definition.

use crate::error::Result;
use crate::model::AnomalyRecord;

/// Append-only destination for confirmed anomalies.
pub trait AnomalySink {
    /// Discard anything recorded by a previous session.
    fn reset(&mut self) -> Result<()>;

    /// Record one confirmed anomaly. Failures must be returned, not swallowed.
    fn append(&mut self, record: &AnomalyRecord) -> Result<()>;
}

impl<K: AnomalySink + ?Sized> AnomalySink for Box<K> {
    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn append(&mut self, record: &AnomalyRecord) -> Result<()> {
        (**self).append(record)
    }
}
