//! Chart axis ranges for the presentation layer.

use serde::{Deserialize, Serialize};
use stream_spi::Sample;

/// Axis ranges for plotting the stream history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Sequence range, trailing the latest sample by [`Viewport::SPAN`].
    pub x_range: (u64, u64),
    /// Value range over the whole history, padded by one unit each side.
    pub y_range: (f64, f64),
}

impl Viewport {
    pub const SPAN: u64 = 100;

    pub fn from_history(history: &[Sample]) -> Option<Self> {
        let latest = history.last()?.sequence;
        let (min, max) = history.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), s| (lo.min(s.value), hi.max(s.value)),
        );

        Some(Self {
            x_range: (latest.saturating_sub(Self::SPAN), latest + 1),
            y_range: (min - 1.0, max + 1.0),
        })
    }
}
