//! Derived audio metrics
//!
//! CoreAudio reports sound level from -160 dB (silence) to 0 dB (clipping).
//! Shifting that scale alone gives silly numbers for a quiet room, so the app
//! approximates a positive dB figure with `(x + 65) * 2`. These are the only
//! computed values exposed; everything else in a report is stored as-is.

use crate::error::{ReportError, ReportResult};
use crate::numeric::round_plus;
use crate::report::sections::Audio;

fn positive_db(raw: f64, rounded: bool) -> f64 {
    let value = (raw + 65.0) * 2.0;
    if rounded {
        round_plus(value, 2)
    } else {
        value
    }
}

impl Audio {
    /// Average level on the app's positive scale, optionally to 2 places
    pub fn positive_average_db(&self, rounded: bool) -> ReportResult<f64> {
        self.average
            .map(|avg| positive_db(avg, rounded))
            .ok_or(ReportError::MissingRequiredField("avg"))
    }

    /// Peak level on the app's positive scale, optionally to 2 places
    pub fn positive_peak_db(&self, rounded: bool) -> ReportResult<f64> {
        self.peak
            .map(|peak| positive_db(peak, rounded))
            .ok_or(ReportError::MissingRequiredField("peak"))
    }
}
