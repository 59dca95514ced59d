use serde::{Deserialize, Serialize};

use super::domain::{IssueCategory, SeverityBand};
use crate::runtime::Randomness;

/// Mock classification of an uploaded image.
///
/// The prototype never inspects image bytes; `image_name` stays an opaque
/// string and every field is drawn from the randomness source. Confidence
/// is a percentage in the 55-99 range so the fake detector never claims
/// certainty or coin-flip doubt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionOutcome {
    pub image_name: String,
    pub category: IssueCategory,
    pub severity: u8,
    pub confidence_pct: u8,
}

impl DetectionOutcome {
    pub const fn severity_band(&self) -> SeverityBand {
        SeverityBand::from_severity(self.severity)
    }
}

pub fn assess_image(image_name: &str, rng: &dyn Randomness) -> DetectionOutcome {
    let classes = IssueCategory::known();
    let pick = (rng.next_unit() * classes.len() as f64) as usize;
    let category = classes[pick.min(classes.len() - 1)];

    let severity = 10 + (rng.next_unit() * 90.0) as u8;
    let confidence_pct = 55 + (rng.next_unit() * 45.0) as u8;

    DetectionOutcome {
        image_name: image_name.to_string(),
        category,
        severity: severity.min(100),
        confidence_pct: confidence_pct.min(99),
    }
}
