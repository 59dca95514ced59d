use super::domain::IssueCategory;
use crate::runtime::Randomness;

/// Half-width of the uniform noise term added to every score.
const NOISE_SPAN: f64 = 5.0;

/// Per-category severity multiplier. Unknown categories carry weight 1.0.
pub const fn category_weight(category: IssueCategory) -> f64 {
    match category {
        IssueCategory::Pothole => 1.2,
        IssueCategory::Waterlogging => 1.15,
        IssueCategory::BrokenStreetlight => 1.05,
        IssueCategory::Garbage => 0.9,
        IssueCategory::Other => 1.0,
    }
}

/// Produce a bounded pseudo-score from severity and issue category.
///
/// `clamp(round(severity * weight + noise), 0, 100)` with noise uniform in
/// `[-NOISE_SPAN, +NOISE_SPAN]`. The noise term makes repeated calls with
/// identical inputs diverge; only the 0-100 bound is stable. Severity is
/// accepted unbounded so a hostile or corrupt input still yields a score
/// in range.
pub fn risk_score(severity: i64, category: IssueCategory, rng: &dyn Randomness) -> u8 {
    let noise = rng.next_unit() * (2.0 * NOISE_SPAN) - NOISE_SPAN;
    let raw = severity as f64 * category_weight(category) + noise;
    raw.round().clamp(0.0, 100.0) as u8
}
