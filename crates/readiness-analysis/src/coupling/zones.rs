//! Zone classification on the instability/abstractness plane.

use super::types::ZoneClassification;

/// Distance threshold for main sequence classification.
pub const MAIN_SEQUENCE_THRESHOLD: f64 = 0.3;

/// Classify a component by instability and abstractness.
///
/// - Zone of Pain: low I and low A, concrete and rigid
/// - Zone of Uselessness: high I and high A, abstract but unused
/// - Main Sequence: |A + I - 1| ≤ threshold
pub fn classify_zone(instability: f64, abstractness: f64) -> ZoneClassification {
    let distance = (abstractness + instability - 1.0).abs();

    if distance <= MAIN_SEQUENCE_THRESHOLD {
        ZoneClassification::MainSequence
    } else if instability < 0.5 && abstractness < 0.5 {
        ZoneClassification::ZoneOfPain
    } else if instability > 0.5 && abstractness > 0.5 {
        ZoneClassification::ZoneOfUselessness
    } else {
        ZoneClassification::MainSequence
    }
}
