//! Derived value sequence for games that draw more than once per round
//!
//! Each further value is `frac(937 * u + 0.5)` of the previous one. The
//! recurrence is reproducible from the round value alone, which is what lets
//! auditors recompute mine placements and reel stops. It is not a
//! cryptographic generator and is only used for these derived draws.

const MULTIPLIER: f64 = 937.0;
const OFFSET: f64 = 0.5;

/// Next value in the derived sequence. `value` must lie in `[0, 1)`, and
/// so does the result.
pub fn next_value(value: f64) -> f64 {
    (MULTIPLIER * value + OFFSET).fract()
}

/// Iterator over the round value followed by its derived values
#[derive(Debug, Clone)]
pub struct DerivedSequence {
    current: f64,
}

impl DerivedSequence {
    /// Sequence whose first item is `value` itself
    pub fn new(value: f64) -> Self {
        Self { current: value }
    }
}

impl Iterator for DerivedSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.current;
        self.current = next_value(value);
        Some(value)
    }
}
