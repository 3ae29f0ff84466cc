//! Declarative breakpoint tables.
//!
//! A ladder is an ordered list of (threshold, contribution) steps evaluated
//! top-down; the first step whose threshold is crossed wins. Comparisons are
//! strict, so a value sitting exactly on a threshold falls to the next step.

/// Which side of a threshold counts as "crossed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Crossed when `value > threshold` (risk grows with the value).
    Above,
    /// Crossed when `value < threshold` (risk grows as the value falls).
    Below,
}

impl Direction {
    pub fn crossed(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Above => value > threshold,
            Self::Below => value < threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub threshold:    f64,
    pub contribution: f64,
}

pub const fn step(threshold: f64, contribution: f64) -> Step {
    Step { threshold, contribution }
}

#[derive(Debug, Clone, Copy)]
pub struct Ladder {
    pub name:      &'static str,
    pub direction: Direction,
    pub steps:     &'static [Step],
}

impl Ladder {
    /// Contribution of the first crossed step, or 0 when none is crossed.
    pub fn evaluate(&self, value: f64) -> f64 {
        first_match(self.steps, |s| self.direction.crossed(value, s.threshold))
            .map(|s| s.contribution)
            .unwrap_or(0.0)
    }

    /// Largest contribution this ladder can add.
    pub fn max_contribution(&self) -> f64 {
        self.steps.iter().map(|s| s.contribution).fold(0.0, f64::max)
    }
}

/// The shared "first match from the top" reducer used by every tiered table.
pub fn first_match<T, F>(tiers: &[T], mut pred: F) -> Option<&T>
where
    F: FnMut(&T) -> bool,
{
    tiers.iter().find(|t| pred(t))
}
