//! Glucose-correction lookup table.
//!
//! The table is an ordered list of inclusive mg/dL ranges mapped to
//! correction doses. It is data, not code, so ranges and doses stay
//! independently testable and can grow per-profile customization later.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One correction rule: an inclusive glucose range and the dose it adds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CorrectionRule {
    pub min: i64,
    pub max: i64,
    pub dose: f64,
}

/// Ordered set of correction rules partitioning glucose readings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CorrectionTable {
    rules: Vec<CorrectionRule>,
}

/// Cached default table - built once and reused across all calculations
static DEFAULT_TABLE: Lazy<CorrectionTable> = Lazy::new(|| {
    CorrectionTable::new(vec![
        CorrectionRule { min: 0, max: 89, dose: -1.0 },
        CorrectionRule { min: 90, max: 145, dose: 0.0 },
        CorrectionRule { min: 146, max: 180, dose: 1.0 },
        CorrectionRule { min: 181, max: 270, dose: 2.0 },
        CorrectionRule { min: 271, max: 9999, dose: 3.0 },
    ])
});

/// Get a reference to the cached default correction table
pub fn default_correction_table() -> &'static CorrectionTable {
    &DEFAULT_TABLE
}

impl CorrectionTable {
    pub fn new(rules: Vec<CorrectionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CorrectionRule] {
        &self.rules
    }

    /// Return the dose of the first rule whose inclusive range contains
    /// `glucose`, or 0.0 if no rule matches.
    ///
    /// For a table that passes [`validate`](Self::validate), the no-match
    /// fallback is only reachable for readings outside `[0, 9999]`.
    pub fn lookup(&self, glucose: i64) -> f64 {
        self.rules
            .iter()
            .find(|r| glucose >= r.min && glucose <= r.max)
            .map(|r| r.dose)
            .unwrap_or(0.0)
    }

    /// Validate that the rules form contiguous, non-overlapping ranges
    /// covering at least `[0, 9999]`.
    ///
    /// Returns a list of human-readable problems; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.rules.is_empty() {
            errors.push("correction table has no rules".to_string());
            return errors;
        }

        for rule in &self.rules {
            if rule.min > rule.max {
                errors.push(format!(
                    "rule [{}, {}] has min above max",
                    rule.min, rule.max
                ));
            }
        }

        if self.rules[0].min > 0 {
            errors.push(format!(
                "table starts at {} and leaves low readings uncovered",
                self.rules[0].min
            ));
        }

        for pair in self.rules.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.min != prev.max + 1 {
                errors.push(format!(
                    "gap or overlap between [{}, {}] and [{}, {}]",
                    prev.min, prev.max, next.min, next.max
                ));
            }
        }

        if let Some(last) = self.rules.last() {
            if last.max < 9999 {
                errors.push(format!(
                    "table ends at {} and leaves high readings uncovered",
                    last.max
                ));
            }
        }

        errors
    }

    /// Validate for use at session startup, collapsing any problems into a
    /// single [`Error::Table`].
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Table(errors.join("; ")))
        }
    }
}
