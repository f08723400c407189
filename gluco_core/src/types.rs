//! Core domain types for SugarPilot.
//!
//! This module defines the fundamental types used throughout the system:
//! - Food items produced by meal parsing
//! - Calculation results and their breakdown
//! - User settings (TDD, insulin type, formula constants)
//! - History entries and the UI theme flag

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Meal Types
// ============================================================================

/// One line item from meal parsing: a food, its interpreted quantity,
/// and the estimated carbohydrate grams. Immutable once produced.
///
/// Field names match the JSON schema the meal parser is asked to return.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    pub food: String,
    pub quantity: String,
    pub carbs: f64,
}

// ============================================================================
// Calculation Types
// ============================================================================

/// Full breakdown of a dose calculation.
///
/// Invariants (maintained by [`crate::dose::compute_dose`]):
/// - `total_carbs` is the sum of `foods[i].carbs`
/// - `ccr = ccr_constant / tdd`, `cf = isf_constant / tdd`
/// - `carb_insulin = total_carbs / ccr`
/// - `final_dose = max(0, round_to_half(carb_insulin + correction_insulin))`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub foods: Vec<FoodItem>,
    pub total_carbs: f64,
    /// Effective carb-to-insulin ratio: grams covered by one unit.
    pub ccr: f64,
    /// Effective correction factor: mg/dL dropped by one unit.
    pub cf: f64,
    pub carb_insulin: f64,
    pub correction_insulin: f64,
    pub final_dose: f64,
}

// ============================================================================
// Settings Types
// ============================================================================

/// Insulin preparation, which selects the ISF numerator constant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsulinType {
    #[serde(rename = "Rapid-acting")]
    Rapid,
    Regular,
}

impl InsulinType {
    /// The ISF numerator this insulin type resets to: the "1800 rule" for
    /// rapid-acting insulin, the "1500 rule" for regular.
    pub fn default_isf_constant(self) -> f64 {
        match self {
            InsulinType::Rapid => 1800.0,
            InsulinType::Regular => 1500.0,
        }
    }
}

impl std::fmt::Display for InsulinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsulinType::Rapid => write!(f, "Rapid-acting"),
            InsulinType::Regular => write!(f, "Regular"),
        }
    }
}

/// User-tunable constants that parameterize the dose calculator.
///
/// `tdd` and both numerator constants must stay positive; the setters in
/// [`crate::settings`] floor any non-positive input at 1 so the calculator
/// never divides by zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SettingsProfile {
    /// Total daily insulin dose, in units.
    pub tdd: f64,
    pub insulin_type: InsulinType,
    /// Numerator of the carb-to-insulin ratio (the "500 rule").
    pub ccr_constant: f64,
    /// Numerator of the insulin sensitivity factor.
    pub isf_constant: f64,
}

impl Default for SettingsProfile {
    fn default() -> Self {
        Self {
            tdd: 40.0,
            insulin_type: InsulinType::Rapid,
            ccr_constant: 500.0,
            isf_constant: 1800.0,
        }
    }
}

// ============================================================================
// History Types
// ============================================================================

/// One recorded calculation. Never mutated after creation, only removed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryItem {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub meal_text: String,
    /// The glucose reading as entered, absent if none was supplied.
    pub glucose: Option<String>,
    pub result: CalculationResult,
}

// ============================================================================
// Theme
// ============================================================================

/// UI theme flag, persisted independently of settings and history.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}
