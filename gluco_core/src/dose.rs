//! Dose calculation engine.
//!
//! Pure arithmetic: carb coverage from the 500 rule, correction from the
//! glucose table, rounded to the 0.5-unit granularity of insulin pens.

use crate::correction::CorrectionTable;
use crate::types::{CalculationResult, FoodItem, SettingsProfile};

/// Round to the nearest 0.5 unit, half away from zero.
pub fn round_to_half(x: f64) -> f64 {
    (x * 2.0).round() / 2.0
}

/// Compute a full dose breakdown from parsed foods, an optional glucose
/// reading, and the user's settings.
///
/// An empty food list is valid and degenerates to correction-only dosing.
/// The floor at zero is applied after rounding, so a negative correction on
/// a low-carb meal never recommends a negative dose.
///
/// Callers must guarantee `settings.tdd > 0`; the settings boundary floors
/// all constants at 1, so this holds for any sanitized profile.
pub fn compute_dose(
    foods: &[FoodItem],
    glucose: Option<i64>,
    settings: &SettingsProfile,
    table: &CorrectionTable,
) -> CalculationResult {
    debug_assert!(settings.tdd > 0.0, "settings must be sanitized before compute");

    let total_carbs: f64 = foods.iter().map(|f| f.carbs).sum();

    let ccr = settings.ccr_constant / settings.tdd;
    let cf = settings.isf_constant / settings.tdd;

    let carb_insulin = total_carbs / ccr;
    let correction_insulin = glucose.map(|bg| table.lookup(bg)).unwrap_or(0.0);

    let raw_total = carb_insulin + correction_insulin;
    let final_dose = round_to_half(raw_total).max(0.0);

    CalculationResult {
        foods: foods.to_vec(),
        total_carbs,
        ccr,
        cf,
        carb_insulin,
        correction_insulin,
        final_dose,
    }
}
