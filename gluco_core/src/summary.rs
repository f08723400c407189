//! Share-summary formatting.
//!
//! Renders a calculation into the fixed text block users copy or share.
//! Pure formatting; handing the string to a clipboard or share sink is the
//! caller's concern.

use crate::types::{CalculationResult, SettingsProfile};
use chrono::{DateTime, Utc};

/// Format the correction component as an integer-style number with an
/// explicit `+` for positive values ("+2", "-1", "0").
fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", value)
    } else {
        format!("{}", value)
    }
}

/// Render the shareable summary block for one calculation.
pub fn format_summary(
    meal_text: &str,
    glucose: Option<&str>,
    result: &CalculationResult,
    settings: &SettingsProfile,
    date: DateTime<Utc>,
) -> String {
    format!(
        "📊 SugarPilot Summary ({date})\n\
         ----------------------------\n\
         🍽️ Meal: {meal}\n\
         🩸 BG: {bg} mg/dL\n\
         🍞 Total Carbs: {carbs}g\n\
         \n\
         💉 Recommended Dose: {dose} Units\n\
         (Carb: {carb:.1}U, Correction: {correction}U)\n\
         \n\
         ⚙️ Settings: TDD {tdd}, CCR 1:{ccr:.1}, CF 1:{cf:.1}\n\
         ----------------------------\n\
         Shared via SugarPilot",
        date = date.format("%Y-%m-%d"),
        meal = meal_text,
        bg = glucose.unwrap_or("N/A"),
        carbs = result.total_carbs,
        dose = result.final_dose,
        carb = result.carb_insulin,
        correction = signed(result.correction_insulin),
        tdd = settings.tdd,
        ccr = result.ccr,
        cf = result.cf,
    )
}
