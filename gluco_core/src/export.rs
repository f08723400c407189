//! CSV export of calculation history.

use crate::{HistoryStore, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    timestamp: String,
    meal: String,
    glucose: Option<String>,
    total_carbs: f64,
    carb_insulin: f64,
    correction_insulin: f64,
    final_dose: f64,
}

impl From<&crate::HistoryItem> for CsvRow {
    fn from(item: &crate::HistoryItem) -> Self {
        CsvRow {
            id: item.id.to_string(),
            timestamp: item.timestamp.to_rfc3339(),
            meal: item.meal_text.clone(),
            glucose: item.glucose.clone(),
            total_carbs: item.result.total_carbs,
            carb_insulin: item.result.carb_insulin,
            correction_insulin: item.result.correction_insulin,
            final_dose: item.result.final_dose,
        }
    }
}

/// Write the bounded history to a CSV file, newest first.
///
/// Overwrites any existing file and returns the number of rows written.
pub fn history_to_csv(history: &HistoryStore, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for item in history.items() {
        writer.serialize(CsvRow::from(item))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} history entries to {:?}", history.len(), path);
    Ok(history.len())
}
