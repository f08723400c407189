//! Owned session state and the calculation workflow.
//!
//! A [`Session`] owns the loaded settings, history, and theme flag for one
//! running profile, with a load-at-start / persist-on-mutation lifecycle.
//! No other code holds mutable references to these; there are no ambient
//! globals.

use crate::correction::default_correction_table;
use crate::dose::compute_dose;
use crate::parser::MealParser;
use crate::types::{CalculationResult, HistoryItem, InsulinType, SettingsProfile, Theme};
use crate::{Error, HistoryStore, Result};
use chrono::Utc;
use fs2::FileExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// User-facing message for any meal-parser failure. Raw upstream errors are
/// logged, never surfaced.
pub const RETRY_MESSAGE: &str =
    "Failed to calculate. Please check your internet connection and try again.";

const SETTINGS_FILE: &str = "settings.json";
const HISTORY_FILE: &str = "history.json";
const THEME_FILE: &str = "theme.json";

/// Session state for one profile: settings, bounded history, theme.
pub struct Session {
    data_dir: PathBuf,
    pub settings: SettingsProfile,
    pub history: HistoryStore,
    pub theme: Theme,
}

impl Session {
    /// Open a session rooted at `data_dir`, loading persisted state with
    /// default fallback for anything missing or corrupt.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        // A broken table would silently miscorrect every dose; refuse to
        // open rather than calculate with it.
        default_correction_table().ensure_valid()?;

        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;

        let settings = SettingsProfile::load(&data_dir.join(SETTINGS_FILE))?;
        let history = HistoryStore::load(&data_dir.join(HISTORY_FILE))?;
        let theme = load_theme(&data_dir.join(THEME_FILE));

        Ok(Self {
            data_dir,
            settings,
            history,
            theme,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    fn theme_path(&self) -> PathBuf {
        self.data_dir.join(THEME_FILE)
    }

    /// Run the full calculation flow and record the result.
    ///
    /// Rejects blank meal text before calling the parser. On parser failure
    /// nothing is appended or persisted; on success the new history item is
    /// appended and saved as one step, so a crash mid-flow never leaves a
    /// partial commit.
    pub fn calculate(
        &mut self,
        parser: &dyn MealParser,
        meal_text: &str,
        glucose: Option<i64>,
    ) -> Result<HistoryItem> {
        let result = self.preview(parser, meal_text, glucose)?;

        let item = HistoryItem {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            meal_text: meal_text.to_string(),
            glucose: glucose.map(|g| g.to_string()),
            result,
        };

        self.history.append(item.clone());
        if let Err(e) = self.history.save(&self.history_path()) {
            // Keep memory and disk in step: a failed save must not leave a
            // phantom entry in the session.
            self.history.remove(&item.id);
            return Err(e);
        }

        tracing::info!(
            "Recorded calculation {} (dose {} U)",
            item.id,
            item.result.final_dose
        );
        Ok(item)
    }

    /// Parse and compute without recording anything.
    pub fn preview(
        &self,
        parser: &dyn MealParser,
        meal_text: &str,
        glucose: Option<i64>,
    ) -> Result<CalculationResult> {
        if meal_text.trim().is_empty() {
            return Err(Error::Validation("Please describe what you ate.".into()));
        }

        let foods = parser.parse(meal_text).map_err(|e| {
            tracing::warn!("Meal parser failed: {}", e);
            Error::Upstream(RETRY_MESSAGE.to_string())
        })?;

        Ok(compute_dose(
            &foods,
            glucose,
            &self.settings,
            default_correction_table(),
        ))
    }

    /// Mutate settings through `f`, then persist.
    pub fn update_settings<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut SettingsProfile),
    {
        f(&mut self.settings);
        self.settings.save(&self.settings_path())
    }

    /// Switch insulin type (resetting the ISF constant), then persist.
    pub fn set_insulin_type(&mut self, insulin_type: InsulinType) -> Result<()> {
        self.update_settings(|s| s.set_insulin_type(insulin_type))
    }

    /// Remove one history entry by id, then persist. Returns whether the
    /// entry existed; a missing id is not an error.
    pub fn remove_history(&mut self, id: &Uuid) -> Result<bool> {
        let removed = self.history.remove(id);
        if removed {
            self.history.save(&self.history_path())?;
        }
        Ok(removed)
    }

    /// Clear all history, then persist.
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        self.history.save(&self.history_path())
    }

    /// Set and persist the theme flag atomically, like settings and history.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;

        let path = self.theme_path();
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "theme path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(&theme)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

/// Load the theme flag, defaulting to light on a missing or corrupt file.
fn load_theme(path: &Path) -> Theme {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse theme file {:?}: {}. Using light.", path, e);
            Theme::default()
        }),
        Err(_) => Theme::default(),
    }
}
