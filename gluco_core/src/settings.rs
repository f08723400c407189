//! Settings persistence and boundary validation.
//!
//! All numeric inputs are floored at 1 here so a zero or negative value can
//! never reach the dose calculator's divisions. Switching insulin type is a
//! single combined mutation that also resets the ISF constant.

use crate::{Error, InsulinType, Result, SettingsProfile};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Floor a user-entered constant at 1.
fn positive_or_one(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        tracing::warn!("Rejected non-positive setting {}, falling back to 1", value);
        1.0
    }
}

impl SettingsProfile {
    /// Set total daily dose, flooring non-positive input at 1 unit.
    pub fn set_tdd(&mut self, tdd: f64) {
        self.tdd = positive_or_one(tdd);
    }

    /// Set the CCR numerator, flooring non-positive input at 1.
    pub fn set_ccr_constant(&mut self, ccr_constant: f64) {
        self.ccr_constant = positive_or_one(ccr_constant);
    }

    /// Set the ISF numerator, flooring non-positive input at 1.
    pub fn set_isf_constant(&mut self, isf_constant: f64) {
        self.isf_constant = positive_or_one(isf_constant);
    }

    /// Switch insulin type, resetting `isf_constant` to the type default.
    ///
    /// The reset discards any custom ISF value on purpose: the type and its
    /// numerator are one preset, never two independent fields.
    pub fn set_insulin_type(&mut self, insulin_type: InsulinType) {
        self.insulin_type = insulin_type;
        self.isf_constant = insulin_type.default_isf_constant();
    }

    /// Re-apply the positivity floor to every numeric field.
    ///
    /// Run after deserialization so a hand-edited settings file cannot feed
    /// the calculator a zero divisor.
    pub fn sanitize(&mut self) {
        self.tdd = positive_or_one(self.tdd);
        self.ccr_constant = positive_or_one(self.ccr_constant);
        self.isf_constant = positive_or_one(self.isf_constant);
    }

    /// Load settings from a file with shared locking.
    ///
    /// Returns the default profile if the file is missing or corrupt, with a
    /// warning for the corrupt case.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No settings file found, using default profile");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open settings file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock settings file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read settings file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<SettingsProfile>(&contents) {
            Ok(mut profile) => {
                profile.sanitize();
                tracing::debug!("Loaded settings from {:?}", path);
                Ok(profile)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse settings file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save settings atomically: temp file in the same directory, exclusive
    /// lock, fsync, rename over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "settings path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }
}
