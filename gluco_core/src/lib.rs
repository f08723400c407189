#![forbid(unsafe_code)]

//! Core domain model and business logic for SugarPilot.
//!
//! This crate provides:
//! - Domain types (food items, calculation results, settings, history)
//! - The dose calculation engine and glucose-correction table
//! - Meal parsing via the Gemini API
//! - Persistence (settings, bounded history, theme flag)
//! - Share-summary formatting

pub mod types;
pub mod error;
pub mod correction;
pub mod dose;
pub mod carb_reference;
pub mod parser;
pub mod config;
pub mod logging;
pub mod settings;
pub mod history;
pub mod summary;
pub mod export;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use correction::{default_correction_table, CorrectionRule, CorrectionTable};
pub use dose::{compute_dose, round_to_half};
pub use parser::{GeminiMealParser, ManualMealParser, MealParser};
pub use config::Config;
pub use history::{HistoryStore, HISTORY_CAP};
pub use summary::format_summary;
pub use session::Session;
