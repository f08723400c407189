//! Meal parsing via the Gemini API.
//!
//! The parser turns a free-text meal description into a list of
//! [`FoodItem`]s with estimated carb grams. The request pins the response
//! to a JSON array schema so the reply deserializes directly.

use crate::carb_reference::CARB_RULES;
use crate::types::FoodItem;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Model used when the config file does not name one.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// A meal parser: free text in, carb line items out.
///
/// May fail on network or malformed upstream data; callers must not mutate
/// any state on failure. An empty list is a valid zero-carb meal.
pub trait MealParser {
    fn parse(&self, meal_description: &str) -> Result<Vec<FoodItem>>;
}

// ============================================================================
// Gemini wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: String,
}

// ============================================================================
// Gemini client
// ============================================================================

/// Meal parser backed by the Gemini generateContent endpoint.
pub struct GeminiMealParser {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiMealParser {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Build a parser with the API key taken from `GEMINI_API_KEY`.
    pub fn from_env(model: String) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Config(format!("{} is not set", API_KEY_ENV)))?;
        Ok(Self::new(api_key, model))
    }

    /// Override the endpoint base URL (for tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_prompt(meal_description: &str) -> String {
        format!(
            "Analyze this meal: \"{meal}\".\n\n\
             Using the carb-counting database provided, list each food, its \
             interpreted quantity, and the calculated grams of carbohydrates.\n\
             {rules}\n\
             Return the result as a valid JSON array of objects with keys: \
             \"food\", \"quantity\", \"carbs\".",
            meal = meal_description,
            rules = CARB_RULES,
        )
    }

    fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "food": { "type": "STRING" },
                    "quantity": { "type": "STRING" },
                    "carbs": { "type": "NUMBER" }
                },
                "required": ["food", "quantity", "carbs"]
            }
        })
    }

    fn call_api(&self, request: &GeminiRequest) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.client.post(&url).json(request).send().map_err(|e| {
            tracing::error!("Gemini API request failed: {}", e);
            Error::Upstream(format!("meal parser unreachable: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(Error::Upstream(format!(
                "meal parser returned status {}",
                status
            )));
        }

        let gemini_response: GeminiResponse = response.json().map_err(|e| {
            tracing::error!("Failed to parse Gemini response envelope: {}", e);
            Error::Upstream(format!("malformed meal parser response: {}", e))
        })?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| Error::Upstream("empty meal parser response".to_string()))
    }
}

impl MealParser for GeminiMealParser {
    fn parse(&self, meal_description: &str) -> Result<Vec<FoodItem>> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(meal_description),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            },
        };

        let text = self.call_api(&request)?;

        let foods: Vec<FoodItem> = serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Meal parser returned non-schema JSON: {}", e);
            Error::Upstream(format!("malformed meal parser payload: {}", e))
        })?;

        tracing::debug!("Parsed {} food items from meal text", foods.len());
        Ok(foods)
    }
}

// ============================================================================
// Manual entry
// ============================================================================

/// Offline parser producing one line item per manually entered carb count.
///
/// Used when the caller already knows the grams and wants to skip the LLM.
pub struct ManualMealParser {
    items: Vec<FoodItem>,
}

impl ManualMealParser {
    pub fn from_carbs(carbs: &[f64]) -> Self {
        let items = carbs
            .iter()
            .enumerate()
            .map(|(i, &c)| FoodItem {
                food: format!("Manual entry {}", i + 1),
                quantity: format!("{}g carbs", c),
                carbs: c,
            })
            .collect();
        Self { items }
    }
}

impl MealParser for ManualMealParser {
    fn parse(&self, _meal_description: &str) -> Result<Vec<FoodItem>> {
        Ok(self.items.clone())
    }
}
