//! Request and response bodies for the drinks API.

use serde::{Deserialize, Serialize};

use barista_core::{Drink, Ingredient, ShortDrink};

// =============================================================================
// Requests
// =============================================================================

/// Body for creating a drink.
#[derive(Debug, Deserialize)]
pub struct CreateDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Body for updating a drink. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDrink {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<Vec<Ingredient>>,
}

// =============================================================================
// Responses
// =============================================================================

/// Envelope for the public menu: recipes without ingredient names.
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub success: bool,
    pub drinks: Vec<ShortDrink>,
}

/// Envelope for full-recipe listings and mutations.
#[derive(Debug, Serialize)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// Envelope for deletions, echoing the removed id.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}
