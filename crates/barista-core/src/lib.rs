// Configuration types shared across all Barista crates
pub mod config;

// Drink menu domain types
pub mod drink;

// Re-export commonly used types for convenience
pub use config::{
    AuthConfig, BaristaConfig, ConfigError, DatabaseConfig, ServerConfig,
};
pub use drink::{Drink, Ingredient, ShortDrink, ShortIngredient};
