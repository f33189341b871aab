//! Drink menu domain types.
//!
//! A drink is a titled recipe: an ordered list of ingredients, each with a
//! display color and the number of parts it contributes to the glass. The
//! public menu exposes a reduced "short" shape that keeps colors and
//! proportions but withholds ingredient names; the full shape is reserved
//! for baristas and managers.

use serde::{Deserialize, Serialize};

/// A drink on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    /// Row id assigned by storage.
    pub id: i64,

    /// Display title, unique across the menu.
    pub title: String,

    /// Ingredients in pour order.
    pub recipe: Vec<Ingredient>,
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name, e.g. "milk".
    pub name: String,

    /// Display color for the menu graphic, e.g. "grey" or "#824f22".
    pub color: String,

    /// Relative parts of the glass this ingredient fills.
    pub parts: u32,
}

/// Menu view of a drink with ingredient names withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// Ingredient view keeping only color and proportion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

impl Drink {
    /// Reduce to the public menu shape.
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}
