use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// TheMealDB exposes ingredients as numbered `strIngredientN` / `strMeasureN` fields.
pub const MAX_INGREDIENTS: usize = 20;

/// Lightweight record returned by search and filter endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: String,
}

/// One (ingredient, measure) slot of a recipe. Either side may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: Option<String>,
    pub measure: Option<String>,
}

/// Full record returned by the lookup endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMeal")]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub instructions: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietaryType {
    Veg,
    NonVeg,
    Unknown,
}

impl fmt::Display for DietaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietaryType::Veg => write!(f, "Veg"),
            DietaryType::NonVeg => write!(f, "Non-Veg"),
            DietaryType::Unknown => write!(f, "Unknown"),
        }
    }
}

const VEG_CATEGORIES: [&str; 2] = ["Vegetarian", "Vegan"];

const NON_VEG_CATEGORIES: [&str; 7] = [
    "Seafood", "Chicken", "Beef", "Pork", "Lamb", "Goat", "Side",
];

impl RecipeDetail {
    /// Ingredient list as display lines, e.g. `"200g Spaghetti"`.
    ///
    /// Slots without an ingredient name are skipped; a missing measure is omitted.
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .filter_map(|ingredient| {
                let name = ingredient.name.as_deref()?;
                Some(match ingredient.measure.as_deref() {
                    Some(measure) => format!("{} {}", measure, name),
                    None => name.to_string(),
                })
            })
            .collect()
    }

    /// Dietary badge derived from the category label.
    ///
    /// This is a presentational heuristic: any category that is not explicitly
    /// vegetarian is shown as non-veg, and a missing category is unknown.
    pub fn dietary_type(&self) -> DietaryType {
        match self.category.as_deref() {
            None => DietaryType::Unknown,
            Some(category) if VEG_CATEGORIES.contains(&category) => DietaryType::Veg,
            Some(category) if NON_VEG_CATEGORIES.contains(&category) => DietaryType::NonVeg,
            Some(_) => DietaryType::NonVeg,
        }
    }
}

/// Wire shape of a lookup result before the numbered fields are folded
#[derive(Debug, Deserialize)]
struct RawMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

impl TryFrom<RawMeal> for RecipeDetail {
    type Error = String;

    fn try_from(raw: RawMeal) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err("lookup result has an empty idMeal".to_string());
        }

        let ingredients = (1..=MAX_INGREDIENTS)
            .filter_map(|i| {
                let name = non_blank(raw.extra.get(&format!("strIngredient{}", i)));
                let measure = non_blank(raw.extra.get(&format!("strMeasure{}", i)));
                if name.is_none() && measure.is_none() {
                    None
                } else {
                    Some(Ingredient { name, measure })
                }
            })
            .collect();

        Ok(RecipeDetail {
            id: raw.id,
            name: raw.name,
            thumbnail: raw.thumbnail.unwrap_or_default(),
            instructions: raw.instructions.unwrap_or_default(),
            category: raw.category.filter(|c| !c.trim().is_empty()),
            area: raw.area.filter(|a| !a.trim().is_empty()),
            ingredients,
        })
    }
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Response envelope shared by every TheMealDB list endpoint.
///
/// `meals` is `null` when nothing matched; a missing field is treated the same.
#[derive(Debug, Deserialize)]
pub struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}
