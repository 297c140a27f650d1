use crate::domain::error::DomainError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog entry as returned by the recipe API.
///
/// Only `rating` changes after the recipe is fetched. Fields this client does
/// not interpret (cuisine, difficulty, calories...) are kept in `extra` so the
/// full object can be forwarded to the cart store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(deserialize_with = "numeric_id")]
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub image: String,
    #[serde(default, deserialize_with = "nullable")]
    pub rating: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub instructions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: String::new(),
            rating: 0.0,
            tags: Vec::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn has_any_tag(&self, selected: &[String]) -> bool {
        selected.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Envelope of `GET /recipes`.
#[derive(Debug, Deserialize)]
pub struct RecipePage {
    #[serde(default, deserialize_with = "nullable")]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RateRequest {
    pub rating: RatingChoice,
}

/// Response of `POST /recipes/{id}/rate`. The server value is authoritative.
#[derive(Debug, Deserialize)]
pub struct RatingUpdate {
    pub rating: f64,
}

/// One of the five discrete ratings a user may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RatingChoice(u8);

impl RatingChoice {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(RatingChoice(value))
        } else {
            Err(DomainError::InvalidRating(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Ids come back as numbers from the recipe API but as strings from some cart
// backends; both are stored as integers.
fn numeric_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid recipe id: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_deserializes_api_payload_and_keeps_extra_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 1,
            "name": "Classic Margherita Pizza",
            "image": "https://cdn.dummyjson.com/recipe-images/1.webp",
            "rating": 4.6,
            "tags": ["Pizza", "Italian"],
            "ingredients": ["Pizza dough", "Tomato sauce"],
            "instructions": ["Preheat the oven", "Bake"],
            "cuisine": "Italian",
            "caloriesPerServing": 300
        }))
        .unwrap();

        assert_eq!(recipe.id, 1);
        assert_eq!(recipe.name, "Classic Margherita Pizza");
        assert_eq!(recipe.tags, vec!["Pizza", "Italian"]);
        assert_eq!(recipe.extra["cuisine"], "Italian");

        let round = serde_json::to_value(&recipe).unwrap();
        assert_eq!(round["caloriesPerServing"], 300);
        assert_eq!(round["id"], 1);
    }

    #[test]
    fn test_missing_and_null_fields_default_to_empty() {
        let recipe: Recipe =
            serde_json::from_value(json!({ "id": 7, "name": null, "tags": null })).unwrap();

        assert_eq!(recipe.name, "");
        assert!(recipe.tags.is_empty());
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.rating, 0.0);
    }

    #[test]
    fn test_string_id_is_coerced_to_number() {
        let recipe: Recipe = serde_json::from_value(json!({ "id": "42" })).unwrap();
        assert_eq!(recipe.id, 42);

        let bad = serde_json::from_value::<Recipe>(json!({ "id": "forty-two" }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_rating_choice_accepts_only_one_to_five() {
        for value in 1..=5 {
            assert_eq!(RatingChoice::new(value).unwrap().value(), value);
        }
        assert!(matches!(
            RatingChoice::new(0),
            Err(DomainError::InvalidRating(0))
        ));
        assert!(matches!(
            RatingChoice::new(6),
            Err(DomainError::InvalidRating(6))
        ));
    }
}
