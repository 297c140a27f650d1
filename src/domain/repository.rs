use crate::domain::cart::CartItem;
use crate::domain::recipe::{RatingChoice, Recipe};
use crate::domain::session::{Credentials, Session};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn list_recipes(&self) -> Result<Vec<Recipe>>;
    async fn list_tags(&self) -> Result<Vec<String>>;
    async fn get_recipe(&self, id: u64) -> Result<Recipe>;
    /// Returns the rating the server now holds for the recipe.
    async fn rate_recipe(&self, id: u64, rating: RatingChoice) -> Result<f64>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<String>;
    async fn fetch_profile(&self, token: &str) -> Result<Value>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn create_item(&self, item: &CartItem) -> Result<()>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>>;
    async fn save(&self, session: &Session) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}
