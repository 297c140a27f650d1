use crate::domain::cart::CartItem;
use crate::domain::error::DomainError;
use crate::domain::recipe::{RatingChoice, Recipe};
use crate::domain::repository::{CartStore, RecipeApi, SessionStore};
use crate::domain::session::Session;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// Recipe API backed by a fixed list. Rating submissions average the
/// submitted value into the stored rating, so the returned value is not
/// simply the one that was sent.
#[derive(Clone)]
pub struct InMemoryRecipeApi {
    recipes: Arc<RwLock<Vec<Recipe>>>,
    tags: Arc<RwLock<Vec<String>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryRecipeApi {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in recipes.iter().flat_map(|r| r.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        Self {
            recipes: Arc::new(RwLock::new(recipes)),
            tags: Arc::new(RwLock::new(tags)),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulates an outage: every call fails while unavailable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::Remote {
                status: 503,
                context: "recipe API unavailable".to_string(),
            }
            .into())
        }
    }
}

impl Default for InMemoryRecipeApi {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl RecipeApi for InMemoryRecipeApi {
    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.check_available()?;
        let recipes = self.recipes.read().await;
        Ok(recipes.clone())
    }

    async fn list_tags(&self) -> Result<Vec<String>> {
        self.check_available()?;
        let tags = self.tags.read().await;
        Ok(tags.clone())
    }

    async fn get_recipe(&self, id: u64) -> Result<Recipe> {
        self.check_available()?;
        let recipes = self.recipes.read().await;
        recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Recipe with id '{}' not found", id)).into())
    }

    async fn rate_recipe(&self, id: u64, rating: RatingChoice) -> Result<f64> {
        self.check_available()?;
        let mut recipes = self.recipes.write().await;
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Recipe with id '{}' not found", id)))?;
        let averaged = (recipe.rating + f64::from(rating.value())) / 2.0;
        recipe.rating = (averaged * 100.0).round() / 100.0;
        debug!(recipe_id = id, rating = recipe.rating, "Rating stored in memory");
        Ok(recipe.rating)
    }
}

/// Cart store that keeps accepted items and rejects a configurable set of ids.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    saved: Arc<RwLock<Vec<CartItem>>>,
    rejected: Arc<RwLock<HashSet<u64>>>,
    attempts: Arc<AtomicUsize>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reject(&self, id: u64) {
        self.rejected.write().await.insert(id);
    }

    pub async fn saved(&self) -> Vec<CartItem> {
        self.saved.read().await.clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn create_item(&self, item: &CartItem) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.rejected.read().await.contains(&item.id()) {
            return Err(DomainError::Remote {
                status: 500,
                context: format!("cart store rejected recipe {}", item.id()),
            }
            .into());
        }
        trace!(recipe_id = item.id(), "Inserting cart item into storage");
        self.saved.write().await.push(item.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    record: Arc<RwLock<Option<Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.record.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.record.write().await = None;
        Ok(())
    }
}
