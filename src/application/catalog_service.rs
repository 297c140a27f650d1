use crate::domain::recipe::Recipe;
use crate::domain::repository::RecipeApi;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Recipes and tag vocabulary as last fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub recipes: Vec<Recipe>,
    pub tags: Vec<String>,
}

impl Catalog {
    pub fn find(&self, id: u64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}

pub struct CatalogService<R: RecipeApi> {
    api: Arc<R>,
}

impl<R: RecipeApi> CatalogService<R> {
    pub fn new(api: Arc<R>) -> Self {
        Self { api }
    }

    /// Fetches recipes and tags concurrently. A half that fails is logged and
    /// keeps its value from `prior`.
    #[instrument(skip(self, prior))]
    pub async fn load(&self, prior: Catalog) -> Catalog {
        let (recipes, tags) = tokio::join!(self.api.list_recipes(), self.api.list_tags());

        let recipes = match recipes {
            Ok(recipes) => recipes,
            Err(e) => {
                error!(error = %e, "Failed to fetch recipes, keeping previous list");
                prior.recipes
            }
        };
        let tags = match tags {
            Ok(tags) => tags,
            Err(e) => {
                error!(error = %e, "Failed to fetch tags, keeping previous vocabulary");
                prior.tags
            }
        };

        info!(recipes = recipes.len(), tags = tags.len(), "Catalog loaded");
        Catalog { recipes, tags }
    }
}
