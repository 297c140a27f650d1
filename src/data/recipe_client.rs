use crate::data::http::{join_url, read_json, send};
use crate::domain::recipe::{RateRequest, RatingChoice, RatingUpdate, Recipe, RecipePage};
use crate::domain::repository::RecipeApi;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

/// Recipe API over HTTP (`/recipes`, `/recipes/tags`, `/recipes/{id}`,
/// `/recipes/{id}/rate`).
#[derive(Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
}

impl HttpRecipeApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    #[instrument(skip(self))]
    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let url = join_url(&self.base_url, "recipes");
        let response = send(self.client.get(&url), "list recipes").await?;
        let page: RecipePage = read_json(response, "list recipes").await?;
        info!(count = page.recipes.len(), total = ?page.total, "Recipes fetched");
        Ok(page.recipes)
    }

    #[instrument(skip(self))]
    async fn list_tags(&self) -> Result<Vec<String>> {
        let url = join_url(&self.base_url, "recipes/tags");
        let response = send(self.client.get(&url), "list tags").await?;
        let tags: Vec<String> = read_json(response, "list tags").await?;
        info!(count = tags.len(), "Tags fetched");
        Ok(tags)
    }

    #[instrument(skip(self), fields(recipe_id = id))]
    async fn get_recipe(&self, id: u64) -> Result<Recipe> {
        let url = join_url(&self.base_url, &format!("recipes/{}", id));
        let context = format!("recipe {}", id);
        let response = send(self.client.get(&url), &context).await?;
        let recipe: Recipe = read_json(response, &context).await?;
        debug!(recipe_id = recipe.id, name = %recipe.name, "Recipe fetched");
        Ok(recipe)
    }

    #[instrument(skip(self), fields(recipe_id = id, rating = rating.value()))]
    async fn rate_recipe(&self, id: u64, rating: RatingChoice) -> Result<f64> {
        let url = join_url(&self.base_url, &format!("recipes/{}/rate", id));
        let context = format!("rate recipe {}", id);
        let request = self.client.post(&url).json(&RateRequest { rating });
        let response = send(request, &context).await?;
        let update: RatingUpdate = read_json(response, &context).await?;
        info!(recipe_id = id, rating = update.rating, "Rating accepted by server");
        Ok(update.rating)
    }
}
