use crate::domain::error::DomainError;
use crate::domain::recipe::{RatingChoice, Recipe};
use crate::domain::repository::RecipeApi;
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Snapshot of the detail page for one recipe.
///
/// `recipe` stays `None` while nothing has been fetched; there is no separate
/// error state. `server_rating` holds the last value returned by a rating
/// submission, which is shown even when the recipe never loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub recipe_id: u64,
    pub recipe: Option<Recipe>,
    pub server_rating: Option<f64>,
    pub selection: Option<RatingChoice>,
}

impl DetailView {
    pub fn loading(recipe_id: u64) -> Self {
        Self {
            recipe_id,
            recipe: None,
            server_rating: None,
            selection: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.recipe.is_some()
    }

    pub fn rating(&self) -> Option<f64> {
        self.server_rating.or_else(|| self.recipe.as_ref().map(|r| r.rating))
    }

    pub fn select(&self, value: u8) -> Result<DetailView, DomainError> {
        let choice = RatingChoice::new(value)?;
        Ok(DetailView {
            selection: Some(choice),
            ..self.clone()
        })
    }

    pub fn can_submit(&self) -> bool {
        self.selection.is_some()
    }
}

pub struct DetailService<R: RecipeApi> {
    api: Arc<R>,
}

impl<R: RecipeApi> DetailService<R> {
    pub fn new(api: Arc<R>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn load(&self, recipe_id: u64) -> DetailView {
        match self.api.get_recipe(recipe_id).await {
            Ok(recipe) => {
                info!(recipe_id, name = %recipe.name, "Recipe detail loaded");
                DetailView {
                    recipe: Some(recipe),
                    ..DetailView::loading(recipe_id)
                }
            }
            Err(e) => {
                error!(recipe_id, error = %e, "Failed to load recipe detail");
                DetailView::loading(recipe_id)
            }
        }
    }

    /// Posts the selected rating and returns a view holding the server's
    /// rating with the selection cleared. On error `view` is still the one to
    /// display.
    #[instrument(skip(self, view), fields(recipe_id = view.recipe_id))]
    pub async fn submit_rating(&self, view: &DetailView) -> Result<DetailView> {
        let choice = view.selection.ok_or(DomainError::NoRatingSelected)?;

        let rating = self
            .api
            .rate_recipe(view.recipe_id, choice)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to submit rating");
                e
            })?;

        if view.recipe.is_none() {
            warn!("Rating accepted before the recipe finished loading");
        }
        info!(submitted = choice.value(), rating, "Rating updated");

        Ok(DetailView {
            recipe_id: view.recipe_id,
            recipe: view.recipe.clone().map(|recipe| recipe.with_rating(rating)),
            server_rating: Some(rating),
            selection: None,
        })
    }
}
