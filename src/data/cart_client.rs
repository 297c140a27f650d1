use crate::data::http::{expect_status, join_url, send};
use crate::domain::cart::CartItem;
use crate::domain::repository::CartStore;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

/// Cart persistence service. Only `201 Created` counts as a saved item.
#[derive(Clone)]
pub struct HttpCartStore {
    client: Client,
    base_url: String,
}

impl HttpCartStore {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CartStore for HttpCartStore {
    #[instrument(skip(self, item), fields(recipe_id = item.id()))]
    async fn create_item(&self, item: &CartItem) -> Result<()> {
        let url = join_url(&self.base_url, "carts");
        let context = format!("save recipe {}", item.id());
        let response = send(self.client.post(&url).json(item), &context).await?;
        expect_status(&response, StatusCode::CREATED, &context)?;
        debug!(recipe_id = item.id(), "Cart item created");
        Ok(())
    }
}
