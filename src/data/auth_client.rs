use crate::data::http::{join_url, read_json, send};
use crate::domain::repository::AuthApi;
use crate::domain::session::{Credentials, LoginResponse};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let url = join_url(&self.base_url, "auth/login");
        let response = send(self.client.post(&url).json(credentials), "login").await?;
        let body: LoginResponse = read_json(response, "login").await?;
        let token = body.into_token()?;
        debug!("Token received");
        Ok(token)
    }

    #[instrument(skip(self, token))]
    async fn fetch_profile(&self, token: &str) -> Result<Value> {
        let url = join_url(&self.base_url, "user");
        let request = self.client.get(&url).bearer_auth(token);
        let response = send(request, "fetch profile").await?;
        read_json(response, "fetch profile").await
    }
}
