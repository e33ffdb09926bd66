//! `reqwest` implementation of the catalog gateway.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{CatalogGateway, LoginCredentials, LoginToken, RemoteError, RemoteResult};
use crate::models::{Item, ItemDraft, ItemId};
use crate::util::{compact_text, normalize_base_url};

#[derive(Clone)]
pub struct HttpCatalogGateway {
    base_url: String,
    client: Client,
}

impl HttpCatalogGateway {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> RemoteResult<Self> {
        let base_url = normalize_base_url(base_url.as_ref()).ok_or_else(|| {
            RemoteError::InvalidConfiguration(
                "catalog base URL must include http:// or https://".to_string(),
            )
        })?;

        Ok(Self {
            base_url,
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let body = if body.trim().is_empty() {
            "request failed".to_string()
        } else {
            compact_text(&body)
        };
        Err(RemoteError::Status { status, body })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteResult<T> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        // The public catalog answers unknown ids with `200` and no body.
        if body.trim().is_empty() {
            return Err(RemoteError::EmptyBody(status));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl CatalogGateway for HttpCatalogGateway {
    async fn list_items(&self) -> RemoteResult<Vec<Item>> {
        self.send_json(self.client.get(self.url("/products"))).await
    }

    async fn get_item(&self, id: ItemId) -> RemoteResult<Item> {
        self.send_json(self.client.get(self.url(&format!("/products/{id}"))))
            .await
    }

    async fn create_item(&self, draft: &ItemDraft) -> RemoteResult<()> {
        self.send(self.client.post(self.url("/products")).json(draft))
            .await?;
        Ok(())
    }

    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> RemoteResult<()> {
        self.send(
            self.client
                .put(self.url(&format!("/products/{id}")))
                .json(draft),
        )
        .await?;
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> RemoteResult<()> {
        self.send(self.client.delete(self.url(&format!("/products/{id}"))))
            .await?;
        Ok(())
    }

    async fn login(&self, credentials: &LoginCredentials) -> RemoteResult<LoginToken> {
        self.send_json(self.client.post(self.url("/auth/login")).json(credentials))
            .await
    }
}
