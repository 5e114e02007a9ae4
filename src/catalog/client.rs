//! HTTP client for a running pawshaven server.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::model::{Pet, PetId};

const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads pets from the public pet routes.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns an error if `server` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(server: &str) -> Result<Self> {
        let base = Url::parse(server).with_context(|| format!("Invalid server URL: {server}"))?;
        let client = Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Invalid API path: {path}"))
    }

    /// GET /api/pets
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or answers with a
    /// non-success status.
    pub async fn list_pets(&self) -> Result<Vec<Pet>> {
        let url = self.endpoint("/api/pets")?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?
            .error_for_status()
            .with_context(|| format!("Server rejected {url}"))?;
        response.json().await.context("Malformed pet list")
    }

    /// GET /api/pets/{id}; `None` on 404.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or answers with a
    /// status other than success or 404.
    pub async fn get_pet(&self, id: PetId) -> Result<Option<Pet>> {
        let url = self.endpoint(&format!("/api/pets/{id}"))?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let pet = response
            .error_for_status()
            .with_context(|| format!("Server rejected {url}"))?
            .json()
            .await
            .context("Malformed pet record")?;
        Ok(Some(pet))
    }
}
