//! Hosted remote-table backend.
//!
//! Talks to a PostgREST-style table API (the interface exposed by hosted
//! Postgres services such as Supabase) at `{url}/rest/v1/{table}`. Every
//! request carries the service key in both the `apikey` and bearer
//! `Authorization` headers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::backend::PetBackend;
use super::error::{Result, StoreError};
use crate::config::RemoteConfig;
use crate::constants::REMOTE_PETS_TABLE;
use crate::model::{NewPet, Pet, PetId};

/// Client for one table of the hosted API.
///
/// `RemoteTable` is cheap to clone; clones share the HTTP connection pool.
#[derive(Clone, Debug)]
pub struct RemoteTable {
    client: Client,
    endpoint: Url,
    key: String,
    table: &'static str,
}

impl RemoteTable {
    /// Builds a client for `table` using the configured url, key and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the url cannot be parsed or the HTTP client
    /// cannot be built.
    pub fn new(config: &RemoteConfig, table: &'static str) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/rest/v1/{table}",
            config.url.trim_end_matches('/')
        ))?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            key: config.key.clone(),
            table,
        })
    }

    /// Table name this client addresses.
    pub fn table(&self) -> &'static str {
        self.table
    }

    fn url(&self, filters: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        if !filters.is_empty() {
            url.query_pairs_mut().extend_pairs(filters);
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    async fn rows<T: DeserializeOwned>(&self, response: Response) -> Result<Vec<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    /// Fetches rows matching PostgREST `filters` (e.g. `("id", "eq.3")`).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn select<T: DeserializeOwned>(&self, filters: &[(&str, &str)]) -> Result<Vec<T>> {
        let url = self.url(filters);
        debug!(table = self.table, %url, "remote select");
        let response = self.authorize(self.client.get(url)).send().await?;
        self.rows(response).await
    }

    /// Inserts one row and returns the stored representation.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or when the
    /// API answers without the inserted row.
    pub async fn insert<B, T>(&self, row: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(table = self.table, "remote insert");
        let response = self
            .authorize(self.client.post(self.endpoint.clone()))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        self.rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::RemoteEmpty(self.table))
    }

    /// Deletes rows matching `filters` and returns the removed rows.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete<T: DeserializeOwned>(&self, filters: &[(&str, &str)]) -> Result<Vec<T>> {
        let url = self.url(filters);
        debug!(table = self.table, %url, "remote delete");
        let response = self
            .authorize(self.client.delete(url))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        self.rows(response).await
    }
}

#[derive(Serialize)]
struct PetRow<'a> {
    #[serde(flatten)]
    pet: &'a NewPet,
    created_at: DateTime<Utc>,
}

/// Pet backend over the remote `pets` table.
///
/// The table assigns ids itself (an identity column), so uniqueness does
/// not depend on this process.
#[derive(Clone, Debug)]
pub struct RemoteTableBackend {
    table: RemoteTable,
}

impl RemoteTableBackend {
    /// Wraps a client for the pets table.
    pub fn new(table: RemoteTable) -> Self {
        Self { table }
    }

    /// Builds the backend straight from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote client cannot be built.
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        Ok(Self::new(RemoteTable::new(config, REMOTE_PETS_TABLE)?))
    }
}

#[async_trait]
impl PetBackend for RemoteTableBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn list(&self) -> Result<Vec<Pet>> {
        self.table
            .select(&[("select", "*"), ("order", "id.asc")])
            .await
    }

    async fn get(&self, id: PetId) -> Result<Option<Pet>> {
        let filter = format!("eq.{id}");
        let rows: Vec<Pet> = self
            .table
            .select(&[("select", "*"), ("id", filter.as_str())])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet> {
        let row = PetRow {
            pet: &pet,
            created_at: Utc::now(),
        };
        self.table.insert(&row).await
    }

    async fn delete(&self, id: PetId) -> Result<bool> {
        let filter = format!("eq.{id}");
        let removed: Vec<Pet> = self.table.delete(&[("id", filter.as_str())]).await?;
        Ok(!removed.is_empty())
    }
}
