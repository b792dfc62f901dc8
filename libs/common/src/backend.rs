//! Backend data client module
//!
//! This module builds HTTP clients for the managed backend: PostgREST table
//! access under `/rest/v1` and GoTrue user administration under
//! `/auth/v1/admin`. A [`ScopedClient`] forwards a session token as the
//! bearer credential so that row-level policies evaluate against the
//! session's identity.

use std::time::Duration;

use anyhow::Result;
use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{BackendError, BackendResult};
use crate::models::BackendUser;

const PREFER_RETURN: &str = "return=representation";
const PREFER_MERGE: &str = "resolution=merge-duplicates,return=representation";
const PREFER_IGNORE: &str = "resolution=ignore-duplicates,return=representation";

/// Configuration for the backend project
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project URL (e.g., "https://xyz.supabase.co")
    pub url: String,
    /// Anonymous API key, sent as `apikey` on every request
    pub anon_key: String,
    /// Service-role key used for user administration
    pub service_role_key: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl BackendConfig {
    /// Create a new BackendConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SUPABASE_URL`: Backend project URL
    /// - `SUPABASE_ANON_KEY`: Anonymous API key
    /// - `SUPABASE_SERVICE_ROLE_KEY`: Service-role key (optional here, required for admin access)
    /// - `SUPABASE_TIMEOUT`: Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| anyhow::anyhow!("SUPABASE_URL environment variable not set"))?;

        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| anyhow::anyhow!("SUPABASE_ANON_KEY environment variable not set"))?;

        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok();

        let timeout = std::env::var("SUPABASE_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(BackendConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            service_role_key,
            timeout,
        })
    }
}

/// Factory for scoped and admin backend clients
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Initialize a new backend client
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        info!("Backend client initialized with URL: {}", config.url);
        Ok(BackendClient { http, config })
    }

    /// Build a client that authorizes as `access_token`, or anonymously when absent
    pub fn scoped(&self, access_token: Option<&str>) -> ScopedClient {
        let bearer = access_token
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        ScopedClient {
            http: self.http.clone(),
            rest_url: format!("{}/rest/v1", self.config.url),
            api_key: self.config.anon_key.clone(),
            bearer: bearer.unwrap_or_else(|| self.config.anon_key.clone()),
        }
    }

    /// Build a service-role client for user administration
    pub fn admin(&self) -> BackendResult<AdminClient> {
        let service_key = self.config.service_role_key.clone().ok_or_else(|| {
            BackendError::Configuration("SUPABASE_SERVICE_ROLE_KEY is not set".to_string())
        })?;

        Ok(AdminClient {
            users_url: format!("{}/auth/v1/admin/users", self.config.url),
            rest: ScopedClient {
                http: self.http.clone(),
                rest_url: format!("{}/rest/v1", self.config.url),
                api_key: service_key.clone(),
                bearer: service_key,
            },
        })
    }

    /// Check backend connectivity
    ///
    /// # Returns
    /// * `Result<bool>` - True if the auth health endpoint answers with success
    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .http
            .get(format!("{}/auth/v1/health", self.config.url))
            .header("apikey", &self.config.anon_key)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                info!("Backend health check successful");
                Ok(true)
            }
            Ok(response) => {
                error!("Backend health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                error!("Backend health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

/// Client for PostgREST tables, carrying one bearer credential
#[derive(Clone)]
pub struct ScopedClient {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
    bearer: String,
}

impl ScopedClient {
    /// Select a table to query
    pub fn from(&self, table: &str) -> Table<'_> {
        Table {
            client: self,
            name: table.to_string(),
        }
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer)
    }
}

/// A single PostgREST table reached through a [`ScopedClient`]
pub struct Table<'a> {
    client: &'a ScopedClient,
    name: String,
}

impl Table<'_> {
    fn url(&self) -> String {
        format!("{}/{}", self.client.rest_url, self.name)
    }

    /// Fetch every row visible to the client's credential
    pub async fn select_all<R: DeserializeOwned>(&self) -> BackendResult<Vec<R>> {
        self.select_eq(&[]).await
    }

    /// Fetch rows where each `(column, value)` pair matches exactly
    pub async fn select_eq<R: DeserializeOwned>(
        &self,
        filters: &[(&str, &str)],
    ) -> BackendResult<Vec<R>> {
        let mut query = vec![("select".to_string(), "*".to_string())];
        query.extend(
            filters
                .iter()
                .map(|(column, value)| (column.to_string(), format!("eq.{}", value))),
        );

        let response = self
            .client
            .request(Method::GET, self.url())
            .query(&query)
            .send()
            .await?;

        read_json(response).await
    }

    /// Insert rows and return them as stored
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        rows: &[T],
    ) -> BackendResult<Vec<R>> {
        self.write(rows, PREFER_RETURN, None).await
    }

    /// Insert rows, merging into existing ones that collide on `on_conflict`
    pub async fn upsert<T: Serialize, R: DeserializeOwned>(
        &self,
        rows: &[T],
        on_conflict: &str,
    ) -> BackendResult<Vec<R>> {
        self.write(rows, PREFER_MERGE, Some(on_conflict)).await
    }

    /// Insert rows, skipping those that collide on `on_conflict`
    ///
    /// Only rows that were actually inserted come back.
    pub async fn insert_ignore_duplicates<T: Serialize, R: DeserializeOwned>(
        &self,
        rows: &[T],
        on_conflict: &str,
    ) -> BackendResult<Vec<R>> {
        self.write(rows, PREFER_IGNORE, Some(on_conflict)).await
    }

    async fn write<T: Serialize, R: DeserializeOwned>(
        &self,
        rows: &[T],
        prefer: &str,
        on_conflict: Option<&str>,
    ) -> BackendResult<Vec<R>> {
        let mut request = self
            .client
            .request(Method::POST, self.url())
            .header("Prefer", prefer)
            .json(rows);

        if let Some(columns) = on_conflict {
            request = request.query(&[("on_conflict", columns)]);
        }

        read_json(request.send().await?).await
    }
}

/// Service-role client for the GoTrue admin API and unrestricted table access
#[derive(Clone)]
pub struct AdminClient {
    users_url: String,
    rest: ScopedClient,
}

impl AdminClient {
    /// Select a table, bypassing row-level policies
    pub fn from(&self, table: &str) -> Table<'_> {
        self.rest.from(table)
    }

    /// Fetch a backend user by id
    pub async fn get_user(&self, id: Uuid) -> BackendResult<Option<BackendUser>> {
        let response = self
            .rest
            .request(Method::GET, format!("{}/{}", self.users_url, id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        read_json(response).await.map(Some)
    }

    /// Create a backend user from the given attributes
    pub async fn create_user<T: Serialize>(&self, attributes: &T) -> BackendResult<BackendUser> {
        let response = self
            .rest
            .request(Method::POST, self.users_url.clone())
            .json(attributes)
            .send()
            .await?;

        read_json(response).await
    }

    /// Delete a backend user by id
    pub async fn delete_user(&self, id: Uuid) -> BackendResult<()> {
        let response = self
            .rest
            .request(Method::DELETE, format!("{}/{}", self.users_url, id))
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<R: DeserializeOwned>(response: Response) -> BackendResult<R> {
    let body = check_status(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config(url: &str) -> BackendConfig {
        BackendConfig {
            url: url.to_string(),
            anon_key: "anon".to_string(),
            service_role_key: None,
            timeout: 5,
        }
    }

    #[test]
    #[serial]
    fn test_backend_config_from_env() {
        unsafe {
            std::env::set_var("SUPABASE_URL", "https://project.supabase.co/");
            std::env::set_var("SUPABASE_ANON_KEY", "anon-key");
        }

        let config = BackendConfig::from_env().unwrap();
        assert_eq!(config.url, "https://project.supabase.co");
        assert_eq!(config.anon_key, "anon-key");
        assert_eq!(config.service_role_key, None);
        assert_eq!(config.timeout, 30);

        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::remove_var("SUPABASE_ANON_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_backend_config_requires_url() {
        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::set_var("SUPABASE_ANON_KEY", "anon-key");
        }

        assert!(BackendConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("SUPABASE_ANON_KEY");
        }
    }

    #[test]
    fn test_scoped_client_bearer() {
        let client = BackendClient::new(config("http://localhost")).unwrap();

        assert_eq!(client.scoped(Some("token")).bearer, "token");
        assert_eq!(client.scoped(Some("")).bearer, "anon");
        assert_eq!(client.scoped(None).bearer, "anon");
    }

    #[test]
    fn test_admin_requires_service_role_key() {
        let client = BackendClient::new(config("http://localhost")).unwrap();
        assert!(matches!(
            client.admin(),
            Err(BackendError::Configuration(_))
        ));
    }
}
