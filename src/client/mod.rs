//! Authenticated access to the job-board REST API.
//!
//! Every call picks up the current access token from the token store. A 401
//! on a call that has not been retried triggers one refresh of the token
//! pair followed by one resend; if the refresh fails the session is cleared
//! and the caller sees the original 401. Refreshes are serialized, and a
//! request whose token was already replaced by a concurrent refresh just
//! resends with the new one.

pub mod request;

pub use request::{ApiRequest, FilePart, RequestBody};

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::dto::auth_dto::{RefreshPayload, TokenResponse};
use crate::error::{Error, Result};
use crate::models::role::Role;
use crate::session::{TokenStore, Tokens};

pub const REFRESH_PATH: &str = "api/v1/auth/refresh";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token_query_param: bool,
    store: Arc<dyn TokenStore>,
    refreshing: Arc<Mutex<()>>,
}

/// Credentials attached to one outgoing request.
struct Credentials<'a> {
    bearer: Option<&'a str>,
    query_token: Option<&'a str>,
}

impl ApiClient {
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let mut raw = config.api_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("Invalid API_BASE_URL {}: {}", raw, e)))?;

        Ok(Self {
            http,
            base_url,
            token_query_param: config.token_query_param,
            store,
            refreshing: Arc::new(Mutex::new(())),
        })
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends the request, refreshing the session once on a 401. Any non-2xx
    /// status that survives is returned as `Error::Api`.
    pub async fn execute(&self, request: ApiRequest) -> Result<Response> {
        let sent = self.access_token_for(&request);
        let response = self.dispatch(&request, sent.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED || request.public || request.is_retry() {
            return Self::check_status(response).await;
        }

        let original = Self::into_error(response).await;
        let refreshed = {
            let _guard = self.refreshing.lock().await;
            let current = self.access_token_for(&request);
            if current.is_some() && current != sent {
                debug!(path = %request.path, "Session already refreshed by another request");
                Ok(())
            } else {
                match self.refresh().await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        warn!(path = %request.path, error = %e, "Token refresh failed, clearing session");
                        if let Err(clear_err) = self.store.clear() {
                            warn!(error = %clear_err, "Failed to clear session");
                        }
                        Err(e)
                    }
                }
            }
        };
        if refreshed.is_err() {
            return Err(original);
        }

        let retry = request.retried();
        debug!(path = %retry.path, attempt = retry.attempt(), "Retrying after refresh");
        let token = self.access_token_for(&retry);
        let response = self.dispatch(&retry, token.as_deref()).await?;
        Self::check_status(response).await
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// For calls whose response body is of no interest.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<()> {
        let response = self.execute(request).await?;
        response.bytes().await?;
        Ok(())
    }

    pub async fn send_bytes(&self, request: ApiRequest) -> Result<Bytes> {
        let response = self.execute(request).await?;
        Ok(response.bytes().await?)
    }

    /// Exchanges the stored refresh token for a new pair and stores it under
    /// the role already on record.
    pub async fn refresh(&self) -> Result<()> {
        let session = self.store.load();
        let refresh_token = session
            .as_ref()
            .map(|s| s.tokens.refresh_token.clone())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Session("No refresh token stored".to_string()))?;
        let role = session.map(|s| s.role).unwrap_or(Role::User);

        let request = ApiRequest::post(REFRESH_PATH)
            .json(&RefreshPayload {
                refresh_token: refresh_token.clone(),
            })?
            .public();
        let response = self
            .send_with(
                &request,
                Credentials {
                    bearer: Some(&refresh_token),
                    query_token: None,
                },
            )
            .await?;
        let response = Self::check_status(response).await?;
        let fresh: TokenResponse = response.json().await?;

        self.store.set_tokens(
            &Tokens {
                access_token: fresh.access_token,
                refresh_token: fresh.refresh_token.unwrap_or(refresh_token),
                token_type: fresh.token_type,
            },
            role,
        )?;
        info!(role = %role, "Access token refreshed");
        Ok(())
    }

    fn access_token_for(&self, request: &ApiRequest) -> Option<String> {
        if request.public {
            None
        } else {
            self.store.access_token().filter(|t| !t.is_empty())
        }
    }

    async fn dispatch(&self, request: &ApiRequest, access_token: Option<&str>) -> Result<Response> {
        let credentials = Credentials {
            bearer: access_token,
            query_token: access_token.filter(|_| self.token_query_param),
        };
        self.send_with(request, credentials).await
    }

    async fn send_with(
        &self,
        request: &ApiRequest,
        credentials: Credentials<'_>,
    ) -> Result<Response> {
        let url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid request path {}: {}", request.path, e)))?;

        debug!(
            method = %request.method,
            path = %request.path,
            attempt = request.attempt(),
            authenticated = credentials.bearer.is_some(),
            "Sending request"
        );

        let mut builder = self.http.request(request.method.clone(), url);
        let mut query = request.query.clone();
        if let Some(token) = credentials.query_token {
            query.push(("token".to_string(), token.to_string()));
        }
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(token) = credentials.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::File(part) => {
                let mut file = Part::bytes(part.bytes.to_vec()).file_name(part.file_name.clone());
                if let Some(mime) = &part.mime {
                    file = file.mime_str(mime)?;
                }
                builder.multipart(Form::new().part(part.field, file))
            }
        };

        Ok(builder.send().await?)
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::into_error(response).await)
        }
    }

    async fn into_error(response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "API call failed");
        Error::from_response_body(status, &body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token_query_param", &self.token_query_param)
            .finish()
    }
}
