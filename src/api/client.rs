//! HTTP client for the routes API.
//!
//! # Endpoints
//! - `GET /api/routes/`       list quests
//! - `GET /api/routes/{id}/`  quest detail
//! - `PUT /api/routes/{id}/`  replace a quest, points included
//!
//! No retries: a failed call surfaces to the caller, which keeps its state.

use reqwest::{Client, RequestBuilder, Response};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use url::Url;

use crate::api::types::{decode_quest, decode_quest_list, ApiError, ApiResult};
use crate::api::QuestStore;
use crate::config::schema::{ApiConfig, AuthMode};
use crate::model::{Quest, QuestId};
use crate::observability::metrics;

const ROUTES_PATH: &str = "api/routes/";

/// Client for the quest backend.
#[derive(Debug, Clone)]
pub struct RoutesClient {
    client: Client,
    base_url: Url,
    token: String,
    auth_mode: AuthMode,
    cache_bust: bool,
}

impl RoutesClient {
    /// Build a client from configuration.
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(client, config)
    }

    /// Build around an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &ApiConfig) -> ApiResult<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            token: config.token.clone(),
            auth_mode: config.auth_mode,
            cache_bust: config.cache_bust,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn list_url(&self) -> ApiResult<Url> {
        Ok(self.base_url.join(ROUTES_PATH)?)
    }

    /// `{list}/{id}/` with the id as one escaped path segment.
    fn detail_url(&self, id: &QuestId) -> ApiResult<Url> {
        let segment = id.as_str();
        if matches!(segment, "" | "." | "..") {
            return Err(ApiError::InvalidId(segment.to_string()));
        }
        let mut url = self.list_url()?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(segment)
            .push("");
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        if self.token.is_empty() {
            return request;
        }
        match self.auth_mode {
            AuthMode::Bearer => request.bearer_auth(&self.token),
            AuthMode::Query => request.query(&[("api_token", self.token.as_str())]),
        }
    }

    async fn send(&self, endpoint: &'static str, request: RequestBuilder) -> ApiResult<Response> {
        let response = match self.authorize(request).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_api_request(endpoint, "network_error");
                tracing::warn!(endpoint, error = %e, "Routes API request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        tracing::debug!(endpoint, status = %status, url = %response.url(), "Routes API response");
        if !status.is_success() {
            metrics::record_api_request(endpoint, "http_error");
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound(body));
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        metrics::record_api_request(endpoint, "ok");
        Ok(response)
    }

    async fn json_body(response: Response) -> ApiResult<serde_json::Value> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn list_quests(&self) -> ApiResult<Vec<Quest>> {
        let mut request = self.client.get(self.list_url()?);
        if self.cache_bust {
            let version = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis()
                .to_string();
            request = request.query(&[("v", version)]);
        }

        let response = self.send("list", request).await?;
        let quests = decode_quest_list(Self::json_body(response).await?);
        tracing::info!(count = quests.len(), "Fetched quest list");
        Ok(quests)
    }

    pub async fn get_quest(&self, id: &QuestId) -> ApiResult<Quest> {
        let request = self.client.get(self.detail_url(id)?);
        let response = self.send("detail", request).await?;
        let quest = decode_quest(Self::json_body(response).await?)?;
        tracing::info!(quest_id = %quest.id, points = quest.points.len(), "Fetched quest");
        Ok(quest)
    }

    /// Replace a quest on the backend with `quest`, points included.
    pub async fn update_quest(&self, quest: &Quest) -> ApiResult<()> {
        let mut body = serde_json::to_value(quest).map_err(|e| ApiError::Decode(e.to_string()))?;
        if self.auth_mode == AuthMode::Query && !self.token.is_empty() {
            if let Some(object) = body.as_object_mut() {
                object.insert("api_token".to_string(), self.token.clone().into());
            }
        }

        let request = self.client.put(self.detail_url(&quest.id)?).json(&body);
        self.send("update", request).await?;
        tracing::info!(quest_id = %quest.id, points = quest.points.len(), "Quest updated");
        Ok(())
    }
}

impl QuestStore for RoutesClient {
    async fn list_quests(&self) -> ApiResult<Vec<Quest>> {
        RoutesClient::list_quests(self).await
    }

    async fn get_quest(&self, id: &QuestId) -> ApiResult<Quest> {
        RoutesClient::get_quest(self, id).await
    }

    async fn update_quest(&self, quest: &Quest) -> ApiResult<()> {
        RoutesClient::update_quest(self, quest).await
    }
}
