//! HTTP client for the workspaces API.

use crate::config::ConsoleConfig;
use crate::error::ApiError;
use crate::workspace::{NewWorkspace, Workspace};
use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Remote operations the console performs on workspaces.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError>;

    async fn create_workspace(&self, request: &NewWorkspace) -> Result<Workspace, ApiError>;

    async fn delete_workspace(&self, id: &str) -> Result<(), ApiError>;
}

// The list endpoint answers with either an array or an id-keyed object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    List(Vec<Workspace>),
    Map(IndexMap<String, Workspace>),
}

impl From<ListResponse> for Vec<Workspace> {
    fn from(response: ListResponse) -> Self {
        match response {
            ListResponse::List(list) => list,
            ListResponse::Map(map) => map.into_values().collect(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`WorkspaceApi`] over HTTP with optional bearer authentication.
#[derive(Clone)]
pub struct HttpWorkspaceApi {
    client: Client,
    workspaces_url: Url,
    token: Option<String>,
}

impl HttpWorkspaceApi {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let endpoint = format!("{}/workspaces", config.endpoint());
        let workspaces_url =
            Url::parse(&endpoint).map_err(|e| ApiError::InvalidUrl(format!("{endpoint}: {e}")))?;

        Ok(Self {
            client,
            workspaces_url,
            token: config.api_token.clone(),
        })
    }

    pub fn workspaces_url(&self) -> &Url {
        &self.workspaces_url
    }

    fn workspace_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.workspaces_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.workspaces_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);

        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized(message))
        } else {
            Err(ApiError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl WorkspaceApi for HttpWorkspaceApi {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        debug!("GET {}", self.workspaces_url);
        let response = self
            .send(self.client.get(self.workspaces_url.clone()))
            .await?;
        let list: ListResponse = Self::decode(response).await?;
        Ok(list.into())
    }

    async fn create_workspace(&self, request: &NewWorkspace) -> Result<Workspace, ApiError> {
        debug!("POST {}", self.workspaces_url);
        let response = self
            .send(self.client.post(self.workspaces_url.clone()).json(request))
            .await?;
        Self::decode(response).await
    }

    async fn delete_workspace(&self, id: &str) -> Result<(), ApiError> {
        let url = self.workspace_url(id)?;
        debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
