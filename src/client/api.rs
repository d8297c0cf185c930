use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::ClientError;
use crate::auth::{LoginRequest, LoginResponse, MessageResponse, SignupRequest};
use crate::models::{NewTask, Task, TaskPatch};

/// Thin HTTP client for the `/api` routes.
///
/// Every task call takes the bearer token to attach, if any.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Something went wrong.")
                .to_string(),
        };
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn list_tasks(&self, token: Option<&str>) -> Result<Vec<Task>, ClientError> {
        let request = Self::authorize(self.http.get(self.url("/tasks")), token);
        Self::parse(request.send().await?).await
    }

    pub async fn get_task(&self, token: Option<&str>, id: u64) -> Result<Task, ClientError> {
        let request = Self::authorize(self.http.get(self.url(&format!("/tasks/{}", id))), token);
        Self::parse(request.send().await?).await
    }

    pub async fn create_task(
        &self,
        token: Option<&str>,
        task: &NewTask,
    ) -> Result<Task, ClientError> {
        let request = Self::authorize(self.http.post(self.url("/tasks")), token).json(task);
        Self::parse(request.send().await?).await
    }

    pub async fn update_task(
        &self,
        token: Option<&str>,
        id: u64,
        patch: &TaskPatch,
    ) -> Result<Task, ClientError> {
        let request = Self::authorize(self.http.put(self.url(&format!("/tasks/{}", id))), token)
            .json(patch);
        Self::parse(request.send().await?).await
    }

    pub async fn delete_task(
        &self,
        token: Option<&str>,
        id: u64,
    ) -> Result<MessageResponse, ClientError> {
        let request =
            Self::authorize(self.http.delete(self.url(&format!("/tasks/{}", id))), token);
        Self::parse(request.send().await?).await
    }
}
