use crate::errors::ApiError;
use crate::models::{
    CleanupOutcome, CleanupRequest, DeleteMultipleOutcome, DeleteMultipleRequest, ErrorBody,
    FeederEvent, HealthResponse, ImageCollection, StatsSummary,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, error};

pub const MIN_CLEANUP_DAYS: u32 = 1;
pub const MAX_CLEANUP_DAYS: u32 = 365;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self, path: &str) -> String {
        format!("{}/uploads/{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get("/health").await
    }

    pub async fn get_images(&self) -> Result<ImageCollection, ApiError> {
        self.get("/api/images").await
    }

    pub async fn get_stats(&self) -> Result<StatsSummary, ApiError> {
        self.get("/api/stats").await
    }

    pub async fn get_events(&self, limit: u32) -> Result<Vec<FeederEvent>, ApiError> {
        self.get(&format!("/api/events?limit={limit}")).await
    }

    pub async fn delete_image(&self, path: &str) -> Result<(), ApiError> {
        let endpoint = format!("/api/delete/{path}");
        let request = self.request(Method::DELETE, &endpoint);
        self.send(&endpoint, request).await?;
        Ok(())
    }

    /// Only `success: false` is an error; partial failures come back as counts.
    pub async fn delete_multiple(&self, paths: &[String]) -> Result<DeleteMultipleOutcome, ApiError> {
        let outcome: DeleteMultipleOutcome = self
            .post("/api/delete-multiple", &DeleteMultipleRequest { paths })
            .await?;
        if !outcome.success {
            let reason = outcome
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(ApiError::Application(reason));
        }
        Ok(outcome)
    }

    pub async fn cleanup(&self, days: u32) -> Result<CleanupOutcome, ApiError> {
        let days = days.clamp(MIN_CLEANUP_DAYS, MAX_CLEANUP_DAYS);
        self.post("/api/cleanup", &CleanupRequest { days }).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, endpoint);
        let response = self.send(endpoint, request).await?;
        decode(endpoint, response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, endpoint).json(body);
        let response = self.send(endpoint, request).await?;
        decode(endpoint, response).await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, endpoint))
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        debug!("feeder request {endpoint}");
        let response = request.send().await.map_err(|source| {
            error!("feeder request {endpoint} failed: {source}");
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.error);
        error!("feeder request {endpoint} answered HTTP {status}");
        Err(ApiError::Http {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|source| {
        error!("feeder response from {endpoint} could not be decoded: {source}");
        ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        }
    })
}
