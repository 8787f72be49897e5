//! HTTP client for the circuit API.
//!
//! One request per call: no retry, no timeout override, no cancellation.

use reqwest::{Client, Response};

use crate::errors::{AppError, ErrorResponse};
use crate::models::{Circuit, CreateCircuitRequest, UpdateCircuitRequest};

/// Typed client for `/api/circuits`.
#[derive(Debug, Clone)]
pub struct CircuitClient {
    http: Client,
    base_url: String,
}

impl CircuitClient {
    /// Create a client for a server such as `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/circuits{}", self.base_url, path)
    }

    /// GET /api/circuits
    pub async fn list(&self) -> Result<Vec<Circuit>, AppError> {
        let resp = self.http.get(self.url("")).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// POST /api/circuits
    pub async fn create(&self, request: &CreateCircuitRequest) -> Result<Circuit, AppError> {
        let resp = self.http.post(self.url("")).json(request).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// PUT /api/circuits/:id
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateCircuitRequest,
    ) -> Result<Circuit, AppError> {
        let resp = self
            .http
            .put(self.url(&format!("/{}", id)))
            .json(request)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// DELETE /api/circuits/:id
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let resp = self
            .http
            .delete(self.url(&format!("/{}", id)))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Pass successful responses through; decode error bodies into `AppError`.
async fn check(resp: Response) -> Result<Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => Err(AppError::from_body(body)),
        Err(_) => Err(AppError::Internal(format!(
            "Server answered {}: {}",
            status, text
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_trims_trailing_slash() {
        let client = CircuitClient::new("http://localhost:5000/");
        assert_eq!(client.url(""), "http://localhost:5000/api/circuits");
        assert_eq!(client.url("/abc"), "http://localhost:5000/api/circuits/abc");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CircuitClient::new(format!("http://{}", addr));
        let result = client.list().await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }
}
