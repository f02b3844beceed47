//! Member API client over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{GatewayError, GatewayResult, SeminarError, SeminarResult};
use crate::gateway::{MemberGateway, Page, SeminarGateway};
use crate::member::{MemberDocument, Notification, UserProfile};
use crate::rating::Rating;
use crate::registration::RegistrationForm;
use crate::seminar::{Seminar, SeminarId};

/// HTTP transport for the member API.
///
/// One request per call; nothing is retried.
#[derive(Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpGateway {
    pub fn new(config: &Config) -> SeminarResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SeminarError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(HttpGateway {
            http,
            base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, format!("{}/{}", self.base_url, path));
        match self.token {
            Some(ref token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> GatewayResult<Response> {
        let resp = req
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                body
            }
        });

        Err(GatewayError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> GatewayResult<T> {
        self.send(req)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Pull a human-readable message out of an error body.
/// Accepts `{"message": ..}`, `{"error": ..}` and `{"error": {"message": ..}}`.
fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed
        .get("message")
        .or_else(|| parsed.get("error"))
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}

#[async_trait]
impl SeminarGateway for HttpGateway {
    /// GET /seminars/upcoming?limit=&offset=
    async fn list_seminars(&self, page: Page) -> GatewayResult<Vec<Seminar>> {
        let req = self
            .request(Method::GET, "seminars/upcoming")
            .query(&[("limit", page.limit), ("offset", page.offset)]);

        // The API answers `null` when there is nothing scheduled
        let seminars: Option<Vec<Seminar>> = self.get_json(req).await?;
        Ok(seminars.unwrap_or_default())
    }

    /// POST /seminars/:id/register
    async fn register(&self, id: SeminarId, form: &RegistrationForm) -> GatewayResult<()> {
        let req = self
            .request(Method::POST, &format!("seminars/{id}/register"))
            .json(form);
        self.send(req).await?;
        Ok(())
    }

    /// DELETE /seminars/:id/register
    async fn cancel_registration(&self, id: SeminarId) -> GatewayResult<()> {
        let req = self.request(Method::DELETE, &format!("seminars/{id}/register"));
        self.send(req).await?;
        Ok(())
    }

    /// GET /seminars/:id/ical
    async fn export_calendar(&self, id: SeminarId) -> GatewayResult<Vec<u8>> {
        let req = self.request(Method::GET, &format!("seminars/{id}/ical"));
        let bytes = self
            .send(req)
            .await?
            .bytes()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// POST /seminars/:id/rating
    async fn add_rating(&self, id: SeminarId, rating: &Rating) -> GatewayResult<serde_json::Value> {
        let req = self
            .request(Method::POST, &format!("seminars/{id}/rating"))
            .json(&rating.to_payload());
        self.get_json(req).await
    }
}

#[async_trait]
impl MemberGateway for HttpGateway {
    /// GET /user/profile
    async fn fetch_profile(&self) -> GatewayResult<UserProfile> {
        self.get_json(self.request(Method::GET, "user/profile")).await
    }

    /// GET /user/documents
    async fn list_documents(&self) -> GatewayResult<Vec<MemberDocument>> {
        self.get_json(self.request(Method::GET, "user/documents")).await
    }

    /// GET /user/notifications
    async fn list_notifications(&self) -> GatewayResult<Vec<Notification>> {
        self.get_json(self.request(Method::GET, "user/notifications")).await
    }
}
