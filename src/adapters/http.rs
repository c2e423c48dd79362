use crate::domain::model::{
    Booking, BookingRequest, Credentials, FeedbackRecord, LoginResponse, PredictionResponse,
    PreferenceProfile, ProfileUpdate, RatingAck, RatingSubmission, RatingSummary, SignupRequest,
    University, UniversityId, UniversityInsight, UniversityUpdate, UserProfile,
};
use crate::domain::ports::{
    AccountService, AdminService, BookingService, CatalogService, ConfigProvider, FeedbackService,
    RecommendationService, SearchService,
};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed client for every service the application talks to.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::with_timeout(
            config.api_base_url(),
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        validate_url("api.base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Config {
            message: format!("Invalid API base URL: {}", e),
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config {
                message: format!("API base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        tracing::debug!("{} {}", method, url);
        Ok(self.client.request(method, url))
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        Err(match status {
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation { message }
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized { message },
            StatusCode::NOT_FOUND => ClientError::NotFound { message },
            other => ClientError::Server {
                status: other.as_u16(),
                message,
            },
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = Self::send(self.request(Method::GET, segments)?.query(query)).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<Response> {
        Self::send(self.request(method, segments)?.json(body)).await
    }
}

/// Prefers the API's `{"error": ...}` body, then plain text, then the reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl CatalogService for ApiClient {
    async fn list_universities(&self) -> Result<Vec<University>> {
        self.get_json(&["api", "universities"], &[]).await
    }

    async fn latest_info(&self, id: &UniversityId) -> Result<UniversityInsight> {
        let body = serde_json::json!({ "university_id": id });
        let response = self
            .send_json(Method::POST, &["api", "university", "update-info"], &body)
            .await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecommendationService for ApiClient {
    async fn recommend(&self, profile: &PreferenceProfile) -> Result<UniversityId> {
        let response = self
            .send_json(Method::POST, &["api", "predict"], profile)
            .await?;
        let prediction: PredictionResponse = response.json().await?;
        Ok(prediction.recommended_university_id)
    }
}

#[async_trait]
impl SearchService for ApiClient {
    async fn search(&self, query: &str) -> Result<Vec<University>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.get_json(&["api", "universities", "search"], &[("q", query)])
            .await
    }
}

#[async_trait]
impl FeedbackService for ApiClient {
    async fn submit_rating(&self, rating: &RatingSubmission) -> Result<RatingAck> {
        let response = self
            .send_json(Method::POST, &["api", "feedback", "submit-rating"], rating)
            .await?;
        Ok(if response.status() == StatusCode::CREATED {
            RatingAck::Submitted
        } else {
            RatingAck::Updated
        })
    }

    async fn rating_summary(&self, id: &UniversityId) -> Result<RatingSummary> {
        self.get_json(&["api", "feedback", "average-rating", id.as_str()], &[])
            .await
    }

    async fn all_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        self.get_json(&["api", "admin", "feedback"], &[]).await
    }
}

#[async_trait]
impl BookingService for ApiClient {
    async fn submit_booking(&self, booking: &BookingRequest) -> Result<()> {
        self.send_json(Method::POST, &["api", "bookings"], booking)
            .await?;
        Ok(())
    }

    async fn all_bookings(&self) -> Result<Vec<Booking>> {
        self.get_json(&["api", "admin", "bookings"], &[]).await
    }
}

#[async_trait]
impl AccountService for ApiClient {
    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.send_json(Method::POST, &["signup"], request).await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let response = self
            .send_json(Method::POST, &["login"], credentials)
            .await?;
        let login: LoginResponse = response.json().await?;
        Ok(login.user)
    }

    async fn profile(&self, username: &str) -> Result<UserProfile> {
        self.get_json(&["api", "user", "profile"], &[("username", username)])
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        self.send_json(Method::PUT, &["api", "user", "update"], update)
            .await?;
        Ok(())
    }

    async fn delete_profile(&self, username: &str) -> Result<()> {
        let request = self
            .request(Method::DELETE, &["api", "user", "delete"])?
            .query(&[("username", username)]);
        Self::send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl AdminService for ApiClient {
    async fn admin_universities(&self) -> Result<Vec<University>> {
        self.get_json(&["api", "admin", "universities"], &[]).await
    }

    async fn add_university(&self, university: &University) -> Result<()> {
        self.send_json(Method::POST, &["api", "admin", "universities"], university)
            .await?;
        Ok(())
    }

    async fn update_university(&self, id: &UniversityId, update: &UniversityUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(ClientError::validation("Nothing to update"));
        }
        self.send_json(
            Method::PUT,
            &["api", "admin", "universities", id.as_str()],
            update,
        )
        .await?;
        Ok(())
    }

    async fn delete_university(&self, id: &UniversityId) -> Result<()> {
        let request = self.request(Method::DELETE, &["api", "admin", "universities", id.as_str()])?;
        Self::send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(ApiClient::new("ftp://example.com").is_err());
        assert!(ApiClient::new("localhost:5000").is_err());
    }

    #[test]
    fn test_url_segments_are_encoded_and_keep_prefix() {
        let client = ApiClient::new("http://localhost:5000/backend/").unwrap();
        let url = client
            .url(&["api", "admin", "universities", "U 01/x"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/backend/api/admin/universities/U%2001%2Fx"
        );
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(
            error_message(StatusCode::CONFLICT, r#"{"error": "Username already exists"}"#),
            "Username already exists"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, "<!doctype html><title>404</title>"),
            "Not Found"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }
}
