use crate::domain::model::{
    Booking, BookingRequest, Credentials, FeedbackRecord, PreferenceProfile, ProfileUpdate,
    RatingAck, RatingSubmission, RatingSummary, SignupRequest, University, UniversityId,
    UniversityInsight, UniversityUpdate, UserProfile,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Removing a file that does not exist is not an error.
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn session_dir(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_universities(&self) -> Result<Vec<University>>;
    async fn latest_info(&self, id: &UniversityId) -> Result<UniversityInsight>;
}

#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn recommend(&self, profile: &PreferenceProfile) -> Result<UniversityId>;
}

#[async_trait]
pub trait SearchService: Send + Sync {
    /// An empty query yields an empty list.
    async fn search(&self, query: &str) -> Result<Vec<University>>;
}

#[async_trait]
pub trait FeedbackService: Send + Sync {
    async fn submit_rating(&self, rating: &RatingSubmission) -> Result<RatingAck>;
    async fn rating_summary(&self, id: &UniversityId) -> Result<RatingSummary>;
    async fn all_feedback(&self) -> Result<Vec<FeedbackRecord>>;
}

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn submit_booking(&self, booking: &BookingRequest) -> Result<()>;
    async fn all_bookings(&self) -> Result<Vec<Booking>>;
}

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> Result<()>;
    async fn login(&self, credentials: &Credentials) -> Result<UserProfile>;
    async fn profile(&self, username: &str) -> Result<UserProfile>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()>;
    async fn delete_profile(&self, username: &str) -> Result<()>;
}

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn admin_universities(&self) -> Result<Vec<University>>;
    async fn add_university(&self, university: &University) -> Result<()>;
    async fn update_university(&self, id: &UniversityId, update: &UniversityUpdate) -> Result<()>;
    async fn delete_university(&self, id: &UniversityId) -> Result<()>;
}

/// Everything the command layer needs from the remote API.
pub trait UniversityApi:
    CatalogService
    + RecommendationService
    + SearchService
    + FeedbackService
    + BookingService
    + AccountService
    + AdminService
{
}

impl<T> UniversityApi for T where
    T: CatalogService
        + RecommendationService
        + SearchService
        + FeedbackService
        + BookingService
        + AccountService
        + AdminService
{
}
