//! Per-university card: rating, applying and the "latest info" summary.

use crate::core::notice::Notice;
use crate::core::session::Session;
use crate::core::task::LoadState;
use crate::domain::model::{
    BookingRequest, RatingSubmission, RatingSummary, UniversityId, UniversityInsight,
};
use crate::domain::ports::{BookingService, CatalogService, FeedbackService};
use crate::utils::validation::validate_range;

pub const LOGIN_TO_RATE: &str = "Please log in to submit a rating.";
pub const LOGIN_TO_APPLY: &str = "Please log in to apply.";

#[derive(Debug)]
pub struct UniversityCard {
    university_id: UniversityId,
    user_rating: Option<u8>,
    summary: LoadState<RatingSummary>,
    latest_info: Option<LoadState<UniversityInsight>>,
    notice: Option<Notice>,
}

impl UniversityCard {
    pub fn new(university_id: UniversityId) -> Self {
        Self {
            university_id,
            user_rating: None,
            summary: LoadState::Pending,
            latest_info: None,
            notice: None,
        }
    }

    pub fn university_id(&self) -> &UniversityId {
        &self.university_id
    }

    pub fn user_rating(&self) -> Option<u8> {
        self.user_rating
    }

    pub fn summary(&self) -> &LoadState<RatingSummary> {
        &self.summary
    }

    pub fn latest_info(&self) -> Option<&LoadState<UniversityInsight>> {
        self.latest_info.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// A failed aggregate fetch shows as zero ratings rather than an error.
    pub async fn refresh_summary<F>(&mut self, feedback: &F)
    where
        F: FeedbackService + ?Sized,
    {
        let summary = match feedback.rating_summary(&self.university_id).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Could not fetch ratings for {}: {}", self.university_id, e);
                RatingSummary::default()
            }
        };
        self.summary = LoadState::Succeeded(summary);
    }

    pub async fn rate<F>(&mut self, session: Option<&Session>, stars: u8, feedback: &F)
    where
        F: FeedbackService + ?Sized,
    {
        let Some(session) = session else {
            self.notice = Some(Notice::error(LOGIN_TO_RATE));
            return;
        };
        if let Err(e) = validate_range("rating", stars, 1, 5) {
            self.notice = Some(Notice::error(e.user_friendly_message()));
            return;
        }
        let user_email = match session.email() {
            Ok(email) => email.to_string(),
            Err(e) => {
                self.notice = Some(Notice::error(e.user_friendly_message()));
                return;
            }
        };

        let submission = RatingSubmission {
            user_email,
            university_id: self.university_id.clone(),
            rating: stars,
        };
        match feedback.submit_rating(&submission).await {
            Ok(ack) => {
                tracing::debug!("Rating for {} acknowledged: {:?}", self.university_id, ack);
                self.user_rating = Some(stars);
                self.notice = Some(Notice::success("Rating submitted successfully!"));
                self.refresh_summary(feedback).await;
            }
            Err(e) => {
                tracing::warn!("Rating submission failed: {}", e);
                self.notice = Some(Notice::error("Failed to submit rating."));
            }
        }
    }

    pub async fn apply<B>(&mut self, session: Option<&Session>, bookings: &B)
    where
        B: BookingService + ?Sized,
    {
        let Some(session) = session else {
            self.notice = Some(Notice::error(LOGIN_TO_APPLY));
            return;
        };
        let user_email = match session.email() {
            Ok(email) => email.to_string(),
            Err(e) => {
                self.notice = Some(Notice::error(e.user_friendly_message()));
                return;
            }
        };

        let request = BookingRequest {
            user_email,
            university_id: self.university_id.clone(),
        };
        self.notice = Some(match bookings.submit_booking(&request).await {
            Ok(()) => Notice::success("Application submitted successfully!"),
            Err(e) => {
                tracing::warn!("Application failed: {}", e);
                Notice::error("Failed to submit application.")
            }
        });
    }

    pub async fn fetch_latest_info<C>(&mut self, catalog: &C)
    where
        C: CatalogService + ?Sized,
    {
        self.latest_info = Some(LoadState::Pending);
        let result = catalog.latest_info(&self.university_id).await;
        self.notice = Some(match &result {
            Ok(_) => Notice::success("Latest info fetched successfully!"),
            Err(_) => Notice::error("Failed to fetch latest info."),
        });
        self.latest_info = Some(LoadState::from_result(result));
    }
}
