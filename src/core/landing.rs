//! Landing view state: the catalog load, the recommendation and search
//! signals, and the guard that keeps slow responses from overwriting newer
//! ones.

use crate::core::notice::Notice;
use crate::core::resolver::{resolve, DisplayState, SearchSignal};
use crate::core::task::LoadState;
use crate::domain::model::{University, UniversityId};
use crate::utils::error::Result;

pub const RECOMMENDATION_FAILED: &str = "Failed to get recommendation. Please try again.";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Recommendation,
    Search,
}

/// Issued when a request starts; handed back with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    kind: SignalKind,
    seq: u64,
}

impl RequestToken {
    pub fn kind(&self) -> SignalKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignalEvent {
    RecommendationReceived(UniversityId),
    SearchSubmitted(Vec<University>),
    /// Empty query: no search in effect.
    SearchCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStart {
    /// The query was blank; the search was cleared without a request.
    Cleared,
    Pending(RequestToken),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A newer request superseded this one; the response was dropped.
    Stale,
    /// The request failed; signals are unchanged and a notice is set.
    Failed,
}

#[derive(Debug, Default)]
pub struct LandingState {
    catalog: LoadState<Vec<University>>,
    recommendation: Option<UniversityId>,
    search: SearchSignal,
    notice: Option<Notice>,
    next_seq: u64,
    latest_recommendation: u64,
    latest_search: u64,
    last_applied: u64,
}

impl LandingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &LoadState<Vec<University>> {
        &self.catalog
    }

    pub fn catalog_loaded(&mut self, result: Result<Vec<University>>) {
        match &result {
            Ok(universities) => tracing::debug!("Catalog loaded with {} universities", universities.len()),
            Err(e) => tracing::warn!("Catalog load failed: {}", e),
        }
        self.catalog = LoadState::from_result(result);
    }

    pub fn recommendation(&self) -> Option<&UniversityId> {
        self.recommendation.as_ref()
    }

    pub fn search(&self) -> &SearchSignal {
        &self.search
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn display(&self) -> DisplayState<'_> {
        let catalog = self.catalog.value().map(Vec::as_slice).unwrap_or(&[]);
        resolve(catalog, self.recommendation.as_ref(), &self.search)
    }

    /// Applies an already-resolved event immediately. It supersedes anything
    /// still in flight.
    pub fn apply(&mut self, event: SignalEvent) {
        let kind = match event {
            SignalEvent::RecommendationReceived(_) => SignalKind::Recommendation,
            SignalEvent::SearchSubmitted(_) | SignalEvent::SearchCleared => SignalKind::Search,
        };
        let token = self.issue(kind);
        self.transition(token, event);
    }

    pub fn begin_recommendation(&mut self) -> RequestToken {
        self.notice = None;
        self.issue(SignalKind::Recommendation)
    }

    pub fn begin_search(&mut self, query: &str) -> SearchStart {
        self.notice = None;
        let token = self.issue(SignalKind::Search);
        if query.trim().is_empty() {
            self.transition(token, SignalEvent::SearchCleared);
            SearchStart::Cleared
        } else {
            SearchStart::Pending(token)
        }
    }

    pub fn complete_recommendation(
        &mut self,
        token: RequestToken,
        result: Result<UniversityId>,
    ) -> Outcome {
        debug_assert_eq!(token.kind, SignalKind::Recommendation);
        self.complete(token, result.map(SignalEvent::RecommendationReceived), RECOMMENDATION_FAILED)
    }

    pub fn complete_search(&mut self, token: RequestToken, result: Result<Vec<University>>) -> Outcome {
        debug_assert_eq!(token.kind, SignalKind::Search);
        self.complete(token, result.map(SignalEvent::SearchSubmitted), SEARCH_FAILED)
    }

    fn complete(
        &mut self,
        token: RequestToken,
        result: Result<SignalEvent>,
        failure_text: &str,
    ) -> Outcome {
        if self.is_stale(token) {
            tracing::warn!("Ignoring superseded {:?} response (seq {})", token.kind, token.seq);
            return Outcome::Stale;
        }

        match result {
            Ok(event) => {
                self.transition(token, event);
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("{:?} request failed: {}", token.kind, e);
                self.notice = Some(Notice::error(failure_text));
                Outcome::Failed
            }
        }
    }

    fn issue(&mut self, kind: SignalKind) -> RequestToken {
        self.next_seq += 1;
        let seq = self.next_seq;
        match kind {
            SignalKind::Recommendation => self.latest_recommendation = seq,
            SignalKind::Search => self.latest_search = seq,
        }
        RequestToken { kind, seq }
    }

    fn is_stale(&self, token: RequestToken) -> bool {
        let latest = match token.kind {
            SignalKind::Recommendation => self.latest_recommendation,
            SignalKind::Search => self.latest_search,
        };
        token.seq != latest || token.seq < self.last_applied
    }

    // Each transition replaces one signal and clears the other.
    fn transition(&mut self, token: RequestToken, event: SignalEvent) {
        self.last_applied = self.last_applied.max(token.seq);
        match event {
            SignalEvent::RecommendationReceived(id) => {
                tracing::debug!("Recommendation received: {}", id);
                self.recommendation = Some(id);
                self.search = SearchSignal::Inactive;
            }
            SignalEvent::SearchSubmitted(results) => {
                tracing::debug!("Search returned {} universities", results.len());
                self.recommendation = None;
                self.search = SearchSignal::Active(results);
            }
            SignalEvent::SearchCleared => {
                self.recommendation = None;
                self.search = SearchSignal::Inactive;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::DisplayMode;
    use crate::utils::error::ClientError;

    fn uni(id: u64, name: &str) -> University {
        University {
            university_id: UniversityId::from(id),
            name: name.to_string(),
            location: "Sri Lanka".to_string(),
            ranking: id as u32,
            website: String::new(),
            image_url: None,
        }
    }

    fn loaded() -> LandingState {
        let mut state = LandingState::new();
        state.catalog_loaded(Ok(vec![
            uni(1, "University of Peradeniya"),
            uni(2, "University of Moratuwa"),
            uni(3, "University of Colombo"),
        ]));
        state
    }

    fn shown(state: &LandingState) -> Vec<String> {
        state
            .display()
            .universities
            .iter()
            .map(|u| u.university_id.to_string())
            .collect()
    }

    #[test]
    fn test_recommendation_for_id_2_shows_only_that_university() {
        let mut state = loaded();
        state.apply(SignalEvent::RecommendationReceived(UniversityId::from(2)));
        assert_eq!(shown(&state), vec!["2"]);
        assert_eq!(state.display().label(), "Your Recommended University");
    }

    #[test]
    fn test_repeated_recommendation_is_idempotent() {
        let mut once = loaded();
        once.apply(SignalEvent::RecommendationReceived(UniversityId::from(2)));

        let mut twice = loaded();
        twice.apply(SignalEvent::RecommendationReceived(UniversityId::from(2)));
        twice.apply(SignalEvent::RecommendationReceived(UniversityId::from(2)));

        assert_eq!(once.display(), twice.display());
    }

    #[test]
    fn test_empty_search_after_recommendation_is_search_mode() {
        let mut state = loaded();
        state.apply(SignalEvent::RecommendationReceived(UniversityId::from(1)));
        state.apply(SignalEvent::SearchSubmitted(Vec::new()));

        let display = state.display();
        assert_eq!(display.mode, DisplayMode::SearchResults);
        assert!(display.is_empty());
        assert!(state.recommendation().is_none());
    }

    #[test]
    fn test_search_then_recommendation_switches_label_and_clears_search() {
        let mut state = loaded();
        let SearchStart::Pending(token) = state.begin_search("Colombo") else {
            panic!("expected a pending search");
        };
        let outcome = state.complete_search(token, Ok(vec![uni(3, "University of Colombo")]));
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(shown(&state), vec!["3"]);
        assert_eq!(state.display().label(), "Search Results");

        let token = state.begin_recommendation();
        let outcome = state.complete_recommendation(token, Ok(UniversityId::from(1)));
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(shown(&state), vec!["1"]);
        assert_eq!(state.display().label(), "Your Recommended University");
        assert!(!state.search().is_active());
    }

    #[test]
    fn test_blank_query_falls_back_to_catalog() {
        let mut state = loaded();
        state.apply(SignalEvent::RecommendationReceived(UniversityId::from(2)));

        assert_eq!(state.begin_search("   "), SearchStart::Cleared);
        assert_eq!(state.display().mode, DisplayMode::AllCatalog);
        assert_eq!(shown(&state), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_blank_query_supersedes_recommendation_in_flight() {
        let mut state = loaded();
        let token = state.begin_recommendation();

        assert_eq!(state.begin_search(""), SearchStart::Cleared);
        let outcome = state.complete_recommendation(token, Ok(UniversityId::from(2)));

        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(state.recommendation(), None);
        assert_eq!(state.display().mode, DisplayMode::AllCatalog);
        assert_eq!(shown(&state), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_failed_search_keeps_previous_recommendation() {
        let mut state = loaded();
        state.apply(SignalEvent::RecommendationReceived(UniversityId::from(2)));

        let SearchStart::Pending(token) = state.begin_search("Kandy") else {
            panic!("expected a pending search");
        };
        let outcome = state.complete_search(
            token,
            Err(ClientError::Server {
                status: 500,
                message: "database unavailable".into(),
            }),
        );

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(state.recommendation(), Some(&UniversityId::from(2)));
        assert_eq!(shown(&state), vec!["2"]);
        assert_eq!(state.notice().map(|n| n.text.as_str()), Some(SEARCH_FAILED));

        state.dismiss_notice();
        assert!(state.notice().is_none());
    }

    #[test]
    fn test_failed_recommendation_keeps_previous_search() {
        let mut state = loaded();
        state.apply(SignalEvent::SearchSubmitted(vec![uni(3, "University of Colombo")]));

        let token = state.begin_recommendation();
        let outcome = state.complete_recommendation(token, Err(ClientError::validation("Model not loaded")));

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(shown(&state), vec!["3"]);
        assert!(state.notice().unwrap().is_error());
    }

    #[test]
    fn test_older_search_response_is_ignored() {
        let mut state = loaded();
        let SearchStart::Pending(first) = state.begin_search("Univ") else {
            panic!("expected a pending search");
        };
        let SearchStart::Pending(second) = state.begin_search("Colombo") else {
            panic!("expected a pending search");
        };

        assert_eq!(state.complete_search(second, Ok(vec![uni(3, "University of Colombo")])), Outcome::Applied);
        assert_eq!(
            state.complete_search(first, Ok(vec![uni(1, "University of Peradeniya"), uni(2, "University of Moratuwa")])),
            Outcome::Stale
        );
        assert_eq!(shown(&state), vec!["3"]);
    }

    #[test]
    fn test_slow_recommendation_does_not_override_later_search() {
        let mut state = loaded();
        let recommendation = state.begin_recommendation();
        let SearchStart::Pending(search) = state.begin_search("Moratuwa") else {
            panic!("expected a pending search");
        };

        assert_eq!(state.complete_search(search, Ok(vec![uni(2, "University of Moratuwa")])), Outcome::Applied);
        assert_eq!(
            state.complete_recommendation(recommendation, Ok(UniversityId::from(1))),
            Outcome::Stale
        );
        assert_eq!(state.display().mode, DisplayMode::SearchResults);
        assert_eq!(shown(&state), vec!["2"]);
    }

    #[test]
    fn test_earlier_request_completing_first_still_applies() {
        let mut state = loaded();
        let recommendation = state.begin_recommendation();
        let SearchStart::Pending(search) = state.begin_search("Colombo") else {
            panic!("expected a pending search");
        };

        assert_eq!(state.complete_recommendation(recommendation, Ok(UniversityId::from(1))), Outcome::Applied);
        assert_eq!(state.complete_search(search, Ok(vec![uni(3, "University of Colombo")])), Outcome::Applied);
        assert_eq!(shown(&state), vec!["3"]);
    }

    #[test]
    fn test_stale_failure_does_not_raise_notice() {
        let mut state = loaded();
        let first = state.begin_recommendation();
        let second = state.begin_recommendation();
        assert_eq!(state.complete_recommendation(second, Ok(UniversityId::from(2))), Outcome::Applied);
        assert_eq!(
            state.complete_recommendation(first, Err(ClientError::validation("late"))),
            Outcome::Stale
        );
        assert!(state.notice().is_none());
    }

    #[test]
    fn test_catalog_arriving_after_recommendation_fills_the_view() {
        let mut state = LandingState::new();
        state.apply(SignalEvent::RecommendationReceived(UniversityId::from(3)));
        assert!(state.display().is_empty());
        assert!(state.catalog().is_pending());

        state.catalog_loaded(Ok(vec![uni(3, "University of Colombo")]));
        assert_eq!(shown(&state), vec!["3"]);
    }
}
