use crate::app::render::{notice_line, university_list};
use crate::app::{App, Rendered};
use crate::core::forms::PreferenceForm;
use crate::core::landing::{LandingState, Outcome, SearchStart};
use crate::core::resolver::{DisplayMode, NO_RESULTS_MESSAGE};
use crate::domain::model::PreferenceProfile;
use crate::domain::ports::{
    CatalogService, RecommendationService, SearchService, Storage, UniversityApi,
};
use crate::utils::error::{ClientError, Result};
use std::fmt::Write;
use std::path::Path;

pub const CATALOG_FAILED: &str = "Failed to fetch university data.";

/// Drives a [`LandingState`] against the remote services.
pub struct LandingPage<'a, A: ?Sized> {
    api: &'a A,
    state: LandingState,
}

impl<'a, A> LandingPage<'a, A>
where
    A: CatalogService + RecommendationService + SearchService + ?Sized,
{
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            state: LandingState::new(),
        }
    }

    pub fn state(&self) -> &LandingState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LandingState {
        &mut self.state
    }

    pub async fn load_catalog(&mut self) {
        let result = self.api.list_universities().await;
        self.state.catalog_loaded(result);
    }

    pub async fn recommend(&mut self, profile: &PreferenceProfile) -> Outcome {
        let token = self.state.begin_recommendation();
        let result = self.api.recommend(profile).await;
        self.state.complete_recommendation(token, result)
    }

    pub async fn search(&mut self, query: &str) -> Outcome {
        match self.state.begin_search(query) {
            SearchStart::Cleared => Outcome::Applied,
            SearchStart::Pending(token) => {
                let result = self.api.search(query).await;
                self.state.complete_search(token, result)
            }
        }
    }

    pub fn render(&self) -> Rendered {
        let display = self.state.display();
        let mut text = String::new();

        if let Some(notice) = self.state.notice() {
            let _ = writeln!(text, "{}", notice_line(notice));
        }
        let _ = writeln!(text, "== {} ==", display.label());

        // search results stand on their own; the other modes need the catalog
        let catalog_error = self.state.catalog().error();
        let needs_catalog = display.mode != DisplayMode::SearchResults;
        if needs_catalog && self.state.catalog().is_pending() {
            let _ = writeln!(text, "Loading universities...");
        } else if needs_catalog && catalog_error.is_some() {
            let _ = writeln!(text, "{}", CATALOG_FAILED);
        } else if display.is_empty() {
            let _ = writeln!(text, "{}", NO_RESULTS_MESSAGE);
        } else {
            text.push_str(&university_list(
                display.universities.iter().copied(),
                |u| display.is_highlighted(u),
            ));
        }

        let json = serde_json::json!({
            "label": display.label(),
            "display": display.mode,
            "universities": display.universities,
            "notice": self.state.notice(),
            "catalog_error": catalog_error.map(|e| e.user_friendly_message()),
        });

        let failed = self.state.notice().is_some_and(|n| n.is_error())
            || (needs_catalog && catalog_error.is_some());
        let rendered = Rendered::new(text, json);
        if failed {
            rendered.failed()
        } else {
            rendered
        }
    }
}

impl<A: UniversityApi, S: Storage> App<A, S> {
    pub async fn explore(&self) -> Result<Rendered> {
        let mut page = LandingPage::new(&self.api);
        page.load_catalog().await;
        Ok(page.render())
    }

    pub async fn search(&self, query: &str) -> Result<Rendered> {
        let mut page = LandingPage::new(&self.api);
        let (catalog, outcome) = tokio::join!(self.api.list_universities(), page.search(query));
        page.state_mut().catalog_loaded(catalog);
        tracing::debug!("Search for {:?}: {:?}", query, outcome);
        Ok(page.render())
    }

    pub async fn recommend(&self, profile: &PreferenceProfile) -> Result<Rendered> {
        let mut page = LandingPage::new(&self.api);
        let (catalog, outcome) = tokio::join!(self.api.list_universities(), page.recommend(profile));
        page.state_mut().catalog_loaded(catalog);
        tracing::debug!("Recommendation outcome: {:?}", outcome);
        Ok(page.render())
    }

    /// Reads the preference form from a TOML file and requests a recommendation.
    pub async fn recommend_from_file(&self, path: &Path) -> Result<Rendered> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| {
            ClientError::validation(format!("Invalid profile file {}: {}", path.display(), e))
        })?;
        let profile = PreferenceForm::from_toml(&table)?.validate()?;
        self.recommend(&profile).await
    }
}
