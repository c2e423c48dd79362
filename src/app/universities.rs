use crate::app::render::{notice_line, rating_line};
use crate::app::{App, Rendered};
use crate::core::card::UniversityCard;
use crate::domain::model::UniversityId;
use crate::domain::ports::{Storage, UniversityApi};
use crate::utils::error::Result;
use std::fmt::Write;

fn card_view(card: &UniversityCard, body: &str) -> Rendered {
    let mut text = String::new();
    if let Some(notice) = card.notice() {
        let _ = writeln!(text, "{}", notice_line(notice));
    }
    text.push_str(body);

    let json = serde_json::json!({
        "university_id": card.university_id(),
        "user_rating": card.user_rating(),
        "summary": card.summary().value(),
        "latest_info": card.latest_info().and_then(|info| info.value()),
        "notice": card.notice(),
    });

    let rendered = Rendered::new(text, json);
    if card.notice().is_some_and(|n| n.is_error()) {
        rendered.failed()
    } else {
        rendered
    }
}

fn summary_body(card: &UniversityCard) -> String {
    match card.summary().value() {
        Some(summary) => format!("{}  {}\n", card.university_id(), rating_line(summary)),
        None => String::new(),
    }
}

impl<A: UniversityApi, S: Storage> App<A, S> {
    pub async fn latest_info(&self, id: &UniversityId) -> Result<Rendered> {
        let mut card = UniversityCard::new(id.clone());
        card.fetch_latest_info(&self.api).await;

        let body = match card.latest_info().and_then(|info| info.value()) {
            Some(info) if info.university_name.is_empty() => format!("{}\n", info.updated_info),
            Some(info) => format!("{}\n{}\n", info.university_name, info.updated_info),
            None => String::new(),
        };
        Ok(card_view(&card, &body))
    }

    pub async fn ratings(&self, id: &UniversityId) -> Result<Rendered> {
        let mut card = UniversityCard::new(id.clone());
        card.refresh_summary(&self.api).await;
        Ok(card_view(&card, &summary_body(&card)))
    }

    pub async fn rate(&self, id: &UniversityId, stars: u8) -> Result<Rendered> {
        let session = self.session().await?;
        let mut card = UniversityCard::new(id.clone());
        card.rate(session.as_ref(), stars, &self.api).await;
        Ok(card_view(&card, &summary_body(&card)))
    }

    pub async fn apply(&self, id: &UniversityId) -> Result<Rendered> {
        let session = self.session().await?;
        let mut card = UniversityCard::new(id.clone());
        card.apply(session.as_ref(), &self.api).await;
        Ok(card_view(&card, ""))
    }
}
