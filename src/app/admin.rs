//! Admin dashboard: catalog management plus the feedback and booking logs.
//! Every handler requires an admin session.

use crate::app::render::{format_timestamp, university_list};
use crate::app::{App, Rendered};
use crate::core::forms::UniversityForm;
use crate::core::session::{require_session, Session};
use crate::domain::model::{UniversityId, UniversityUpdate};
use crate::domain::ports::{Storage, UniversityApi};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_url;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Writes `records` to `path` with a header row taken from the field names.
pub fn export_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

impl<A: UniversityApi, S: Storage> App<A, S> {
    async fn admin_session(&self, action: &str) -> Result<Session> {
        let session = self.session().await?;
        let session = require_session(session.as_ref(), action)?;
        session.require_admin(action)?;
        Ok(session.clone())
    }

    pub async fn admin_list(&self) -> Result<Rendered> {
        self.admin_session("manage universities").await?;
        let universities = self.api.admin_universities().await?;

        let text = if universities.is_empty() {
            "No universities in the catalog.\n".to_string()
        } else {
            university_list(&universities, |_| false)
        };
        Ok(Rendered::new(
            text,
            serde_json::json!({ "universities": universities }),
        ))
    }

    pub async fn admin_add(&self, form: &UniversityForm) -> Result<Rendered> {
        self.admin_session("add universities").await?;
        let university = form.validate()?;
        self.api.add_university(&university).await?;
        Ok(Rendered::new(
            format!("Added {} [{}].", university.name, university.university_id),
            serde_json::json!({ "university": university }),
        ))
    }

    pub async fn admin_update(
        &self,
        id: &UniversityId,
        update: &UniversityUpdate,
    ) -> Result<Rendered> {
        self.admin_session("update universities").await?;
        if update.is_empty() {
            return Err(ClientError::validation("Nothing to update"));
        }
        if let Some(website) = &update.website {
            validate_url("website", website)?;
        }
        if let Some(image_url) = &update.image_url {
            validate_url("image_url", image_url)?;
        }

        self.api.update_university(id, update).await?;
        Ok(Rendered::new(
            format!("Updated university {}.", id),
            serde_json::json!({ "university_id": id, "update": update }),
        ))
    }

    pub async fn admin_delete(&self, id: &UniversityId, confirmed: bool) -> Result<Rendered> {
        self.admin_session("delete universities").await?;
        if !confirmed {
            return Err(ClientError::validation(format!(
                "Deleting {} is permanent; pass --yes to confirm",
                id
            )));
        }
        self.api.delete_university(id).await?;
        Ok(Rendered::new(
            format!("Deleted university {}.", id),
            serde_json::json!({ "university_id": id }),
        ))
    }

    pub async fn admin_feedback(&self, csv: Option<&Path>) -> Result<Rendered> {
        self.admin_session("view feedback").await?;
        let records = self.api.all_feedback().await?;
        if let Some(path) = csv {
            export_csv(path, &records)?;
        }

        let mut text = String::new();
        if records.is_empty() {
            text.push_str("No feedback yet.\n");
        }
        for record in &records {
            let _ = writeln!(
                text,
                "{}  {:<30} {:<8} {}",
                format_timestamp(&record.timestamp),
                record.user_email,
                record.university_id,
                "★".repeat(record.rating as usize)
            );
        }
        Ok(Rendered::new(text, serde_json::json!({ "feedback": records })))
    }

    pub async fn admin_bookings(&self, csv: Option<&Path>) -> Result<Rendered> {
        self.admin_session("view bookings").await?;
        let bookings = self.api.all_bookings().await?;
        if let Some(path) = csv {
            export_csv(path, &bookings)?;
        }

        let mut text = String::new();
        if bookings.is_empty() {
            text.push_str("No bookings yet.\n");
        }
        for booking in &bookings {
            let _ = writeln!(
                text,
                "{}  {:<30} {}",
                format_timestamp(&booking.booking_date),
                booking.user_email,
                booking.university_id
            );
        }
        Ok(Rendered::new(text, serde_json::json!({ "bookings": bookings })))
    }
}
