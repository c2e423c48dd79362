use crate::app::render::profile_block;
use crate::app::{App, Rendered};
use crate::core::forms::SignupForm;
use crate::core::session::require_session;
use crate::domain::model::{Credentials, ProfileUpdate};
use crate::domain::ports::{Storage, UniversityApi};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_email, validate_range};

pub const SIGNUP_SUCCESS: &str = "Sign-up successful! You can now log in.";

impl<A: UniversityApi, S: Storage> App<A, S> {
    pub async fn signup(&self, form: &SignupForm) -> Result<Rendered> {
        let request = form.validate()?;
        self.api.signup(&request).await?;
        tracing::info!("Created account {}", request.username);
        Ok(Rendered::message(SIGNUP_SUCCESS))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Rendered> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let session = self.sessions.login(&self.api, &credentials).await?;
        let user = session.user();
        let role = if user.is_admin() { " (admin)" } else { "" };
        let text = format!("Logged in as {}{}", user.username, role);
        Ok(Rendered::new(text, serde_json::json!({ "user": user })))
    }

    pub async fn logout(&self) -> Result<Rendered> {
        self.sessions.logout().await?;
        Ok(Rendered::message("Logged out."))
    }

    pub async fn whoami(&self) -> Result<Rendered> {
        match self.session().await? {
            Some(session) => {
                let user = session.user();
                Ok(Rendered::new(
                    profile_block(user),
                    serde_json::json!({ "user": user }),
                ))
            }
            None => Ok(Rendered::new(
                "Not logged in.",
                serde_json::json!({ "user": null }),
            )),
        }
    }

    pub async fn show_profile(&self) -> Result<Rendered> {
        let session = self.session().await?;
        let session = require_session(session.as_ref(), "view your profile")?;
        let profile = self.api.profile(session.username()).await?;
        Ok(Rendered::new(
            profile_block(&profile),
            serde_json::json!({ "user": profile }),
        ))
    }

    /// The username always comes from the session; any value on `update` is ignored.
    pub async fn update_profile(&self, mut update: ProfileUpdate) -> Result<Rendered> {
        let session = self.session().await?;
        let session = require_session(session.as_ref(), "update your profile")?;

        if update.full_name.is_none()
            && update.email.is_none()
            && update.age.is_none()
            && update.city.is_none()
        {
            return Err(ClientError::validation("Nothing to update"));
        }
        if let Some(email) = &update.email {
            validate_email("email", email)?;
        }
        if let Some(age) = update.age {
            validate_range("age", age, 1, 150)?;
        }

        update.username = session.username().to_string();
        self.api.update_profile(&update).await?;
        let refreshed = self
            .sessions
            .replace_user(session, update.apply_to(session.user()))
            .await?;

        let user = refreshed.user();
        let mut text = String::from("Profile updated successfully.\n");
        text.push_str(&profile_block(user));
        Ok(Rendered::new(text, serde_json::json!({ "user": user })))
    }

    pub async fn delete_account(&self, confirmed: bool) -> Result<Rendered> {
        let session = self.session().await?;
        let session = require_session(session.as_ref(), "delete your account")?;
        if !confirmed {
            return Err(ClientError::validation(
                "Account deletion is permanent; pass --yes to confirm",
            ));
        }

        self.api.delete_profile(session.username()).await?;
        self.sessions.logout().await?;
        tracing::info!("Deleted account {}", session.username());
        Ok(Rendered::message("Account deleted."))
    }
}
