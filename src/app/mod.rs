//! Command handlers. Each produces a [`Rendered`] view the binary prints as
//! text or JSON.

pub mod account;
pub mod admin;
pub mod landing;
pub mod render;
pub mod universities;

use crate::core::session::{Session, SessionStore};
use crate::domain::ports::{Storage, UniversityApi};
use crate::utils::error::Result;

/// Output of a command: human text plus the same content as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub json: serde_json::Value,
    /// False when the view ended on an error notice.
    pub ok: bool,
}

impl Rendered {
    pub fn new(text: impl Into<String>, json: serde_json::Value) -> Self {
        Self {
            text: text.into(),
            json,
            ok: true,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        let text = text.into();
        let json = serde_json::json!({ "message": text });
        Self::new(text, json)
    }

    pub fn failed(mut self) -> Self {
        self.ok = false;
        self
    }
}

pub struct App<A, S: Storage> {
    api: A,
    sessions: SessionStore<S>,
}

impl<A: UniversityApi, S: Storage> App<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        Self {
            api,
            sessions: SessionStore::new(storage),
        }
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    async fn session(&self) -> Result<Option<Session>> {
        self.sessions.current().await
    }
}

#[cfg(feature = "cli")]
impl<A: UniversityApi, S: Storage> App<A, S> {
    pub async fn run(&self, command: &crate::config::cli::Command) -> Result<Rendered> {
        use crate::config::cli::{AdminCommand, Command, ProfileCommand, UniversityCommand};
        use crate::core::forms::{SignupField, SignupForm, UniversityField, UniversityForm};
        use crate::domain::model::{ProfileUpdate, UniversityId, UniversityUpdate};

        match command {
            Command::List => self.explore().await,
            Command::Search { query } => self.search(query).await,
            Command::Recommend { profile } => self.recommend_from_file(profile).await,
            Command::Info { id } => self.latest_info(&UniversityId::new(id.as_str())).await,
            Command::Ratings { id } => self.ratings(&UniversityId::new(id.as_str())).await,
            Command::Rate { id, stars } => self.rate(&UniversityId::new(id.as_str()), *stars).await,
            Command::Apply { id } => self.apply(&UniversityId::new(id.as_str())).await,
            Command::Signup(args) => {
                let form = SignupForm::new()
                    .with(SignupField::Username, args.username.as_str())
                    .with(SignupField::Password, args.password.as_str())
                    .with(SignupField::FullName, args.full_name.as_str())
                    .with(SignupField::Email, args.email.as_str())
                    .with(SignupField::Age, args.age.clone().unwrap_or_default())
                    .with(SignupField::City, args.city.clone().unwrap_or_default());
                self.signup(&form).await
            }
            Command::Login { username, password } => self.login(username, password).await,
            Command::Logout => self.logout().await,
            Command::Whoami => self.whoami().await,
            Command::Profile { command } => match command {
                ProfileCommand::Show => self.show_profile().await,
                ProfileCommand::Update {
                    full_name,
                    email,
                    age,
                    city,
                } => {
                    let update = ProfileUpdate {
                        username: String::new(),
                        full_name: full_name.clone(),
                        email: email.clone(),
                        age: *age,
                        city: city.clone(),
                    };
                    self.update_profile(update).await
                }
                ProfileCommand::Delete { yes } => self.delete_account(*yes).await,
            },
            Command::Admin { command } => match command {
                AdminCommand::Universities { command } => match command {
                    UniversityCommand::List => self.admin_list().await,
                    UniversityCommand::Add(args) => {
                        let form = UniversityForm::new()
                            .with(UniversityField::UniversityId, args.id.as_str())
                            .with(UniversityField::Name, args.name.as_str())
                            .with(UniversityField::Location, args.location.as_str())
                            .with(UniversityField::Ranking, args.ranking.as_str())
                            .with(UniversityField::Website, args.website.as_str())
                            .with(UniversityField::ImageUrl, args.image_url.as_str());
                        self.admin_add(&form).await
                    }
                    UniversityCommand::Update {
                        id,
                        name,
                        location,
                        ranking,
                        website,
                        image_url,
                    } => {
                        let update = UniversityUpdate {
                            name: name.clone(),
                            location: location.clone(),
                            ranking: *ranking,
                            website: website.clone(),
                            image_url: image_url.clone(),
                        };
                        self.admin_update(&UniversityId::new(id.as_str()), &update)
                            .await
                    }
                    UniversityCommand::Delete { id, yes } => {
                        self.admin_delete(&UniversityId::new(id.as_str()), *yes)
                            .await
                    }
                },
                AdminCommand::Feedback { csv } => self.admin_feedback(csv.as_deref()).await,
                AdminCommand::Bookings { csv } => self.admin_bookings(csv.as_deref()).await,
            },
        }
    }
}
