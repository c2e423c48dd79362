use crate::domain::model::{Credentials, UserProfile};
use crate::domain::ports::{AccountService, Storage};
use crate::utils::error::{ClientError, Result};

pub const SESSION_FILE: &str = "session.json";

/// The logged-in user. Created by [`SessionStore::login`], read-only for
/// everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: UserProfile,
}

impl Session {
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// Ratings and bookings are keyed by the account email.
    pub fn email(&self) -> Result<&str> {
        self.user
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                ClientError::validation("Your profile has no email address; update it first")
            })
    }

    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(ClientError::PermissionDenied {
                action: action.to_string(),
            })
        }
    }
}

/// Returns the session or a `SessionRequired` error naming `action`.
pub fn require_session<'a>(session: Option<&'a Session>, action: &str) -> Result<&'a Session> {
    session.ok_or_else(|| ClientError::SessionRequired {
        action: action.to_string(),
    })
}

/// Persists the session between CLI invocations.
pub struct SessionStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn current(&self) -> Result<Option<Session>> {
        let data = match self.storage.read_file(SESSION_FILE).await {
            Ok(data) => data,
            Err(ClientError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        match serde_json::from_slice::<UserProfile>(&data) {
            Ok(user) => Ok(Some(Session { user })),
            Err(e) => {
                tracing::warn!("Discarding unreadable session record: {}", e);
                self.storage.remove_file(SESSION_FILE).await?;
                Ok(None)
            }
        }
    }

    pub async fn login<A>(&self, account: &A, credentials: &Credentials) -> Result<Session>
    where
        A: AccountService + ?Sized,
    {
        let user = account.login(credentials).await?;
        tracing::info!("Logged in as {} ({:?})", user.username, user.user_type);
        self.persist(&user).await?;
        Ok(Session { user })
    }

    /// Swaps in a refreshed profile for the current user.
    pub async fn replace_user(&self, session: &Session, user: UserProfile) -> Result<Session> {
        if user.username != session.user.username {
            return Err(ClientError::validation("Cannot switch users without logging in"));
        }
        self.persist(&user).await?;
        Ok(Session { user })
    }

    pub async fn logout(&self) -> Result<()> {
        self.storage.remove_file(SESSION_FILE).await
    }

    async fn persist(&self, user: &UserProfile) -> Result<()> {
        let data = serde_json::to_vec_pretty(user)?;
        self.storage.write_file(SESSION_FILE, &data).await
    }
}
