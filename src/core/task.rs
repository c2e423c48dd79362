use crate::utils::error::{ClientError, Result};

/// Observable state of a one-shot remote load.
#[derive(Debug, Default)]
pub enum LoadState<T> {
    #[default]
    Pending,
    Succeeded(T),
    Failed(ClientError),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed(error),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Pending => LoadState::Pending,
            Self::Succeeded(value) => LoadState::Succeeded(f(value)),
            Self::Failed(error) => LoadState::Failed(error),
        }
    }
}
