pub mod card;
pub mod forms;
pub mod landing;
pub mod notice;
pub mod resolver;
pub mod session;
pub mod task;

pub use crate::domain::model::{University, UniversityId};
pub use crate::domain::ports::{ConfigProvider, Storage, UniversityApi};
pub use crate::utils::error::Result;
