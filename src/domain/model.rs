use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable university identifier. The API has served both string and numeric
/// ids, so both normalise to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UniversityId(String);

impl UniversityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniversityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UniversityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for UniversityId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for UniversityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match RawScalar::deserialize(deserializer)? {
            RawScalar::Text(s) => Self::new(s),
            RawScalar::Int(n) => Self(n.to_string()),
            RawScalar::Float(f) => Self(f.to_string()),
        })
    }
}

fn lenient_ranking<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    use serde::de::Error;

    match RawScalar::deserialize(deserializer)? {
        RawScalar::Int(n) => u32::try_from(n).map_err(D::Error::custom),
        RawScalar::Float(f) if f >= 0.0 => Ok(f as u32),
        RawScalar::Float(f) => Err(D::Error::custom(format!("negative ranking {}", f))),
        RawScalar::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| D::Error::custom(format!("ranking is not a number: {:?}", s))),
    }
}

fn lenient_age<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Int(n)) => u32::try_from(n).ok(),
        Some(RawScalar::Float(f)) if f >= 0.0 => Some(f as u32),
        Some(RawScalar::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub university_id: UniversityId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(deserialize_with = "lenient_ranking", default)]
    pub ranking: u32,
    #[serde(default)]
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial update for an existing university; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniversityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UniversityUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Form data submitted to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    pub district: String,
    pub al_passed: bool,
    pub ol_passed: bool,
    pub stream: String,
    pub career_interest: String,
    pub budget: i64,
    pub preferred_city: String,
    pub degree_programs: String,
    pub program_description: String,
    pub hostel_required: bool,
    pub sports_or_extracurricular: bool,
    pub university_type: String,
    pub language_mediums: String,
    pub hostel_available: bool,
    pub semester_fee_lkr: i64,
    pub entry_requirements: String,
    pub ranking_score: f64,
    pub international_affiliation: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub recommended_university_id: UniversityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversityInsight {
    pub university_id: UniversityId,
    #[serde(default)]
    pub university_name: String,
    pub updated_info: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSubmission {
    pub user_email: String,
    pub university_id: UniversityId,
    pub rating: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingAck {
    Submitted,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user_email: String,
    pub university_id: UniversityId,
    pub rating: u8,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub user_email: String,
    pub university_id: UniversityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user_email: String,
    pub university_id: UniversityId,
    pub booking_date: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub age: Option<u32>,
    pub city: Option<String>,
    pub user_type: UserType,
}

/// A user record as returned by login and the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    #[serde(default)]
    pub city: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl ProfileUpdate {
    /// The profile as it looks once the server has applied this update.
    pub fn apply_to(&self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            username: profile.username.clone(),
            user_type: profile.user_type,
            full_name: self.full_name.clone().or_else(|| profile.full_name.clone()),
            email: self.email.clone().or_else(|| profile.email.clone()),
            age: self.age.or(profile.age),
            city: self.city.clone().or_else(|| profile.city.clone()),
        }
    }
}
