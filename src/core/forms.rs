//! Form state as immutable values. Every edit produces a new form, and the
//! typed request only exists after `validate` succeeds.

use crate::domain::model::{PreferenceProfile, SignupRequest, University, UserType};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{
    parse_number, validate_email, validate_non_empty_string, validate_range, validate_url,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

pub trait FormField: Copy + Ord + std::fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Wire name of the field.
    fn key(self) -> &'static str;

    fn initial(self) -> FieldValue {
        FieldValue::Text(String::new())
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form<F: FormField> {
    values: BTreeMap<F, FieldValue>,
}

impl<F: FormField> Default for Form<F> {
    fn default() -> Self {
        Self {
            values: F::ALL.iter().map(|f| (*f, f.initial())).collect(),
        }
    }
}

impl<F: FormField> Form<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(&self, field: F, value: impl Into<FieldValue>) -> Self {
        let mut values = self.values.clone();
        values.insert(field, value.into());
        Self { values }
    }

    /// Builds a form from a TOML table keyed by wire names.
    pub fn from_toml(table: &toml::Table) -> Result<Self> {
        table.iter().try_fold(Self::new(), |form, (key, value)| {
            let field = F::from_key(key).ok_or_else(|| {
                ClientError::invalid_value(key.as_str(), value.to_string(), "Unknown form field")
            })?;
            let value = match value {
                toml::Value::Boolean(b) => FieldValue::Flag(*b),
                toml::Value::String(s) => FieldValue::Text(s.clone()),
                toml::Value::Integer(n) => FieldValue::Text(n.to_string()),
                toml::Value::Float(x) => FieldValue::Text(x.to_string()),
                other => {
                    return Err(ClientError::invalid_value(
                        key.as_str(),
                        other.to_string(),
                        "Expected a string, number or boolean",
                    ))
                }
            };
            Ok(form.with(field, value))
        })
    }

    pub fn text(&self, field: F) -> &str {
        match self.values.get(&field) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    fn required_text(&self, field: F) -> Result<String> {
        let value = self.text(field);
        validate_non_empty_string(field.key(), value)?;
        Ok(value.trim().to_string())
    }

    fn optional_text(&self, field: F) -> Option<String> {
        let value = self.text(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn flag(&self, field: F) -> Result<bool> {
        match self.values.get(&field) {
            Some(FieldValue::Flag(b)) => Ok(*b),
            Some(FieldValue::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" | "" => Ok(false),
                _ => Err(ClientError::invalid_value(field.key(), s.as_str(), "Expected yes or no")),
            },
            None => Ok(false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreferenceField {
    District,
    AlPassed,
    OlPassed,
    Stream,
    CareerInterest,
    Budget,
    PreferredCity,
    DegreePrograms,
    ProgramDescription,
    HostelRequired,
    SportsOrExtracurricular,
    UniversityType,
    LanguageMediums,
    HostelAvailable,
    SemesterFeeLkr,
    EntryRequirements,
    RankingScore,
    InternationalAffiliation,
}

impl FormField for PreferenceField {
    const ALL: &'static [Self] = &[
        Self::District,
        Self::AlPassed,
        Self::OlPassed,
        Self::Stream,
        Self::CareerInterest,
        Self::Budget,
        Self::PreferredCity,
        Self::DegreePrograms,
        Self::ProgramDescription,
        Self::HostelRequired,
        Self::SportsOrExtracurricular,
        Self::UniversityType,
        Self::LanguageMediums,
        Self::HostelAvailable,
        Self::SemesterFeeLkr,
        Self::EntryRequirements,
        Self::RankingScore,
        Self::InternationalAffiliation,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::District => "district",
            Self::AlPassed => "al_passed",
            Self::OlPassed => "ol_passed",
            Self::Stream => "stream",
            Self::CareerInterest => "career_interest",
            Self::Budget => "budget",
            Self::PreferredCity => "preferred_city",
            Self::DegreePrograms => "degree_programs",
            Self::ProgramDescription => "program_description",
            Self::HostelRequired => "hostel_required",
            Self::SportsOrExtracurricular => "sports_or_extracurricular",
            Self::UniversityType => "university_type",
            Self::LanguageMediums => "language_mediums",
            Self::HostelAvailable => "hostel_available",
            Self::SemesterFeeLkr => "semester_fee_lkr",
            Self::EntryRequirements => "entry_requirements",
            Self::RankingScore => "ranking_score",
            Self::InternationalAffiliation => "international_affiliation",
        }
    }

    fn initial(self) -> FieldValue {
        match self {
            Self::AlPassed
            | Self::OlPassed
            | Self::HostelRequired
            | Self::SportsOrExtracurricular
            | Self::HostelAvailable
            | Self::InternationalAffiliation => FieldValue::Flag(false),
            Self::Budget | Self::SemesterFeeLkr | Self::RankingScore => FieldValue::Text("0".into()),
            _ => FieldValue::Text(String::new()),
        }
    }
}

pub type PreferenceForm = Form<PreferenceField>;

impl Form<PreferenceField> {
    pub fn validate(&self) -> Result<PreferenceProfile> {
        use PreferenceField::*;

        let budget: i64 = parse_number(Budget.key(), self.text(Budget))?;
        validate_range(Budget.key(), budget, 0, i64::MAX)?;
        let semester_fee_lkr: i64 = parse_number(SemesterFeeLkr.key(), self.text(SemesterFeeLkr))?;
        validate_range(SemesterFeeLkr.key(), semester_fee_lkr, 0, i64::MAX)?;
        let ranking_score: f64 = parse_number(RankingScore.key(), self.text(RankingScore))?;
        if !ranking_score.is_finite() {
            return Err(ClientError::invalid_value(
                RankingScore.key(),
                self.text(RankingScore),
                "Value must be a finite number",
            ));
        }

        Ok(PreferenceProfile {
            district: self.required_text(District)?,
            al_passed: self.flag(AlPassed)?,
            ol_passed: self.flag(OlPassed)?,
            stream: self.required_text(Stream)?,
            career_interest: self.required_text(CareerInterest)?,
            budget,
            preferred_city: self.required_text(PreferredCity)?,
            degree_programs: self.required_text(DegreePrograms)?,
            program_description: self.required_text(ProgramDescription)?,
            hostel_required: self.flag(HostelRequired)?,
            sports_or_extracurricular: self.flag(SportsOrExtracurricular)?,
            university_type: self.required_text(UniversityType)?,
            language_mediums: self.required_text(LanguageMediums)?,
            hostel_available: self.flag(HostelAvailable)?,
            semester_fee_lkr,
            entry_requirements: self.required_text(EntryRequirements)?,
            ranking_score,
            international_affiliation: self.flag(InternationalAffiliation)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignupField {
    Username,
    Password,
    FullName,
    Email,
    Age,
    City,
}

impl FormField for SignupField {
    const ALL: &'static [Self] = &[
        Self::Username,
        Self::Password,
        Self::FullName,
        Self::Email,
        Self::Age,
        Self::City,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Age => "age",
            Self::City => "city",
        }
    }
}

pub type SignupForm = Form<SignupField>;

impl Form<SignupField> {
    pub fn validate(&self) -> Result<SignupRequest> {
        use SignupField::*;

        let password = self.text(Password);
        validate_non_empty_string(Password.key(), password)?;
        let email = self.required_text(Email)?;
        validate_email(Email.key(), &email)?;

        let age = match self.optional_text(Age) {
            Some(raw) => {
                let age: u32 = parse_number(Age.key(), &raw)?;
                validate_range(Age.key(), age, 1, 150)?;
                Some(age)
            }
            None => None,
        };

        Ok(SignupRequest {
            username: self.required_text(Username)?,
            password: password.to_string(),
            full_name: self.required_text(FullName)?,
            email,
            age,
            city: self.optional_text(City),
            user_type: UserType::User,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UniversityField {
    UniversityId,
    Name,
    Location,
    Ranking,
    Website,
    ImageUrl,
}

impl FormField for UniversityField {
    const ALL: &'static [Self] = &[
        Self::UniversityId,
        Self::Name,
        Self::Location,
        Self::Ranking,
        Self::Website,
        Self::ImageUrl,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::UniversityId => "university_id",
            Self::Name => "name",
            Self::Location => "location",
            Self::Ranking => "ranking",
            Self::Website => "website",
            Self::ImageUrl => "image_url",
        }
    }

    fn initial(self) -> FieldValue {
        match self {
            Self::Ranking => FieldValue::Text("0".into()),
            _ => FieldValue::Text(String::new()),
        }
    }
}

pub type UniversityForm = Form<UniversityField>;

impl Form<UniversityField> {
    pub fn validate(&self) -> Result<University> {
        use UniversityField::*;

        let website = self.required_text(Website)?;
        validate_url(Website.key(), &website)?;
        let image_url = self.required_text(ImageUrl)?;
        validate_url(ImageUrl.key(), &image_url)?;

        Ok(University {
            university_id: crate::domain::model::UniversityId::new(
                self.required_text(UniversityField::UniversityId)?,
            ),
            name: self.required_text(Name)?,
            location: self.required_text(Location)?,
            ranking: parse_number(Ranking.key(), self.text(Ranking))?,
            website,
            image_url: Some(image_url),
        })
    }
}
