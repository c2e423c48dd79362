use crate::core::notice::{Notice, NoticeKind};
use crate::domain::model::{RatingSummary, University, UserProfile};
use chrono::NaiveDateTime;
use std::fmt::Write;

pub fn notice_line(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("✅ {}", notice.text),
        NoticeKind::Error => format!("❌ {}", notice.text),
    }
}

pub fn university_line(university: &University, highlighted: bool) -> String {
    let marker = if highlighted { "★" } else { " " };
    format!(
        "{} [{}] {} ({}, rank {})  {}",
        marker,
        university.university_id,
        university.name,
        university.location,
        university.ranking,
        university.website
    )
}

pub fn university_list<'a>(
    universities: impl IntoIterator<Item = &'a University>,
    is_highlighted: impl Fn(&University) -> bool,
) -> String {
    let mut out = String::new();
    for university in universities {
        let _ = writeln!(out, "{}", university_line(university, is_highlighted(university)));
    }
    out
}

/// Average shown to one decimal with five stars, e.g. `★★★★☆ 4.2 (5 ratings)`.
pub fn rating_line(summary: &RatingSummary) -> String {
    let filled = summary.average_rating.round().clamp(0.0, 5.0) as usize;
    format!(
        "{}{} {:.1} ({} ratings)",
        "★".repeat(filled),
        "☆".repeat(5 - filled),
        summary.average_rating,
        summary.count
    )
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

pub fn profile_block(profile: &UserProfile) -> String {
    let or_dash = |value: Option<&str>| value.filter(|v| !v.is_empty()).unwrap_or("-").to_string();
    let mut out = String::new();
    let _ = writeln!(out, "Username:  {}", profile.username);
    let _ = writeln!(out, "Full name: {}", or_dash(profile.full_name.as_deref()));
    let _ = writeln!(out, "Email:     {}", or_dash(profile.email.as_deref()));
    let _ = writeln!(
        out,
        "Age:       {}",
        profile.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into())
    );
    let _ = writeln!(out, "City:      {}", or_dash(profile.city.as_deref()));
    let _ = writeln!(out, "Role:      {:?}", profile.user_type);
    out
}
