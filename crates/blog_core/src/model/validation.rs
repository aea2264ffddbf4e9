//! Single-field validators for blog records.
//!
//! # Responsibility
//! - Check one candidate field value and return it (or its parsed form).
//! - Provide the stable user-facing messages for every rejected value.
//!
//! # Invariants
//! - Validators are pure: no store access, no logging, no global state
//!   besides the compiled title and phone patterns.
//! - Uniqueness is never checked here; it belongs to the store.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

use super::post::PostCategory;

/// Minimum post content length, counted in characters.
pub const CONTENT_MIN_CHARS: usize = 250;
/// Maximum post summary length, counted in characters.
pub const SUMMARY_MAX_CHARS: usize = 250;
/// Exact phone number length, counted in characters.
pub const PHONE_NUMBER_CHARS: usize = 10;

const CLICKBAIT_LITERALS: &[&str] = &["won't believe", "secret", "guess"];

static CLICKBAIT_TOP_N: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"top [0-9]+").expect("clickbait pattern must compile"));
// `\d` is Unicode-aware here and matches any `\p{Nd}` decimal digit.
static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\d{{{PHONE_NUMBER_CHARS}}}$")).expect("valid phone number regex")
});

/// Rejection raised when an assigned field value breaks its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingAuthorName,
    InvalidPhoneNumber,
    MissingPostTitle,
    TitleNotClickbait,
    ContentTooShort { chars: usize },
    SummaryTooLong { chars: usize },
    InvalidCategory(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthorName => write!(f, "All Authors should have a name"),
            Self::InvalidPhoneNumber => write!(
                f,
                "phone_number must be exactly 10 digits and contain only numbers"
            ),
            Self::MissingPostTitle => write!(f, "All posts have a title"),
            Self::TitleNotClickbait => write!(f, "Title must not be clickbait"),
            Self::ContentTooShort { .. } => {
                write!(f, "Post content is at least 250 characters long")
            }
            Self::SummaryTooLong { .. } => {
                write!(f, "Post summary is a maximum of 250 characters")
            }
            Self::InvalidCategory(_) => {
                write!(f, "Post category is either Fiction or Non-Fiction")
            }
        }
    }
}

impl Error for ValidationError {}

/// Returns `name` unchanged when it is non-empty.
///
/// Whitespace-only names count as present.
pub fn validate_name(name: &str) -> Result<&str, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::MissingAuthorName);
    }
    Ok(name)
}

/// Formats `phone_number` as text and checks it is exactly ten decimal digits.
///
/// Any Unicode decimal digit counts (`\p{Nd}`), so Arabic-Indic or
/// full-width digits pass alongside `0-9`.
///
/// Numeric inputs lose leading zeros when formatted; string inputs keep them.
pub fn validate_phone(phone_number: impl Display) -> Result<String, ValidationError> {
    let value = phone_number.to_string();
    if !PHONE_NUMBER_RE.is_match(&value) {
        return Err(ValidationError::InvalidPhoneNumber);
    }
    Ok(value)
}

/// Accepts only titles that read like clickbait.
///
/// The empty check runs first so an empty title reports the missing title
/// rather than the phrase mismatch.
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::MissingPostTitle);
    }
    if !is_clickbait(title) {
        return Err(ValidationError::TitleNotClickbait);
    }
    Ok(title)
}

/// Returns whether the lower-cased `title` contains a clickbait phrase.
pub fn is_clickbait(title: &str) -> bool {
    let lowered = title.to_lowercase();
    CLICKBAIT_LITERALS
        .iter()
        .any(|phrase| lowered.contains(phrase))
        || CLICKBAIT_TOP_N.is_match(&lowered)
}

pub fn validate_content(content: &str) -> Result<&str, ValidationError> {
    let chars = content.chars().count();
    if chars < CONTENT_MIN_CHARS {
        return Err(ValidationError::ContentTooShort { chars });
    }
    Ok(content)
}

pub fn validate_summary(summary: &str) -> Result<&str, ValidationError> {
    let chars = summary.chars().count();
    if chars > SUMMARY_MAX_CHARS {
        return Err(ValidationError::SummaryTooLong { chars });
    }
    Ok(summary)
}

/// Parses the exact literals `Fiction` / `Non-Fiction`; case-sensitive.
pub fn validate_category(category: &str) -> Result<PostCategory, ValidationError> {
    PostCategory::from_db(category)
        .ok_or_else(|| ValidationError::InvalidCategory(category.to_string()))
}
