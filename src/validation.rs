//! Input validation for orders, complaints and the barista pool.
//!
//! Checks run before anything touches scheduler state and report every
//! problem found, not just the first. Detects:
//! - Empty or oversized text fields
//! - Prep times outside the menu buckets
//! - Loyalty tiers outside 1–5
//! - Empty or duplicate barista pools and nonsensical thresholds

use crate::config::DispatchConfig;
use crate::models::{NewComplaint, NewOrder, ALLOWED_PREP_TIMES};
use std::collections::HashSet;
use std::fmt;

/// Longest accepted drink name.
pub const MAX_DRINK_NAME_LEN: usize = 100;
/// Longest accepted complaint message.
pub const MAX_COMPLAINT_LEN: usize = 500;
/// Longest accepted barista or user name.
pub const MAX_NAME_LEN: usize = 50;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required text field is blank.
    EmptyField,
    /// A text field exceeds its length limit.
    TooLong,
    /// Prep time is not one of the menu buckets.
    InvalidPrepTime,
    /// Loyalty tier outside 1–5.
    InvalidLoyaltyTier,
    /// Two baristas share the same name.
    DuplicateName,
    /// The barista pool is empty.
    EmptyPool,
    /// A numeric tunable is out of range.
    InvalidThreshold,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates an order submission.
///
/// Checks:
/// 1. Drink name is non-blank and at most [`MAX_DRINK_NAME_LEN`] chars
/// 2. Prep time is one of [`ALLOWED_PREP_TIMES`]
/// 3. Loyalty tier is within 1–5
/// 4. Username, if present, is at most [`MAX_NAME_LEN`] chars
pub fn validate_order(order: &NewOrder) -> ValidationResult {
    let mut errors = Vec::new();

    check_text(&mut errors, "drinkName", &order.drink_name, MAX_DRINK_NAME_LEN);

    let prep_ok = u32::try_from(order.prep_time_minutes)
        .map(|p| ALLOWED_PREP_TIMES.contains(&p))
        .unwrap_or(false);
    if !prep_ok {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPrepTime,
            format!(
                "prepTimeMinutes must be one of {:?}, got {}",
                ALLOWED_PREP_TIMES, order.prep_time_minutes
            ),
        ));
    }

    if !(1..=5).contains(&order.loyalty_tier) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidLoyaltyTier,
            format!("loyaltyTier must be between 1 and 5, got {}", order.loyalty_tier),
        ));
    }

    if let Some(username) = &order.username {
        if username.trim().chars().count() > MAX_NAME_LEN {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooLong,
                format!("username exceeds {MAX_NAME_LEN} characters"),
            ));
        }
    }

    finish(errors)
}

/// Validates a complaint submission.
pub fn validate_complaint(complaint: &NewComplaint) -> ValidationResult {
    let mut errors = Vec::new();
    check_text(&mut errors, "baristaName", &complaint.barista_name, MAX_NAME_LEN);
    check_text(&mut errors, "message", &complaint.message, MAX_COMPLAINT_LEN);
    if let Some(username) = &complaint.username {
        if username.trim().chars().count() > MAX_NAME_LEN {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooLong,
                format!("username exceeds {MAX_NAME_LEN} characters"),
            ));
        }
    }
    finish(errors)
}

/// Validates the engine configuration.
///
/// Checks:
/// 1. At least one barista
/// 2. No blank or duplicate barista names
/// 3. Urgency onset is positive and before the service deadline
/// 4. Ratio threshold, boosts and tick interval are positive
pub fn validate_config(config: &DispatchConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.barista_names.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPool,
            "at least one barista is required",
        ));
    }

    let mut seen = HashSet::new();
    for name in &config.barista_names {
        if name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyField,
                "barista name must not be blank",
            ));
        } else if !seen.insert(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate barista name: {name}"),
            ));
        }
    }

    if !(config.urgency_onset_minutes > 0.0
        && config.urgency_onset_minutes < config.service_deadline_minutes)
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidThreshold,
            format!(
                "urgency onset ({}) must be positive and below the service deadline ({})",
                config.urgency_onset_minutes, config.service_deadline_minutes
            ),
        ));
    }

    let positives = [
        ("complexityCeilingMinutes", config.complexity_ceiling_minutes),
        ("fairnessRatioThreshold", config.fairness_ratio_threshold),
        ("tickIntervalMs", config.tick_interval_ms as f64),
    ];
    for (field, value) in positives {
        if !(value > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidThreshold,
                format!("{field} must be positive, got {value}"),
            ));
        }
    }

    for (field, value) in [
        ("regularCustomerBonus", config.regular_customer_bonus),
        ("skipUrgencyBoost", config.skip_urgency_boost),
    ] {
        if !(value >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidThreshold,
                format!("{field} must not be negative, got {value}"),
            ));
        }
    }

    finish(errors)
}

fn check_text(errors: &mut Vec<ValidationError>, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyField,
            format!("{field} must not be blank"),
        ));
    } else if value.chars().count() > max_len {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooLong,
            format!("{field} exceeds {max_len} characters"),
        ));
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
