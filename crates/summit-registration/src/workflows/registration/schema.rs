//! Declarative rules for simple, independently validated fields.
//!
//! Every rule appends to a shared [`ValidationReport`] so one bad field never
//! hides another.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::{AttendeeContact, PrimaryAttendee, SalonInfo};
use super::locale::is_known_region;
use super::report::ValidationReport;

pub(crate) const MAX_EMAIL_LENGTH: usize = 254;

/// Length bounds for a free-text field, measured on trimmed characters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextRule {
    pub min: usize,
    pub max: usize,
    pub too_short: &'static str,
    pub too_long: &'static str,
}

pub(crate) const SALON_NAME: TextRule = TextRule {
    min: 2,
    max: 100,
    too_short: "Salon name must be at least 2 characters",
    too_long: "Salon name must be less than 100 characters",
};

pub(crate) const CITY: TextRule = TextRule {
    min: 2,
    max: 50,
    too_short: "City must be at least 2 characters",
    too_long: "City must be less than 50 characters",
};

pub(crate) const FIRST_NAME: TextRule = TextRule {
    min: 1,
    max: 50,
    too_short: "First name is required",
    too_long: "First name must be less than 50 characters",
};

pub(crate) const LAST_NAME: TextRule = TextRule {
    min: 1,
    max: 50,
    too_short: "Last name is required",
    too_long: "Last name must be less than 50 characters",
};

pub(crate) const FULL_NAME: TextRule = TextRule {
    min: 2,
    max: 100,
    too_short: "Name must be at least 2 characters",
    too_long: "Name must be less than 100 characters",
};

/// Whether a phone number must be present and the copy used when it fails.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PhoneRule {
    Required {
        missing: &'static str,
        invalid: &'static str,
    },
    Optional {
        invalid: &'static str,
    },
}

pub(crate) fn check_text(report: &mut ValidationReport, path: &str, value: &str, rule: TextRule) {
    let length = value.trim().chars().count();
    if length < rule.min {
        report.push(path, rule.too_short);
    } else if length > rule.max {
        report.push(path, rule.too_long);
    }
}

pub(crate) fn check_email(report: &mut ValidationReport, path: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        report.push(path, "Email is required");
    } else if value.chars().count() > MAX_EMAIL_LENGTH {
        report.push(path, "Email is too long");
    } else if !is_valid_email(value) {
        report.push(path, "Please enter a valid email address");
    }
}

pub(crate) fn check_phone(
    report: &mut ValidationReport,
    path: &str,
    value: Option<&str>,
    rule: PhoneRule,
) {
    let value = value.map(str::trim).filter(|phone| !phone.is_empty());
    match (value, rule) {
        (None, PhoneRule::Required { missing, .. }) => report.push(path, missing),
        (None, PhoneRule::Optional { .. }) => {}
        (Some(phone), PhoneRule::Required { invalid, .. })
        | (Some(phone), PhoneRule::Optional { invalid }) => {
            if !is_valid_us_ca_phone(phone) {
                report.push(path, invalid);
            }
        }
    }
}

pub(crate) fn check_salon(report: &mut ValidationReport, salon: &SalonInfo, state_message: &str) {
    check_text(report, "salonName", &salon.salon_name, SALON_NAME);
    check_text(report, "city", &salon.city, CITY);
    if !is_known_region(&salon.state) {
        report.push("state", state_message);
    }
}

pub(crate) fn check_primary_attendee(
    report: &mut ValidationReport,
    attendee: &PrimaryAttendee,
    phone: PhoneRule,
) {
    check_text(
        report,
        "primaryAttendee.firstName",
        &attendee.first_name,
        FIRST_NAME,
    );
    check_text(
        report,
        "primaryAttendee.lastName",
        &attendee.last_name,
        LAST_NAME,
    );
    check_email(report, "primaryAttendee.email", &attendee.email);
    check_phone(
        report,
        "primaryAttendee.phone",
        attendee.phone.as_deref(),
        phone,
    );
}

pub(crate) fn check_attendee_contact(
    report: &mut ValidationReport,
    index: usize,
    attendee: &AttendeeContact,
) {
    let prefix = format!("additionalAttendees.{index}");
    check_text(
        report,
        &format!("{prefix}.fullName"),
        &attendee.full_name,
        FULL_NAME,
    );
    check_email(report, &format!("{prefix}.email"), &attendee.email);
    check_phone(
        report,
        &format!("{prefix}.phone"),
        Some(attendee.phone.as_str()),
        PhoneRule::Required {
            missing: "Phone number is required",
            invalid: "Please enter a valid US/CA phone number",
        },
    );
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && email_pattern().is_match(value)
}

/// Ten digits, or eleven with a leading country code of 1. Separators limited
/// to spaces and `+ ( ) - .`.
pub fn is_valid_us_ca_phone(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-' | ' ' | '.');
    if !trimmed.chars().all(allowed) {
        return false;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 10 || (digits.len() == 11 && digits.starts_with('1'))
}
