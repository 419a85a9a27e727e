//! Raw quote form input and its validation
//!
//! [`QuoteForm`] mirrors what a user types: composite values such as dates and
//! phone numbers stay split into their parts until [`compose`] joins them.
//!
//! [`compose`]: crate::quote::request::compose

use crate::rut;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern compiles"));

/// A date picked as separate day and time inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateParts {
    /// `YYYY-MM-DD`
    pub day: Option<String>,
    /// `HH:MM` or `HH:MM:SS`
    pub hour: Option<String>,
}

impl DateParts {
    pub fn new(day: impl Into<String>, hour: impl Into<String>) -> Self {
        Self {
            day: Some(day.into()),
            hour: Some(hour.into()),
        }
    }

    /// Parse both parts into a timestamp, describing the first problem found
    pub fn parse(&self) -> Result<NaiveDateTime, String> {
        let day = present(&self.day).ok_or_else(|| "day is required".to_string())?;
        let hour = present(&self.hour).ok_or_else(|| "hour is required".to_string())?;

        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|_| format!("day '{day}' is not a YYYY-MM-DD date"))?;
        let time = NaiveTime::parse_from_str(hour, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(hour, "%H:%M:%S"))
            .map_err(|_| format!("hour '{hour}' is not an HH:MM time"))?;

        Ok(date.and_time(time))
    }
}

/// A phone number entered as area/country prefix plus number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneParts {
    pub prefix: Option<String>,
    pub number: Option<String>,
}

impl PhoneParts {
    pub fn new(prefix: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            number: Some(number.into()),
        }
    }

    /// Prefix and number joined, or `None` without a number
    pub fn joined(&self) -> Option<String> {
        let number = present(&self.number)?;
        let prefix = present(&self.prefix).unwrap_or_default();
        Some(format!("{prefix}{number}"))
    }
}

/// Everything a user enters on the quote form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteForm {
    pub origin_date: DateParts,
    pub destination_date: DateParts,

    pub origin_region: Option<String>,
    pub origin_commune: Option<String>,
    pub destination_region: Option<String>,
    pub destination_commune: Option<String>,

    pub freight_type: Option<String>,
    pub container_type: Option<String>,
    pub truck_type: Option<String>,
    pub equipment: Option<String>,

    /// Up to three free-text quote notes
    pub other: [Option<String>; 3],
    pub payment_term: Option<String>,
    pub payment_from: Option<String>,
    /// Present when storage is needed; describes what kind
    pub storage_note: Option<String>,

    pub user_phone: PhoneParts,
    pub user_mobile: PhoneParts,
    pub company_phone: PhoneParts,

    pub contact_email: Option<String>,
    pub company_rut: Option<String>,

    /// Additional fields forwarded to the backend untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One problem with one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: String,
}

/// Every problem found while validating a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn push(&mut self, field: &'static str, problem: impl Into<String>) {
        self.0.push(FieldError {
            field,
            problem: problem.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether `field` has at least one problem
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl QuoteForm {
    /// Check every field, collecting all problems
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if let Err(problem) = self.origin_date.parse() {
            errors.push("origin_date", problem);
        }
        if let Err(problem) = self.destination_date.parse() {
            errors.push("destination_date", problem);
        }

        if present(&self.origin_region).is_none() {
            errors.push("origin_region", "origin region is required");
        }
        if present(&self.destination_region).is_none() {
            errors.push("destination_region", "destination region is required");
        }
        if present(&self.freight_type).is_none() {
            errors.push("freight_type", "freight type is required");
        }

        match present(&self.contact_email) {
            None => errors.push("contact_email", "contact e-mail is required"),
            Some(email) if !is_email(email) => {
                errors.push("contact_email", format!("'{email}' is not an e-mail address"))
            }
            Some(_) => {}
        }

        if let Some(raw) = present(&self.company_rut) {
            if !rut::clean_and_validate(raw) {
                errors.push("company_rut", format!("'{raw}' is not a valid RUT"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Whether `value` looks like `local@domain.tld`
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Trimmed value, treating blank as missing
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
