//! Chilean RUT codec
//!
//! Pure, total functions over national-ID strings:
//! - [`clean`] strips everything except digits and `K`, uppercasing the rest
//! - [`format`] renders the human-readable `12.345.678-9` form
//! - [`validate`] checks the modulo-11 check character of an already clean RUT
//! - [`clean_and_validate`] composes the two for raw user input
//!
//! None of these functions fail. Input that cannot be validated is reported as
//! invalid, input that cannot be formatted yields the caller's fallback.
//!
//! The field hooks ([`check_field`], [`on_blur`], [`on_focus`]) adapt the codec
//! to a text input: validity on every edit, formatted display when the field
//! loses focus and the clean form while editing.

/// Input to the codec: either absent or a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RutInput<'a> {
    Missing,
    Text(&'a str),
}

impl<'a> From<&'a str> for RutInput<'a> {
    fn from(value: &'a str) -> Self {
        RutInput::Text(value)
    }
}

impl<'a> From<&'a String> for RutInput<'a> {
    fn from(value: &'a String) -> Self {
        RutInput::Text(value.as_str())
    }
}

impl<'a> From<Option<&'a str>> for RutInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(RutInput::Missing, RutInput::Text)
    }
}

impl<'a> From<Option<&'a String>> for RutInput<'a> {
    fn from(value: Option<&'a String>) -> Self {
        value.map_or(RutInput::Missing, |s| RutInput::Text(s.as_str()))
    }
}

/// Keep only ASCII digits and `K`/`k`, uppercased.
pub fn clean<'a>(input: impl Into<RutInput<'a>>) -> String {
    match input.into() {
        RutInput::Missing => String::new(),
        RutInput::Text(text) => text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
            .map(|c| c.to_ascii_uppercase())
            .collect(),
    }
}

/// Render a RUT as `12.345.678-9`.
///
/// The input is cleaned first. An empty result yields `fallback`, a single
/// character is returned as-is since there is nothing to group.
pub fn format<'a>(input: impl Into<RutInput<'a>>, fallback: &str) -> String {
    let cleaned = clean(input);

    if cleaned.is_empty() {
        return fallback.to_string();
    }
    if cleaned.len() <= 1 {
        return cleaned;
    }

    // Cleaned text is pure ASCII, byte slicing is safe
    let (body, check) = cleaned.split_at(cleaned.len() - 1);
    let mut grouped = String::with_capacity(cleaned.len() + cleaned.len() / 3 + 1);
    let lead = body.len() % 3;

    for (i, c) in body.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped.push('-');
    grouped.push_str(check);
    grouped
}

/// Expected check character for a digit body, or `None` when the body
/// contains anything other than ASCII digits.
///
/// An empty body sums to zero and expects `'0'`. A `K` anywhere but the last
/// position is rejected rather than truncating the body at it.
pub fn check_digit(body: &str) -> Option<char> {
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let sum: u32 = body
        .bytes()
        .rev()
        .zip([2u32, 3, 4, 5, 6, 7].iter().cycle())
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .fold(0, |acc, term| (acc + term) % 11);

    match 11 - sum {
        11 => Some('0'),
        10 => Some('K'),
        n => char::from_digit(n, 10),
    }
}

/// Verify the modulo-11 check character of an already clean RUT.
///
/// No cleaning happens here: separators or a lowercase `k` make the value
/// invalid. Use [`clean_and_validate`] for raw input.
pub fn validate<'a>(input: impl Into<RutInput<'a>>) -> bool {
    let RutInput::Text(value) = input.into() else {
        return false;
    };

    let mut chars = value.chars();
    let Some(last) = chars.next_back() else {
        return false;
    };

    check_digit(chars.as_str()) == Some(last)
}

/// Clean raw input then validate it.
pub fn clean_and_validate<'a>(input: impl Into<RutInput<'a>>) -> bool {
    validate(clean(input).as_str())
}

/// Outcome of running a RUT input field through [`check_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RutFieldCheck {
    /// Whether the field should be reported as valid
    pub valid: bool,
    /// The value to store for the field
    pub value: String,
}

/// Validity hook for a RUT text field.
///
/// An empty field is valid and stored untouched; optionality is left to the
/// form's required-field rules. Anything else is stored in clean form.
pub fn check_field(raw: &str) -> RutFieldCheck {
    if raw.is_empty() {
        return RutFieldCheck {
            valid: true,
            value: String::new(),
        };
    }

    let value = clean(raw);
    RutFieldCheck {
        valid: validate(value.as_str()),
        value,
    }
}

/// Display text for a RUT field that lost focus.
pub fn on_blur(text: &str) -> String {
    format(text, "")
}

/// Editing text for a RUT field that gained focus.
pub fn on_focus(text: &str) -> String {
    clean(text)
}
