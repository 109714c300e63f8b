//! Field-level form validation and sanitization.
//!
//! Every helper records failures instead of returning early, so the caller
//! always ends up with a fully sanitized candidate to refill the form with,
//! alongside whatever errors accumulated.

use serde::Serialize;

use crate::types::DbId;

/// A single field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Escape markup-significant characters before storage.
pub fn escape_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Trim and escape a reference field without recording errors; existence is
/// the integrity layer's concern, not validation's.
pub fn sanitize_ref(raw: &str) -> String {
    escape_markup(raw.trim())
}

/// Parse a sanitized reference field into an id. Returns `None` for empty
/// or non-numeric input.
pub fn parse_ref(raw: &str) -> Option<DbId> {
    raw.trim().parse().ok()
}

/// Accumulates field failures while sanitizing one submitted form.
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// Trim and escape a required text field.
    pub fn require_text(&mut self, field: &'static str, raw: &str, message: &'static str) -> String {
        let value = escape_markup(raw.trim());
        if value.is_empty() {
            self.push(field, message);
        }
        value
    }

    /// Like [`FormErrors::require_text`] with bounds on the trimmed length,
    /// counted in characters.
    pub fn require_text_len(
        &mut self,
        field: &'static str,
        raw: &str,
        min: usize,
        max: usize,
        message: &'static str,
    ) -> String {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len < min || len > max {
            self.push(field, message);
        }
        escape_markup(trimmed)
    }

    /// Required decimal field. Returns the sanitized text (for re-rendering)
    /// and the parsed value when it parses.
    pub fn require_f64(
        &mut self,
        field: &'static str,
        raw: &str,
        message: &'static str,
    ) -> (String, Option<f64>) {
        let trimmed = raw.trim();
        let parsed = trimmed.parse::<f64>().ok().filter(|v| v.is_finite());
        if parsed.is_none() {
            self.push(field, message);
        }
        (escape_markup(trimmed), parsed)
    }

    /// Required whole-number field. Returns the sanitized text and the
    /// parsed value when it parses.
    pub fn require_i64(
        &mut self,
        field: &'static str,
        raw: &str,
        message: &'static str,
    ) -> (String, Option<i64>) {
        let trimmed = raw.trim();
        let parsed = trimmed.parse::<i64>().ok();
        if parsed.is_none() {
            self.push(field, message);
        }
        (escape_markup(trimmed), parsed)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}
