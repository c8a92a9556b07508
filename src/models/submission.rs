use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmissionStatus {
    Confirmed,
    Waitlist,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Confirmed => "Confirmed",
            SubmissionStatus::Waitlist => "Waitlist",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Position in the list at insertion, starting at 1.
    pub id: u32,
    pub full_name: String,
    pub waiver_signed: bool,
    pub safety_commitment: bool,
    /// Display label only, e.g. "Oct 16, 7:05:03 PM".
    pub timestamp: String,
    pub status: SubmissionStatus,
}

/// Raw form body. Unchecked checkboxes are absent from the body.
#[derive(Debug, Deserialize, Default)]
pub struct SubmissionForm {
    #[serde(default)]
    pub full_name: String,
    pub waiver_signed: Option<String>,
    pub safety_commitment: Option<String>,
}

/// What the form shows: defaults, the last entered values, or a rejected attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    pub full_name: String,
    pub waiver_signed: bool,
    pub safety_commitment: bool,
}

impl FormValues {
    pub fn with_name(name: &str) -> Self {
        Self {
            full_name: name.to_string(),
            ..Self::default()
        }
    }
}

impl From<SubmissionForm> for FormValues {
    fn from(form: SubmissionForm) -> Self {
        Self {
            full_name: form.full_name,
            waiver_signed: form.waiver_signed.is_some_and(|v| v != "false"),
            safety_commitment: form.safety_commitment.is_some_and(|v| v != "false"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    pub full_name: Option<&'static str>,
    pub waiver_signed: Option<&'static str>,
    pub safety_commitment: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.waiver_signed.is_none() && self.safety_commitment.is_none()
    }
}
