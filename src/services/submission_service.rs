use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::models::{FieldErrors, FormValues, Submission, SubmissionStatus};

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const WAIVER_REQUIRED: &str = "You must agree to the gym usage waiver";
pub const SAFETY_REQUIRED: &str = "You must commit to safe and respectful behavior";

/// Status for a new entry given how many entries precede it.
pub fn status_for(prior_count: usize, capacity: usize) -> SubmissionStatus {
    if prior_count < capacity {
        SubmissionStatus::Confirmed
    } else {
        SubmissionStatus::Waitlist
    }
}

pub fn validate(values: &FormValues) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if values.full_name.is_empty() {
        errors.full_name = Some(FULL_NAME_REQUIRED);
    }
    if !values.waiver_signed {
        errors.waiver_signed = Some(WAIVER_REQUIRED);
    }
    if !values.safety_commitment {
        errors.safety_commitment = Some(SAFETY_REQUIRED);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// "Oct 16, 7:05:03 PM"
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%b %-d, %-I:%M:%S %p").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardView {
    Form,
    Success,
}

/// One flow's submissions plus the state of its form.
#[derive(Debug, Clone)]
pub struct Board {
    submissions: Vec<Submission>,
    draft: FormValues,
    view: BoardView,
    editing: bool,
}

impl Board {
    pub fn new(default_name: &str) -> Self {
        Self {
            submissions: Vec::new(),
            draft: FormValues::with_name(default_name),
            view: BoardView::Form,
            editing: false,
        }
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn draft(&self) -> &FormValues {
        &self.draft
    }

    pub fn view(&self) -> BoardView {
        self.view
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Appends a new entry. A rejected attempt leaves the board untouched.
    pub fn submit(
        &mut self,
        values: FormValues,
        capacity: usize,
        timestamp: String,
    ) -> Result<Submission, FieldErrors> {
        validate(&values)?;

        let prior_count = self.submissions.len();
        let submission = Submission {
            id: prior_count as u32 + 1,
            full_name: values.full_name.clone(),
            waiver_signed: values.waiver_signed,
            safety_commitment: values.safety_commitment,
            timestamp,
            status: status_for(prior_count, capacity),
        };
        self.submissions.push(submission.clone());

        self.draft = values;
        self.view = BoardView::Success;
        self.editing = false;
        Ok(submission)
    }

    /// Re-opens the form with the last entered values. Only the success
    /// panel offers this, so any other state is left alone.
    pub fn edit(&mut self) -> bool {
        if self.view != BoardView::Success {
            return false;
        }
        self.view = BoardView::Form;
        self.editing = true;
        true
    }
}
