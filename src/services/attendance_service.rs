use serde::Deserialize;

use crate::models::{FieldErrors, FormValues, SubmissionStatus};
use crate::services::submission_service::{Board, BoardView};

pub const PAGE_TITLE: &str = "Basketball Attendance Form";

/// The two intakes share one board shape and differ only in wording and mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFlavor {
    Participant,
    Admin,
}

impl FormFlavor {
    pub fn base_path(&self) -> &'static str {
        match self {
            FormFlavor::Participant => "/",
            FormFlavor::Admin => "/admin",
        }
    }

    pub fn submit_path(&self) -> &'static str {
        match self {
            FormFlavor::Participant => "/submit",
            FormFlavor::Admin => "/admin/submit",
        }
    }

    pub fn edit_path(&self) -> &'static str {
        match self {
            FormFlavor::Participant => "/edit",
            FormFlavor::Admin => "/admin/edit",
        }
    }

    pub fn form_tab_label(&self) -> &'static str {
        match self {
            FormFlavor::Participant => "Attendance Form",
            FormFlavor::Admin => "Questions",
        }
    }

    pub fn results_tab_label(&self) -> &'static str {
        match self {
            FormFlavor::Participant => "Results Table",
            FormFlavor::Admin => "Responses",
        }
    }

    pub fn resubmit_label(&self) -> &'static str {
        match self {
            FormFlavor::Participant => "Update",
            FormFlavor::Admin => "Resubmit",
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AttendanceQuery {
    pub tab: Option<String>,
}

impl AttendanceQuery {
    pub fn shows_results(&self) -> bool {
        self.tab.as_deref() == Some("results")
    }
}

pub struct SubmissionRowView {
    pub id: u32,
    pub timestamp: String,
    pub full_name: String,
    pub status: &'static str,
    pub badge_class: &'static str,
}

pub struct AttendancePageView {
    pub title: &'static str,
    pub user_name: String,
    pub base_path: &'static str,
    pub submit_path: &'static str,
    pub edit_path: &'static str,
    pub form_tab_label: &'static str,
    pub results_tab_label: &'static str,
    pub results_active: bool,
    pub show_form: bool,
    pub submit_label: &'static str,
    pub values: FormValues,
    pub errors: FieldErrors,
    pub waiver_url: String,
    pub capacity: usize,
    pub submission_count: usize,
    pub confirmed_count: usize,
    pub rows: Vec<SubmissionRowView>,
}

/// A failed submit: what the user typed and what was wrong with it.
pub struct RejectedAttempt {
    pub values: FormValues,
    pub errors: FieldErrors,
}

pub struct PageSettings<'a> {
    pub user_name: &'a str,
    pub waiver_url: &'a str,
    pub capacity: usize,
}

pub fn badge_class(status: &str) -> &'static str {
    match status {
        "Confirmed" => "badge badge-confirmed",
        _ => "badge badge-waitlist",
    }
}

pub fn build_page(
    flavor: FormFlavor,
    board: &Board,
    settings: &PageSettings<'_>,
    results_active: bool,
    rejected: Option<RejectedAttempt>,
) -> AttendancePageView {
    let rows = board
        .submissions()
        .iter()
        .map(|s| {
            let status = s.status.as_str();
            SubmissionRowView {
                id: s.id,
                timestamp: s.timestamp.clone(),
                full_name: s.full_name.clone(),
                status,
                badge_class: badge_class(status),
            }
        })
        .collect::<Vec<_>>();

    let (show_form, values, errors) = match rejected {
        Some(attempt) => (true, attempt.values, attempt.errors),
        None => (
            board.view() == BoardView::Form,
            board.draft().clone(),
            FieldErrors::default(),
        ),
    };

    AttendancePageView {
        title: PAGE_TITLE,
        user_name: settings.user_name.to_string(),
        base_path: flavor.base_path(),
        submit_path: flavor.submit_path(),
        edit_path: flavor.edit_path(),
        form_tab_label: flavor.form_tab_label(),
        results_tab_label: flavor.results_tab_label(),
        results_active,
        show_form,
        submit_label: if board.is_editing() {
            flavor.resubmit_label()
        } else {
            "Submit"
        },
        values,
        errors,
        waiver_url: settings.waiver_url.to_string(),
        capacity: settings.capacity,
        submission_count: rows.len(),
        confirmed_count: confirmed_count(board),
        rows,
    }
}

pub fn confirmed_count(board: &Board) -> usize {
    board
        .submissions()
        .iter()
        .filter(|s| s.status == SubmissionStatus::Confirmed)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: PageSettings<'static> = PageSettings {
        user_name: "Riley Chen",
        waiver_url: "https://example.com/waiver",
        capacity: 20,
    };

    fn valid(name: &str) -> FormValues {
        FormValues {
            full_name: name.to_string(),
            waiver_signed: true,
            safety_commitment: true,
        }
    }

    #[test]
    fn fresh_board_shows_prefilled_form() {
        let board = Board::new("Riley Chen");
        let page = build_page(FormFlavor::Participant, &board, &SETTINGS, false, None);
        assert!(page.show_form);
        assert_eq!(page.values.full_name, "Riley Chen");
        assert!(!page.values.waiver_signed);
        assert_eq!(page.submit_label, "Submit");
        assert_eq!(page.submission_count, 0);
    }

    #[test]
    fn success_then_edit_relabels_submit() {
        let mut board = Board::new("Riley Chen");
        board.submit(valid("Riley Chen"), 20, "Oct 5, 7:00:00 PM".to_string()).unwrap();
        let page = build_page(FormFlavor::Participant, &board, &SETTINGS, false, None);
        assert!(!page.show_form);

        board.edit();
        let participant = build_page(FormFlavor::Participant, &board, &SETTINGS, false, None);
        assert!(participant.show_form);
        assert_eq!(participant.submit_label, "Update");
        assert!(participant.values.waiver_signed);
        let admin = build_page(FormFlavor::Admin, &board, &SETTINGS, false, None);
        assert_eq!(admin.submit_label, "Resubmit");
    }

    #[test]
    fn rejected_attempt_overrides_board_view() {
        let mut board = Board::new("Riley Chen");
        board.submit(valid("Riley Chen"), 20, String::new()).unwrap();
        let attempt = RejectedAttempt {
            values: FormValues::default(),
            errors: FieldErrors {
                full_name: Some("Full name is required"),
                ..FieldErrors::default()
            },
        };
        let page = build_page(FormFlavor::Admin, &board, &SETTINGS, false, Some(attempt));
        assert!(page.show_form);
        assert_eq!(page.values.full_name, "");
        assert_eq!(page.errors.full_name, Some("Full name is required"));
    }

    #[test]
    fn rows_keep_insertion_order_and_badges() {
        let mut board = Board::new("");
        board.submit(valid("First"), 1, "t1".to_string()).unwrap();
        board.submit(valid("Second"), 1, "t2".to_string()).unwrap();
        let page = build_page(FormFlavor::Participant, &board, &SETTINGS, true, None);
        assert_eq!(page.rows[0].full_name, "First");
        assert_eq!(page.rows[0].badge_class, "badge badge-confirmed");
        assert_eq!(page.rows[1].status, "Waitlist");
        assert_eq!(page.rows[1].badge_class, "badge badge-waitlist");
        assert_eq!(confirmed_count(&board), 1);
    }

    #[test]
    fn flavor_labels() {
        assert_eq!(FormFlavor::Admin.form_tab_label(), "Questions");
        assert_eq!(FormFlavor::Admin.results_tab_label(), "Responses");
        assert_eq!(FormFlavor::Participant.results_tab_label(), "Results Table");
        assert_eq!(badge_class("anything else"), "badge badge-waitlist");
    }
}
