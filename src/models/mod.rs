pub mod submission;
pub mod user_profile;

pub use submission::{FieldErrors, FormValues, Submission, SubmissionForm, SubmissionStatus};
pub use user_profile::UserProfile;
