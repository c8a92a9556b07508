pub mod attendance_service;
pub mod oauth_service;
pub mod session_store;
pub mod submission_service;
