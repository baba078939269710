pub mod admin;
pub mod progress;
pub mod ranking;
pub mod students;
