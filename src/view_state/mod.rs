//! View state for the front end.
//!
//! Each view is a plain state holder over [`TherapyApi`](crate::api::TherapyApi):
//! it issues requests, keeps the results, and records the last error for
//! display. Rendering lives in [`cli_output`](crate::cli_output).
//!
//! - [`ChatView`]: session list, active session, transcript and sending
//! - [`DashboardView`]: counts and most recent activity
//! - [`RosterView`]: teams and problems

mod chat_view;
pub mod dashboard;
mod roster;

pub use chat_view::ChatView;
pub use dashboard::{DashboardSummary, DashboardView};
pub use roster::RosterView;
