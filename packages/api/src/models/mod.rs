//! Data models shared by the server handlers and the UI.

mod admin;
mod responses;

pub use admin::{AdminInfo, Role};
pub use responses::{SubmitResponse, SurveyListResponse};
