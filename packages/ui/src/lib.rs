//! Shared UI for the survey site: the public questionnaire and the admin pages.

use dioxus::prelude::*;

pub mod client;

pub const SURVEY_CSS: Asset = asset!("/assets/survey.css");

mod modal_overlay;
pub use modal_overlay::{ModalOverlay, NoticeDialog};

mod wizard;
pub use wizard::SurveyWizard;

mod login;
pub use login::AdminLogin;

mod dashboard;
pub use dashboard::{AdminDashboard, AdminIndex};

mod detail;
pub use detail::SurveyDetail;
