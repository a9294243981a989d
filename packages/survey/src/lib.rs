//! # Survey crate: the marine engine questionnaire as plain data
//!
//! Everything here is platform independent: the same code runs in the browser
//! (WASM) inside the survey wizard and on the server.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`choices`] | Fixed answer enumerations, their wire codes and Arabic labels |
//! | [`draft`] | The in-progress [`SurveyDraft`] and the immutable [`Submission`] it becomes |
//! | [`wizard`] | The seven-step [`Wizard`] state machine and per-step validation |
//! | [`dashboard`] | Stored [`SurveyRecord`]s as seen by the admin dashboard: search, stats, dates |

pub mod choices;
pub mod dashboard;
pub mod draft;
pub mod wizard;

pub use choices::{
    label_for, AgeBracket, Choice, City, EnginePower, MarineExperience, ProductKnowledge,
    PurchaseFactor, Region,
};
pub use dashboard::{filter_records, format_submitted_at, SurveyRecord, SurveyStats};
pub use draft::{Answer, ContactDetails, Submission, SurveyDraft, MAX_PURCHASE_FACTORS};
pub use wizard::{Notice, Step, SubmissionSink, Wizard, WizardState};
