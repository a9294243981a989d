//! # Survey wizard state machine
//!
//! The wizard walks through seven steps and ends in a terminal `Submitted`
//! state:
//!
//! | Step | Question | Advance requires |
//! |------|----------|------------------|
//! | 1 | age | an age bracket |
//! | 2 | region | a region |
//! | 3 | marine experience | an experience category |
//! | 4 | product knowledge | a knowledge level |
//! | 5 | engine powers | nothing |
//! | 6 | purchase factors | nothing (the two-pick cap is enforced on selection) |
//! | 7 | contact details | all fields filled, email and phone well-formed |
//!
//! A failed check is not an error state: the wizard stays where it is and hands
//! back a [`Notice`] for the UI to show. Going back never validates.

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::draft::{Answer, ContactDetails, Submission, SurveyDraft};

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^05[0-9]{8}$").expect("valid phone regex"));

/// Blocking message shown to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Notice {
    #[error("يرجى اختيار إجابة للمتابعة")]
    SelectionRequired,
    #[error("يرجى ملء جميع الحقول المطلوبة")]
    MissingContactField,
    #[error("يرجى إدخال بريد إلكتروني صحيح")]
    InvalidEmail,
    #[error("يرجى إدخال رقم هاتف صحيح (05xxxxxxxx)")]
    InvalidPhone,
    #[error("يمكنك اختيار خيارين فقط")]
    FactorLimit,
    #[error("يرجى إكمال جميع الخطوات قبل الإرسال")]
    NotAtFinalStep,
    #[error("حدث خطأ أثناء إرسال الاستبيان. يرجى المحاولة مرة أخرى.")]
    SubmitFailed,
}

/// One of the seven wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(u8);

impl Step {
    pub const TOTAL: u8 = 7;
    pub const FIRST: Step = Step(1);
    pub const LAST: Step = Step(Self::TOTAL);

    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::TOTAL).contains(&number).then_some(Step(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::new(self.0.saturating_sub(1))
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Rounded completion percentage shown on the progress bar.
    pub fn progress_percent(self) -> u8 {
        ((f32::from(self.0) / f32::from(Self::TOTAL)) * 100.0).round() as u8
    }

    /// Check the predicate guarding the way out of this step.
    pub fn validate(self, draft: &SurveyDraft) -> Result<(), Notice> {
        let answered = match self.0 {
            1 => draft.age.is_some(),
            2 => draft.region.is_some(),
            3 => draft.experience.is_some(),
            4 => draft.knowledge.is_some(),
            7 => return validate_contact(draft).map(|_| ()),
            _ => true,
        };
        if answered {
            Ok(())
        } else {
            Err(Notice::SelectionRequired)
        }
    }
}

/// Validate the contact step and pull out the contact fields.
pub fn validate_contact(draft: &SurveyDraft) -> Result<ContactDetails, Notice> {
    let city = match draft.city {
        Some(city) => city,
        None => return Err(Notice::MissingContactField),
    };
    if [&draft.full_name, &draft.email, &draft.phone]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(Notice::MissingContactField);
    }
    if !EMAIL_REGEX.is_match(&draft.email) {
        return Err(Notice::InvalidEmail);
    }
    if !PHONE_REGEX.is_match(&draft.phone) {
        return Err(Notice::InvalidPhone);
    }
    Ok(ContactDetails {
        full_name: draft.full_name.clone(),
        email: draft.email.clone(),
        city,
        phone: draft.phone.clone(),
    })
}

/// Where a finished survey is delivered.
pub trait SubmissionSink {
    type Error: std::fmt::Display;

    /// Persist the submission and return the identifier assigned to it.
    fn submit(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<String, Self::Error>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Step(Step),
    Submitted,
}

/// The respondent's walk through the questionnaire.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    state: WizardState,
    draft: SurveyDraft,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            state: WizardState::Step(Step::FIRST),
            draft: SurveyDraft::default(),
        }
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Current step, or `None` once submitted.
    pub fn step(&self) -> Option<Step> {
        match self.state {
            WizardState::Step(step) => Some(step),
            WizardState::Submitted => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.state == WizardState::Submitted
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    /// Record an answer. A submitted survey is frozen and ignores answers.
    pub fn answer(&mut self, answer: Answer) -> Result<(), Notice> {
        if self.is_submitted() {
            return Ok(());
        }
        self.draft = self.draft.clone().apply(answer)?;
        Ok(())
    }

    /// Move forward if the current step validates. On the last step this only
    /// validates; use [`Wizard::finalize`] to send.
    pub fn advance(&mut self) -> Result<(), Notice> {
        let WizardState::Step(step) = self.state else {
            return Ok(());
        };
        step.validate(&self.draft)?;
        if let Some(next) = step.next() {
            self.state = WizardState::Step(next);
        }
        Ok(())
    }

    /// Move back one step without validating.
    pub fn retreat(&mut self) {
        if let WizardState::Step(step) = self.state {
            if let Some(previous) = step.previous() {
                self.state = WizardState::Step(previous);
            }
        }
    }

    /// Freeze the draft into a [`Submission`] if the wizard sits on a valid
    /// last step.
    pub fn prepare(&self) -> Result<Submission, Notice> {
        match self.state {
            WizardState::Step(step) if step.is_last() => {
                let contact = validate_contact(&self.draft)?;
                Ok(Submission::from_draft(&self.draft, contact))
            }
            _ => Err(Notice::NotAtFinalStep),
        }
    }

    /// Send the survey. Success moves to `Submitted` and returns the stored
    /// identifier; a delivery failure keeps the wizard on step 7.
    pub async fn finalize<S: SubmissionSink>(&mut self, sink: &S) -> Result<String, Notice> {
        let submission = self.prepare()?;
        match sink.submit(&submission).await {
            Ok(id) => {
                tracing::info!("survey submitted with id {}", id);
                self.state = WizardState::Submitted;
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Failed to submit survey: {}", e);
                Err(Notice::SubmitFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{
        AgeBracket, City, MarineExperience, ProductKnowledge, PurchaseFactor, Region,
    };
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        fail: bool,
        received: RefCell<Vec<serde_json::Value>>,
    }

    impl SubmissionSink for RecordingSink {
        type Error = String;

        async fn submit(&self, submission: &Submission) -> Result<String, String> {
            if self.fail {
                return Err("connection refused".to_string());
            }
            self.received
                .borrow_mut()
                .push(serde_json::to_value(submission).unwrap());
            Ok("abc123".to_string())
        }
    }

    fn at_contact_step() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.answer(Answer::Age(AgeBracket::Forties)).unwrap();
        wizard.advance().unwrap();
        wizard.answer(Answer::Region(Region::Eastern)).unwrap();
        wizard.advance().unwrap();
        wizard.answer(Answer::Experience(MarineExperience::Professional)).unwrap();
        wizard.advance().unwrap();
        wizard.answer(Answer::Knowledge(ProductKnowledge::Superficial)).unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), Step::new(7));
        wizard
    }

    fn fill_contact(wizard: &mut Wizard, phone: &str) {
        wizard.answer(Answer::FullName("نورة".into())).unwrap();
        wizard.answer(Answer::Email("noura@example.sa".into())).unwrap();
        wizard.answer(Answer::City(Some(City::Dammam))).unwrap();
        wizard.answer(Answer::Phone(phone.into())).unwrap();
    }

    #[test]
    fn test_starts_on_step_one() {
        let wizard = Wizard::new();
        assert_eq!(wizard.state(), WizardState::Step(Step::FIRST));
        assert_eq!(Step::FIRST.progress_percent(), 14);
        assert_eq!(Step::LAST.progress_percent(), 100);
    }

    #[test]
    fn test_advance_without_selection_stays_put() {
        let mut wizard = Wizard::new();
        for number in 1..=4 {
            let step = Step::new(number).unwrap();
            assert_eq!(wizard.step(), Some(step));
            assert_eq!(wizard.advance(), Err(Notice::SelectionRequired));
            assert_eq!(wizard.step(), Some(step));
            match number {
                1 => wizard.answer(Answer::Age(AgeBracket::NoAnswer)).unwrap(),
                2 => wizard.answer(Answer::Region(Region::Northern)).unwrap(),
                3 => wizard.answer(Answer::Experience(MarineExperience::Beginner)).unwrap(),
                _ => wizard.answer(Answer::Knowledge(ProductKnowledge::NoKnowledge)).unwrap(),
            }
            wizard.advance().unwrap();
        }
        assert_eq!(wizard.step(), Step::new(5));
    }

    #[test]
    fn test_optional_steps_advance_freely() {
        let mut wizard = at_contact_step();
        wizard.retreat();
        wizard.retreat();
        assert_eq!(wizard.step(), Step::new(5));
        assert!(wizard.draft().powers.is_empty());
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), Step::new(6));
    }

    #[test]
    fn test_retreat_never_validates_and_stops_at_one() {
        let mut wizard = at_contact_step();
        for _ in 0..10 {
            wizard.retreat();
        }
        assert_eq!(wizard.step(), Some(Step::FIRST));
        assert_eq!(wizard.draft().age, Some(AgeBracket::Forties));
    }

    #[test]
    fn test_third_factor_leaves_set_at_two() {
        let mut wizard = Wizard::new();
        wizard
            .answer(Answer::Factor { factor: PurchaseFactor::Price, selected: true })
            .unwrap();
        wizard
            .answer(Answer::Factor { factor: PurchaseFactor::Reliability, selected: true })
            .unwrap();
        let result =
            wizard.answer(Answer::Factor { factor: PurchaseFactor::Country, selected: true });
        assert_eq!(result, Err(Notice::FactorLimit));
        assert_eq!(
            wizard.draft().factors,
            vec![PurchaseFactor::Price, PurchaseFactor::Reliability]
        );
    }

    #[test]
    fn test_contact_validation_order() {
        let mut wizard = at_contact_step();
        assert_eq!(wizard.advance(), Err(Notice::MissingContactField));

        fill_contact(&mut wizard, "0512345678");
        wizard.answer(Answer::FullName("   ".into())).unwrap();
        assert_eq!(wizard.prepare().unwrap_err(), Notice::MissingContactField);

        wizard.answer(Answer::FullName("نورة".into())).unwrap();
        wizard.answer(Answer::Email("noura@example".into())).unwrap();
        assert_eq!(wizard.prepare().unwrap_err(), Notice::InvalidEmail);

        wizard.answer(Answer::Email("noura @example.sa".into())).unwrap();
        assert_eq!(wizard.prepare().unwrap_err(), Notice::InvalidEmail);

        wizard.answer(Answer::Email("noura@example.sa".into())).unwrap();
        assert!(wizard.prepare().is_ok());
    }

    #[test]
    fn test_malformed_phones_are_rejected() {
        let bad_phones = [
            "0612345678",
            "051234567",
            "05123456789",
            "5512345678",
            "+966512345678",
            "05-2345678",
            "05123456a8",
            " 0512345678",
            "05١٢٣٤٥٦٧٨",
            "05１２３４５６７８",
        ];
        for phone in bad_phones {
            let mut wizard = at_contact_step();
            fill_contact(&mut wizard, phone);
            assert_eq!(wizard.prepare().unwrap_err(), Notice::InvalidPhone, "{phone}");
        }
    }

    #[test]
    fn test_prepare_requires_last_step() {
        let wizard = Wizard::new();
        assert_eq!(wizard.prepare().unwrap_err(), Notice::NotAtFinalStep);
    }

    #[tokio::test]
    async fn test_finalize_delivers_and_terminates() {
        let mut wizard = at_contact_step();
        fill_contact(&mut wizard, "0598765432");
        let sink = RecordingSink::default();

        let id = wizard.finalize(&sink).await.unwrap();
        assert_eq!(id, "abc123");
        assert!(wizard.is_submitted());
        assert_eq!(wizard.step(), None);

        let received = sink.received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["step2"], "eastern");
        assert_eq!(received[0]["phone"], "0598765432");

        // Frozen after submission.
        wizard.retreat();
        assert!(wizard.is_submitted());
    }

    #[tokio::test]
    async fn test_finalize_with_bad_phone_sends_nothing() {
        let mut wizard = at_contact_step();
        fill_contact(&mut wizard, "0412345678");
        let sink = RecordingSink::default();

        assert_eq!(wizard.finalize(&sink).await, Err(Notice::InvalidPhone));
        assert!(sink.received.borrow().is_empty());
        assert_eq!(wizard.step(), Some(Step::LAST));
    }

    #[tokio::test]
    async fn test_failed_delivery_stays_on_last_step() {
        let mut wizard = at_contact_step();
        fill_contact(&mut wizard, "0512345678");
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        assert_eq!(wizard.finalize(&sink).await, Err(Notice::SubmitFailed));
        assert_eq!(wizard.step(), Some(Step::LAST));
        assert_eq!(wizard.draft().full_name, "نورة");
    }
}
