//! # Draft and submission
//!
//! [`SurveyDraft`] is the mutable builder the wizard fills in step by step: one
//! optional field per question. Answers are merged with [`SurveyDraft::apply`],
//! which consumes the draft and hands back the updated one, so a rejected
//! answer never leaves a half-modified draft behind.
//!
//! Once the last step validates, the draft is frozen into a [`Submission`]. Its
//! `Serialize` impl produces the flat JSON document posted to
//! `/api/survey/submit` (`step1`..`step4`, `powers`, `power_<hp>_count`,
//! `factors`, `fullName`, ...).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::choices::{
    AgeBracket, City, EnginePower, MarineExperience, ProductKnowledge, PurchaseFactor, Region,
};
use crate::wizard::Notice;

/// Purchase factors are capped at two picks.
pub const MAX_PURCHASE_FACTORS: usize = 2;

/// A single answer coming from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Age(AgeBracket),
    Region(Region),
    Experience(MarineExperience),
    ExperienceOther(String),
    Knowledge(ProductKnowledge),
    KnowledgeOther(String),
    Power { power: EnginePower, selected: bool },
    PowerCount { power: EnginePower, count: String },
    PowerOther(String),
    Factor { factor: PurchaseFactor, selected: bool },
    FactorsOther(String),
    FullName(String),
    Email(String),
    City(Option<City>),
    Phone(String),
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyDraft {
    pub age: Option<AgeBracket>,
    pub region: Option<Region>,
    pub experience: Option<MarineExperience>,
    pub experience_other: String,
    pub knowledge: Option<ProductKnowledge>,
    pub knowledge_other: String,
    pub powers: Vec<EnginePower>,
    pub power_counts: BTreeMap<EnginePower, String>,
    pub power_other: String,
    pub factors: Vec<PurchaseFactor>,
    pub factors_other: String,
    pub full_name: String,
    pub email: String,
    pub city: Option<City>,
    pub phone: String,
}

impl SurveyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one answer into the draft.
    ///
    /// Picking a third purchase factor is refused here, at selection time,
    /// with [`Notice::FactorLimit`]; the returned error carries no draft so
    /// callers keep the previous one.
    pub fn apply(mut self, answer: Answer) -> Result<Self, Notice> {
        match answer {
            Answer::Age(age) => self.age = Some(age),
            Answer::Region(region) => self.region = Some(region),
            Answer::Experience(experience) => self.experience = Some(experience),
            Answer::ExperienceOther(text) => self.experience_other = text,
            Answer::Knowledge(knowledge) => self.knowledge = Some(knowledge),
            Answer::KnowledgeOther(text) => self.knowledge_other = text,
            Answer::Power { power, selected } => {
                if selected {
                    if !self.powers.contains(&power) {
                        self.powers.push(power);
                    }
                } else {
                    self.powers.retain(|p| *p != power);
                }
            }
            Answer::PowerCount { power, count } => {
                if count.is_empty() {
                    self.power_counts.remove(&power);
                } else {
                    self.power_counts.insert(power, count);
                }
            }
            Answer::PowerOther(text) => self.power_other = text,
            Answer::Factor { factor, selected } => {
                if selected {
                    if !self.factors.contains(&factor) {
                        if self.factors.len() >= MAX_PURCHASE_FACTORS {
                            return Err(Notice::FactorLimit);
                        }
                        self.factors.push(factor);
                    }
                } else {
                    self.factors.retain(|f| *f != factor);
                }
            }
            Answer::FactorsOther(text) => self.factors_other = text,
            Answer::FullName(text) => self.full_name = text,
            Answer::Email(text) => self.email = text,
            Answer::City(city) => self.city = city,
            Answer::Phone(text) => self.phone = text,
        }
        Ok(self)
    }
}

/// Validated personal-contact fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub city: City,
    pub phone: String,
}

/// The frozen survey, ready to be posted.
///
/// Built only through [`Wizard::finalize`](crate::Wizard::finalize) /
/// [`Submission::from_draft`] after the contact step validates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "step1", skip_serializing_if = "Option::is_none")]
    age: Option<AgeBracket>,
    #[serde(rename = "step2", skip_serializing_if = "Option::is_none")]
    region: Option<Region>,
    #[serde(rename = "step3", skip_serializing_if = "Option::is_none")]
    experience: Option<MarineExperience>,
    #[serde(skip_serializing_if = "String::is_empty")]
    experience_other: String,
    #[serde(rename = "step4", skip_serializing_if = "Option::is_none")]
    knowledge: Option<ProductKnowledge>,
    #[serde(skip_serializing_if = "String::is_empty")]
    knowledge_other: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    powers: Vec<EnginePower>,
    #[serde(flatten)]
    power_counts: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    power_other: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    factors: Vec<PurchaseFactor>,
    #[serde(skip_serializing_if = "String::is_empty")]
    factors_other: String,
    #[serde(flatten)]
    contact: ContactDetails,
}

impl Submission {
    pub(crate) fn from_draft(draft: &SurveyDraft, contact: ContactDetails) -> Self {
        Self {
            age: draft.age,
            region: draft.region,
            experience: draft.experience,
            experience_other: draft.experience_other.clone(),
            knowledge: draft.knowledge,
            knowledge_other: draft.knowledge_other.clone(),
            powers: draft.powers.clone(),
            power_counts: draft
                .power_counts
                .iter()
                .map(|(power, count)| (power.count_key(), count.clone()))
                .collect(),
            power_other: draft.power_other.clone(),
            factors: draft.factors.clone(),
            factors_other: draft.factors_other.clone(),
            contact,
        }
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn factors(&self) -> &[PurchaseFactor] {
        &self.factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact() -> ContactDetails {
        ContactDetails {
            full_name: "سالم".to_string(),
            email: "salem@example.com".to_string(),
            city: City::Jeddah,
            phone: "0512345678".to_string(),
        }
    }

    #[test]
    fn test_third_factor_is_refused() {
        let draft = SurveyDraft::new()
            .apply(Answer::Factor { factor: PurchaseFactor::Price, selected: true })
            .unwrap()
            .apply(Answer::Factor { factor: PurchaseFactor::Weight, selected: true })
            .unwrap();

        let err = draft
            .clone()
            .apply(Answer::Factor { factor: PurchaseFactor::Design, selected: true })
            .unwrap_err();
        assert_eq!(err, Notice::FactorLimit);
        assert_eq!(draft.factors, vec![PurchaseFactor::Price, PurchaseFactor::Weight]);
    }

    #[test]
    fn test_factor_can_be_swapped_after_unselecting() {
        let draft = SurveyDraft::new()
            .apply(Answer::Factor { factor: PurchaseFactor::Price, selected: true })
            .unwrap()
            .apply(Answer::Factor { factor: PurchaseFactor::Weight, selected: true })
            .unwrap()
            .apply(Answer::Factor { factor: PurchaseFactor::Price, selected: false })
            .unwrap()
            .apply(Answer::Factor { factor: PurchaseFactor::Other, selected: true })
            .unwrap();
        assert_eq!(draft.factors, vec![PurchaseFactor::Weight, PurchaseFactor::Other]);
    }

    #[test]
    fn test_reselecting_a_factor_at_the_cap_is_a_no_op() {
        let draft = SurveyDraft::new()
            .apply(Answer::Factor { factor: PurchaseFactor::Price, selected: true })
            .unwrap()
            .apply(Answer::Factor { factor: PurchaseFactor::Weight, selected: true })
            .unwrap()
            .apply(Answer::Factor { factor: PurchaseFactor::Price, selected: true })
            .unwrap();
        assert_eq!(draft.factors.len(), 2);
    }

    #[test]
    fn test_power_toggle_and_counts() {
        let draft = SurveyDraft::new()
            .apply(Answer::Power { power: EnginePower::Hp40, selected: true })
            .unwrap()
            .apply(Answer::Power { power: EnginePower::Hp40, selected: true })
            .unwrap()
            .apply(Answer::PowerCount { power: EnginePower::Hp40, count: "3".into() })
            .unwrap();
        assert_eq!(draft.powers, vec![EnginePower::Hp40]);
        assert_eq!(draft.power_counts.get(&EnginePower::Hp40).map(String::as_str), Some("3"));

        let draft = draft
            .apply(Answer::PowerCount { power: EnginePower::Hp40, count: String::new() })
            .unwrap()
            .apply(Answer::Power { power: EnginePower::Hp40, selected: false })
            .unwrap();
        assert!(draft.powers.is_empty());
        assert!(draft.power_counts.is_empty());
    }

    #[test]
    fn test_submission_document_shape() {
        let draft = SurveyDraft::new()
            .apply(Answer::Age(AgeBracket::Thirties))
            .unwrap()
            .apply(Answer::Region(Region::Western))
            .unwrap()
            .apply(Answer::Experience(MarineExperience::Other))
            .unwrap()
            .apply(Answer::ExperienceOther("غواص".into()))
            .unwrap()
            .apply(Answer::Knowledge(ProductKnowledge::Good))
            .unwrap()
            .apply(Answer::Power { power: EnginePower::Hp2_5, selected: true })
            .unwrap()
            .apply(Answer::PowerCount { power: EnginePower::Hp2_5, count: "2".into() })
            .unwrap()
            .apply(Answer::Factor { factor: PurchaseFactor::SpareParts, selected: true })
            .unwrap();

        let submission = Submission::from_draft(&draft, contact());
        let document = serde_json::to_value(&submission).unwrap();

        assert_eq!(
            document,
            json!({
                "step1": "30-39",
                "step2": "western",
                "step3": "other",
                "experienceOther": "غواص",
                "step4": "good",
                "powers": ["2.5"],
                "power_2.5_count": "2",
                "factors": ["spare-parts"],
                "fullName": "سالم",
                "email": "salem@example.com",
                "city": "jeddah",
                "phone": "0512345678",
            })
        );
    }
}
