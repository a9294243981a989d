//! Stored surveys as the admin dashboard sees them.
//!
//! The listing endpoint returns raw documents. Nothing guarantees their shape
//! (the endpoint only checks that a document is non-empty), so
//! [`SurveyRecord::from_document`] reads every field leniently: wrong types
//! are treated as missing rather than failing the whole listing.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use serde_json::{Map, Value};

use crate::choices::{label_for, AgeBracket, MarineExperience, ProductKnowledge, Region};

/// A submission as listed for the admin.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub object_id: String,
    pub age: Option<String>,
    pub region: Option<String>,
    pub experience: Option<String>,
    pub experience_other: Option<String>,
    pub knowledge: Option<String>,
    pub knowledge_other: Option<String>,
    pub powers: Vec<String>,
    pub power_counts: BTreeMap<String, String>,
    pub power_other: Option<String>,
    pub factors: Vec<String>,
    pub factors_other: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

fn text(document: &Map<String, Value>, key: &str) -> Option<String> {
    document.get(key).and_then(Value::as_str).map(str::to_string)
}

fn list(document: &Map<String, Value>, key: &str) -> Vec<String> {
    document
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl SurveyRecord {
    pub fn from_document(document: &Map<String, Value>) -> Self {
        let power_counts = document
            .iter()
            .filter_map(|(key, value)| {
                let power = key.strip_prefix("power_")?.strip_suffix("_count")?;
                Some((power.to_string(), value.as_str()?.to_string()))
            })
            .collect();

        Self {
            object_id: text(document, "_id").unwrap_or_default(),
            age: text(document, "step1"),
            region: text(document, "step2"),
            experience: text(document, "step3"),
            experience_other: text(document, "experienceOther"),
            knowledge: text(document, "step4"),
            knowledge_other: text(document, "knowledgeOther"),
            powers: list(document, "powers"),
            power_counts,
            power_other: text(document, "powerOther"),
            factors: list(document, "factors"),
            factors_other: text(document, "factorsOther"),
            full_name: text(document, "fullName"),
            email: text(document, "email"),
            city: text(document, "city"),
            phone: text(document, "phone"),
            submitted_at: text(document, "submittedAt")
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|at| at.with_timezone(&Utc)),
        }
    }

    /// Records whose document is not a JSON object are kept as empty rows.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(document) => Self::from_document(document),
            None => Self::from_document(&Map::new()),
        }
    }

    /// Case-insensitive substring match on name, email and city.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.full_name, &self.email, &self.city]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn age_label(&self) -> &str {
        self.age.as_deref().map(label_for::<AgeBracket>).unwrap_or_default()
    }

    pub fn region_label(&self) -> &str {
        self.region.as_deref().map(label_for::<Region>).unwrap_or_default()
    }

    pub fn experience_label(&self) -> &str {
        self.experience
            .as_deref()
            .map(label_for::<MarineExperience>)
            .unwrap_or_default()
    }

    pub fn knowledge_label(&self) -> &str {
        self.knowledge
            .as_deref()
            .map(label_for::<ProductKnowledge>)
            .unwrap_or_default()
    }
}

/// Records matching the search box. An empty term keeps everything.
pub fn filter_records<'a>(records: &'a [SurveyRecord], term: &str) -> Vec<&'a SurveyRecord> {
    if term.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|record| record.matches(term)).collect()
}

/// Counters shown above the submissions table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurveyStats {
    pub total: usize,
    pub today: usize,
    pub this_week: usize,
}

impl SurveyStats {
    /// `today` is the calendar day of `now` in its own time zone; `this_week`
    /// is the last seven days.
    pub fn compute<Tz: TimeZone>(records: &[SurveyRecord], now: &DateTime<Tz>) -> Self {
        let week_ago = now.clone() - Duration::days(7);
        let today = now.date_naive();
        let mut stats = SurveyStats {
            total: records.len(),
            ..Default::default()
        };
        for at in records.iter().filter_map(|record| record.submitted_at) {
            let local = at.with_timezone(&now.timezone());
            if local.date_naive() == today {
                stats.today += 1;
            }
            if local >= week_ago {
                stats.this_week += 1;
            }
        }
        stats
    }
}

const ARABIC_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
    "نوفمبر", "ديسمبر",
];

fn arabic_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Render a submission time the way the dashboard shows it, e.g.
/// `١٨ أكتوبر ٢٠٢٦، ٠٩:٠٥ م`.
pub fn format_submitted_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let (is_pm, hour) = at.hour12();
    let formatted = format!(
        "{} {} {}، {:02}:{:02} {}",
        at.day(),
        ARABIC_MONTHS[at.month0() as usize],
        at.year(),
        hour,
        at.minute(),
        if is_pm { "م" } else { "ص" },
    );
    arabic_digits(&formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    fn record(value: Value) -> SurveyRecord {
        SurveyRecord::from_value(&value)
    }

    #[test]
    fn test_reads_listing_document() {
        let r = record(json!({
            "_id": "7f1c",
            "step1": "50-59",
            "step2": "southern",
            "step3": "beginner",
            "step4": "good",
            "powers": ["15", "other"],
            "power_15_count": "4",
            "powerOther": "300",
            "factors": ["price", "weight"],
            "fullName": "Khalid",
            "email": "khalid@example.com",
            "city": "abha",
            "phone": "0511111111",
            "submittedAt": "2026-10-18T09:30:00.000Z",
            "id": "1792316200000",
        }));

        assert_eq!(r.object_id, "7f1c");
        assert_eq!(r.powers, vec!["15", "other"]);
        assert_eq!(r.power_counts.get("15").map(String::as_str), Some("4"));
        assert_eq!(r.factors, vec!["price", "weight"]);
        assert_eq!(r.age_label(), "٥٠ إلى ٥٩ سنة");
        assert_eq!(r.region_label(), "المنطقة الجنوبية");
        assert_eq!(r.experience_label(), "مبتدئ");
        assert_eq!(r.knowledge_label(), "معرفة جيدة");
        assert_eq!(
            r.submitted_at,
            Some(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_malformed_fields_are_treated_as_missing() {
        let r = record(json!({
            "_id": "x",
            "step1": 42,
            "factors": "price",
            "powers": ["10", 7],
            "submittedAt": "yesterday",
        }));
        assert_eq!(r.age, None);
        assert!(r.factors.is_empty());
        assert_eq!(r.powers, vec!["10"]);
        assert_eq!(r.submitted_at, None);
        assert_eq!(record(json!("not an object")).object_id, "");
    }

    #[test]
    fn test_unknown_codes_render_verbatim() {
        let r = record(json!({"step1": "45", "step2": "central", "step3": "sailor", "step4": "expert"}));
        assert_eq!(r.age_label(), "45");
        assert_eq!(r.region_label(), "central");
        assert_eq!(r.experience_label(), "sailor");
        assert_eq!(r.knowledge_label(), "expert");
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_email_city() {
        let records = vec![
            record(json!({"_id": "1", "fullName": "Fahad Alqahtani", "email": "f@x.com", "city": "riyadh"})),
            record(json!({"_id": "2", "fullName": "Sara", "email": "SARA@Mail.com", "city": "jeddah"})),
            record(json!({"_id": "3", "fullName": "Omar", "phone": "0500000000"})),
        ];

        let ids = |term: &str| {
            filter_records(&records, term)
                .into_iter()
                .map(|r| r.object_id.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("ALQAHTANI"), vec!["1"]);
        assert_eq!(ids("mail.COM"), vec!["2"]);
        assert_eq!(ids("JEDD"), vec!["2"]);
        assert_eq!(ids("0500"), Vec::<&str>::new());
        assert_eq!(ids(""), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_stats_count_today_and_last_week() {
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let now = riyadh.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let records = vec![
            record(json!({"submittedAt": "2026-10-18T06:00:00Z"})),
            // 22:30 UTC on the 17th is already the 18th in Riyadh.
            record(json!({"submittedAt": "2026-10-17T22:30:00Z"})),
            record(json!({"submittedAt": "2026-10-13T10:00:00Z"})),
            record(json!({"submittedAt": "2026-09-01T10:00:00Z"})),
            record(json!({"fullName": "no date"})),
        ];

        let stats = SurveyStats::compute(&records, &now);
        assert_eq!(
            stats,
            SurveyStats {
                total: 5,
                today: 2,
                this_week: 3
            }
        );
    }

    #[test]
    fn test_format_submitted_at_uses_arabic_month_and_digits() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 21, 5, 0).unwrap();
        assert_eq!(format_submitted_at(&at), "١٨ أكتوبر ٢٠٢٦، ٠٩:٠٥ م");
        let morning = Utc.with_ymd_and_hms(2026, 1, 2, 0, 30, 0).unwrap();
        assert_eq!(format_submitted_at(&morning), "٢ يناير ٢٠٢٦، ١٢:٣٠ ص");
    }
}
