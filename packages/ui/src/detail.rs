use chrono::Local;
use dioxus::prelude::*;
use survey::{format_submitted_at, SurveyRecord};

use crate::modal_overlay::ModalOverlay;

/// Everything stored for one submission.
#[component]
pub fn SurveyDetail(record: SurveyRecord, on_close: EventHandler<()>) -> Element {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let name = text(&record.full_name);
    let email = text(&record.email);
    let phone = text(&record.phone);
    // City and factor codes are shown as stored.
    let city = text(&record.city);
    let submitted = record
        .submitted_at
        .map(|at| format_submitted_at(&at.with_timezone(&Local)))
        .unwrap_or_else(|| "-".to_string());

    let age = record.age_label().to_string();
    let region = record.region_label().to_string();
    let experience = match &record.experience_other {
        Some(other) if !other.is_empty() => format!("{} ({})", record.experience_label(), other),
        _ => record.experience_label().to_string(),
    };
    let knowledge = match &record.knowledge_other {
        Some(other) if !other.is_empty() => format!("{} ({})", record.knowledge_label(), other),
        _ => record.knowledge_label().to_string(),
    };

    let factors = record.factors.clone();
    let factors_other = record.factors_other.clone().filter(|other| !other.is_empty());
    let powers: Vec<String> = record
        .powers
        .iter()
        .map(|power| match record.power_counts.get(power) {
            Some(count) if !count.is_empty() => format!("{power} حصان × {count}"),
            _ => format!("{power} حصان"),
        })
        .collect();
    let power_other = record.power_other.clone().filter(|other| !other.is_empty());

    rsx! {
        ModalOverlay {
            wide: true,
            on_close: move |_| on_close.call(()),
            div {
                class: "detail",
                dir: "rtl",
                div {
                    class: "detail-header",
                    h2 { "تفاصيل الاستبيان" }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "إغلاق"
                    }
                }

                section {
                    h3 { "المعلومات الشخصية" }
                    DetailRow { label: "الاسم", value: name }
                    DetailRow { label: "البريد الإلكتروني", value: email }
                    DetailRow { label: "الجوال", value: phone }
                    DetailRow { label: "المدينة", value: city }
                    DetailRow { label: "تاريخ الإرسال", value: submitted }
                }

                section {
                    h3 { "البيانات الديموغرافية" }
                    DetailRow { label: "الفئة العمرية", value: age }
                    DetailRow { label: "المنطقة", value: region }
                    DetailRow { label: "العلاقة بالبحر", value: experience }
                    DetailRow { label: "المعرفة بالمنتج", value: knowledge }
                }

                section {
                    h3 { "عوامل الشراء" }
                    if factors.is_empty() {
                        p { class: "empty", "-" }
                    }
                    ul {
                        for factor in factors {
                            li { "{factor}" }
                        }
                    }
                    if let Some(other) = factors_other {
                        p { "أخرى: {other}" }
                    }
                }

                section {
                    h3 { "قوة المحركات" }
                    if powers.is_empty() {
                        p { class: "empty", "-" }
                    }
                    ul {
                        for power in powers {
                            li { "{power}" }
                        }
                    }
                    if let Some(other) = power_other {
                        p { "أخرى: {other}" }
                    }
                }
            }
        }
    }
}

#[component]
fn DetailRow(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            class: "detail-row",
            span { class: "detail-label", {label} }
            span { class: "detail-value", "{value}" }
        }
    }
}
