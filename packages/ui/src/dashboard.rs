//! Admin pages: the `/admin` redirect, the submissions dashboard.

use api::AdminInfo;
use chrono::Local;
use dioxus::prelude::*;
use survey::{filter_records, format_submitted_at, SurveyRecord, SurveyStats};

use crate::client::{self, ClientError};
use crate::detail::SurveyDetail;

/// `/admin`: send the visitor to the dashboard or the login page.
#[component]
pub fn AdminIndex() -> Element {
    use_effect(move || {
        spawn(async move {
            match api::get_current_admin().await {
                Ok(Some(_)) => client::navigate("/admin/dashboard"),
                Ok(None) => client::navigate("/admin/login"),
                Err(e) => {
                    tracing::error!("Session check failed: {}", e);
                    client::navigate("/admin/login");
                }
            }
        });
    });

    rsx! {
        div { class: "loading", dir: "rtl", "جارٍ التحميل..." }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let mut admin = use_signal(|| Option::<AdminInfo>::None);
    let mut records = use_signal(Vec::<SurveyRecord>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut search = use_signal(String::new);
    let mut selected = use_signal(|| Option::<SurveyRecord>::None);

    use_effect(move || {
        spawn(async move {
            match api::get_current_admin().await {
                Ok(Some(user)) => admin.set(Some(user)),
                Ok(None) => {
                    client::navigate("/admin/login");
                    return;
                }
                Err(e) => tracing::error!("Session check failed: {}", e),
            }

            match client::fetch_surveys().await {
                Ok(list) => records.set(list),
                Err(ClientError::Unauthorized) => {
                    client::navigate("/admin/login");
                    return;
                }
                Err(e) => {
                    tracing::error!("Failed to load surveys: {}", e);
                    error.set(Some("تعذر تحميل الاستبيانات".to_string()));
                }
            }
            loading.set(false);
        });
    });

    let handle_logout = move |_| {
        spawn(async move {
            if let Err(e) = api::logout().await {
                tracing::error!("Logout failed: {}", e);
            }
            client::navigate("/admin/login");
        });
    };

    let all = records.read();
    let stats = SurveyStats::compute(&all, &Local::now());
    let term = search();
    let visible: Vec<SurveyRecord> = filter_records(&all, &term).into_iter().cloned().collect();
    let has_records = !all.is_empty();
    drop(all);

    let admin_name = admin().map(|user| user.email).unwrap_or_default();
    let total = stats.total;
    let today = stats.today;
    let this_week = stats.this_week;

    rsx! {
        div {
            class: "dashboard",
            dir: "rtl",
            header {
                class: "dashboard-header",
                div {
                    h1 { "لوحة تحكم الاستبيانات" }
                    if !admin_name.is_empty() {
                        p { class: "dashboard-user", "مرحباً، {admin_name}" }
                    }
                }
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    onclick: handle_logout,
                    "تسجيل الخروج"
                }
            }

            div {
                class: "stats",
                StatCard { label: "إجمالي الاستبيانات", value: total }
                StatCard { label: "استبيانات اليوم", value: today }
                StatCard { label: "هذا الأسبوع", value: this_week }
            }

            input {
                class: "field-input search",
                r#type: "search",
                placeholder: "ابحث بالاسم أو البريد الإلكتروني أو المدينة",
                value: "{term}",
                oninput: move |evt: FormEvent| search.set(evt.value()),
            }

            if loading() {
                div { class: "loading", "جارٍ التحميل..." }
            } else if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            } else if visible.is_empty() {
                p {
                    class: "empty",
                    if has_records { "لا توجد نتائج مطابقة" } else { "لا توجد استبيانات بعد" }
                }
            } else {
                table {
                    class: "surveys",
                    thead {
                        tr {
                            th { "الاسم" }
                            th { "البريد الإلكتروني" }
                            th { "الجوال" }
                            th { "المدينة" }
                            th { "الفئة العمرية" }
                            th { "المنطقة" }
                            th { "تاريخ الإرسال" }
                            th {}
                        }
                    }
                    tbody {
                        for record in visible {
                            SurveyRow {
                                key: "{record.object_id}",
                                record: record.clone(),
                                on_view: move |record| selected.set(Some(record)),
                            }
                        }
                    }
                }
            }

            if let Some(record) = selected() {
                SurveyDetail {
                    record: record,
                    on_close: move |_| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn StatCard(label: &'static str, value: usize) -> Element {
    rsx! {
        div {
            class: "stat",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", {label} }
        }
    }
}

#[component]
fn SurveyRow(record: SurveyRecord, on_view: EventHandler<SurveyRecord>) -> Element {
    let name = record.full_name.clone().unwrap_or_default();
    let email = record.email.clone().unwrap_or_default();
    let phone = record.phone.clone().unwrap_or_default();
    let city = record.city.clone().unwrap_or_default();
    let age = record.age_label().to_string();
    let region = record.region_label().to_string();
    let submitted = record
        .submitted_at
        .map(|at| format_submitted_at(&at.with_timezone(&Local)))
        .unwrap_or_default();

    rsx! {
        tr {
            td { "{name}" }
            td { "{email}" }
            td { class: "ltr", "{phone}" }
            td { "{city}" }
            td { "{age}" }
            td { "{region}" }
            td { "{submitted}" }
            td {
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_view.call(record.clone()),
                    "عرض التفاصيل"
                }
            }
        }
    }
}
