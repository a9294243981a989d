use dioxus::prelude::*;

use crate::client;

const INVALID_CREDENTIALS: &str = "البريد الإلكتروني أو كلمة المرور غير صحيحة";
const LOGIN_FAILED: &str = "حدث خطأ أثناء تسجيل الدخول. يرجى المحاولة مرة أخرى.";

/// Admin sign-in form. A successful login reloads into the dashboard.
#[component]
pub fn AdminLogin() -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<&'static str>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |_| {
        if loading() {
            return;
        }
        spawn(async move {
            error.set(None);
            loading.set(true);

            match api::login(email(), password()).await {
                Ok(Some(admin)) => {
                    tracing::info!("Signed in as {}", admin.email);
                    client::navigate("/admin/dashboard");
                }
                Ok(None) => {
                    error.set(Some(INVALID_CREDENTIALS));
                    loading.set(false);
                }
                Err(e) => {
                    tracing::error!("Login request failed: {}", e);
                    error.set(Some(LOGIN_FAILED));
                    loading.set(false);
                }
            }
        });
    };

    rsx! {
        div {
            class: "login",
            dir: "rtl",
            div {
                class: "login-card",
                h1 { class: "login-title", "لوحة التحكم" }
                p { class: "login-subtitle", "تسجيل دخول المسؤول" }

                if let Some(message) = error() {
                    p { class: "form-error", {message} }
                }

                label {
                    class: "field",
                    span { class: "field-label", "البريد الإلكتروني" }
                    input {
                        class: "field-input",
                        r#type: "email",
                        required: true,
                        value: "{email}",
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                label {
                    class: "field",
                    span { class: "field-label", "كلمة المرور" }
                    input {
                        class: "field-input",
                        r#type: "password",
                        required: true,
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "button",
                    disabled: loading(),
                    onclick: handle_login,
                    if loading() { "جارٍ تسجيل الدخول..." } else { "تسجيل الدخول" }
                }
            }
        }
    }
}
