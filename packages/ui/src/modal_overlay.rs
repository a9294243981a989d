use dioxus::prelude::*;
use survey::Notice;

/// A full-screen overlay that centers its children in a card.
/// Clicking the backdrop triggers `on_close`.
#[component]
pub fn ModalOverlay(
    on_close: EventHandler<()>,
    /// Widen the card for detail views.
    #[props(default)]
    wide: bool,
    children: Element,
) -> Element {
    let card = if wide { "modal-card modal-card-wide" } else { "modal-card" };
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "{card}",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Blocking notice: nothing else is clickable until it is acknowledged.
#[component]
pub fn NoticeDialog(notice: Notice, on_close: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "notice",
                p { class: "notice-text", "{notice}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "حسناً"
                }
            }
        }
    }
}
