//! The seven-step questionnaire.
//!
//! All state lives in one `Signal<Wizard>`; every input goes through
//! [`dispatch`], and refused answers or failed step checks surface as a
//! blocking [`NoticeDialog`].

use dioxus::prelude::*;
use survey::{
    AgeBracket, Answer, Choice, City, EnginePower, MarineExperience, Notice, ProductKnowledge,
    PurchaseFactor, Region, Step, SurveyDraft, Wizard, MAX_PURCHASE_FACTORS,
};

use crate::client::SurveyEndpoint;
use crate::modal_overlay::NoticeDialog;

type WizardSignal = Signal<Wizard>;
type NoticeSignal = Signal<Option<Notice>>;

/// Record one answer, turning a refused answer into a notice.
fn dispatch(mut wizard: WizardSignal, mut notice: NoticeSignal, answer: Answer) {
    let result = wizard.write().answer(answer);
    if let Err(refused) = result {
        notice.set(Some(refused));
    }
}

#[component]
pub fn SurveyWizard() -> Element {
    let mut wizard = use_signal(Wizard::new);
    let mut notice = use_signal(|| None::<Notice>);
    let mut sending = use_signal(|| false);

    let on_next = move |_| {
        let result = wizard.write().advance();
        if let Err(blocked) = result {
            notice.set(Some(blocked));
        }
    };

    let on_back = move |_| wizard.write().retreat();

    let on_submit = move |_| {
        if sending() {
            return;
        }
        spawn(async move {
            sending.set(true);
            let mut current = wizard();
            match current.finalize(&SurveyEndpoint).await {
                Ok(_) => wizard.set(current),
                Err(failed) => notice.set(Some(failed)),
            }
            sending.set(false);
        });
    };

    let snapshot = wizard();
    let Some(step) = snapshot.step() else {
        return rsx! { ThankYou {} };
    };
    let draft = snapshot.draft();
    let number = step.number();
    let total = Step::TOTAL;
    let percent = step.progress_percent();

    rsx! {
        div {
            class: "survey",
            dir: "rtl",
            header {
                class: "survey-header",
                h1 { "استبيان محركات توهاتسو البحرية" }
                p { class: "survey-subtitle", "رأيك يساعدنا على خدمتك بشكل أفضل" }
            }

            div {
                class: "progress",
                div { class: "progress-bar", style: "width: {percent}%" }
            }
            p { class: "progress-label", "الخطوة {number} من {total}" }

            section {
                class: "question",
                {step_body(step, draft, wizard, notice)}
            }

            div {
                class: "wizard-nav",
                if step.previous().is_some() {
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        disabled: sending(),
                        onclick: on_back,
                        "السابق"
                    }
                }
                if step.is_last() {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: sending(),
                        onclick: on_submit,
                        if sending() { "جارٍ الإرسال..." } else { "إرسال الاستبيان" }
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: on_next,
                        "التالي"
                    }
                }
            }

            if let Some(current) = notice() {
                NoticeDialog {
                    notice: current,
                    on_close: move |_| notice.set(None),
                }
            }
        }
    }
}

fn step_body(step: Step, draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    match step.number() {
        1 => age_step(draft, wizard, notice),
        2 => region_step(draft, wizard, notice),
        3 => experience_step(draft, wizard, notice),
        4 => knowledge_step(draft, wizard, notice),
        5 => power_step(draft, wizard, notice),
        6 => factor_step(draft, wizard, notice),
        _ => contact_step(draft, wizard, notice),
    }
}

#[component]
fn ChoiceCard(
    label: &'static str,
    #[props(default)] hint: Option<&'static str>,
    selected: bool,
    onselect: EventHandler<()>,
) -> Element {
    let class = if selected { "choice choice-selected" } else { "choice" };
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| onselect.call(()),
            span { class: "choice-label", {label} }
            if let Some(hint) = hint {
                span { class: "choice-hint", {hint} }
            }
        }
    }
}

#[component]
fn TextField(
    label: &'static str,
    value: String,
    #[props(default = "text")] kind: &'static str,
    #[props(default)] placeholder: &'static str,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        label {
            class: "field",
            span { class: "field-label", {label} }
            input {
                class: "field-input",
                r#type: kind,
                placeholder: placeholder,
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
        }
    }
}

fn age_step(draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    let current = draft.age;
    rsx! {
        h2 { class: "question-title", "ما هي فئتك العمرية؟" }
        div {
            class: "choices",
            for age in AgeBracket::ALL.iter().copied() {
                ChoiceCard {
                    label: age.label(),
                    selected: current == Some(age),
                    onselect: move |_| dispatch(wizard, notice, Answer::Age(age)),
                }
            }
        }
    }
}

fn region_step(draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    let current = draft.region;
    rsx! {
        h2 { class: "question-title", "في أي منطقة تمارس نشاطك البحري؟" }
        div {
            class: "choices",
            for region in Region::ALL.iter().copied() {
                ChoiceCard {
                    label: region.label(),
                    hint: region.areas(),
                    selected: current == Some(region),
                    onselect: move |_| dispatch(wizard, notice, Answer::Region(region)),
                }
            }
        }
    }
}

fn experience_step(draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    let current = draft.experience;
    let other = draft.experience_other.clone();
    rsx! {
        h2 { class: "question-title", "ما هي علاقتك بالبحر؟" }
        div {
            class: "choices",
            for experience in MarineExperience::ALL.iter().copied() {
                ChoiceCard {
                    label: experience.label(),
                    hint: experience.description(),
                    selected: current == Some(experience),
                    onselect: move |_| dispatch(wizard, notice, Answer::Experience(experience)),
                }
            }
        }
        if current == Some(MarineExperience::Other) {
            TextField {
                label: "يرجى التوضيح",
                value: other,
                oninput: move |text| dispatch(wizard, notice, Answer::ExperienceOther(text)),
            }
        }
    }
}

fn knowledge_step(draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    let current = draft.knowledge;
    let other = draft.knowledge_other.clone();
    rsx! {
        h2 { class: "question-title", "ما مدى معرفتك بمحركات توهاتسو؟" }
        div {
            class: "choices",
            for knowledge in ProductKnowledge::ALL.iter().copied() {
                ChoiceCard {
                    label: knowledge.label(),
                    selected: current == Some(knowledge),
                    onselect: move |_| dispatch(wizard, notice, Answer::Knowledge(knowledge)),
                }
            }
        }
        if current == Some(ProductKnowledge::Other) {
            TextField {
                label: "يرجى التوضيح",
                value: other,
                oninput: move |text| dispatch(wizard, notice, Answer::KnowledgeOther(text)),
            }
        }
    }
}

fn power_step(draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    let powers: Vec<(EnginePower, bool, String)> = EnginePower::ALL
        .iter()
        .map(|power| {
            let count = draft.power_counts.get(power).cloned().unwrap_or_default();
            (*power, draft.powers.contains(power), count)
        })
        .collect();
    let other_selected = draft.powers.contains(&EnginePower::Other);
    let other = draft.power_other.clone();

    rsx! {
        h2 { class: "question-title", "ما هي قوة المحركات التي تستخدمها أو تنوي شراءها؟" }
        p { class: "question-hint", "يمكنك اختيار أكثر من قوة وتحديد العدد لكل منها" }
        div {
            class: "choices choices-grid",
            for (power, selected, count) in powers {
                div {
                    class: "power",
                    ChoiceCard {
                        label: power.label(),
                        selected: selected,
                        onselect: move |_| {
                            dispatch(wizard, notice, Answer::Power { power, selected: !selected })
                        },
                    }
                    if selected && power != EnginePower::Other {
                        TextField {
                            label: "العدد",
                            kind: "number",
                            value: count,
                            oninput: move |count| dispatch(wizard, notice, Answer::PowerCount { power, count }),
                        }
                    }
                }
            }
        }
        if other_selected {
            TextField {
                label: "قوة أخرى",
                value: other,
                oninput: move |text| dispatch(wizard, notice, Answer::PowerOther(text)),
            }
        }
    }
}

fn factor_step(draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    let factors: Vec<(PurchaseFactor, bool)> = PurchaseFactor::ALL
        .iter()
        .map(|factor| (*factor, draft.factors.contains(factor)))
        .collect();
    let other_selected = draft.factors.contains(&PurchaseFactor::Other);
    let other = draft.factors_other.clone();
    let picked = draft.factors.len();

    rsx! {
        h2 { class: "question-title", "ما هي أهم العوامل التي تؤثر على قرارك عند شراء محرك بحري؟" }
        p { class: "question-hint", "اختر خيارين كحد أقصى ({picked} من {MAX_PURCHASE_FACTORS})" }
        div {
            class: "choices choices-grid",
            for (factor, selected) in factors {
                ChoiceCard {
                    label: factor.label(),
                    selected: selected,
                    onselect: move |_| {
                        dispatch(wizard, notice, Answer::Factor { factor, selected: !selected })
                    },
                }
            }
        }
        if other_selected {
            label {
                class: "field",
                span { class: "field-label", "عوامل أخرى" }
                textarea {
                    class: "field-input",
                    rows: "3",
                    value: "{other}",
                    oninput: move |evt: FormEvent| {
                        dispatch(wizard, notice, Answer::FactorsOther(evt.value()))
                    },
                }
            }
        }
    }
}

fn contact_step(draft: &SurveyDraft, wizard: WizardSignal, notice: NoticeSignal) -> Element {
    let full_name = draft.full_name.clone();
    let email = draft.email.clone();
    let phone = draft.phone.clone();
    let city = draft.city.map(City::code).unwrap_or_default();

    rsx! {
        h2 { class: "question-title", "معلومات التواصل" }
        TextField {
            label: "الاسم الكامل",
            value: full_name,
            oninput: move |text| dispatch(wizard, notice, Answer::FullName(text)),
        }
        TextField {
            label: "البريد الإلكتروني",
            kind: "email",
            placeholder: "example@email.com",
            value: email,
            oninput: move |text| dispatch(wizard, notice, Answer::Email(text)),
        }
        label {
            class: "field",
            span { class: "field-label", "المدينة" }
            select {
                class: "field-input",
                value: "{city}",
                onchange: move |evt: FormEvent| {
                    dispatch(wizard, notice, Answer::City(City::from_code(&evt.value())))
                },
                option { value: "", "اختر المدينة" }
                for choice in City::ALL.iter().copied() {
                    option {
                        value: choice.code(),
                        selected: choice.code() == city,
                        {choice.label()}
                    }
                }
            }
        }
        TextField {
            label: "رقم الجوال",
            kind: "tel",
            placeholder: "05xxxxxxxx",
            value: phone,
            oninput: move |text| dispatch(wizard, notice, Answer::Phone(text)),
        }
    }
}

#[component]
fn ThankYou() -> Element {
    rsx! {
        div {
            class: "survey survey-done",
            dir: "rtl",
            div { class: "done-icon", "✓" }
            h1 { "شكراً لك!" }
            p { "تم إرسال الاستبيان بنجاح. نقدر وقتك ومشاركتك معنا." }
        }
    }
}
