//! Fixed answer sets for the questionnaire.
//!
//! Every single- or multi-choice question stores a short ASCII code on the wire
//! (`"60+"`, `"western"`, `"spare-parts"`, ...) and shows an Arabic label in the
//! UI. The dashboard maps stored codes back through the same tables with
//! [`label_for`], passing unknown codes through untouched.

use serde::{Deserialize, Serialize};

/// A closed set of answers with a stable wire code and a display label.
pub trait Choice: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.code() == code)
    }
}

/// Map a stored code to its label, or return the code itself when it is not
/// part of the set.
pub fn label_for<C: Choice>(code: &str) -> &str {
    match C::from_code(code) {
        Some(choice) => choice.label(),
        None => code,
    }
}

macro_rules! choice_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $code:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant,)+];

            fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

choice_set! {
    /// Step 1: age bracket, with an explicit "prefer not to answer".
    pub enum AgeBracket {
        SixtyPlus => "60+", "٦٠ سنة وأكثر";
        Fifties => "50-59", "٥٠ إلى ٥٩ سنة";
        Forties => "40-49", "٤٠ إلى ٤٩ سنة";
        Thirties => "30-39", "٣٠ إلى ٣٩ سنة";
        Twenties => "20-29", "٢٠ إلى ٢٩ سنة";
        NineteenOrUnder => "19-", "١٩ وأقل";
        NoAnswer => "no-answer", "لا أرغب في الإجابة";
    }
}

choice_set! {
    /// Step 2: region where the respondent is active at sea.
    pub enum Region {
        Western => "western", "المنطقة الغربية";
        Eastern => "eastern", "المنطقة الشرقية";
        Southern => "southern", "المنطقة الجنوبية";
        Northern => "northern", "المنطقة الشمالية";
    }
}

impl Region {
    /// Coastal towns listed under each region on the form.
    pub fn areas(self) -> &'static str {
        match self {
            Region::Western => "جدة، ثول، رابغ، ينبع",
            Region::Eastern => "الخبر، الدمام، الأحساء، الجبيل، قطيف، سيهات",
            Region::Southern => "الشعيبة، القنفذة، جازان",
            Region::Northern => "أملج، الوجه، ضبا",
        }
    }
}

choice_set! {
    /// Step 3: relationship with the sea.
    pub enum MarineExperience {
        Hobbyist => "hobbyist", "هاوي";
        Professional => "professional", "محترف";
        Livelihood => "livelihood", "البحر مصدر رزقي";
        Beginner => "beginner", "مبتدئ";
        Other => "other", "غير ذلك";
    }
}

impl MarineExperience {
    pub fn description(self) -> Option<&'static str> {
        match self {
            MarineExperience::Hobbyist => Some("أمارس هواية لها علاقة بالبحر"),
            MarineExperience::Professional => Some("صاحب قارب/هوري/طراد/بوت/يخت أو غواص أو صياد"),
            MarineExperience::Livelihood => Some("صياد، رحلات سياحية"),
            MarineExperience::Beginner => Some("الرغبة موجودة بس ما بدأت"),
            MarineExperience::Other => None,
        }
    }
}

choice_set! {
    /// Step 4: how well the respondent knows the brand.
    pub enum ProductKnowledge {
        Good => "good", "معرفة جيدة";
        Superficial => "superficial", "معرفة سطحية";
        Unsure => "unsure", "لست متأكد من معلوماتي";
        NoKnowledge => "none", "ليس لدي أي معلومات";
        Other => "other", "غير ذلك";
    }
}

choice_set! {
    /// Step 5: outboard engine horsepower.
    pub enum EnginePower {
        Hp2_5 => "2.5", "2.5 حصان";
        Hp5 => "5", "5 حصان";
        Hp10 => "10", "10 حصان";
        Hp15 => "15", "15 حصان";
        Hp20 => "20", "20 حصان";
        Hp25 => "25", "25 حصان";
        Hp40 => "40", "40 حصان";
        Hp60 => "60", "60 حصان";
        Hp90 => "90", "90 حصان";
        Hp100 => "100", "100 حصان";
        Hp115 => "115", "115 حصان";
        Hp140 => "140", "140 حصان";
        Other => "other", "غير ذلك";
    }
}

impl EnginePower {
    /// Key under which the quantity typed next to this power is stored,
    /// e.g. `power_2.5_count`.
    pub fn count_key(self) -> String {
        format!("power_{}_count", self.code())
    }
}

choice_set! {
    /// Step 6: purchase-decision factors (at most two may be picked).
    pub enum PurchaseFactor {
        Price => "price", "السعر";
        FuelEfficiency => "efficiency", "كفاءة البنزين";
        SpareParts => "spare-parts", "توفر قطع الغيار";
        AfterSales => "after-sales", "الخدمة بعد البيع";
        Weight => "weight", "الوزن";
        Design => "design", "الشكل";
        Country => "country", "البلد المصنع";
        Reliability => "reliability", "الاعتمادية/الصلابة";
        Other => "other", "غير ذلك";
    }
}

choice_set! {
    /// Step 7: city of residence.
    pub enum City {
        Riyadh => "riyadh", "الرياض";
        Jeddah => "jeddah", "جدة";
        Mecca => "mecca", "مكة المكرمة";
        Medina => "medina", "المدينة المنورة";
        Dammam => "dammam", "الدمام";
        Khobar => "khobar", "الخبر";
        Dhahran => "dhahran", "الظهران";
        Jubail => "jubail", "الجبيل";
        Qatif => "qatif", "القطيف";
        Abha => "abha", "أبها";
        Taif => "taif", "الطائف";
        Buraidah => "buraidah", "بريدة";
        Tabuk => "tabuk", "تبوك";
        Hail => "hail", "حائل";
        Najran => "najran", "نجران";
        Jazan => "jazan", "جازان";
        Arar => "arar", "عرعر";
        Sakaka => "sakaka", "سكاكا";
        Other => "other", "أخرى";
    }
}
