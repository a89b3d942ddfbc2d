// normalize.rs - Party and city name cleanup.
//
// Carrier APIs return names as typed by whoever filled in the waybill:
// full legal-entity forms, quotes of three different kinds, parenthetical
// branch notes, stray whitespace. Summaries need short, stable names, so
// every name passes through the same pipeline:
//
//   strip "(...)" -> lowercase -> abbreviate -> strip quotes
//     -> collapse whitespace -> uppercase
//
// City names additionally lose locality prefixes ("г. ", "обл.") and known
// cities are replaced by their short code ("астрахань" -> "АСТРА").

use serde::{Deserialize, Serialize};

use fw_shipment::UNKNOWN_NAME;

/// One "long phrase -> short form" replacement. `full` is matched lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abbreviation {
    pub full: String,
    pub short: String,
}

impl Abbreviation {
    pub fn new(full: &str, short: &str) -> Self {
        Self {
            full: full.to_lowercase(),
            short: short.to_string(),
        }
    }
}

/// Locality noise removed from city names before lookup.
const CITY_NOISE: &[&str] = &[
    "г. ", "город ", "пгт. ", "поселок ", "область", "обл.", " край", " р-н", " г ",
];

/// Terminal and compass words shortened after the city lookup.
const PLACE_WORDS: &[(&str, &str)] = &[
    ("терминал", "ТЕРМ"),
    ("склад", "СКЛ"),
    ("центральный", "ЦЕНТР"),
    ("восток", "ВСТ"),
    ("запад", "ЗПД"),
    ("север", "СЕВ"),
    ("юг", "ЮГ"),
];

const QUOTES: &[char] = &['"', '«', '»', '\''];

/// Configurable name normalizer. Tables are applied in list order, so longer
/// phrases that contain shorter ones must come first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameNormalizer {
    #[serde(default = "default_legal_forms")]
    pub legal_forms: Vec<Abbreviation>,

    #[serde(default = "default_cities")]
    pub cities: Vec<Abbreviation>,
}

fn default_legal_forms() -> Vec<Abbreviation> {
    vec![
        Abbreviation::new("общество с ограниченной ответственностью", "ООО"),
        Abbreviation::new("индивидуальный предприниматель", "ИП"),
        Abbreviation::new("закрытое акционерное общество", "ЗАО"),
        Abbreviation::new("открытое акционерное общество", "ОАО"),
        Abbreviation::new("публичное акционерное общество", "ПАО"),
        Abbreviation::new("акционерное общество", "АО"),
    ]
}

fn default_cities() -> Vec<Abbreviation> {
    [
        ("астрахань", "АСТРА"),
        ("санкт-петербург", "СПБ"),
        ("новосибирск", "НСК"),
        ("екатеринбург", "ЕКБ"),
        ("нижний новгород", "Н.НОВ"),
        ("краснодар", "КРД"),
        ("ростов-на-дону", "РНД"),
        ("домодедово", "ДМД"),
        ("одинцово", "ОДИН"),
        ("пермь", "ПРМ"),
        ("казань", "КЗН"),
        ("челябинск", "ЧЛБ"),
        ("красноярск", "КРЯ"),
        ("москва", "МСК"),
        ("владивосток", "ВЛД"),
    ]
    .iter()
    .map(|(full, short)| Abbreviation::new(full, short))
    .collect()
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self {
            legal_forms: default_legal_forms(),
            cities: default_cities(),
        }
    }
}

impl NameNormalizer {
    /// Normalize a sender, recipient or payer name.
    pub fn party(&self, raw: Option<&str>) -> String {
        let Some(mut cleaned) = prepare(raw) else {
            return UNKNOWN_NAME.to_string();
        };
        for form in &self.legal_forms {
            cleaned = cleaned.replace(&form.full, &form.short);
        }
        finish(&cleaned)
    }

    /// Normalize a city or terminal name.
    pub fn city(&self, raw: Option<&str>) -> String {
        let Some(mut cleaned) = prepare(raw) else {
            return UNKNOWN_NAME.to_string();
        };
        for noise in CITY_NOISE {
            cleaned = cleaned.replace(noise, " ");
        }
        // Cities before place words: "владивосток" contains "восток".
        for city in &self.cities {
            cleaned = cleaned.replace(&city.full, &city.short);
        }
        for (long, short) in PLACE_WORDS {
            cleaned = cleaned.replace(long, short);
        }
        finish(&cleaned)
    }
}

/// Strip parentheticals and lowercase; None for absent or blank input.
fn prepare(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let stripped = strip_parentheticals(raw).to_lowercase();
    (!stripped.trim().is_empty()).then_some(stripped)
}

fn finish(cleaned: &str) -> String {
    let unquoted: String = cleaned.chars().filter(|c| !QUOTES.contains(c)).collect();
    let collapsed = unquoted.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        collapsed.to_uppercase()
    }
}

/// Remove every "(...)" span, shortest match first. An unclosed "(" is kept.
fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push(' ');
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
