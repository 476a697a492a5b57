//! The eleven report sections and their flat external field map.
//!
//! Every external key (`s1_total`, `s6_b_eng`, ...) is declared exactly once
//! in [`FIELD_TABLE`], together with its coercion kind and a getter/setter
//! pair. Both serialization directions walk the same table, so the encode and
//! decode paths cannot drift apart.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Section 1: files sent to the minister.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section1Files {
    pub total_files: Option<i32>,
    pub hindi_files: Option<i32>,
}

/// Section 2: secretary-level meetings and papers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section2Meetings {
    pub meetings_count: Option<i32>,
    pub hindi_minutes: Option<i32>,
    pub total_papers: Option<i32>,
    pub hindi_papers: Option<i32>,
}

/// Section 3: documents under section 3(3) of the Official Languages Act.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section3OfficialLanguages {
    pub total_documents: Option<i32>,
    pub bilingual_documents: Option<i32>,
    pub english_only_documents: Option<i32>,
    pub hindi_only_documents: Option<i32>,
}

/// Section 4: letters received in Hindi.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section4HindiLetters {
    pub total_letters: Option<i32>,
    pub no_reply_letters: Option<i32>,
    pub replied_hindi_letters: Option<i32>,
    pub replied_english_letters: Option<i32>,
}

/// Section 5: English letters replied to in Hindi (region A).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section5EnglishRepliedHindi {
    pub region_a_english_letters: Option<i32>,
    pub region_a_replied_hindi: Option<i32>,
    pub region_a_replied_english: Option<i32>,
    pub region_a_no_reply: Option<i32>,
}

/// Section 6: letters issued to regions A, B and C.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section6IssuedLetters {
    pub region_a_hindi_bilingual: Option<i32>,
    pub region_a_english_only: Option<i32>,
    pub region_a_total: Option<i32>,
    pub region_b_hindi_bilingual: Option<i32>,
    pub region_b_english_only: Option<i32>,
    pub region_b_total: Option<i32>,
    pub region_c_hindi_bilingual: Option<i32>,
    pub region_c_english_only: Option<i32>,
    pub region_c_total: Option<i32>,
}

/// Section 7: notings on files during the quarter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section7Notings {
    pub hindi_pages: Option<i32>,
    pub english_pages: Option<i32>,
    pub total_pages: Option<i32>,
    pub eoffice_notings: Option<i32>,
}

/// Section 8: Hindi workshops conducted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section8Workshops {
    pub full_day_workshops: Option<i32>,
    pub officers_trained: Option<i32>,
    pub employees_trained: Option<i32>,
}

/// Section 9: Official Language Implementation Committee meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section9ImplementationCommittee {
    pub meeting_date: Option<NaiveDate>,
    pub sub_committees_count: Option<i32>,
    pub meetings_organized: Option<i32>,
    pub agenda_hindi: Option<String>,
}

/// Section 10: Hindi Advisory Committee meeting date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section10HindiAdvisory {
    pub meeting_date: Option<NaiveDate>,
}

/// Section 11: specific achievements during the quarter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section11Achievements {
    pub innovative_work: Option<String>,
    pub special_events: Option<String>,
    pub hindi_medium_works: Option<String>,
}

/// The section children of one report. `None` means the row was never
/// created; a present key in an incoming payload instantiates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSet {
    pub files: Option<Section1Files>,
    pub meetings: Option<Section2Meetings>,
    pub official_languages: Option<Section3OfficialLanguages>,
    pub hindi_letters: Option<Section4HindiLetters>,
    pub english_replied_hindi: Option<Section5EnglishRepliedHindi>,
    pub issued_letters: Option<Section6IssuedLetters>,
    pub notings: Option<Section7Notings>,
    pub workshops: Option<Section8Workshops>,
    pub implementation_committee: Option<Section9ImplementationCommittee>,
    pub hindi_advisory: Option<Section10HindiAdvisory>,
    pub achievements: Option<Section11Achievements>,
}

/// A single field value in transit between the flat map and a section.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(Option<i32>),
    Date(Option<NaiveDate>),
    Text(Option<String>),
}

impl FieldValue {
    /// External JSON representation: nulls become empty strings, dates
    /// become ISO-8601 date strings.
    fn to_json(&self) -> Value {
        match self {
            FieldValue::Int(Some(n)) => Value::from(*n),
            FieldValue::Date(Some(d)) => Value::from(d.format("%Y-%m-%d").to_string()),
            FieldValue::Text(Some(s)) => Value::from(s.clone()),
            FieldValue::Int(None) | FieldValue::Date(None) | FieldValue::Text(None) => {
                Value::from("")
            }
        }
    }
}

/// Coercion applied to an incoming value for a given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Int,
    Date,
    Text,
}

/// One row of the field table: an external key, its coercion kind and the
/// accessor pair routing it to a section field.
pub struct FieldSpec {
    pub key: &'static str,
    pub coercion: Coercion,
    get: fn(&SectionSet) -> Option<FieldValue>,
    set: fn(&mut SectionSet, FieldValue),
}

macro_rules! int_field {
    ($key:literal, $section:ident, $field:ident) => {
        FieldSpec {
            key: $key,
            coercion: Coercion::Int,
            get: |s| s.$section.as_ref().map(|x| FieldValue::Int(x.$field)),
            set: |s, v| {
                if let FieldValue::Int(n) = v {
                    s.$section.get_or_insert_with(Default::default).$field = n;
                }
            },
        }
    };
}

macro_rules! date_field {
    ($key:literal, $section:ident, $field:ident) => {
        FieldSpec {
            key: $key,
            coercion: Coercion::Date,
            get: |s| s.$section.as_ref().map(|x| FieldValue::Date(x.$field)),
            set: |s, v| {
                if let FieldValue::Date(d) = v {
                    s.$section.get_or_insert_with(Default::default).$field = d;
                }
            },
        }
    };
}

macro_rules! text_field {
    ($key:literal, $section:ident, $field:ident) => {
        FieldSpec {
            key: $key,
            coercion: Coercion::Text,
            get: |s| {
                s.$section
                    .as_ref()
                    .map(|x| FieldValue::Text(x.$field.clone()))
            },
            set: |s, v| {
                if let FieldValue::Text(t) = v {
                    s.$section.get_or_insert_with(Default::default).$field = t;
                }
            },
        }
    };
}

/// The complete external field map: 42 keys across the eleven sections.
/// Section 11 keeps its historical `s12_` key prefix on the wire.
pub static FIELD_TABLE: &[FieldSpec] = &[
    int_field!("s1_total", files, total_files),
    int_field!("s1_hindi", files, hindi_files),
    int_field!("s2_meetings", meetings, meetings_count),
    int_field!("s2_minutes", meetings, hindi_minutes),
    int_field!("s2_papers_total", meetings, total_papers),
    int_field!("s2_papers_hindi", meetings, hindi_papers),
    int_field!("s3_total", official_languages, total_documents),
    int_field!("s3_bilingual", official_languages, bilingual_documents),
    int_field!("s3_english", official_languages, english_only_documents),
    int_field!("s3_hindi_only", official_languages, hindi_only_documents),
    int_field!("s4_total", hindi_letters, total_letters),
    int_field!("s4_no_reply", hindi_letters, no_reply_letters),
    int_field!("s4_replied_hindi", hindi_letters, replied_hindi_letters),
    int_field!("s4_replied_eng", hindi_letters, replied_english_letters),
    int_field!("s5_total", english_replied_hindi, region_a_english_letters),
    int_field!("s5_hindi", english_replied_hindi, region_a_replied_hindi),
    int_field!("s5_english", english_replied_hindi, region_a_replied_english),
    int_field!("s5_noreply", english_replied_hindi, region_a_no_reply),
    int_field!("s6_a_hindi", issued_letters, region_a_hindi_bilingual),
    int_field!("s6_a_eng", issued_letters, region_a_english_only),
    int_field!("s6_a_total", issued_letters, region_a_total),
    int_field!("s6_b_hindi", issued_letters, region_b_hindi_bilingual),
    int_field!("s6_b_eng", issued_letters, region_b_english_only),
    int_field!("s6_b_total", issued_letters, region_b_total),
    int_field!("s6_c_hindi", issued_letters, region_c_hindi_bilingual),
    int_field!("s6_c_eng", issued_letters, region_c_english_only),
    int_field!("s6_c_total", issued_letters, region_c_total),
    int_field!("s7_hindi", notings, hindi_pages),
    int_field!("s7_eng", notings, english_pages),
    int_field!("s7_total", notings, total_pages),
    int_field!("s7_eoffice", notings, eoffice_notings),
    int_field!("s8_workshops", workshops, full_day_workshops),
    int_field!("s8_officers", workshops, officers_trained),
    int_field!("s8_employees", workshops, employees_trained),
    date_field!("s9_date", implementation_committee, meeting_date),
    int_field!("s9_sub_committees", implementation_committee, sub_committees_count),
    int_field!("s9_meetings_count", implementation_committee, meetings_organized),
    text_field!("s9_agenda_hindi", implementation_committee, agenda_hindi),
    date_field!("s10_date", hindi_advisory, meeting_date),
    text_field!("s12_1", achievements, innovative_work),
    text_field!("s12_2", achievements, special_events),
    text_field!("s12_3", achievements, hindi_medium_works),
];

/// Integer coercion: empty strings, nulls and non-numeric input all map to
/// `None`; `"0"` maps to zero.
#[must_use]
pub fn coerce_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// Date coercion: accepts `YYYY-MM-DD` or a full ISO datetime (date part
/// taken); anything else maps to `None`.
#[must_use]
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| s.parse::<NaiveDateTime>().ok().map(|dt| dt.date())),
        _ => None,
    }
}

/// Text coercion: empty strings normalize to `None`.
#[must_use]
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Encode the section children into the flat external map. Sections that
/// were never created are skipped.
#[must_use]
pub fn to_external(sections: &SectionSet) -> Map<String, Value> {
    let mut out = Map::new();
    for spec in FIELD_TABLE {
        if let Some(value) = (spec.get)(sections) {
            out.insert(spec.key.to_owned(), value.to_json());
        }
    }
    out
}

/// Apply a flat external map onto the section children. Unknown keys are
/// ignored; missing keys leave fields untouched; a present key instantiates
/// its section row.
pub fn apply_external(sections: &mut SectionSet, details: &Map<String, Value>) {
    for spec in FIELD_TABLE {
        if let Some(raw) = details.get(spec.key) {
            let value = match spec.coercion {
                Coercion::Int => FieldValue::Int(coerce_int(raw)),
                Coercion::Date => FieldValue::Date(coerce_date(raw)),
                Coercion::Text => FieldValue::Text(coerce_text(raw)),
            };
            (spec.set)(sections, value);
        }
    }
}
