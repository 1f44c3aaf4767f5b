//! Fixed option catalogs used by the entity forms.

use crate::domain::{CourseType, Evaluation};

/// One choice in a select or multi-select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
}

impl<V> SelectOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

pub const QURAN_PART_COUNT: u32 = 30;
pub const RECITATION_PAGE_COUNT: u32 = 20;

pub const RELIGIOUS_QUALIFICATIONS: &[&str] = &[
    "Ijazah in Hafs",
    "Ijazah in Ten Qiraat",
    "Tajweed Certificate",
    "Bachelor in Sharia",
    "Bachelor in Quranic Studies",
    "Master in Quranic Studies",
    "Imam and Khateeb Certificate",
];

/// The thirty juz of the Quran, valued by juz number.
pub fn quran_parts() -> Vec<SelectOption<String>> {
    (1..=QURAN_PART_COUNT)
        .map(|juz| SelectOption::new(juz.to_string(), format!("Juz {juz}")))
        .collect()
}

pub fn religious_qualifications() -> Vec<SelectOption<String>> {
    RELIGIOUS_QUALIFICATIONS
        .iter()
        .map(|qualification| SelectOption::new(qualification.to_string(), *qualification))
        .collect()
}

pub fn course_types() -> Vec<SelectOption<CourseType>> {
    CourseType::ALL
        .into_iter()
        .map(|kind| SelectOption::new(kind, kind.label()))
        .collect()
}

pub fn evaluations() -> Vec<SelectOption<Evaluation>> {
    Evaluation::ALL
        .into_iter()
        .map(|evaluation| SelectOption::new(evaluation, evaluation.label()))
        .collect()
}

pub fn recitation_pages() -> Vec<SelectOption<u32>> {
    (1..=RECITATION_PAGE_COUNT)
        .map(|page| SelectOption::new(page, format!("Page {page}")))
        .collect()
}
