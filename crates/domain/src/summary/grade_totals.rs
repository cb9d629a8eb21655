use crate::scan::Grade;
use serde::Serialize;

/// Quantities per grade bucket
///
/// Groups whose grade is not one of the recognized labels land in
/// `unknown`, which is reported and counted in the total like any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeTotals {
    #[serde(rename = "A+")]
    pub a_plus: u64,
    #[serde(rename = "A")]
    pub a: u64,
    #[serde(rename = "B")]
    pub b: u64,
    #[serde(rename = "C")]
    pub c: u64,
    #[serde(rename = "D")]
    pub d: u64,
    pub unknown: u64,
}

impl GradeTotals {
    pub fn add(&mut self, grade_label: &str, quantity: u64) {
        let bucket = match Grade::from_label(grade_label) {
            Some(Grade::APlus) => &mut self.a_plus,
            Some(Grade::A) => &mut self.a,
            Some(Grade::B) => &mut self.b,
            Some(Grade::C) => &mut self.c,
            Some(Grade::D) => &mut self.d,
            None => &mut self.unknown,
        };
        *bucket += quantity;
    }

    pub fn get(&self, grade: Grade) -> u64 {
        match grade {
            Grade::APlus => self.a_plus,
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
        }
    }

    /// Sum of every bucket, `unknown` included
    pub fn total(&self) -> u64 {
        Grade::ALL.iter().map(|g| self.get(*g)).sum::<u64>() + self.unknown
    }
}
