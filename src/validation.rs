use std::collections::HashMap;

use crate::types::{CaseNumber, Record};

/// Outcome of checking a resolved citation against the citing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validation {
    /// The target's name appears in the citing text.
    Corroborated,
    /// The target exists but its name does not appear in the citing text.
    Uncorroborated,
    /// No record carries the resolved number.
    Dangling,
}

impl Validation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Validation::Corroborated => "corroborated",
            Validation::Uncorroborated => "uncorroborated",
            Validation::Dangling => "dangling",
        }
    }
}

/// Lower-cased full text of a citing record, prepared once and reused for
/// every citation the record makes.
#[derive(Debug, Clone)]
pub struct CitingText {
    lowered: String,
}

impl CitingText {
    pub fn new(text: &str) -> Self {
        Self {
            lowered: text.to_lowercase(),
        }
    }

    pub fn from_record(record: &Record) -> Self {
        Self::new(&record.full_text())
    }

    /// Case-insensitive substring test.
    pub fn mentions(&self, name: &str) -> bool {
        self.lowered.contains(&name.to_lowercase())
    }
}

/// Cross-checks resolved citations against the names of their targets.
///
/// The `number -> name` map is built once at construction. When several
/// records share a number, the first one in corpus order names it.
pub struct NameValidator<'a> {
    names: HashMap<&'a CaseNumber, &'a str>,
}

impl<'a> NameValidator<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        let mut names = HashMap::with_capacity(records.len());
        for record in records {
            names.entry(&record.number).or_insert(record.name.as_str());
        }
        Self { names }
    }

    /// Name of the record carrying `number`, if any.
    pub fn name_of(&self, number: &CaseNumber) -> Option<&'a str> {
        self.names.get(number).copied()
    }

    /// Validates one resolved target against the citing text.
    pub fn validate(&self, target: &CaseNumber, citing: &CitingText) -> Validation {
        match self.name_of(target) {
            None => Validation::Dangling,
            Some(name) if citing.mentions(name) => Validation::Corroborated,
            Some(_) => Validation::Uncorroborated,
        }
    }
}
