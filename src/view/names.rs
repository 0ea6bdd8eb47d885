//! Name register
//!
//! Maps display names found in a text to what is known about them: persons
//! carry a title ("forstjóri Landsvirkjunar"), entities a definition, and bare
//! surnames point back to the full name they stand for in this text.
//!
//! On the wire the register is an object keyed by name:
//!
//!     {
//!         "Jón Jónsson": {"kind": "name", "title": "forstjóri"},
//!         "Jónsson": {"kind": "ref", "fullname": "Jón Jónsson"},
//!         "Alþingi": {"kind": "entity", "title": "löggjafarþing Íslendinga"}
//!     }
//!
//! Surname references are resolvable by [`NameRegistry::lookup`] but never
//! listed by [`NameRegistry::list_displayable`].

use crate::view::classify::{self, TokenClass};
use crate::view::error::ViewError;
use crate::view::tokens::{Document, TokenKind};
use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use icu::locale::Locale;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// Locale used to order the register unless configured otherwise
pub const DEFAULT_LOCALE: &str = "is";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    #[serde(rename = "name")]
    PersonName,
    #[serde(rename = "entity")]
    Entity,
    #[serde(rename = "ref")]
    SurnameReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub kind: NameKind,

    /// Role of a person or definition of an entity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Full name a surname reference resolves to
    #[serde(rename = "fullname", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl NameEntry {
    pub fn person(title: impl Into<String>) -> Self {
        NameEntry {
            kind: NameKind::PersonName,
            title: title.into(),
            full_name: None,
        }
    }

    pub fn entity(definition: impl Into<String>) -> Self {
        NameEntry {
            kind: NameKind::Entity,
            title: definition.into(),
            full_name: None,
        }
    }

    pub fn surname_of(full_name: impl Into<String>) -> Self {
        NameEntry {
            kind: NameKind::SurnameReference,
            title: String::new(),
            full_name: Some(full_name.into()),
        }
    }

    pub fn is_reference(&self) -> bool {
        self.kind == NameKind::SurnameReference
    }
}

/// A register entry as listed for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName<'a> {
    /// Name with hyphen spacing collapsed
    pub name: String,
    pub kind: NameKind,
    pub title: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameRegistry {
    entries: BTreeMap<String, NameEntry>,
}

impl NameRegistry {
    pub fn new() -> Self {
        NameRegistry::default()
    }

    pub fn from_json(source: &str) -> Result<Self, ViewError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Insert an entry, replacing any previous entry for `name`.
    pub fn insert(&mut self, name: impl Into<String>, entry: NameEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Register a person, and its surname as a reference back to the full
    /// name unless the surname is already registered.
    pub fn add_person(&mut self, full_name: &str, title: impl Into<String>) {
        self.insert(full_name, NameEntry::person(title));
        if let Some(surname) = full_name.split_whitespace().last() {
            if surname != full_name && !self.entries.contains_key(surname) {
                self.insert(surname, NameEntry::surname_of(full_name));
            }
        }
    }

    pub fn add_entity(&mut self, name: &str, definition: impl Into<String>) {
        self.insert(name, NameEntry::entity(definition));
    }

    pub fn lookup(&self, name: &str) -> Option<&NameEntry> {
        self.entries.get(name)
    }

    /// The canonical full name behind `name`: the target of a surname
    /// reference, otherwise `name` itself.
    pub fn resolve_full_name<'a>(&'a self, name: &'a str) -> &'a str {
        match self.lookup(name) {
            Some(NameEntry {
                kind: NameKind::SurnameReference,
                full_name: Some(full),
                ..
            }) => full.as_str(),
            _ => name,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NameEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Persons and entities, in Icelandic alphabetical order
    pub fn list_displayable(&self) -> Vec<DisplayName<'_>> {
        self.list_displayable_in(DEFAULT_LOCALE)
    }

    /// Persons and entities ordered by the collation rules of `locale`.
    ///
    /// Falls back to code point order if no collator exists for the locale.
    pub fn list_displayable_in(&self, locale: &str) -> Vec<DisplayName<'_>> {
        let mut names: Vec<DisplayName<'_>> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_reference())
            .map(|(name, entry)| DisplayName {
                name: classify::collapse_hyphens(name).into_owned(),
                kind: entry.kind,
                title: &entry.title,
            })
            .collect();

        let collator = collator_for(locale);
        if collator.is_none() {
            tracing::warn!(locale, "no collator for locale, using code point order");
        }
        names.sort_by(|a, b| compare_names(collator.as_ref(), &a.name, &b.name));
        names
    }
}

fn collator_for(locale: &str) -> Option<CollatorBorrowed<'static>> {
    let locale: Locale = locale.parse().ok()?;
    Collator::try_new(locale.into(), CollatorOptions::default()).ok()
}

fn compare_names(collator: Option<&CollatorBorrowed<'static>>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => a.cmp(b),
    }
}

/// Names found in a document, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedNames {
    /// Nominative full names of person tokens
    pub persons: Vec<String>,
    /// Entity tokens and proper noun words, hyphens collapsed
    pub entities: Vec<String>,
}

/// Collect the person and entity names a register for `document` would need.
pub fn collect_names(document: &Document) -> CollectedNames {
    let mut collected = CollectedNames::default();
    let mut seen_persons = HashSet::new();
    let mut seen_entities = HashSet::new();

    for token in document.tokens() {
        if let Some(name) = token.person_name() {
            if seen_persons.insert(name.to_string()) {
                collected.persons.push(name.to_string());
            }
            continue;
        }
        let class = classify::classify(token, true);
        if matches!(
            class,
            TokenClass::ProperNoun | TokenClass::Kind(TokenKind::Entity)
        ) {
            let name = classify::collapse_hyphens(&token.text).into_owned();
            if seen_entities.insert(name.clone()) {
                collected.entities.push(name);
            }
        }
    }
    collected
}
