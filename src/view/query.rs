//! What clicking a token asks the server
//!
//! Persons and entities are interactive beyond their popup: clicking one
//! issues a question about it. Surnames that the name register knows as a
//! reference are asked about by their full name.

use crate::view::classify::{self, TokenClass};
use crate::view::names::{NameKind, NameRegistry};
use crate::view::tokens::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Query {
    Person(String),
    Entity(String),
}

impl Query {
    pub fn name(&self) -> &str {
        match self {
            Query::Person(name) | Query::Entity(name) => name,
        }
    }

    /// The question posted to the query endpoint
    pub fn to_query_string(&self) -> String {
        match self {
            Query::Person(name) => format!("Hver er {name}?"),
            Query::Entity(name) => format!("Hvað er {name}?"),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// The query a click on `token` issues, if any.
///
/// Independent of the sentence's parse status: a proper name in a rejected
/// sentence is still a name.
pub fn query_for(token: &Token, names: &NameRegistry) -> Option<Query> {
    if let Some(name) = token.person_name() {
        return Some(Query::Person(name.to_string()));
    }
    let class = classify::classify(token, true);
    match class {
        TokenClass::Kind(TokenKind::Person) => Some(Query::Person(token.text.clone())),
        TokenClass::Kind(TokenKind::Entity) => {
            Some(Query::Entity(classify::display_text(token, &class).into_owned()))
        }
        TokenClass::ProperNoun => {
            let text = classify::display_text(token, &class);
            let entry = names.lookup(&text).map(|entry| entry.kind);
            let full = names.resolve_full_name(&text).to_string();
            match entry {
                Some(NameKind::PersonName) | Some(NameKind::SurnameReference) => {
                    Some(Query::Person(full))
                }
                Some(NameKind::Entity) | None => Some(Query::Entity(full)),
            }
        }
        _ => None,
    }
}
