//! Communication-wire classification and carrier resolution.
//!
//! Classification is an ordered list of independent `(field, matcher)`
//! rules; a wire is communication if any rule matches. Each rule can be
//! exercised on its own through [`Rule::matches`].

use serde_json::{Map, Value};

use crate::catalog::{
    CARRIERS, COMMUNICATION_OWNER_KEYWORDS, COMMUNICATION_USAGE_GROUPS, COMMUNICATION_WIRE_ID_KEYWORDS,
    GENERIC_CARRIER,
};
use crate::types::{str_field, Owner, INDUSTRY_COMMUNICATION};

/// A wire attribute a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UsageGroup,
    OwnerIndustry,
    OwnerId,
    WireId,
}

impl Field {
    pub fn read<'a>(&self, wire: &'a Map<String, Value>) -> Option<&'a str> {
        match self {
            Field::UsageGroup => str_field(wire, "usageGroup"),
            Field::OwnerIndustry => Owner::of(wire).industry(),
            Field::OwnerId => Owner::of(wire).id(),
            Field::WireId => str_field(wire, "id"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::UsageGroup => "usageGroup",
            Field::OwnerIndustry => "owner.industry",
            Field::OwnerId => "owner.id",
            Field::WireId => "id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Exact, case-sensitive membership.
    OneOf(&'static [&'static str]),
    /// Case-insensitive substring of any lowercase keyword.
    ContainsAny(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Matcher::OneOf(set) => set.contains(&value),
            Matcher::ContainsAny(keywords) => {
                let lower = value.to_lowercase();
                keywords.iter().any(|k| lower.contains(k))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: Field,
    pub matcher: Matcher,
}

impl Rule {
    pub fn matches(&self, wire: &Map<String, Value>) -> bool {
        self.field.read(wire).is_some_and(|v| self.matcher.matches(v))
    }
}

pub const RULES: &[Rule] = &[
    Rule {
        field: Field::UsageGroup,
        matcher: Matcher::OneOf(COMMUNICATION_USAGE_GROUPS),
    },
    Rule {
        field: Field::OwnerIndustry,
        matcher: Matcher::OneOf(&[INDUSTRY_COMMUNICATION]),
    },
    Rule {
        field: Field::OwnerId,
        matcher: Matcher::ContainsAny(COMMUNICATION_OWNER_KEYWORDS),
    },
    Rule {
        field: Field::WireId,
        matcher: Matcher::ContainsAny(COMMUNICATION_WIRE_ID_KEYWORDS),
    },
];

/// First rule that classifies `wire` as communication.
pub fn matching_rule(wire: &Map<String, Value>) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.matches(wire))
}

pub fn is_communication(wire: &Map<String, Value>) -> bool {
    matching_rule(wire).is_some()
}

/// Carrier key for the wire's owner, in [`CARRIERS`] precedence order.
pub fn carrier(wire: &Map<String, Value>) -> &'static str {
    let Some(id) = Owner::of(wire).id().filter(|id| !id.is_empty()) else {
        return GENERIC_CARRIER;
    };
    let lower = id.to_lowercase();
    CARRIERS
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map(|(key, _)| *key)
        .unwrap_or(GENERIC_CARRIER)
}
