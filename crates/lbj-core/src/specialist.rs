//! Specialist systems the orchestrator can route to.
//!
//! The set is closed: the orchestrator recommends but never executes these
//! systems, and anything else a model names is ignored.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Identifier of one of the four LBJ specialist systems.
///
/// Serializes as the wire identifier used in model responses
/// (e.g. `"LBJ-Sales-AI"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum SpecialistId {
    #[serde(rename = "LBJ-Sales-AI")]
    #[strum(serialize = "LBJ-Sales-AI")]
    Sales,
    #[serde(rename = "LBJ-Design-AI")]
    #[strum(serialize = "LBJ-Design-AI")]
    Design,
    #[serde(rename = "LBJ-Ops-AI")]
    #[strum(serialize = "LBJ-Ops-AI")]
    Ops,
    #[serde(rename = "LBJ-Growth-AI")]
    #[strum(serialize = "LBJ-Growth-AI")]
    Growth,
}

/// Static display data for a specialist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialistProfile {
    pub id: SpecialistId,
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    /// Kinds of requests that route to this specialist.
    pub routing_topics: &'static str,
}

impl SpecialistId {
    /// All specialists in display order.
    pub fn all() -> impl Iterator<Item = SpecialistId> {
        SpecialistId::iter()
    }

    /// Parses a wire identifier, returning `None` for anything unknown.
    pub fn parse(value: &str) -> Option<SpecialistId> {
        value.trim().parse().ok()
    }

    /// Returns the fixed display profile for this specialist.
    pub fn profile(self) -> SpecialistProfile {
        match self {
            SpecialistId::Sales => SpecialistProfile {
                id: self,
                name: "Sales AI",
                description: "Leads, qualification, proposals, sales process",
                color: "emerald-500",
                routing_topics: "Leads, clients, proposals, follow-ups",
            },
            SpecialistId::Design => SpecialistProfile {
                id: self,
                name: "Design AI",
                description: "Creative direction, concepts, narratives",
                color: "purple-500",
                routing_topics: "Creative direction, concepts, brand feel",
            },
            SpecialistId::Ops => SpecialistProfile {
                id: self,
                name: "Ops AI",
                description: "Operations, scheduling, delivery, risk",
                color: "amber-500",
                routing_topics: "Timelines, execution, staffing, efficiency",
            },
            SpecialistId::Growth => SpecialistProfile {
                id: self,
                name: "Growth AI",
                description: "Marketing, branding, campaigns, content",
                color: "blue-500",
                routing_topics: "Visibility, content, campaigns, growth",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identifiers() {
        let ids: Vec<String> = SpecialistId::all().map(|id| id.to_string()).collect();
        assert_eq!(
            ids,
            vec!["LBJ-Sales-AI", "LBJ-Design-AI", "LBJ-Ops-AI", "LBJ-Growth-AI"]
        );
    }

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(SpecialistId::parse("LBJ-Ops-AI"), Some(SpecialistId::Ops));
        assert_eq!(SpecialistId::parse(" LBJ-Growth-AI "), Some(SpecialistId::Growth));
        assert_eq!(SpecialistId::parse("LBJ-Finance-AI"), None);
        assert_eq!(SpecialistId::parse(""), None);
    }

    #[test]
    fn test_serde_uses_wire_identifier() {
        let json = serde_json::to_string(&SpecialistId::Design).unwrap();
        assert_eq!(json, "\"LBJ-Design-AI\"");
        let parsed: SpecialistId = serde_json::from_str("\"LBJ-Sales-AI\"").unwrap();
        assert_eq!(parsed, SpecialistId::Sales);
    }

    #[test]
    fn test_profiles_match_ids() {
        for id in SpecialistId::all() {
            assert_eq!(id.profile().id, id);
        }
        assert_eq!(SpecialistId::Sales.profile().color, "emerald-500");
    }
}
