//! Specialist status grid.
//!
//! A pure reducer over the four specialist indicators. Timing (the delayed
//! reset back to idle) lives in the application layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::specialist::SpecialistId;

/// Display state of a specialist indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    #[default]
    Idle,
    Active,
    Offline,
}

/// One indicator in the specialist grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub id: SpecialistId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub status: StatusState,
}

impl SystemStatus {
    /// Idle indicator built from the specialist's fixed profile.
    pub fn idle(id: SpecialistId) -> Self {
        let profile = id.profile();
        Self {
            id,
            name: profile.name.to_string(),
            description: profile.description.to_string(),
            color: profile.color.to_string(),
            status: StatusState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == StatusState::Active
    }
}

/// The specialist grid, one entry per [`SpecialistId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBoard {
    systems: BTreeMap<SpecialistId, SystemStatus>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    /// Creates a board with every specialist idle.
    pub fn new() -> Self {
        let systems = SpecialistId::all()
            .map(|id| (id, SystemStatus::idle(id)))
            .collect();
        Self { systems }
    }

    /// Applies a brief's recommendation list.
    ///
    /// The board is rebuilt from defaults, then every recognised identifier is
    /// marked active. Unknown identifiers are skipped. Returns the activated
    /// specialists in board order.
    pub fn activate<S: AsRef<str>>(&mut self, recommended: &[S]) -> Vec<SpecialistId> {
        self.reset();

        for raw in recommended {
            match SpecialistId::parse(raw.as_ref()) {
                Some(id) => {
                    if let Some(system) = self.systems.get_mut(&id) {
                        system.status = StatusState::Active;
                    }
                }
                None => {
                    tracing::debug!(
                        "[StatusBoard] Ignoring unknown specialist identifier: {}",
                        raw.as_ref()
                    );
                }
            }
        }

        self.active_ids()
    }

    /// Returns every indicator to idle.
    pub fn reset(&mut self) {
        for system in self.systems.values_mut() {
            system.status = StatusState::Idle;
        }
    }

    /// Marks a specialist offline until the next activation or reset.
    pub fn set_offline(&mut self, id: SpecialistId) {
        if let Some(system) = self.systems.get_mut(&id) {
            system.status = StatusState::Offline;
        }
    }

    pub fn get(&self, id: SpecialistId) -> Option<&SystemStatus> {
        self.systems.get(&id)
    }

    /// Currently active specialists in board order.
    pub fn active_ids(&self) -> Vec<SpecialistId> {
        self.systems
            .values()
            .filter(|s| s.is_active())
            .map(|s| s.id)
            .collect()
    }

    /// True when no indicator is active.
    pub fn is_idle(&self) -> bool {
        self.systems.values().all(|s| s.status == StatusState::Idle)
    }

    /// Owned copy of every indicator in board order.
    pub fn snapshot(&self) -> Vec<SystemStatus> {
        self.systems.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_idle() {
        let board = StatusBoard::new();
        assert!(board.is_idle());
        assert_eq!(board.snapshot().len(), 4);
    }

    #[test]
    fn test_activate_marks_recommended() {
        let mut board = StatusBoard::new();
        let activated = board.activate(&["LBJ-Growth-AI", "LBJ-Sales-AI"]);

        // Board order, not recommendation order
        assert_eq!(activated, vec![SpecialistId::Sales, SpecialistId::Growth]);
        assert!(board.get(SpecialistId::Sales).unwrap().is_active());
        assert_eq!(
            board.get(SpecialistId::Design).unwrap().status,
            StatusState::Idle
        );
    }

    #[test]
    fn test_activate_ignores_unknown_identifiers() {
        let mut board = StatusBoard::new();
        let activated = board.activate(&["LBJ-Finance-AI", "", "LBJ-Ops-AI"]);
        assert_eq!(activated, vec![SpecialistId::Ops]);
    }

    #[test]
    fn test_activate_deduplicates() {
        let mut board = StatusBoard::new();
        let activated = board.activate(&["LBJ-Ops-AI", "LBJ-Ops-AI"]);
        assert_eq!(activated, vec![SpecialistId::Ops]);
    }

    #[test]
    fn test_activate_rebuilds_from_defaults() {
        let mut board = StatusBoard::new();
        board.activate(&["LBJ-Design-AI"]);
        board.set_offline(SpecialistId::Growth);

        board.activate(&["LBJ-Sales-AI"]);

        assert_eq!(board.active_ids(), vec![SpecialistId::Sales]);
        assert_eq!(
            board.get(SpecialistId::Growth).unwrap().status,
            StatusState::Idle
        );
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut board = StatusBoard::new();
        board.activate(&["LBJ-Sales-AI", "LBJ-Design-AI"]);
        board.reset();
        assert!(board.is_idle());
    }

    #[test]
    fn test_status_state_serializes_lowercase() {
        let json = serde_json::to_string(&SystemStatus::idle(SpecialistId::Ops)).unwrap();
        assert!(json.contains("\"status\":\"idle\""));
        assert!(json.contains("\"id\":\"LBJ-Ops-AI\""));
    }
}
