use std::collections::HashSet;

use crate::stats::{PlayerStatRecord, StatField};

/// Player names picked for the user's team, in pick order. A name appears at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamSelection {
    players: Vec<String>,
}

impl TeamSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    /// Adds `player` if absent, removes it otherwise. Returns whether the player
    /// is selected afterwards.
    pub fn toggle(&mut self, player: &str) -> bool {
        if let Some(pos) = self.players.iter().position(|p| p == player) {
            self.players.remove(pos);
            false
        } else {
            self.players.push(player.to_string());
            true
        }
    }

    pub fn reset(&mut self) {
        self.players.clear();
    }

    /// Drops names that no longer have a loaded record. Returns how many were
    /// removed.
    pub fn retain_loaded(&mut self, records: &[PlayerStatRecord]) -> usize {
        let loaded: HashSet<&str> = records.iter().map(|r| r.player.as_str()).collect();
        let before = self.players.len();
        self.players.retain(|p| loaded.contains(p.as_str()));
        before - self.players.len()
    }

    /// Sum of `field` over selected players that have a loaded record.
    pub fn total_points(&self, records: &[PlayerStatRecord], field: StatField) -> f64 {
        self.players
            .iter()
            .filter_map(|name| records.iter().find(|r| &r.player == name))
            .map(|r| r.value_or_zero(field))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_reports_membership() {
        let mut team = TeamSelection::new();
        assert!(team.toggle("Josh Allen"));
        assert!(team.contains("Josh Allen"));
        assert!(!team.toggle("Josh Allen"));
        assert!(team.is_empty());
    }

    #[test]
    fn retain_loaded_drops_missing_names() {
        let mut team = TeamSelection::new();
        team.toggle("A");
        team.toggle("Gone");
        team.toggle("B");
        let records = vec![PlayerStatRecord::named("B"), PlayerStatRecord::named("A")];
        assert_eq!(team.retain_loaded(&records), 1);
        assert_eq!(team.players(), ["A".to_string(), "B".to_string()]);
    }
}
