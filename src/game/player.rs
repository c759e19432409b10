use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;

use crate::error::GameError;

/// Identity of a registered player. Ids start at 1 within each registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(NonZeroU32);

impl PlayerId {
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(PlayerId)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: String,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Get player name for display
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// The players of one game session, in turn order.
///
/// Ids come from a counter owned by the registry, so two registries never
/// share or disturb each other's numbering.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    issued: u32,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player and return it. Without a name the player is called
    /// "Player <id>".
    pub fn register(&mut self, name: Option<&str>, color: impl Into<String>) -> &Player {
        let id = PlayerId(NonZeroU32::MIN.saturating_add(self.issued));
        self.issued += 1;
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Player {id}"),
        };
        self.players.push(Player {
            id,
            name,
            color: color.into(),
        });
        &self.players[self.players.len() - 1]
    }

    /// Get the player acting at a turn index
    pub fn player_at(&self, turn_index: usize) -> Result<&Player, GameError> {
        self.players
            .get(turn_index)
            .ok_or(GameError::UnknownPlayer {
                index: turn_index,
                count: self.players.len(),
            })
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut registry = PlayerRegistry::new();
        let first = registry.register(None, "Blue").id();
        let second = registry.register(Some("Alice"), "Red").id();
        let third = registry.register(None, "Green").id();
        assert_eq!(
            [first.get(), second.get(), third.get()],
            [1, 2, 3]
        );
    }

    #[test]
    fn test_default_name() {
        let mut registry = PlayerRegistry::new();
        registry.register(None, "Blue");
        let player = registry.register(Some("Alice"), "Red").clone();
        assert_eq!(registry.player_at(0).unwrap().name(), "Player 1");
        assert_eq!(player.name(), "Alice");
        assert_eq!(player.color(), "Red");
    }

    #[test]
    fn test_registries_do_not_share_ids() {
        let mut a = PlayerRegistry::new();
        a.register(None, "Blue");
        a.register(None, "Red");

        let mut b = PlayerRegistry::new();
        let id = b.register(None, "Blue").id();
        assert_eq!(id.get(), 1);
        assert_eq!(b.player_at(0).unwrap().name(), "Player 1");
    }

    #[test]
    fn test_player_at_bounds() {
        let mut registry = PlayerRegistry::new();
        registry.register(None, "Blue");
        registry.register(None, "Red");
        assert_eq!(registry.player_at(1).unwrap().color(), "Red");
        assert_eq!(
            registry.player_at(2),
            Err(GameError::UnknownPlayer { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let mut registry = PlayerRegistry::new();
        registry.register(None, "Blue");
        let id = registry.register(None, "Red").id();
        assert_eq!(registry.get(id).map(Player::color), Some("Red"));
        assert!(registry.get(PlayerId::new(9).unwrap()).is_none());
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
