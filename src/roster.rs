use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::known_players::KnownPlayers;
use crate::player::{validate_player_name, NameError, Player, Rating};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RosterError {
    InvalidName(NameError),
    DuplicateName { name: String },
    NoSuchPlayer { index: usize },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::InvalidName(err) => write!(f, "{err}"),
            RosterError::DuplicateName { name } => write!(f, "{name} is already on the list"),
            RosterError::NoSuchPlayer { index } => write!(f, "there is no player #{}", index + 1),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<NameError> for RosterError {
    fn from(err: NameError) -> Self { RosterError::InvalidName(err) }
}


// Players registered for the upcoming game, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self { Roster { players: Vec::new() } }

    pub fn len(&self) -> usize { self.players.len() }
    pub fn is_empty(&self) -> bool { self.players.is_empty() }
    pub fn players(&self) -> &[Player] { &self.players }
    pub fn iter(&self) -> impl Iterator<Item = &Player> { self.players.iter() }
    pub fn get(&self, index: usize) -> Option<&Player> { self.players.get(index) }

    pub fn contains(&self, name: &str) -> bool { self.players.iter().any(|p| p.name == name) }
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.players.iter().any(|p| p.name.to_lowercase() == name)
    }

    pub fn add(&mut self, name: &str, rating: Rating) -> Result<&Player, RosterError> {
        let name = validate_player_name(name)?;
        if self.contains(&name) {
            return Err(RosterError::DuplicateName { name });
        }
        info!("Player {} added with rating {}", name, rating);
        self.players.push(Player::new(name, rating));
        Ok(&self.players[self.players.len() - 1])
    }

    pub fn remove(&mut self, index: usize) -> Result<Player, RosterError> {
        if index >= self.players.len() {
            return Err(RosterError::NoSuchPlayer { index });
        }
        let player = self.players.remove(index);
        info!("Player {} removed", player.name);
        Ok(player)
    }

    pub fn update_rating(&mut self, index: usize, rating: Rating) -> Result<&Player, RosterError> {
        let player = self.players.get_mut(index).ok_or(RosterError::NoSuchPlayer { index })?;
        player.rating = rating;
        info!("Player {} now has rating {}", player.name, rating);
        Ok(player)
    }

    pub fn clear(&mut self) { self.players.clear(); }

    // Replaces the whole roster. Blank names and repeated names are skipped.
    pub fn replace_with_names<'a>(
        &mut self, names: impl IntoIterator<Item = &'a str>, rating: Rating,
    ) -> usize {
        self.players.clear();
        for name in names {
            if let Err(err) = self.add(name, rating) {
                debug!("Skipping {:?} on import: {}", name, err);
            }
        }
        self.players.len()
    }

    // Known players matching `search_term` who are not registered yet. Both checks ignore
    // case, so "joão" is not suggested when "João" is already on the list.
    pub fn suggestions<'a>(&self, known: &'a KnownPlayers, search_term: &str) -> Vec<&'a str> {
        known.search(search_term).filter(|name| !self.contains_ignore_case(name)).collect()
    }
}
