use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::player::{Player, TeamColor};


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawnTeam {
    pub label: String,
    pub members: Vec<Player>,
    pub color: TeamColor,
    // Mean member rating rounded to one decimal. Kept in sync with `members`.
    pub average_rating: f64,
}

impl DrawnTeam {
    fn new(index: usize, members: Vec<Player>) -> Self {
        let average_rating = average_rating(&members);
        DrawnTeam {
            label: format!("Team {}", index + 1),
            members,
            color: TeamColor::for_index(index),
            average_rating,
        }
    }

    fn push(&mut self, player: Player) {
        self.members.push(player);
        self.average_rating = average_rating(&self.members);
    }

    pub fn len(&self) -> usize { self.members.len() }
    pub fn is_empty(&self) -> bool { self.members.is_empty() }
}

// Rounds half away from zero, e.g. 2.25 -> 2.3 and 2.35 -> 2.4 (modulo binary representation).
pub fn round_to_tenths(value: f64) -> f64 { (value * 10.0).round() / 10.0 }

pub fn average_rating(players: &[Player]) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    let sum: u32 = players.iter().map(|p| p.rating.value() as u32).sum();
    round_to_tenths(sum as f64 / players.len() as f64)
}

// Randomly splits players into teams of exactly `team_size`. Players that don't fill a whole
// team are then dealt one by one to the first, second, ... team. Returns no teams if there
// are fewer than `team_size` players.
pub fn partition<R: Rng + ?Sized>(
    players: &[Player], team_size: usize, rng: &mut R,
) -> Vec<DrawnTeam> {
    if team_size == 0 || players.len() < team_size {
        return Vec::new();
    }
    let num_teams = players.len() / team_size;

    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);
    let remainder = shuffled.split_off(num_teams * team_size);

    let mut teams: Vec<DrawnTeam> = shuffled
        .chunks_exact(team_size)
        .enumerate()
        .map(|(index, members)| DrawnTeam::new(index, members.to_vec()))
        .collect();
    for (index, player) in remainder.into_iter().enumerate() {
        teams[index % num_teams].push(player);
    }
    debug!(
        "Partitioned {} players into {} teams of {}",
        players.len(),
        teams.len(),
        team_size
    );
    teams
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DrawOutlook {
    Ready { teams: usize, extra_players: usize },
    NeedMorePlayers { have: usize, need: usize },
}

impl DrawOutlook {
    pub fn for_roster(num_players: usize, team_size: usize) -> Self {
        let team_size = team_size.max(1);
        if num_players < team_size {
            DrawOutlook::NeedMorePlayers { have: num_players, need: team_size }
        } else {
            DrawOutlook::Ready {
                teams: num_players / team_size,
                extra_players: num_players % team_size,
            }
        }
    }

    pub fn can_draw(self) -> bool { matches!(self, DrawOutlook::Ready { .. }) }
}
