use std::cmp::Reverse;
use std::fmt;

use derive_new::new;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::partition::DrawnTeam;
use crate::player::Player;


pub const POINTS_PER_WIN: u32 = 3;
pub const POINTS_PER_DRAW: u32 = 1;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    // Name of the matching `TeamRecord` counter.
    pub fn counter_name(self) -> &'static str {
        match self {
            Outcome::Win => "wins",
            Outcome::Draw => "draws",
            Outcome::Loss => "losses",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TallyError {
    NoTeams,
    NoSuchTeam { team_index: usize },
}

impl fmt::Display for TallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallyError::NoTeams => write!(f, "no teams to rank"),
            TallyError::NoSuchTeam { team_index } => {
                write!(f, "there is no team #{}", team_index + 1)
            }
        }
    }
}

impl std::error::Error for TallyError {}


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct TeamRecord {
    pub team_index: usize,
    pub label: String,
    pub members: Vec<Player>,
    #[new(default)]
    pub wins: u32,
    #[new(default)]
    pub draws: u32,
    #[new(default)]
    pub losses: u32,
}

impl TeamRecord {
    // Saturating: counters accept any `u32`.
    pub fn points(&self) -> u32 {
        self.wins
            .saturating_mul(POINTS_PER_WIN)
            .saturating_add(self.draws.saturating_mul(POINTS_PER_DRAW))
    }
    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.draws).saturating_add(self.losses)
    }

    pub fn count(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Win => self.wins,
            Outcome::Draw => self.draws,
            Outcome::Loss => self.losses,
        }
    }

    fn count_mut(&mut self, outcome: Outcome) -> &mut u32 {
        match outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Draw => &mut self.draws,
            Outcome::Loss => &mut self.losses,
        }
    }

    fn ranking_key(&self) -> Reverse<(u32, u32, u32)> {
        Reverse((self.points(), self.wins, self.games_played()))
    }
}


// Results of the week for the currently drawn teams.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTally {
    records: Vec<TeamRecord>,
    // Index into `records`. Cleared whenever results change.
    winner: Option<usize>,
}

impl WeeklyTally {
    pub fn from_teams(teams: &[DrawnTeam]) -> Self {
        let records = teams
            .iter()
            .enumerate()
            .map(|(index, team)| TeamRecord::new(index, team.label.clone(), team.members.clone()))
            .collect();
        WeeklyTally { records, winner: None }
    }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[TeamRecord] { &self.records }
    pub fn record(&self, team_index: usize) -> Option<&TeamRecord> {
        self.records.get(team_index)
    }
    pub fn winner(&self) -> Option<&TeamRecord> {
        self.winner.and_then(|idx| self.records.get(idx))
    }

    // Sets a counter. Negative values are clamped to zero.
    pub fn set_count(
        &mut self, team_index: usize, outcome: Outcome, value: i64,
    ) -> Result<&TeamRecord, TallyError> {
        let record = self
            .records
            .get_mut(team_index)
            .ok_or(TallyError::NoSuchTeam { team_index })?;
        *record.count_mut(outcome) = value.clamp(0, u32::MAX as i64) as u32;
        self.winner = None;
        Ok(&self.records[team_index])
    }

    pub fn add_result(
        &mut self, team_index: usize, outcome: Outcome,
    ) -> Result<&TeamRecord, TallyError> {
        let current = self
            .records
            .get(team_index)
            .ok_or(TallyError::NoSuchTeam { team_index })?
            .count(outcome);
        self.set_count(team_index, outcome, current as i64 + 1)
    }

    // Best team first: more points, then more wins, then more games played. Teams that are
    // still level keep their draw order.
    pub fn standings(&self) -> Vec<&TeamRecord> {
        self.records.iter().sorted_by_key(|r| r.ranking_key()).collect()
    }

    pub fn compute_winner(&mut self) -> Result<&TeamRecord, TallyError> {
        let winner_idx = self
            .records
            .iter()
            .enumerate()
            .sorted_by_key(|(_, r)| r.ranking_key())
            .map(|(idx, _)| idx)
            .next()
            .ok_or(TallyError::NoTeams)?;
        self.winner = Some(winner_idx);
        let winner = &self.records[winner_idx];
        info!("Team of the week: {} with {} points", winner.label, winner.points());
        Ok(winner)
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.winner = None;
    }
}
