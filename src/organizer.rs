use std::time::Instant;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::event::{OrganizerCommand, OrganizerNotice, OrganizerRejection};
use crate::known_players::KnownPlayers;
use crate::ledger::{Ledger, LedgerError};
use crate::partition::{partition, DrawOutlook, DrawnTeam};
use crate::player::{Player, Rating};
use crate::roster::{Roster, RosterError};
use crate::rules::SessionRules;
use crate::tally::{TallyError, WeeklyTally};


#[derive(Debug)]
pub enum IncomingEvent {
    Command(OrganizerCommand),
    Tick,
}

// A draw that has been requested but not revealed yet. The roster is captured at request
// time: later roster edits do not affect the result.
#[derive(Clone, Debug)]
struct PendingDraw {
    players: Vec<Player>,
    due: Instant,
}

impl From<RosterError> for OrganizerRejection {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::InvalidName(name_err) => {
                OrganizerRejection::InvalidPlayerName { reason: name_err.to_string() }
            }
            RosterError::DuplicateName { name } => {
                OrganizerRejection::PlayerAlreadyExists { player_name: name }
            }
            RosterError::NoSuchPlayer { index } => OrganizerRejection::NoSuchPlayer { index },
        }
    }
}

impl From<TallyError> for OrganizerRejection {
    fn from(err: TallyError) -> Self {
        match err {
            TallyError::NoTeams => OrganizerRejection::TallyNotStarted,
            TallyError::NoSuchTeam { team_index } => OrganizerRejection::NoSuchTeam { team_index },
        }
    }
}

impl From<LedgerError> for OrganizerRejection {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NoSuchCollection { date } => OrganizerRejection::NoSuchCollection { date },
            LedgerError::UnknownPlayer { name } => {
                OrganizerRejection::UnknownPlayer { player_name: name }
            }
            LedgerError::AlreadyCompleted { date } => {
                OrganizerRejection::CollectionCompleted { date }
            }
            LedgerError::NothingPaid { date } => OrganizerRejection::NothingPaid { date },
            LedgerError::NotCompleted { date } => {
                OrganizerRejection::CollectionNotCompleted { date }
            }
        }
    }
}


#[derive(Serialize)]
pub struct OrganizerSnapshot<'a> {
    pub rules: &'a SessionRules,
    pub roster: &'a Roster,
    pub teams: &'a [DrawnTeam],
    pub is_drawing: bool,
    pub tally: &'a WeeklyTally,
    pub ledger: &'a Ledger,
}

// Owns everything a session organizer edits. Every user action goes through `apply_event`,
// which either applies it in full or rejects it without touching the state.
pub struct OrganizerState {
    rules: SessionRules,
    roster: Roster,
    teams: Vec<DrawnTeam>,
    pending_draw: Option<PendingDraw>,
    tally: WeeklyTally,
    ledger: Ledger,
    rng: StdRng,
}

impl OrganizerState {
    pub fn new(rules: SessionRules, known_players: KnownPlayers) -> Self {
        Self::with_rng(rules, known_players, StdRng::from_os_rng())
    }

    pub fn with_rng(rules: SessionRules, known_players: KnownPlayers, rng: StdRng) -> Self {
        OrganizerState {
            rules,
            roster: Roster::new(),
            teams: Vec::new(),
            pending_draw: None,
            tally: WeeklyTally::default(),
            ledger: Ledger::new(known_players),
            rng,
        }
    }

    pub fn rules(&self) -> &SessionRules { &self.rules }
    pub fn roster(&self) -> &Roster { &self.roster }
    pub fn teams(&self) -> &[DrawnTeam] { &self.teams }
    pub fn is_drawn(&self) -> bool { !self.teams.is_empty() }
    pub fn is_drawing(&self) -> bool { self.pending_draw.is_some() }
    pub fn draw_due(&self) -> Option<Instant> { self.pending_draw.as_ref().map(|d| d.due) }
    pub fn tally(&self) -> &WeeklyTally { &self.tally }
    pub fn ledger(&self) -> &Ledger { &self.ledger }
    pub fn known_players(&self) -> &KnownPlayers { self.ledger.known_players() }

    pub fn draw_outlook(&self) -> DrawOutlook {
        DrawOutlook::for_roster(self.roster.len(), self.rules.effective_team_size())
    }

    pub fn suggestions(&self, search_term: &str) -> Vec<&str> {
        self.roster.suggestions(self.ledger.known_players(), search_term)
    }

    pub fn snapshot(&self) -> OrganizerSnapshot<'_> {
        OrganizerSnapshot {
            rules: &self.rules,
            roster: &self.roster,
            teams: &self.teams,
            is_drawing: self.is_drawing(),
            tally: &self.tally,
            ledger: &self.ledger,
        }
    }

    pub fn apply_event(&mut self, event: IncomingEvent, now: Instant) -> Vec<OrganizerNotice> {
        let mut notices = match event {
            IncomingEvent::Command(command) => {
                let description = format!("{:?}", command);
                match self.apply_command(command, now) {
                    Ok(notices) => notices,
                    Err(rejection) => {
                        warn!("Rejected {}: {:?}", description, rejection);
                        vec![OrganizerNotice::Rejection(rejection)]
                    }
                }
            }
            IncomingEvent::Tick => Vec::new(),
        };
        // Any event can be the one that finds the draw deadline passed.
        notices.extend(self.resolve_pending_draw(now));
        notices
    }

    fn new_player_rating(&self, requested: Option<Rating>) -> Rating {
        match requested {
            Some(rating) if self.rules.use_ratings => rating,
            _ => self.rules.default_rating,
        }
    }

    fn apply_command(
        &mut self, command: OrganizerCommand, now: Instant,
    ) -> Result<Vec<OrganizerNotice>, OrganizerRejection> {
        use OrganizerCommand::*;
        match command {
            AddPlayer { name, rating } => {
                let rating = self.new_player_rating(rating);
                let player = self.roster.add(&name, rating)?;
                Ok(vec![OrganizerNotice::PlayerAdded {
                    player_name: player.name.clone(),
                    rating: player.rating,
                }])
            }
            AddSuggested { name, rating } => {
                if !self.ledger.known_players().contains(&name) {
                    return Err(OrganizerRejection::UnknownPlayer { player_name: name });
                }
                let rating = self.new_player_rating(rating);
                let player = self.roster.add(&name, rating)?;
                Ok(vec![OrganizerNotice::PlayerAdded {
                    player_name: player.name.clone(),
                    rating: player.rating,
                }])
            }
            RemovePlayer { index } => {
                let player = self.roster.remove(index)?;
                Ok(vec![OrganizerNotice::PlayerRemoved { player_name: player.name }])
            }
            UpdateRating { index, rating } => {
                let player = self.roster.update_rating(index, rating)?;
                Ok(vec![OrganizerNotice::PlayerUpdated {
                    player_name: player.name.clone(),
                    rating: player.rating,
                }])
            }
            SetUseRatings { enabled } => {
                self.rules.use_ratings = enabled;
                Ok(vec![OrganizerNotice::UseRatingsChanged { enabled }])
            }
            ClearRoster => {
                self.roster.clear();
                self.discard_teams();
                info!("Roster cleared");
                Ok(vec![OrganizerNotice::RosterCleared])
            }
            DrawTeams => {
                if self.pending_draw.is_some() {
                    return Err(OrganizerRejection::DrawInProgress);
                }
                if let DrawOutlook::NeedMorePlayers { have, need } = self.draw_outlook() {
                    return Err(OrganizerRejection::NotEnoughPlayers { have, need });
                }
                info!("Drawing teams from {} players", self.roster.len());
                self.pending_draw = Some(PendingDraw {
                    players: self.roster.players().to_vec(),
                    due: now + self.rules.draw_delay,
                });
                Ok(vec![OrganizerNotice::DrawStarted])
            }
            ResetDraw => {
                self.discard_teams();
                Ok(vec![OrganizerNotice::DrawReset])
            }
            StartTally => {
                if self.teams.is_empty() {
                    return Err(OrganizerRejection::NoTeamsDrawn);
                }
                self.tally = WeeklyTally::from_teams(&self.teams);
                Ok(vec![OrganizerNotice::TallyStarted { num_teams: self.teams.len() }])
            }
            SetTallyCount { team_index, outcome, value } => {
                self.check_tally_started()?;
                let record = self.tally.set_count(team_index, outcome, value)?;
                Ok(vec![OrganizerNotice::TallyUpdated { record: record.clone() }])
            }
            RecordResult { team_index, outcome } => {
                self.check_tally_started()?;
                let record = self.tally.add_result(team_index, outcome)?;
                Ok(vec![OrganizerNotice::TallyUpdated { record: record.clone() }])
            }
            ComputeWinner => {
                let record = self.tally.compute_winner()?;
                Ok(vec![OrganizerNotice::WeeklyWinner { record: record.clone() }])
            }
            ResetTally => {
                self.tally.reset();
                Ok(vec![OrganizerNotice::TallyReset])
            }
            OpenCollection { date } => {
                self.ledger.open(date);
                Ok(vec![OrganizerNotice::CollectionOpened { date }])
            }
            TogglePayment { date, player_name } => {
                let paid = self.ledger.toggle(date, &player_name)?;
                let total_paid = self.ledger.collection(date).map_or(0, |c| c.total_paid());
                Ok(vec![OrganizerNotice::PaymentToggled { date, player_name, paid, total_paid }])
            }
            CloseCollection { date } => {
                let paid_players = self.ledger.close(date)?;
                let total_amount = paid_players.len() as u32 * self.rules.fee_per_player;
                let count = self.roster.replace_with_names(
                    paid_players.iter().map(String::as_str),
                    self.rules.default_rating,
                );
                self.discard_teams();
                info!("Imported {} paid players into the roster", count);
                Ok(vec![
                    OrganizerNotice::CollectionClosed { date, paid_players, total_amount },
                    OrganizerNotice::PaidPlayersImported { count },
                ])
            }
            ReopenCollection { date } => {
                self.ledger.reopen(date)?;
                Ok(vec![OrganizerNotice::CollectionReopened { date }])
            }
        }
    }

    fn check_tally_started(&self) -> Result<(), OrganizerRejection> {
        if self.tally.is_empty() { Err(OrganizerRejection::TallyNotStarted) } else { Ok(()) }
    }

    fn discard_teams(&mut self) {
        if self.pending_draw.take().is_some() {
            info!("Pending draw cancelled");
        }
        self.teams.clear();
    }

    fn resolve_pending_draw(&mut self, now: Instant) -> Option<OrganizerNotice> {
        if self.pending_draw.as_ref().is_none_or(|draw| now < draw.due) {
            return None;
        }
        let draw = self.pending_draw.take()?;
        self.teams = partition(&draw.players, self.rules.effective_team_size(), &mut self.rng);
        info!("Teams drawn: {}", self.teams.len());
        Some(OrganizerNotice::TeamsDrawn { teams: self.teams.clone() })
    }
}
