use serde::{Deserialize, Serialize};
use time::Date;

use crate::partition::DrawnTeam;
use crate::player::Rating;
use crate::tally::{Outcome, TeamRecord};


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrganizerRejection {
    // Cannot add player: name is empty or otherwise unusable.
    InvalidPlayerName { reason: String },
    // Cannot add player: somebody with exactly this name is already registered.
    PlayerAlreadyExists { player_name: String },
    NoSuchPlayer { index: usize },
    NotEnoughPlayers { have: usize, need: usize },
    // A draw has been requested and the teams are not revealed yet.
    DrawInProgress,
    NoTeamsDrawn,
    TallyNotStarted,
    NoSuchTeam { team_index: usize },
    NoSuchCollection { date: Date },
    UnknownPlayer { player_name: String },
    CollectionCompleted { date: Date },
    NothingPaid { date: Date },
    CollectionNotCompleted { date: Date },
}

// Feedback for every command: either what has changed, or why nothing has.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrganizerNotice {
    Rejection(OrganizerRejection),
    PlayerAdded { player_name: String, rating: Rating },
    PlayerRemoved { player_name: String },
    PlayerUpdated { player_name: String, rating: Rating },
    UseRatingsChanged { enabled: bool },
    RosterCleared,
    DrawStarted,
    TeamsDrawn { teams: Vec<DrawnTeam> },
    DrawReset,
    PaidPlayersImported { count: usize },
    TallyStarted { num_teams: usize },
    TallyUpdated { record: TeamRecord },
    WeeklyWinner { record: TeamRecord },
    TallyReset,
    CollectionOpened { date: Date },
    PaymentToggled { date: Date, player_name: String, paid: bool, total_paid: usize },
    CollectionClosed { date: Date, paid_players: Vec<String>, total_amount: u32 },
    CollectionReopened { date: Date },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OrganizerCommand {
    // Both use the default rating when `rating` is `None` or when ratings are disabled.
    AddPlayer { name: String, rating: Option<Rating> },
    AddSuggested { name: String, rating: Option<Rating> },
    RemovePlayer { index: usize },
    UpdateRating { index: usize, rating: Rating },
    SetUseRatings { enabled: bool },
    ClearRoster,
    DrawTeams,
    ResetDraw,
    StartTally,
    SetTallyCount { team_index: usize, outcome: Outcome, value: i64 },
    RecordResult { team_index: usize, outcome: Outcome },
    ComputeWinner,
    ResetTally,
    OpenCollection { date: Date },
    TogglePayment { date: Date, player_name: String },
    CloseCollection { date: Date },
    ReopenCollection { date: Date },
}
