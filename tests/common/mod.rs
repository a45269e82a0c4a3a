// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::time::{Duration, Instant};

use itertools::Itertools;
use pickup_teams::event::{OrganizerCommand, OrganizerNotice};
use pickup_teams::known_players::KnownPlayers;
use pickup_teams::organizer::{IncomingEvent, OrganizerState};
use pickup_teams::partition::DrawnTeam;
use pickup_teams::player::Player;
use pickup_teams::rules::SessionRules;
use pickup_teams::test_util::deterministic_rng;


#[allow(dead_code)]
pub fn sorted_names<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<String> {
    players.into_iter().map(|p| p.name.clone()).sorted().collect()
}

#[allow(dead_code)]
pub fn all_members(teams: &[DrawnTeam]) -> Vec<String> {
    sorted_names(teams.iter().flat_map(|t| t.members.iter()))
}

#[allow(dead_code)]
pub fn team_sizes(teams: &[DrawnTeam]) -> Vec<usize> { teams.iter().map(|t| t.len()).collect() }


// Drives `OrganizerState` with a controllable clock.
pub struct Organizer {
    start: Instant,
    elapsed: Duration,
    pub state: OrganizerState,
}

#[allow(dead_code)]
impl Organizer {
    pub fn new(rules: SessionRules) -> Self {
        Organizer {
            start: Instant::now(),
            elapsed: Duration::ZERO,
            state: OrganizerState::with_rng(rules, KnownPlayers::pelada(), deterministic_rng()),
        }
    }

    // Default rules, but teams are revealed immediately.
    pub fn instant_draw() -> Self {
        Self::new(SessionRules { draw_delay: Duration::ZERO, ..SessionRules::pelada() })
    }

    pub fn now(&self) -> Instant { self.start + self.elapsed }

    pub fn advance(&mut self, duration: Duration) -> Vec<OrganizerNotice> {
        self.elapsed += duration;
        let now = self.now();
        self.state.apply_event(IncomingEvent::Tick, now)
    }

    pub fn send(&mut self, command: OrganizerCommand) -> Vec<OrganizerNotice> {
        let now = self.now();
        self.state.apply_event(IncomingEvent::Command(command), now)
    }

    pub fn add_players(&mut self, names: &[&str]) {
        for name in names {
            let notices = self.send(OrganizerCommand::AddPlayer {
                name: (*name).to_owned(),
                rating: None,
            });
            assert!(
                matches!(notices.as_slice(), [OrganizerNotice::PlayerAdded { .. }]),
                "{notices:?}"
            );
        }
    }

    pub fn add_numbered_players(&mut self, count: usize) {
        let names = (1..=count).map(|i| format!("Player {i}")).collect_vec();
        self.add_players(&names.iter().map(String::as_str).collect_vec());
    }
}
