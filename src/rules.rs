use std::time::Duration;

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use time::Weekday;

use crate::player::Rating;


pub const DEFAULT_TEAM_SIZE: usize = 5;
pub const FEE_PER_PLAYER: u32 = 10;

const_assert!(DEFAULT_TEAM_SIZE > 0);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRules {
    pub team_size: usize,
    // Amount each participant pays per session, in whole currency units.
    pub fee_per_player: u32,
    // Rating given to players added while ratings are disabled, and to players imported
    // from a closed collection.
    pub default_rating: Rating,
    pub use_ratings: bool,
    pub session_weekday: Weekday,
    // Session dates are generated up to and including the last day of this year.
    pub last_session_year: i32,
    // Pause between requesting a draw and revealing the teams.
    #[serde(with = "humantime_serde")]
    pub draw_delay: Duration,
}

impl SessionRules {
    pub fn pelada() -> Self {
        SessionRules {
            team_size: DEFAULT_TEAM_SIZE,
            fee_per_player: FEE_PER_PLAYER,
            default_rating: Rating::DEFAULT,
            use_ratings: false,
            session_weekday: Weekday::Tuesday,
            last_session_year: 2027,
            draw_delay: Duration::from_millis(1500),
        }
    }

    // Never zero, even with a hand-edited config.
    pub fn effective_team_size(&self) -> usize { self.team_size.max(1) }
}

impl Default for SessionRules {
    fn default() -> Self { Self::pelada() }
}
