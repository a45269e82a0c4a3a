// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod calendar;
pub mod event;
pub mod known_players;
pub mod ledger;
pub mod organizer;
pub mod partition;
pub mod player;
pub mod roster;
pub mod rules;
pub mod tally;
pub mod test_util;
