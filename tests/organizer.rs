// Improvement potential. Cover serialization of the snapshot beyond a smoke test.

mod common;

use std::time::Duration;

use common::*;
use itertools::Itertools;
use pickup_teams::event::{OrganizerCommand, OrganizerNotice, OrganizerRejection};
use pickup_teams::partition::DrawOutlook;
use pickup_teams::player::Rating;
use pickup_teams::rules::SessionRules;
use pickup_teams::tally::Outcome;
use pretty_assertions::assert_eq;
use time::macros::date;


fn rejection(notices: &[OrganizerNotice]) -> Option<&OrganizerRejection> {
    match notices {
        [OrganizerNotice::Rejection(rejection)] => Some(rejection),
        _ => None,
    }
}

fn rating(value: u8) -> Rating { Rating::try_from(value).unwrap() }


#[test]
fn duplicate_name_is_rejected() {
    let mut org = Organizer::instant_draw();
    org.add_players(&["Rubens"]);
    let notices = org.send(OrganizerCommand::AddPlayer { name: "Rubens".to_owned(), rating: None });
    assert_eq!(
        rejection(&notices),
        Some(&OrganizerRejection::PlayerAlreadyExists { player_name: "Rubens".to_owned() })
    );
    // Exact match only: a different spelling is another player.
    org.add_players(&["rubens"]);
    assert_eq!(org.state.roster().len(), 2);
}

#[test]
fn blank_name_is_rejected() {
    let mut org = Organizer::instant_draw();
    let notices = org.send(OrganizerCommand::AddPlayer { name: "   ".to_owned(), rating: None });
    assert!(matches!(rejection(&notices), Some(OrganizerRejection::InvalidPlayerName { .. })));
    assert!(org.state.roster().is_empty());
}

#[test]
fn names_are_trimmed() {
    let mut org = Organizer::instant_draw();
    org.add_players(&["  Pato "]);
    assert_eq!(org.state.roster().players()[0].name, "Pato");
}

#[test]
fn ratings_ignored_unless_enabled() {
    let mut org = Organizer::instant_draw();
    org.send(OrganizerCommand::AddPlayer { name: "Ana".to_owned(), rating: Some(rating(5)) });
    assert_eq!(org.state.roster().players()[0].rating, Rating::DEFAULT);

    org.send(OrganizerCommand::SetUseRatings { enabled: true });
    org.send(OrganizerCommand::AddPlayer { name: "Bia".to_owned(), rating: Some(rating(5)) });
    assert_eq!(org.state.roster().players()[1].rating, Rating::MAX);
}

#[test]
fn picked_regulars_follow_rating_mode() {
    let mut org = Organizer::instant_draw();
    org.send(OrganizerCommand::AddSuggested { name: "Pato".to_owned(), rating: Some(rating(5)) });
    org.send(OrganizerCommand::SetUseRatings { enabled: true });
    org.send(OrganizerCommand::AddSuggested { name: "Barra".to_owned(), rating: Some(rating(5)) });
    org.send(OrganizerCommand::AddSuggested { name: "MTS".to_owned(), rating: None });
    assert_eq!(
        org.state.roster().iter().map(|p| (p.name.as_str(), p.rating)).collect_vec(),
        vec![("Pato", Rating::DEFAULT), ("Barra", Rating::MAX), ("MTS", Rating::DEFAULT)]
    );
}

#[test]
fn update_and_remove_players() {
    let mut org = Organizer::instant_draw();
    org.add_players(&["Ana", "Bia", "Caio"]);
    let notices = org.send(OrganizerCommand::UpdateRating { index: 1, rating: rating(1) });
    assert_eq!(
        notices,
        vec![OrganizerNotice::PlayerUpdated { player_name: "Bia".to_owned(), rating: rating(1) }]
    );
    let notices = org.send(OrganizerCommand::RemovePlayer { index: 0 });
    assert_eq!(notices, vec![OrganizerNotice::PlayerRemoved { player_name: "Ana".to_owned() }]);
    assert_eq!(sorted_names(org.state.roster().iter()), vec!["Bia", "Caio"]);

    let notices = org.send(OrganizerCommand::RemovePlayer { index: 5 });
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::NoSuchPlayer { index: 5 }));
}

#[test]
fn suggestions_skip_registered_players() {
    let mut org = Organizer::instant_draw();
    assert_eq!(org.state.suggestions("yuri"), vec!["Yuri Cocô", "Yuri nobre", "Yuri Moura"]);
    let notices = org.send(OrganizerCommand::AddSuggested {
        name: "Yuri nobre".to_owned(),
        rating: None,
    });
    assert!(matches!(notices.as_slice(), [OrganizerNotice::PlayerAdded { .. }]));
    // Case-insensitive: a manually typed "yuri moura" hides the suggestion too.
    org.add_players(&["yuri moura"]);
    assert_eq!(org.state.suggestions("yuri"), vec!["Yuri Cocô"]);

    let notices = org.send(OrganizerCommand::AddSuggested {
        name: "Nobody".to_owned(),
        rating: None,
    });
    assert_eq!(
        rejection(&notices),
        Some(&OrganizerRejection::UnknownPlayer { player_name: "Nobody".to_owned() })
    );
}

#[test]
fn draw_needs_full_team() {
    let mut org = Organizer::instant_draw();
    org.add_numbered_players(4);
    assert_eq!(org.state.draw_outlook(), DrawOutlook::NeedMorePlayers { have: 4, need: 5 });
    let notices = org.send(OrganizerCommand::DrawTeams);
    assert_eq!(
        rejection(&notices),
        Some(&OrganizerRejection::NotEnoughPlayers { have: 4, need: 5 })
    );
    assert!(!org.state.is_drawn());
}

#[test]
fn instant_draw() {
    let mut org = Organizer::instant_draw();
    org.add_numbered_players(12);
    let notices = org.send(OrganizerCommand::DrawTeams);
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0], OrganizerNotice::DrawStarted);
    let OrganizerNotice::TeamsDrawn { teams } = &notices[1] else {
        panic!("{notices:?}");
    };
    assert_eq!(team_sizes(teams), vec![6, 6]);
    assert_eq!(teams, org.state.teams());
    assert_eq!(all_members(teams), sorted_names(org.state.roster().iter()));
}

#[test]
fn delayed_draw() {
    let mut org = Organizer::new(SessionRules::pelada());
    org.add_numbered_players(10);
    assert_eq!(org.send(OrganizerCommand::DrawTeams), vec![OrganizerNotice::DrawStarted]);
    assert!(org.state.is_drawing());

    let notices = org.send(OrganizerCommand::DrawTeams);
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::DrawInProgress));

    assert!(org.advance(Duration::from_millis(1000)).is_empty());
    assert!(!org.state.is_drawn());
    let notices = org.advance(Duration::from_millis(500));
    assert!(matches!(notices.as_slice(), [OrganizerNotice::TeamsDrawn { .. }]));
    assert!(!org.state.is_drawing());
    assert_eq!(team_sizes(org.state.teams()), vec![5, 5]);
}

#[test]
fn draw_uses_roster_at_request_time() {
    let mut org = Organizer::new(SessionRules::pelada());
    org.add_numbered_players(5);
    org.send(OrganizerCommand::DrawTeams);
    org.add_players(&["Late"]);
    org.advance(Duration::from_secs(2));
    assert_eq!(team_sizes(org.state.teams()), vec![5]);
    assert!(!all_members(org.state.teams()).contains(&"Late".to_owned()));
}

#[test]
fn reset_cancels_pending_draw() {
    let mut org = Organizer::new(SessionRules::pelada());
    org.add_numbered_players(5);
    org.send(OrganizerCommand::DrawTeams);
    assert_eq!(org.send(OrganizerCommand::ResetDraw), vec![OrganizerNotice::DrawReset]);
    assert!(org.advance(Duration::from_secs(2)).is_empty());
    assert!(!org.state.is_drawn());
}

#[test]
fn clear_roster_drops_teams() {
    let mut org = Organizer::instant_draw();
    org.add_numbered_players(5);
    org.send(OrganizerCommand::DrawTeams);
    assert!(org.state.is_drawn());
    assert_eq!(org.send(OrganizerCommand::ClearRoster), vec![OrganizerNotice::RosterCleared]);
    assert!(org.state.roster().is_empty());
    assert!(!org.state.is_drawn());
}

#[test]
fn redraw_replaces_teams() {
    let mut org = Organizer::instant_draw();
    org.add_numbered_players(10);
    org.send(OrganizerCommand::DrawTeams);
    org.send(OrganizerCommand::RemovePlayer { index: 0 });
    org.send(OrganizerCommand::DrawTeams);
    assert_eq!(team_sizes(org.state.teams()), vec![9]);
}

#[test]
fn tally_requires_teams() {
    let mut org = Organizer::instant_draw();
    let notices = org.send(OrganizerCommand::StartTally);
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::NoTeamsDrawn));
    let notices =
        org.send(OrganizerCommand::RecordResult { team_index: 0, outcome: Outcome::Win });
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::TallyNotStarted));
    let notices = org.send(OrganizerCommand::ComputeWinner);
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::TallyNotStarted));
}

#[test]
fn weekly_winner() {
    let mut org = Organizer::instant_draw();
    org.add_numbered_players(10);
    org.send(OrganizerCommand::DrawTeams);
    assert_eq!(
        org.send(OrganizerCommand::StartTally),
        vec![OrganizerNotice::TallyStarted { num_teams: 2 }]
    );
    for (outcome, value) in [(Outcome::Win, 3), (Outcome::Draw, 1), (Outcome::Loss, 0)] {
        org.send(OrganizerCommand::SetTallyCount { team_index: 0, outcome, value });
    }
    for (outcome, value) in [(Outcome::Win, 3), (Outcome::Draw, 0), (Outcome::Loss, 1)] {
        org.send(OrganizerCommand::SetTallyCount { team_index: 1, outcome, value });
    }
    let notices = org.send(OrganizerCommand::ComputeWinner);
    let [OrganizerNotice::WeeklyWinner { record }] = notices.as_slice() else {
        panic!("{notices:?}");
    };
    assert_eq!(record.label, "Team 1");
    assert_eq!(record.points(), 10);
    assert_eq!(org.state.tally().winner(), Some(record));

    // Any change to the results invalidates the winner.
    org.send(OrganizerCommand::RecordResult { team_index: 1, outcome: Outcome::Win });
    assert_eq!(org.state.tally().winner(), None);

    let notices =
        org.send(OrganizerCommand::SetTallyCount { team_index: 7, outcome: Outcome::Win, value: 1 });
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::NoSuchTeam { team_index: 7 }));
}

#[test]
fn closing_collection_imports_paid_players() {
    let mut org = Organizer::instant_draw();
    let day = date!(2025 - 10 - 21);
    org.add_numbered_players(5);
    org.send(OrganizerCommand::DrawTeams);

    let notices = org.send(OrganizerCommand::CloseCollection { date: day });
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::NoSuchCollection { date: day }));

    org.send(OrganizerCommand::OpenCollection { date: day });
    let notices = org.send(OrganizerCommand::CloseCollection { date: day });
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::NothingPaid { date: day }));

    for name in ["Pato", "Rubens", "MTS"] {
        org.send(OrganizerCommand::TogglePayment { date: day, player_name: name.to_owned() });
    }
    let notices = org.send(OrganizerCommand::CloseCollection { date: day });
    assert_eq!(
        notices,
        vec![
            OrganizerNotice::CollectionClosed {
                date: day,
                // Known-player order, not toggle order.
                paid_players: vec!["Rubens".to_owned(), "Pato".to_owned(), "MTS".to_owned()],
                total_amount: 30,
            },
            OrganizerNotice::PaidPlayersImported { count: 3 },
        ]
    );
    assert_eq!(
        org.state.roster().iter().map(|p| (p.name.as_str(), p.rating)).collect_vec(),
        vec![("Rubens", Rating::DEFAULT), ("Pato", Rating::DEFAULT), ("MTS", Rating::DEFAULT)]
    );
    assert!(!org.state.is_drawn());

    let notices = org.send(OrganizerCommand::TogglePayment {
        date: day,
        player_name: "Barra".to_owned(),
    });
    assert_eq!(rejection(&notices), Some(&OrganizerRejection::CollectionCompleted { date: day }));

    assert_eq!(
        org.send(OrganizerCommand::ReopenCollection { date: day }),
        vec![OrganizerNotice::CollectionReopened { date: day }]
    );
    let notices = org.send(OrganizerCommand::TogglePayment {
        date: day,
        player_name: "Barra".to_owned(),
    });
    assert_eq!(
        notices,
        vec![OrganizerNotice::PaymentToggled {
            date: day,
            player_name: "Barra".to_owned(),
            paid: true,
            total_paid: 4,
        }]
    );
}

#[test]
fn snapshot_serializes() {
    let mut org = Organizer::instant_draw();
    org.add_numbered_players(6);
    org.send(OrganizerCommand::DrawTeams);
    org.send(OrganizerCommand::OpenCollection { date: date!(2025 - 10 - 21) });
    let json = serde_json::to_value(org.state.snapshot()).unwrap();
    assert_eq!(json["teams"].as_array().unwrap().len(), 1);
    assert_eq!(json["roster"]["players"].as_array().unwrap().len(), 6);
    assert_eq!(json["is_drawing"], false);
}
