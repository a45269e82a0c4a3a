// Improvement potential. Redraw the whole screen in place (e.g. with `crossterm`) instead of
//   printing state blocks one after another.

use std::fmt;

use console::Style;
use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use time::Date;

use pickup_teams::calendar::format_date;
use pickup_teams::event::{OrganizerNotice, OrganizerRejection};
use pickup_teams::ledger::{Collection, CollectionStatus, Ledger};
use pickup_teams::organizer::OrganizerState;
use pickup_teams::partition::{DrawOutlook, DrawnTeam};
use pickup_teams::player::{Rating, TeamColor};
use pickup_teams::roster::Roster;
use pickup_teams::tally::WeeklyTally;


fn team_styles() -> EnumMap<TeamColor, Style> {
    enum_map! {
        TeamColor::A => Style::new().green().bold(),
        TeamColor::B => Style::new().blue().bold(),
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 { format!("{count} {word}") } else { format!("{count} {word}s") }
}

pub fn render_stars(rating: Rating) -> String {
    let filled = usize::from(rating.value());
    let empty = usize::from(Rating::MAX.value()) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

pub fn render_error(message: impl fmt::Display) -> String {
    Style::new().red().apply_to(message).to_string()
}

pub fn render_roster(roster: &Roster, use_ratings: bool) -> String {
    if roster.is_empty() {
        return "No players yet.\n".to_owned();
    }
    let mut ret = format!("Players ({}):\n", roster.len());
    for (idx, player) in roster.iter().enumerate() {
        let line = format!("  {:>2}. {}", idx + 1, player.name);
        if use_ratings {
            ret.push_str(&format!("{} {}\n", line, render_stars(player.rating)));
        } else {
            ret.push_str(&format!("{line}\n"));
        }
    }
    ret
}

pub fn render_outlook(outlook: DrawOutlook, team_size: usize) -> String {
    match outlook {
        DrawOutlook::Ready { teams, extra_players: 0 } => {
            format!("{} of {}", plural(teams, "team"), team_size)
        }
        DrawOutlook::Ready { teams, extra_players } => format!(
            "{} of {} + {}",
            plural(teams, "team"),
            team_size,
            plural(extra_players, "extra player")
        ),
        DrawOutlook::NeedMorePlayers { have, need } => {
            format!("Add at least {need} players to draw ({have}/{need})")
        }
    }
}

pub fn render_teams(teams: &[DrawnTeam], use_ratings: bool) -> String {
    let styles = team_styles();
    teams
        .iter()
        .map(|team| {
            let header = if use_ratings {
                format!("{} ({:.1}★)", team.label, team.average_rating)
            } else {
                team.label.clone()
            };
            let members = team.members.iter().map(|p| format!("  • {}", p.name)).join("\n");
            format!("{}\n{}\n", styles[team.color].apply_to(header), members)
        })
        .join("\n")
}

pub fn render_standings(tally: &WeeklyTally) -> String {
    if tally.is_empty() {
        return "Results are not being counted.\n".to_owned();
    }
    let winner_idx = tally.winner().map(|r| r.team_index);
    let mut ret = String::new();
    for (pos, record) in tally.standings().into_iter().enumerate() {
        let line = format!(
            "{}. {}  {}W {}D {}L  {}",
            pos + 1,
            record.label,
            record.wins,
            record.draws,
            record.losses,
            plural(record.points() as usize, "pt"),
        );
        if winner_idx == Some(record.team_index) {
            ret.push_str(&format!("{}  🏆\n", Style::new().yellow().bold().apply_to(line)));
        } else {
            ret.push_str(&format!("{line}\n"));
        }
    }
    ret
}

fn render_status(status: CollectionStatus) -> &'static str {
    match status {
        CollectionStatus::Open => "open",
        CollectionStatus::Completed => "closed",
    }
}

pub fn render_collection(collection: &Collection, fee_per_player: u32, currency: &str) -> String {
    let mut ret = format!(
        "Payments for {} ({}): {} paid, {} {}\n",
        format_date(collection.date),
        render_status(collection.status()),
        collection.total_paid(),
        currency,
        collection.total_amount(fee_per_player),
    );
    for payment in &collection.payments {
        let mark = if payment.paid {
            Style::new().green().apply_to("[x]")
        } else {
            Style::new().dim().apply_to("[ ]")
        };
        ret.push_str(&format!("  {} {}\n", mark, payment.name));
    }
    ret
}

pub fn render_ledger_summary(ledger: &Ledger, fee_per_player: u32, currency: &str) -> String {
    let lines = ledger
        .collections()
        .map(|c| {
            format!(
                "  {}  {:<6}  {}  {} {}",
                format_date(c.date),
                render_status(c.status()),
                plural(c.total_paid(), "payment"),
                currency,
                c.total_amount(fee_per_player),
            )
        })
        .collect_vec();
    if lines.is_empty() {
        "No collections yet.\n".to_owned()
    } else {
        format!("Collections:\n{}\n", lines.join("\n"))
    }
}

pub fn render_dates(dates: &[Date]) -> String {
    if dates.is_empty() {
        return "No more sessions this season.\n".to_owned();
    }
    dates.iter().map(|&d| format!("{} {}\n", format_date(d), d.weekday())).collect()
}

pub fn render_state(state: &OrganizerState, currency: &str) -> String {
    let rules = state.rules();
    let mut sections = vec![
        render_roster(state.roster(), rules.use_ratings),
        format!("{}\n", render_outlook(state.draw_outlook(), rules.effective_team_size())),
    ];
    if state.is_drawing() {
        sections.push("Drawing teams...\n".to_owned());
    } else if state.is_drawn() {
        sections.push(render_teams(state.teams(), rules.use_ratings));
    }
    if !state.tally().is_empty() {
        sections.push(render_standings(state.tally()));
    }
    sections.push(render_ledger_summary(state.ledger(), rules.fee_per_player, currency));
    sections.join("\n")
}

pub fn rejection_message(rejection: &OrganizerRejection) -> String {
    use OrganizerRejection::*;
    match rejection {
        InvalidPlayerName { reason } => format!("Cannot add player: {reason}"),
        PlayerAlreadyExists { player_name } => format!("{player_name} is already on the list"),
        NoSuchPlayer { index } => format!("There is no player #{}", index + 1),
        NotEnoughPlayers { have, need } => {
            format!("Add at least {need} players to draw ({have}/{need})")
        }
        DrawInProgress => "Teams are being drawn already".to_owned(),
        NoTeamsDrawn => "Draw the teams first".to_owned(),
        TallyNotStarted => "Start the tally first".to_owned(),
        NoSuchTeam { team_index } => format!("There is no team #{}", team_index + 1),
        NoSuchCollection { date } => {
            format!("No collection for {}, open it first", format_date(*date))
        }
        UnknownPlayer { player_name } => format!("{player_name} is not a regular"),
        CollectionCompleted { date } => {
            format!("Collection for {} is closed, reopen it to edit", format_date(*date))
        }
        NothingPaid { date } => format!("Nobody has paid for {} yet", format_date(*date)),
        CollectionNotCompleted { date } => {
            format!("Collection for {} is still open", format_date(*date))
        }
    }
}

pub fn render_notice(notice: &OrganizerNotice, use_ratings: bool, currency: &str) -> String {
    use OrganizerNotice::*;
    match notice {
        Rejection(rejection) => render_error(rejection_message(rejection)),
        PlayerAdded { player_name, rating } => {
            if use_ratings {
                format!("{player_name} added with {}", plural(rating.value().into(), "star"))
            } else {
                format!("{player_name} added")
            }
        }
        PlayerRemoved { player_name } => format!("{player_name} removed"),
        PlayerUpdated { player_name, rating } => {
            format!("{player_name} now has {}", plural(rating.value().into(), "star"))
        }
        UseRatingsChanged { enabled: true } => "Ratings are on".to_owned(),
        UseRatingsChanged { enabled: false } => "Ratings are off".to_owned(),
        RosterCleared => "All players removed".to_owned(),
        DrawStarted => "Drawing teams...".to_owned(),
        TeamsDrawn { teams } => format!("Teams drawn!\n\n{}", render_teams(teams, use_ratings)),
        DrawReset => "Draw reset, you can draw again".to_owned(),
        PaidPlayersImported { count } => {
            format!("{} who paid loaded into the list", plural(*count, "player"))
        }
        TallyStarted { num_teams } => {
            format!("{} ready to record results", plural(*num_teams, "team"))
        }
        TallyUpdated { record } => format!(
            "{}: {}W {}D {}L, {}",
            record.label,
            record.wins,
            record.draws,
            record.losses,
            plural(record.points() as usize, "pt"),
        ),
        WeeklyWinner { record } => {
            let message = format!(
                "🏆 Team of the week: {} with {} ({}W {}D {}L)",
                record.label,
                plural(record.points() as usize, "point"),
                record.wins,
                record.draws,
                record.losses,
            );
            Style::new().yellow().bold().apply_to(message).to_string()
        }
        TallyReset => "All results cleared".to_owned(),
        CollectionOpened { date } => format!("Collecting for {}", format_date(*date)),
        PaymentToggled { date, player_name, paid, total_paid } => format!(
            "{} {} for {} ({} paid so far)",
            player_name,
            if *paid { "paid" } else { "has not paid" },
            format_date(*date),
            total_paid,
        ),
        CollectionClosed { date, paid_players, total_amount } => format!(
            "Collection for {} closed: {} paid, {} {}",
            format_date(*date),
            plural(paid_players.len(), "player"),
            currency,
            total_amount,
        ),
        CollectionReopened { date } => {
            format!("You can edit payments for {} again", format_date(*date))
        }
    }
}
