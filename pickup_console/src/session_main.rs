use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use log::warn;
use time::Date;

use pickup_teams::calendar::{next_session_date, session_dates, today_utc};
use pickup_teams::event::{OrganizerCommand, OrganizerNotice};
use pickup_teams::organizer::{IncomingEvent, OrganizerState};

use crate::app_config::AppConfig;
use crate::command_parser::{self, HELP, SessionCommand};
use crate::tui;


const TICK_INTERVAL: Duration = Duration::from_millis(100);

enum SessionEvent {
    Input(String),
    InputClosed,
    Tick,
}

fn default_date(state: &OrganizerState, today: Date) -> Date {
    next_session_date(today, state.rules().session_weekday).unwrap_or(today)
}

// Payments for the upcoming session can be marked right away.
fn open_upcoming_collection(
    state: &mut OrganizerState, today: Date, now: Instant,
) -> Vec<OrganizerNotice> {
    let date = default_date(state, today);
    state.apply_event(IncomingEvent::Command(OrganizerCommand::OpenCollection { date }), now)
}

// Handles commands that only read the state. Returns `false` when the session should end.
fn show(
    command: SessionCommand, state: &OrganizerState, currency: &str,
) -> anyhow::Result<bool> {
    let rules = state.rules();
    match command {
        SessionCommand::Organizer(_) => {}
        SessionCommand::Suggest { search_term } => {
            let suggestions = state.suggestions(&search_term);
            if suggestions.is_empty() {
                println!("No matching regulars");
            } else {
                println!("{}", suggestions.join(", "));
            }
        }
        SessionCommand::ShowLedger { date } => match state.ledger().collection(date) {
            Some(collection) => {
                print!("{}", tui::render_collection(collection, rules.fee_per_player, currency))
            }
            None => println!("No collection for this date"),
        },
        SessionCommand::ShowDates => {
            let dates = session_dates(today_utc(), rules.session_weekday, rules.last_session_year);
            print!("{}", tui::render_dates(&dates));
        }
        SessionCommand::Show => print!("{}", tui::render_state(state, currency)),
        SessionCommand::Export => {
            let json = serde_json::to_string_pretty(&state.snapshot())
                .context("Serializing session")?;
            println!("{json}");
        }
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let AppConfig { rules, known_players, currency } = config;
    let mut state = OrganizerState::new(rules, known_players);

    let (tx, rx) = mpsc::channel();
    let tx_input = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx_input.send(SessionEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    warn!("Cannot read input: {}", err);
                    break;
                }
            }
        }
        tx_input.send(SessionEvent::InputClosed).ok();
    });
    thread::spawn(move || {
        while tx_tick.send(SessionEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    println!("Type 'help' for the list of commands.");
    for notice in open_upcoming_collection(&mut state, today_utc(), Instant::now()) {
        println!("{}", tui::render_notice(&notice, state.rules().use_ratings, &currency));
    }
    for event in rx {
        let now = Instant::now();
        let notices = match event {
            SessionEvent::Input(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let default_date = default_date(&state, today_utc());
                match command_parser::parse_command(&line, default_date) {
                    Ok(SessionCommand::Organizer(command)) => {
                        state.apply_event(IncomingEvent::Command(command), now)
                    }
                    Ok(command) => {
                        if !show(command, &state, &currency)? {
                            return Ok(());
                        }
                        state.apply_event(IncomingEvent::Tick, now)
                    }
                    Err(err) => {
                        println!("{}", tui::render_error(err));
                        Vec::new()
                    }
                }
            }
            SessionEvent::InputClosed => return Ok(()),
            SessionEvent::Tick => state.apply_event(IncomingEvent::Tick, now),
        };
        let use_ratings = state.rules().use_ratings;
        for notice in &notices {
            println!("{}", tui::render_notice(notice, use_ratings, &currency));
        }
    }
    bail!("Unexpected end of events stream");
}
