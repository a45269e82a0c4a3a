// Parses lines typed into the interactive session.

use std::fmt;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex_lite::Regex;
use strum::IntoEnumIterator;
use time::Date;

use pickup_teams::calendar::{DateError, parse_date};
use pickup_teams::event::OrganizerCommand;
use pickup_teams::player::{Rating, RatingError};
use pickup_teams::tally::Outcome;


#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand {
    Organizer(OrganizerCommand),
    Suggest { search_term: String },
    ShowLedger { date: Date },
    ShowDates,
    Show,
    Export,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    UnknownCommand(String),
    MissingArgument { command: String, argument: &'static str },
    UnexpectedArgument { command: String },
    BadNumber(String),
    BadRating(RatingError),
    BadDate(DateError),
    BadOutcome(String),
    BadSwitch(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(cmd) => {
                write!(f, "unknown command '{cmd}', type 'help' for the list")
            }
            CommandError::MissingArgument { command, argument } => {
                write!(f, "'{command}' needs {argument}")
            }
            CommandError::UnexpectedArgument { command } => {
                write!(f, "'{command}' does not take arguments")
            }
            CommandError::BadNumber(s) => write!(f, "'{s}' is not a valid list number"),
            CommandError::BadRating(err) => write!(f, "{err}"),
            CommandError::BadDate(err) => write!(f, "{err}"),
            CommandError::BadOutcome(s) => write!(
                f,
                "'{}' is not one of: {}",
                s,
                Outcome::iter().map(Outcome::counter_name).join(", ")
            ),
            CommandError::BadSwitch(s) => write!(f, "expected 'on' or 'off', got '{s}'"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<RatingError> for CommandError {
    fn from(err: RatingError) -> Self { CommandError::BadRating(err) }
}

impl From<DateError> for CommandError {
    fn from(err: DateError) -> Self { CommandError::BadDate(err) }
}

pub const HELP: &str = "\
Roster:
  add <name> [rating]      register a player (rating 1-5 is used when ratings are on)
  pick <name> [rating]     register a regular by their exact name
  suggest <text>           list regulars matching the text who are not registered yet
  remove <n>               remove player number n
  rate <n> <rating>        change the rating of player number n
  ratings on|off           use ratings or give everybody the default one
  clear                    remove all players
Teams:
  draw                     draw teams from the current list
  reset                    forget the drawn teams
Results:
  tally                    start counting results for the drawn teams
  win|tie|loss <n>         add one result for team n
  set <n> wins|draws|losses <count>
  winner                   pick the team of the week
  reset-tally              drop all results
Payments (date defaults to the next session):
  open [date]              start collecting for a session
  pay [date] <name>        mark or unmark a payment
  close [date]             finish collecting and load the payers into the list
  reopen [date]            allow editing payments again
  ledger [date]            show payments for a session
  dates                    list upcoming session dates
Other:
  show | export | help | quit";

// One-based list number typed by the user into a zero-based index.
fn parse_index(s: &str) -> Result<usize, CommandError> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::BadNumber(s.to_owned())),
    }
}

fn parse_rating(s: &str) -> Result<Rating, CommandError> {
    let value = s.parse::<i64>().map_err(|_| CommandError::BadNumber(s.to_owned()))?;
    Ok(Rating::try_from(value)?)
}

fn parse_outcome(s: &str) -> Result<Outcome, CommandError> {
    let lower = s.to_lowercase();
    let alias = match lower.as_str() {
        "w" | "win" => Some(Outcome::Win),
        "d" | "draw" | "tie" | "ties" => Some(Outcome::Draw),
        "l" | "loss" => Some(Outcome::Loss),
        _ => None,
    };
    alias
        .or_else(|| Outcome::iter().find(|outcome| outcome.counter_name() == lower))
        .ok_or_else(|| CommandError::BadOutcome(s.to_owned()))
}

// Splits an optional leading date off the rest of the arguments.
fn split_date(args: &str, default_date: Date) -> Result<(Date, &str), CommandError> {
    let (first, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    if first.contains('/') {
        Ok((parse_date(first)?, rest.trim()))
    } else {
        Ok((default_date, args))
    }
}

fn date_only(command: &str, args: &str, default_date: Date) -> Result<Date, CommandError> {
    let (date, rest) = split_date(args, default_date)?;
    if !rest.is_empty() {
        return Err(CommandError::UnexpectedArgument { command: command.to_owned() });
    }
    Ok(date)
}

// Name followed by an optional one-digit rating: "Pedro Gordão 4". Longer numbers are part of
// the name, as in "Jogador 10".
pub fn parse_name_and_rating(s: &str) -> Result<(String, Option<Rating>), CommandError> {
    lazy_static! {
        static ref NAME_RATING_RE: Regex = Regex::new(r"^(.*?)\s+(-?[0-9])$").unwrap();
    }
    let s = s.trim();
    match NAME_RATING_RE.captures(s) {
        Some(cap) => Ok((cap[1].to_owned(), Some(parse_rating(&cap[2])?))),
        None => Ok((s.to_owned(), None)),
    }
}

// Player as given on the command line: "Name" or "Name:rating".
pub fn parse_player_spec(s: &str) -> Result<(String, Option<Rating>), CommandError> {
    match s.rsplit_once(':') {
        Some((name, rating)) => Ok((name.trim().to_owned(), Some(parse_rating(rating.trim())?))),
        None => Ok((s.trim().to_owned(), None)),
    }
}

// `default_date` is used by payment commands typed without a date.
pub fn parse_command(line: &str, default_date: Date) -> Result<SessionCommand, CommandError> {
    use OrganizerCommand::*;
    let line = line.trim();
    let (command, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let args = args.trim();
    let command = command.to_lowercase();
    let missing = |argument| CommandError::MissingArgument { command: command.clone(), argument };
    let no_args = |cmd: SessionCommand| {
        if args.is_empty() {
            Ok(cmd)
        } else {
            Err(CommandError::UnexpectedArgument { command: command.clone() })
        }
    };
    let org = |cmd: OrganizerCommand| no_args(SessionCommand::Organizer(cmd));
    let parts: Vec<&str> = args.split_whitespace().collect();
    let cmd = match command.as_str() {
        "add" => {
            if args.is_empty() {
                return Err(missing("a player name"));
            }
            let (name, rating) = parse_name_and_rating(args)?;
            SessionCommand::Organizer(AddPlayer { name, rating })
        }
        "pick" => {
            if args.is_empty() {
                return Err(missing("a player name"));
            }
            let (name, rating) = parse_name_and_rating(args)?;
            SessionCommand::Organizer(AddSuggested { name, rating })
        }
        "suggest" => SessionCommand::Suggest { search_term: args.to_owned() },
        "remove" => match parts.as_slice() {
            [n] => SessionCommand::Organizer(RemovePlayer { index: parse_index(n)? }),
            _ => return Err(missing("a player number")),
        },
        "rate" => match parts.as_slice() {
            [n, rating] => SessionCommand::Organizer(UpdateRating {
                index: parse_index(n)?,
                rating: parse_rating(rating)?,
            }),
            _ => return Err(missing("a player number and a rating")),
        },
        "ratings" => {
            let enabled = match args.to_lowercase().as_str() {
                "on" => true,
                "off" => false,
                "" => return Err(missing("'on' or 'off'")),
                other => return Err(CommandError::BadSwitch(other.to_owned())),
            };
            SessionCommand::Organizer(SetUseRatings { enabled })
        }
        "clear" => org(ClearRoster)?,
        "draw" => org(DrawTeams)?,
        "reset" => org(ResetDraw)?,
        "tally" => org(StartTally)?,
        "win" | "tie" | "loss" => match parts.as_slice() {
            [n] => SessionCommand::Organizer(RecordResult {
                team_index: parse_index(n)?,
                outcome: parse_outcome(&command)?,
            }),
            _ => return Err(missing("a team number")),
        },
        "set" => match parts.as_slice() {
            [n, outcome, value] => SessionCommand::Organizer(SetTallyCount {
                team_index: parse_index(n)?,
                outcome: parse_outcome(outcome)?,
                value: value.parse().map_err(|_| CommandError::BadNumber((*value).to_owned()))?,
            }),
            _ => return Err(missing("a team number, a result kind and a count")),
        },
        "winner" => org(ComputeWinner)?,
        "reset-tally" => org(ResetTally)?,
        "open" => SessionCommand::Organizer(OpenCollection {
            date: date_only(&command, args, default_date)?,
        }),
        "pay" => {
            let (date, name) = split_date(args, default_date)?;
            if name.is_empty() {
                return Err(missing("a player name"));
            }
            SessionCommand::Organizer(TogglePayment { date, player_name: name.to_owned() })
        }
        "close" => SessionCommand::Organizer(CloseCollection {
            date: date_only(&command, args, default_date)?,
        }),
        "reopen" => SessionCommand::Organizer(ReopenCollection {
            date: date_only(&command, args, default_date)?,
        }),
        "ledger" => SessionCommand::ShowLedger { date: date_only(&command, args, default_date)? },
        "dates" => no_args(SessionCommand::ShowDates)?,
        "show" => no_args(SessionCommand::Show)?,
        "export" => no_args(SessionCommand::Export)?,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        _ => return Err(CommandError::UnknownCommand(command.clone())),
    };
    Ok(cmd)
}
