// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod tui;

mod app_config;
mod check_player_name;
mod command_parser;
mod dates_main;
mod draw_main;
mod session_main;

use std::path::PathBuf;

use anyhow::Context;
use app_config::AppConfig;
use clap::{Command, arg, value_parser};
use pickup_teams::calendar::parse_date;
use pickup_teams::rules::DEFAULT_TEAM_SIZE;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Pickup teams")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Organizes weekly pickup games: players, teams, results and payments")
        .subcommand_required(true)
        .subcommand(
            Command::new("draw")
                .about("Randomly splits the given players into teams")
                .arg(
                    arg!(-'n' --"team-size" <n> "Players per team [default: 5]")
                        .value_parser(value_parser!(usize)),
                )
                .arg(arg!(<players> ... "Players as \"Name\" or \"Name:rating\"")),
        )
        .subcommand(
            Command::new("dates")
                .about("Lists upcoming session dates")
                .arg(
                    arg!(-'c' --"count" <n> "Show at most this many dates")
                        .value_parser(value_parser!(usize)),
                )
                .arg(arg!(--"from" <date> "First date to consider, dd/mm/yyyy [default: today]"))
                .arg(
                    arg!([config_file] "Path to the configuration file: yaml-serialized AppConfig."),
                ),
        )
        .subcommand(
            Command::new("session").about("Runs an interactive session on stdin/stdout").arg(
                arg!([config_file] "Path to the configuration file: yaml-serialized AppConfig."),
            ),
        )
        .subcommand(
            Command::new("check-name")
                .about("Verifies whether a player name is valid (but not necessarily free).")
                .arg(arg!(<player_name> "Player name to check")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("draw", sub_matches)) => draw_main::run(draw_main::DrawConfig {
            team_size: sub_matches
                .get_one::<usize>("team-size")
                .copied()
                .unwrap_or(DEFAULT_TEAM_SIZE),
            players: sub_matches
                .get_many::<String>("players")
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
        }),
        Some(("dates", sub_matches)) => {
            let config = read_config(sub_matches.get_one::<String>("config_file"))?;
            let from = sub_matches
                .get_one::<String>("from")
                .map(|s| parse_date(s))
                .transpose()
                .context("Bad --from date")?;
            dates_main::run(dates_main::DatesConfig {
                from,
                count: sub_matches.get_one::<usize>("count").copied(),
                weekday: config.rules.session_weekday,
                last_year: config.rules.last_session_year,
            })
        }
        Some(("session", sub_matches)) => {
            session_main::run(read_config(sub_matches.get_one::<String>("config_file"))?)
        }
        Some(("check-name", sub_matches)) => check_player_name::run(
            sub_matches.get_one::<String>("player_name").map_or("", String::as_str),
        ),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn read_config(filename: Option<&String>) -> anyhow::Result<AppConfig> {
    match filename {
        Some(filename) => app_config::read_config_file(&PathBuf::from(filename)),
        None => Ok(AppConfig::default()),
    }
}
