use anyhow::{Context, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pickup_teams::partition::{DrawOutlook, partition};
use pickup_teams::player::Rating;
use pickup_teams::roster::Roster;

use crate::command_parser::parse_player_spec;
use crate::tui;


pub struct DrawConfig {
    pub team_size: usize,
    // "Name" or "Name:rating".
    pub players: Vec<String>,
}

pub fn run(config: DrawConfig) -> anyhow::Result<()> {
    let mut roster = Roster::new();
    let mut use_ratings = false;
    for spec in &config.players {
        let (name, rating) =
            parse_player_spec(spec).with_context(|| format!("Bad player '{spec}'"))?;
        use_ratings |= rating.is_some();
        roster
            .add(&name, rating.unwrap_or(Rating::DEFAULT))
            .with_context(|| format!("Cannot add player '{spec}'"))?;
    }
    let team_size = config.team_size.max(1);
    let outlook = DrawOutlook::for_roster(roster.len(), team_size);
    if let DrawOutlook::NeedMorePlayers { .. } = outlook {
        bail!(tui::render_outlook(outlook, team_size));
    }
    println!("{}\n", tui::render_outlook(outlook, team_size));
    let teams = partition(roster.players(), team_size, &mut StdRng::from_os_rng());
    print!("{}", tui::render_teams(&teams, use_ratings));
    Ok(())
}
