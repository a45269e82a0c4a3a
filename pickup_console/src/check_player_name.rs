use anyhow::anyhow;

use pickup_teams::player::validate_player_name;


pub fn run(player_name: &str) -> anyhow::Result<()> {
    match validate_player_name(player_name) {
        Ok(_) => {
            println!("OK");
            Ok(())
        }
        Err(err) => Err(anyhow!("Invalid player name {:?}: {}", player_name, err)),
    }
}
