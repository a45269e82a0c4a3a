use time::{Date, Weekday};

use pickup_teams::calendar::{session_dates, today_utc};

use crate::tui;


pub struct DatesConfig {
    pub from: Option<Date>,
    pub count: Option<usize>,
    pub weekday: Weekday,
    pub last_year: i32,
}

pub fn run(config: DatesConfig) -> anyhow::Result<()> {
    let from = config.from.unwrap_or_else(today_utc);
    let mut dates = session_dates(from, config.weekday, config.last_year);
    if let Some(count) = config.count {
        dates.truncate(count);
    }
    print!("{}", tui::render_dates(&dates));
    Ok(())
}
