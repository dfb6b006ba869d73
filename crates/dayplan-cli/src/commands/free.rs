use chrono::{Duration, NaiveDate};
use clap::Args;
use dayplan_core::{Config, Interval, TimeOfDay};

#[derive(Args)]
pub struct FreeArgs {
    /// Day to inspect (YYYY-MM-DD)
    #[arg(long, value_parser = super::parse_date)]
    pub date: NaiveDate,
    /// Only gaps starting at or after this time (e.g. 11, 1130, 11:30)
    #[arg(long)]
    pub from: Option<TimeOfDay>,
    /// Minimum gap length in minutes
    #[arg(long, default_value_t = 1)]
    pub min: u32,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: FreeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let bounds = config.day_bounds()?;
    let store = super::open(&config)?;
    let schedule = store.load_day(args.date)?;

    let from = args.from.unwrap_or(bounds.start()).on(args.date);
    let gaps: Vec<Interval> = schedule
        .free_intervals_on_or_after(from, Duration::minutes(i64::from(args.min.max(1))), bounds)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&gaps)?);
        return Ok(());
    }

    if gaps.is_empty() {
        println!("No free intervals on {} within {bounds}", args.date);
        return Ok(());
    }
    println!("Free slots on {}:", args.date);
    for gap in gaps {
        println!(" - {gap}");
    }
    Ok(())
}
