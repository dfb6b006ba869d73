use chrono::NaiveDate;
use clap::Args;
use dayplan_core::Config;

#[derive(Args)]
pub struct ListArgs {
    /// Day to list (YYYY-MM-DD)
    #[arg(long, value_parser = super::parse_date)]
    pub date: NaiveDate,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = super::open(&config)?;
    let schedule = store.load_day(args.date)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    if schedule.is_empty() {
        println!("No events on {}", args.date);
        return Ok(());
    }
    println!("Date: {}", args.date);
    for event in schedule.events() {
        println!(
            " - {}  {:<8}  {}",
            event.interval(),
            event.class(),
            event.title()
        );
    }
    Ok(())
}
