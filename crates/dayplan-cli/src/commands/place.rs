use chrono::NaiveDate;
use clap::Args;
use dayplan_core::{
    Config, ConfirmationGate, Decision, EventRecord, InteractiveGate, Interval,
    Placement, PlacementClass, PlacementEngine, PolicyGate, TimeOfDay,
};

#[derive(Args)]
pub struct PlaceArgs {
    /// Event title
    pub title: String,
    /// Day of the event (YYYY-MM-DD)
    #[arg(long, value_parser = super::parse_date)]
    pub date: NaiveDate,
    /// Start time (e.g. 11, 1130, 11:30)
    #[arg(long)]
    pub start: TimeOfDay,
    /// End time (e.g. 13, 1300, 13:00)
    #[arg(long)]
    pub end: TimeOfDay,
    /// Allow the event to be moved to the earliest free interval on conflict
    #[arg(long)]
    pub flexible: bool,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Override fixed-event conflicts without asking
    #[arg(long, conflicts_with = "no")]
    pub yes: bool,
    /// Refuse fixed-event conflicts without asking
    #[arg(long)]
    pub no: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PlaceArgs {
    fn candidate(&self) -> Result<EventRecord, dayplan_core::ValidationError> {
        let interval = Interval::new(self.start.on(self.date), self.end.on(self.date))?;
        let class = if self.flexible {
            PlacementClass::Flexible
        } else {
            PlacementClass::Fixed
        };
        Ok(EventRecord::new(self.title.clone(), interval, class)
            .with_description(self.description.clone()))
    }

    fn gate(&self, config: &Config) -> Box<dyn ConfirmationGate> {
        if self.yes {
            return Box::new(PolicyGate::always(Decision::Proceed));
        }
        if self.no {
            return Box::new(PolicyGate::always(Decision::Abort));
        }
        let gate = InteractiveGate::stdio();
        match config.confirmation_timeout() {
            Some(timeout) => Box::new(gate.with_timeout(timeout)),
            None => Box::new(gate),
        }
    }
}

pub fn run(args: PlaceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = PlacementEngine::new(config.day_bounds()?);
    let candidate = args.candidate()?;
    let store = super::open(&config)?;
    let mut gate = args.gate(&config);

    let placement = store.in_write_transaction(|store| {
        let mut schedule = store.load_day(args.date)?;
        let placement = engine.place(&candidate, &mut schedule, gate.as_mut())?;
        let placement = match placement {
            Placement::Accepted { event, overridden } => Placement::Accepted {
                event: store.commit(args.date, &event)?,
                overridden,
            },
            Placement::Relocated { event, requested } => Placement::Relocated {
                event: store.commit(args.date, &event)?,
                requested,
            },
            rejected @ Placement::Rejected { .. } => rejected,
        };
        Ok(placement)
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&placement)?);
    } else {
        println!("{placement}");
    }
    Ok(())
}
