use std::fmt::Display;

use time::{Duration, OffsetDateTime};

pub const EVENT_DURATION: Duration = Duration::hours(2);

/// The division a table belongs to, used as the event name prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum League {
    Pl,
    Pcl,
}

impl League {
    pub fn for_table(table: u32, premier_league_max_table: u32) -> League {
        if table <= premier_league_max_table {
            League::Pl
        } else {
            League::Pcl
        }
    }
}

impl Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            League::Pl => f.write_str("PL"),
            League::Pcl => f.write_str("PCL"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewScheduledEvent {
    pub name: String,
    pub description: String,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl NewScheduledEvent {
    pub fn for_match(
        league: League,
        table: u32,
        round: u32,
        players: &[String],
        start: OffsetDateTime,
        manual: bool,
    ) -> NewScheduledEvent {
        let scheduled_by = if manual {
            "Manually scheduled"
        } else {
            "Scheduled"
        };

        NewScheduledEvent {
            name: format!(
                "{league} - Table {table}, Round {round} - {}",
                players.join(", ")
            ),
            description: format!("{scheduled_by} by players for Table {table}, Round {round}."),
            start,
            end: start + EVENT_DURATION,
        }
    }
}

/// What the event sink reports back after creating an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedEvent {
    pub name: String,
}
