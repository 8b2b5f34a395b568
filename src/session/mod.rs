mod render;

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::{
    matching::{group_slots, parse_slots, MatchResult, Matcher},
    models::{rows_from_sheet, League, NewScheduledEvent, ScheduleRequest, TimeSlot},
    repository::{AvailabilitySource, EventSink},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Requested,
    DataFetched,
    Filtered,
    Rendered,
    AwaitingSelection,
    Scheduled,
    Failed,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Could not fetch data: {0}")]
    DataSource(String),
    #[error("{0}")]
    Validation(String),
    #[error("No availability found for table {table}, round {round}.")]
    NoData { table: u32, round: u32 },
    #[error("Could not create event: {0}")]
    EventCreation(String),
}

#[derive(Clone, Copy, Debug)]
pub struct SessionSettings {
    pub partial_match_shortfall: usize,
    pub premier_league_max_table: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            partial_match_shortfall: 1,
            premier_league_max_table: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerAvailability {
    pub player: String,
    /// Grouped ranges, Monday first.
    pub ranges: Vec<String>,
}

/// Everything needed to show the availability of a table and let the players pick a time.
#[derive(Clone, Debug)]
pub struct Proposal {
    pub table: u32,
    pub round: u32,
    pub league: League,
    pub players: Vec<PlayerAvailability>,
    pub outcome: MatchResult,
    pub shortfall: usize,
    /// The hours that can be picked directly, Monday first.
    pub options: Vec<TimeSlot>,
}

impl Proposal {
    pub fn offers_manual_entry(&self) -> bool {
        !matches!(self.outcome, MatchResult::Full(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledMatch {
    pub event_name: String,
    pub start: OffsetDateTime,
}

/// One `/availability` interaction, from fetching the sheet to a created event.
pub struct SchedulingSession {
    table: u32,
    round: u32,
    source: Arc<dyn AvailabilitySource>,
    sink: Arc<dyn EventSink>,
    settings: SessionSettings,
    state: SessionState,
    players: Vec<String>,
    options: Vec<TimeSlot>,
}

impl SchedulingSession {
    pub fn new(
        table: u32,
        round: u32,
        source: Arc<dyn AvailabilitySource>,
        sink: Arc<dyn EventSink>,
        settings: SessionSettings,
    ) -> SchedulingSession {
        SchedulingSession {
            table,
            round,
            source,
            sink,
            settings,
            state: SessionState::Requested,
            players: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_scheduled(&self) -> bool {
        self.state == SessionState::Scheduled
    }

    fn league(&self) -> League {
        League::for_table(self.table, self.settings.premier_league_max_table)
    }

    fn transition(&mut self, state: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn expect_state(&self, expected: SessionState) -> Result<(), SessionError> {
        match self.state {
            state if state == expected => Ok(()),
            SessionState::Scheduled => Err(SessionError::Validation(
                "This match has already been scheduled.".to_string(),
            )),
            state => Err(SessionError::Validation(format!(
                "This scheduling request can't continue (it is {state:?})."
            ))),
        }
    }

    /// Fetches and filters the availability rows and matches them.
    ///
    /// On success the session waits for a slot selection or a manual entry.
    #[tracing::instrument(skip(self), fields(table = self.table, round = self.round))]
    pub async fn prepare(&mut self) -> Result<Proposal, SessionError> {
        self.expect_state(SessionState::Requested)?;

        match self.try_prepare().await {
            Ok(proposal) => Ok(proposal),
            Err(err) => {
                warn!("Scheduling session failed: {err}");
                self.transition(SessionState::Failed);
                Err(err)
            }
        }
    }

    async fn try_prepare(&mut self) -> Result<Proposal, SessionError> {
        let values = self
            .source
            .fetch_rows()
            .await
            .map_err(|err| SessionError::DataSource(format!("{err:#}")))?;
        self.transition(SessionState::DataFetched);

        let request = ScheduleRequest::filter(self.table, self.round, rows_from_sheet(values));
        if request.is_empty() {
            return Err(SessionError::NoData {
                table: request.table,
                round: request.round,
            });
        }
        self.transition(SessionState::Filtered);

        let shortfall = self.settings.partial_match_shortfall;
        let outcome = Matcher::new(shortfall).match_request(&request);

        let players = request
            .rows
            .iter()
            .map(|row| PlayerAvailability {
                player: row.player.clone(),
                ranges: group_slots(&parse_slots(&row.raw_slots)),
            })
            .collect();

        let options: Vec<TimeSlot> = match &outcome {
            MatchResult::Full(common) => common.iter().copied().collect(),
            MatchResult::Partial(_) | MatchResult::None => Vec::new(),
        };

        self.players = request.player_names();
        self.options = options.clone();
        self.transition(SessionState::Rendered);

        let proposal = Proposal {
            table: self.table,
            round: self.round,
            league: self.league(),
            players,
            outcome,
            shortfall,
            options,
        };

        info!(
            "Proposing {} slots to {} players",
            proposal.options.len(),
            proposal.players.len()
        );
        self.transition(SessionState::AwaitingSelection);

        Ok(proposal)
    }

    /// Schedules the match at the next occurrence of one of the proposed slots.
    #[tracing::instrument(skip(self), fields(table = self.table, round = self.round))]
    pub async fn schedule_slot(
        &mut self,
        slot: TimeSlot,
        now: OffsetDateTime,
    ) -> Result<ScheduledMatch, SessionError> {
        self.expect_state(SessionState::AwaitingSelection)?;

        if !self.options.contains(&slot) {
            return Err(SessionError::Validation(format!(
                "{slot} is not one of the proposed time slots."
            )));
        }

        self.create_event(slot.next_occurrence(now), false).await
    }

    /// Schedules the match at an explicit instant, no matter what was proposed.
    #[tracing::instrument(skip(self), fields(table = self.table, round = self.round))]
    pub async fn schedule_manual(
        &mut self,
        start: OffsetDateTime,
    ) -> Result<ScheduledMatch, SessionError> {
        self.expect_state(SessionState::AwaitingSelection)?;

        self.create_event(start, true).await
    }

    async fn create_event(
        &mut self,
        start: OffsetDateTime,
        manual: bool,
    ) -> Result<ScheduledMatch, SessionError> {
        let event = NewScheduledEvent::for_match(
            self.league(),
            self.table,
            self.round,
            &self.players,
            start,
            manual,
        );

        match self.sink.create_event(event).await {
            Ok(created) => {
                info!("Match scheduled at {start}: {}", created.name);
                self.transition(SessionState::Scheduled);

                Ok(ScheduledMatch {
                    event_name: created.name,
                    start,
                })
            }
            Err(err) => {
                warn!("Could not create the event: {err:#}");
                Err(SessionError::EventCreation(format!("{err:#}")))
            }
        }
    }
}
