use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serenity::{
    all::{CreateScheduledEvent, GuildId, ScheduledEventType, Timestamp},
    http::Http,
};
use time::OffsetDateTime;
use tracing::info;

use crate::{
    models::{CreatedEvent, NewScheduledEvent},
    utils::formatting::truncate,
};

use super::EventSink;

const EVENT_LOCATION: &str = "Online";
const MAX_EVENT_NAME_LENGTH: usize = 100;

/// Creates external, guild-only scheduled events in one guild.
pub struct GuildEventSink {
    http: Arc<Http>,
    guild: GuildId,
}

impl GuildEventSink {
    pub fn new(http: Arc<Http>, guild: GuildId) -> GuildEventSink {
        GuildEventSink { http, guild }
    }
}

fn to_timestamp(date_time: OffsetDateTime) -> anyhow::Result<Timestamp> {
    Timestamp::from_unix_timestamp(date_time.unix_timestamp())
        .map_err(|err| anyhow!("Invalid event time {date_time}: {err:?}"))
}

#[async_trait]
impl EventSink for GuildEventSink {
    #[tracing::instrument(skip(self), fields(guild = %self.guild))]
    async fn create_event(&self, event: NewScheduledEvent) -> anyhow::Result<CreatedEvent> {
        let builder = CreateScheduledEvent::new(
            ScheduledEventType::External,
            truncate(&event.name, MAX_EVENT_NAME_LENGTH),
            to_timestamp(event.start)?,
        )
        .end_time(to_timestamp(event.end)?)
        .description(event.description)
        .location(EVENT_LOCATION);

        let created = self
            .guild
            .create_scheduled_event(self.http.as_ref(), builder)
            .await?;

        info!("Created scheduled event {} ({})", created.name, created.id);

        Ok(CreatedEvent { name: created.name })
    }
}
