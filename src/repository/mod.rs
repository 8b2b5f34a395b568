mod guild_event_sink;
mod sheets_source;

use async_trait::async_trait;

use crate::models::{CreatedEvent, NewScheduledEvent};

pub use guild_event_sink::GuildEventSink;
pub use sheets_source::SheetsAvailabilitySource;

/// Where the availability form answers come from.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    /// All rows of the answer sheet, header row included.
    async fn fetch_rows(&self) -> anyhow::Result<Vec<Vec<String>>>;
}

/// Where scheduled matches end up.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn create_event(&self, event: NewScheduledEvent) -> anyhow::Result<CreatedEvent>;
}
