mod availability;
mod scheduled_event;
mod time_slot;

pub use availability::{rows_from_sheet, AvailabilityRow, ScheduleRequest};
pub use scheduled_event::{CreatedEvent, League, NewScheduledEvent};
pub use time_slot::{Day, TimeSlot};
