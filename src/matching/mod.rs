mod grouping;
mod matcher;
mod parser;

pub use grouping::group_slots;
pub use matcher::{MatchResult, Matcher, PartialSuggestion};
pub use parser::{parse_slot_item, parse_slots};
