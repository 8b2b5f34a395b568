use std::{collections::BTreeSet, str::FromStr};

use lazy_regex::regex_captures;
use tracing::trace;

use crate::models::{Day, TimeSlot};

/// Parses a comma-separated availability list, e.g. `Monday 18:00 UTC, Monday 19:00 UTC`.
///
/// Entries that don't start like a slot are dropped, and so are entries with a day name
/// that isn't one of the seven English weekdays. Minutes and trailing notes are ignored.
///
/// Grouped ranges such as `Monday 18:00 UTC - 21:00 UTC` are expanded into their hours,
/// so anything produced by [`group_slots`](super::group_slots) parses back to the same set.
pub fn parse_slots(raw: &str) -> BTreeSet<TimeSlot> {
    raw.split(',').flat_map(parse_slot_item).collect()
}

/// Parses a single entry of an availability list into the hours it covers.
pub fn parse_slot_item(item: &str) -> Vec<TimeSlot> {
    let item = item.trim();
    if item.is_empty() {
        return Vec::new();
    }

    let Some((_, day, hour, _minute, _, end_hour, _end_minute)) = regex_captures!(
        r"^(\w+) (\d{2}):(\d{2}) UTC( - (\d{2}):(\d{2}) UTC)?",
        item
    ) else {
        trace!("Dropping malformed availability entry {item:?}");
        return Vec::new();
    };

    let Ok(day) = Day::from_str(day) else {
        trace!("Dropping availability entry with unknown day {item:?}");
        return Vec::new();
    };

    let Ok(hour) = hour.parse::<u8>() else {
        return Vec::new();
    };

    if end_hour.is_empty() {
        return TimeSlot::new(day, hour).into_iter().collect();
    }

    let Ok(end_hour) = end_hour.parse::<u8>() else {
        return Vec::new();
    };

    if end_hour > 24 || end_hour <= hour {
        trace!("Dropping availability range with invalid bounds {item:?}");
        return Vec::new();
    }

    (hour..end_hour)
        .filter_map(|hour| TimeSlot::new(day, hour))
        .collect()
}

#[cfg(test)]
mod tests {
    use map_macro::btree_set;

    use crate::models::{Day, TimeSlot};

    use super::{parse_slot_item, parse_slots};

    fn slot(day: Day, hour: u8) -> TimeSlot {
        TimeSlot::new(day, hour).unwrap()
    }

    #[test]
    fn simple_list() {
        assert_eq!(
            parse_slots("Monday 18:00 UTC, Monday 19:00 UTC,Tuesday 07:00 UTC"),
            btree_set! {
                slot(Day::Monday, 18),
                slot(Day::Monday, 19),
                slot(Day::Tuesday, 7),
            }
        );
    }

    #[test]
    fn minutes_are_discarded() {
        assert_eq!(
            parse_slots("Friday 20:30 UTC, Friday 20:00 UTC"),
            btree_set! { slot(Day::Friday, 20) }
        );
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(
            parse_slots("   Sunday 10:00 UTC  ,\tSunday 11:00 UTC "),
            btree_set! { slot(Day::Sunday, 10), slot(Day::Sunday, 11) }
        );
    }

    #[test]
    fn malformed_entries_are_dropped() {
        assert_eq!(
            parse_slots("Monday 18:00 UTC, monday 6pm, Tuesday 9:00 UTC, , Wednesday 25:00 UTC"),
            btree_set! { slot(Day::Monday, 18) }
        );
    }

    #[test]
    fn trailing_notes_are_ignored() {
        assert_eq!(
            parse_slots("Monday 18:00 UTC (preferred), Tuesday 19:00 UTC+0"),
            btree_set! { slot(Day::Monday, 18), slot(Day::Tuesday, 19) }
        );
    }

    #[test]
    fn unknown_days_are_dropped() {
        assert_eq!(
            parse_slots("Maandag 18:00 UTC, Tuesday 18:00 UTC"),
            btree_set! { slot(Day::Tuesday, 18) }
        );
    }

    #[test]
    fn day_names_are_case_insensitive() {
        assert_eq!(
            parse_slots("SATURDAY 12:00 UTC"),
            btree_set! { slot(Day::Saturday, 12) }
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse_slots("").is_empty());
    }

    #[test]
    fn range_is_expanded() {
        assert_eq!(
            parse_slot_item("Monday 09:00 UTC - 12:00 UTC"),
            vec![slot(Day::Monday, 9), slot(Day::Monday, 10), slot(Day::Monday, 11)]
        );
    }

    #[test]
    fn range_until_midnight() {
        assert_eq!(
            parse_slot_item("Sunday 22:00 UTC - 24:00 UTC"),
            vec![slot(Day::Sunday, 22), slot(Day::Sunday, 23)]
        );
    }

    #[test]
    fn backwards_range_is_dropped() {
        assert!(parse_slot_item("Monday 12:00 UTC - 09:00 UTC").is_empty());
        assert!(parse_slot_item("Monday 12:00 UTC - 12:00 UTC").is_empty());
    }
}
