use crate::models::{Day, TimeSlot};

/// Collapses slots into one line per run of consecutive hours on the same day.
///
/// Days come out in the order they are first seen, so pass the slots sorted
/// (e.g. from a `BTreeSet`) to get Monday-first output.
pub fn group_slots<'a>(slots: impl IntoIterator<Item = &'a TimeSlot>) -> Vec<String> {
    let mut days: Vec<(Day, Vec<u8>)> = Vec::new();

    for slot in slots {
        match days.iter_mut().find(|(day, _)| *day == slot.day()) {
            Some((_, hours)) => hours.push(slot.hour()),
            None => days.push((slot.day(), vec![slot.hour()])),
        }
    }

    let mut lines = Vec::new();

    for (day, mut hours) in days {
        hours.sort_unstable();
        hours.dedup();

        let Some((&first, rest)) = hours.split_first() else {
            continue;
        };

        let mut run_start = first;
        let mut previous = first;

        for &hour in rest {
            if hour == previous + 1 {
                previous = hour;
            } else {
                lines.push(format_range(day, run_start, previous));
                run_start = hour;
                previous = hour;
            }
        }

        lines.push(format_range(day, run_start, previous));
    }

    lines
}

/// Formats the hours `first..=last` of `day`. The upper bound is exclusive in the output,
/// e.g. `Monday 09:00 UTC - 12:00 UTC` covers 9, 10 and 11.
pub fn format_range(day: Day, first: u8, last: u8) -> String {
    if first == last {
        format!("{day} {first:02}:00 UTC")
    } else {
        format!("{day} {first:02}:00 UTC - {:02}:00 UTC", last + 1)
    }
}
