use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::models::{ScheduleRequest, TimeSlot};

use super::parse_slots;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// Slots every player listed.
    Full(BTreeSet<TimeSlot>),
    /// Slots listed by all players but `shortfall`, sorted Monday first.
    Partial(Vec<PartialSuggestion>),
    None,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialSuggestion {
    pub slot: TimeSlot,
    /// In row order.
    pub players: Vec<String>,
}

/// Finds the slots a group of players can meet at.
#[derive(Clone, Copy, Debug)]
pub struct Matcher {
    shortfall: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Matcher { shortfall: 1 }
    }
}

impl Matcher {
    /// `shortfall` is how many players may be missing from a partial suggestion.
    pub fn new(shortfall: usize) -> Matcher {
        Matcher { shortfall }
    }

    pub fn match_request(&self, request: &ScheduleRequest) -> MatchResult {
        let players: Vec<&str> = request.rows.iter().map(|row| row.player.as_str()).collect();
        let raw_rows: Vec<&str> = request
            .rows
            .iter()
            .map(|row| row.raw_slots.as_str())
            .collect();

        self.match_availability(&players, &raw_rows)
    }

    /// `players[i]` is the author of `raw_rows[i]`.
    pub fn match_availability(&self, players: &[&str], raw_rows: &[&str]) -> MatchResult {
        let slot_sets: Vec<BTreeSet<TimeSlot>> =
            raw_rows.iter().map(|raw| parse_slots(raw)).collect();

        let Some((first, rest)) = slot_sets.split_first() else {
            return MatchResult::None;
        };

        let common: BTreeSet<TimeSlot> = first
            .iter()
            .filter(|slot| rest.iter().all(|slots| slots.contains(slot)))
            .copied()
            .collect();

        if !common.is_empty() {
            debug!("Found {} slots shared by all players", common.len());
            return MatchResult::Full(common);
        }

        let required = slot_sets.len().saturating_sub(self.shortfall);
        if self.shortfall == 0 || required == 0 {
            return MatchResult::None;
        }

        let mut listed_by: BTreeMap<TimeSlot, Vec<String>> = BTreeMap::new();
        for (player, slots) in players.iter().zip(&slot_sets) {
            for slot in slots {
                listed_by.entry(*slot).or_default().push(player.to_string());
            }
        }

        let suggestions: Vec<PartialSuggestion> = listed_by
            .into_iter()
            .filter(|(_, players)| players.len() == required)
            .map(|(slot, players)| PartialSuggestion { slot, players })
            .collect();

        debug!(
            "Found {} slots shared by {required} of {} players",
            suggestions.len(),
            slot_sets.len()
        );

        if suggestions.is_empty() {
            MatchResult::None
        } else {
            MatchResult::Partial(suggestions)
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use map_macro::btree_set;

    use crate::models::{Day, TimeSlot};

    use super::{MatchResult, Matcher, PartialSuggestion};

    const PLAYERS: [&str; 4] = ["alice", "bob", "carol", "dave"];

    fn slot(day: Day, hour: u8) -> TimeSlot {
        TimeSlot::new(day, hour).unwrap()
    }

    #[test]
    fn single_shared_slot() {
        let result = Matcher::default().match_availability(
            &PLAYERS,
            &[
                "Monday 18:00 UTC, Tuesday 18:00 UTC",
                "Monday 18:00 UTC, Wednesday 18:00 UTC",
                "Thursday 18:00 UTC, Monday 18:00 UTC",
                "Monday 18:00 UTC",
            ],
        );

        assert_eq!(result, MatchResult::Full(btree_set! { slot(Day::Monday, 18) }));
    }

    #[test]
    fn full_match_ignores_minutes_and_spacing() {
        let result = Matcher::default().match_availability(
            &PLAYERS,
            &[
                "Friday 20:00 UTC,Friday 21:00 UTC",
                " Friday 20:30 UTC , Friday 21:00 UTC",
                "Friday 21:00 UTC, Friday 20:00 UTC",
                "Friday 20:00 UTC, Friday 21:15 UTC",
            ],
        );

        assert_eq!(
            result,
            MatchResult::Full(btree_set! { slot(Day::Friday, 20), slot(Day::Friday, 21) })
        );
    }

    #[test]
    fn three_of_four() {
        let result = Matcher::default().match_availability(
            &PLAYERS,
            &[
                "Sunday 12:00 UTC, Monday 09:00 UTC",
                "Tuesday 10:00 UTC",
                "Sunday 12:00 UTC, Tuesday 10:00 UTC",
                "Sunday 12:00 UTC, Saturday 08:00 UTC",
            ],
        );

        assert_eq!(
            result,
            MatchResult::Partial(vec![PartialSuggestion {
                slot: slot(Day::Sunday, 12),
                players: vec!["alice".to_string(), "carol".to_string(), "dave".to_string()],
            }])
        );
    }

    #[test]
    fn partial_suggestions_are_sorted_by_weekday() {
        let result = Matcher::default().match_availability(
            &PLAYERS,
            &[
                "Saturday 08:00 UTC, Tuesday 10:00 UTC",
                "Saturday 08:00 UTC, Tuesday 10:00 UTC",
                "Saturday 08:00 UTC, Tuesday 10:00 UTC, Tuesday 09:00 UTC",
                "Tuesday 09:00 UTC",
            ],
        );

        let MatchResult::Partial(suggestions) = result else {
            panic!("Expected a partial match, got {result:?}");
        };

        let slots: Vec<TimeSlot> = suggestions.iter().map(|s| s.slot).collect();
        assert_eq!(slots, vec![slot(Day::Tuesday, 10), slot(Day::Saturday, 8)]);
    }

    #[test]
    fn two_player_overlap_is_not_enough() {
        let result = Matcher::default().match_availability(
            &PLAYERS,
            &[
                "Monday 18:00 UTC",
                "Monday 18:00 UTC",
                "Tuesday 18:00 UTC",
                "Wednesday 18:00 UTC",
            ],
        );

        assert_eq!(result, MatchResult::None);
    }

    #[test]
    fn nothing_in_common() {
        let result = Matcher::default().match_availability(
            &PLAYERS,
            &[
                "Monday 18:00 UTC",
                "Tuesday 18:00 UTC",
                "Wednesday 18:00 UTC",
                "Thursday 18:00 UTC",
            ],
        );

        assert_eq!(result, MatchResult::None);
    }

    #[test]
    fn single_row_is_a_full_match() {
        let result = Matcher::default()
            .match_availability(&["alice"], &["Monday 18:00 UTC, Monday 19:00 UTC"]);

        assert_eq!(
            result,
            MatchResult::Full(btree_set! { slot(Day::Monday, 18), slot(Day::Monday, 19) })
        );
    }

    #[test]
    fn single_empty_row() {
        let result = Matcher::default().match_availability(&["alice"], &["n/a"]);

        assert_eq!(result, MatchResult::None);
    }

    #[test]
    fn no_rows() {
        assert_eq!(
            Matcher::default().match_availability(&[], &[]),
            MatchResult::None
        );
    }

    #[test]
    fn larger_shortfall() {
        let result = Matcher::new(2).match_availability(
            &PLAYERS,
            &[
                "Monday 18:00 UTC",
                "Monday 18:00 UTC",
                "Tuesday 18:00 UTC",
                "Wednesday 18:00 UTC",
            ],
        );

        assert_eq!(
            result,
            MatchResult::Partial(vec![PartialSuggestion {
                slot: slot(Day::Monday, 18),
                players: vec!["alice".to_string(), "bob".to_string()],
            }])
        );
    }

    #[test]
    fn five_players_all_but_one() {
        let result = Matcher::default().match_availability(
            &["a", "b", "c", "d", "e"],
            &[
                "Monday 18:00 UTC",
                "Monday 18:00 UTC",
                "Monday 18:00 UTC",
                "Monday 18:00 UTC",
                "Monday 19:00 UTC",
            ],
        );

        assert_eq!(
            result,
            MatchResult::Partial(vec![PartialSuggestion {
                slot: slot(Day::Monday, 18),
                players: vec!["a", "b", "c", "d"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }])
        );
    }
}
