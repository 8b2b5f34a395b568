use crate::matching::{group_slots, MatchResult, PartialSuggestion};

use super::{PlayerAvailability, Proposal};

const NO_SLOTS_PLACEHOLDER: &str = "No valid time slots submitted.";

fn players_label(count: usize) -> String {
    if count == 1 {
        "1 player".to_string()
    } else {
        format!("{count} players")
    }
}

fn suggestion_line(suggestion: &PartialSuggestion) -> String {
    format!("{} ({})", suggestion.slot, suggestion.players.join(", "))
}

impl PlayerAvailability {
    pub fn field(&self) -> (String, String) {
        let value = if self.ranges.is_empty() {
            NO_SLOTS_PLACEHOLDER.to_string()
        } else {
            self.ranges.join("\n")
        };

        (format!("👤 {}", self.player), value)
    }
}

impl Proposal {
    pub fn title(&self) -> String {
        format!("📅 Availability: Table {}, Round {}", self.table, self.round)
    }

    /// Embed fields describing the match result, as `(name, value)` pairs.
    pub fn outcome_fields(&self) -> Vec<(String, String)> {
        let player_count = self.players.len();
        let partial_count = player_count.saturating_sub(self.shortfall);
        let no_full_match = format!("❌ No match for all {}", players_label(player_count));

        match &self.outcome {
            MatchResult::Full(common) => vec![(
                "✅ Common Availability".to_string(),
                group_slots(common).join("\n"),
            )],

            MatchResult::Partial(suggestions) => vec![
                (
                    no_full_match,
                    format!(
                        "Below are options where {} available.",
                        match partial_count {
                            1 => "1 player is".to_string(),
                            count => format!("{count} players are"),
                        }
                    ),
                ),
                (
                    "🤝 Partial Availability".to_string(),
                    suggestions
                        .iter()
                        .map(suggestion_line)
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
            ],

            MatchResult::None => vec![(
                no_full_match,
                format!(
                    "❌ No good matches for {} either.",
                    players_label(partial_count)
                ),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use map_macro::btree_set;

    use crate::{
        matching::{MatchResult, PartialSuggestion},
        models::{Day, League, TimeSlot},
        session::{PlayerAvailability, Proposal},
    };

    fn slot(day: Day, hour: u8) -> TimeSlot {
        TimeSlot::new(day, hour).unwrap()
    }

    fn proposal(outcome: MatchResult) -> Proposal {
        let players = ["alice", "bob", "carol", "dave"]
            .into_iter()
            .map(|player| PlayerAvailability {
                player: player.to_string(),
                ranges: vec!["Monday 18:00 UTC".to_string()],
            })
            .collect();

        Proposal {
            table: 3,
            round: 2,
            league: League::Pl,
            players,
            outcome,
            shortfall: 1,
            options: Vec::new(),
        }
    }

    #[test]
    fn title() {
        assert_eq!(
            proposal(MatchResult::None).title(),
            "📅 Availability: Table 3, Round 2"
        );
    }

    #[test]
    fn player_field() {
        let player = PlayerAvailability {
            player: "alice".to_string(),
            ranges: vec![
                "Monday 09:00 UTC - 12:00 UTC".to_string(),
                "Monday 14:00 UTC".to_string(),
            ],
        };

        assert_eq!(
            player.field(),
            (
                "👤 alice".to_string(),
                "Monday 09:00 UTC - 12:00 UTC\nMonday 14:00 UTC".to_string()
            )
        );
    }

    #[test]
    fn player_without_slots() {
        let player = PlayerAvailability {
            player: "bob".to_string(),
            ranges: Vec::new(),
        };

        assert_eq!(player.field().1, "No valid time slots submitted.");
    }

    #[test]
    fn full_outcome_is_grouped() {
        let fields = proposal(MatchResult::Full(btree_set! {
            slot(Day::Monday, 18),
            slot(Day::Monday, 19),
            slot(Day::Wednesday, 7),
        }))
        .outcome_fields();

        assert_eq!(
            fields,
            vec![(
                "✅ Common Availability".to_string(),
                "Monday 18:00 UTC - 20:00 UTC\nWednesday 07:00 UTC".to_string()
            )]
        );
    }

    #[test]
    fn partial_outcome_lists_players() {
        let fields = proposal(MatchResult::Partial(vec![
            PartialSuggestion {
                slot: slot(Day::Tuesday, 10),
                players: vec!["alice".into(), "bob".into(), "dave".into()],
            },
            PartialSuggestion {
                slot: slot(Day::Sunday, 12),
                players: vec!["bob".into(), "carol".into(), "dave".into()],
            },
        ]))
        .outcome_fields();

        assert_eq!(
            fields,
            vec![
                (
                    "❌ No match for all 4 players".to_string(),
                    "Below are options where 3 players are available.".to_string()
                ),
                (
                    "🤝 Partial Availability".to_string(),
                    "Tuesday 10:00 UTC (alice, bob, dave)\nSunday 12:00 UTC (bob, carol, dave)"
                        .to_string()
                ),
            ]
        );
    }

    #[test]
    fn no_outcome() {
        assert_eq!(
            proposal(MatchResult::None).outcome_fields(),
            vec![(
                "❌ No match for all 4 players".to_string(),
                "❌ No good matches for 3 players either.".to_string()
            )]
        );
    }
}
