use crate::models::AvailabilityRow;

const HEADER: &str = "Match Scheduling Availability:";

#[derive(Debug, Default, PartialEq, Eq)]
struct RoundOverview {
    round: String,
    /// Raw slot text and the players who listed it, in first-seen order.
    slots: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct TableOverview {
    table: String,
    rounds: Vec<RoundOverview>,
}

/// Who listed which slot, per table and round, without any matching.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AvailabilityOverview {
    tables: Vec<TableOverview>,
}

impl AvailabilityOverview {
    pub fn build<'a>(rows: impl IntoIterator<Item = &'a AvailabilityRow>) -> AvailabilityOverview {
        let mut overview = AvailabilityOverview::default();

        for row in rows {
            let table = row.table.trim();
            let round = row.round.trim();

            let table_index = match overview.tables.iter().position(|t| t.table == table) {
                Some(index) => index,
                None => {
                    overview.tables.push(TableOverview {
                        table: table.to_string(),
                        rounds: Vec::new(),
                    });
                    overview.tables.len() - 1
                }
            };
            let rounds = &mut overview.tables[table_index].rounds;

            let round_index = match rounds.iter().position(|r| r.round == round) {
                Some(index) => index,
                None => {
                    rounds.push(RoundOverview {
                        round: round.to_string(),
                        slots: Vec::new(),
                    });
                    rounds.len() - 1
                }
            };
            let slots = &mut rounds[round_index].slots;

            for slot in row.raw_slots.split(',').map(str::trim) {
                if slot.is_empty() {
                    continue;
                }

                match slots.iter_mut().find(|(s, _)| s == slot) {
                    Some((_, players)) => players.push(row.player.clone()),
                    None => slots.push((slot.to_string(), vec![row.player.clone()])),
                }
            }
        }

        overview
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn render(&self) -> String {
        let mut message = HEADER.to_string();
        message.push('\n');

        for table in &self.tables {
            message += &format!("\n**Table: {}**\n", table.table);

            for round in &table.rounds {
                message += &format!("  __Round: {}__\n", round.round);

                for (slot, players) in &round.slots {
                    message += &format!("    - {slot}: {}\n", players.join(", "));
                }
            }
        }

        message
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::models::AvailabilityRow;

    use super::AvailabilityOverview;

    fn row(player: &str, table: &str, round: &str, raw_slots: &str) -> AvailabilityRow {
        AvailabilityRow {
            player: player.to_string(),
            table: table.to_string(),
            round: round.to_string(),
            raw_slots: raw_slots.to_string(),
        }
    }

    #[test]
    fn empty() {
        let overview = AvailabilityOverview::build(&Vec::<AvailabilityRow>::new());

        assert!(overview.is_empty());
        assert_eq!(overview.render(), "Match Scheduling Availability:\n");
    }

    #[test]
    fn grouped_by_table_round_and_slot() {
        let rows = vec![
            row("alice", "3", "1", "Monday 18:00 UTC, Monday 19:00 UTC"),
            row("bob", "3", "1", "Monday 19:00 UTC,, "),
            row("carol", "1", "1", "Friday 20:00 UTC"),
            row("dave", "3", "2", "Monday 18:00 UTC"),
            row("erin", " 3 ", "1", "Monday 18:00 UTC"),
        ];

        let overview = AvailabilityOverview::build(&rows);

        assert_eq!(
            overview.render(),
            indoc! {"
                Match Scheduling Availability:

                **Table: 3**
                  __Round: 1__
                    - Monday 18:00 UTC: alice, erin
                    - Monday 19:00 UTC: alice, bob
                  __Round: 2__
                    - Monday 18:00 UTC: dave

                **Table: 1**
                  __Round: 1__
                    - Friday 20:00 UTC: carol
            "}
        );
    }
}
