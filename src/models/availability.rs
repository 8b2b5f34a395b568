use crate::utils::numbers::embedded_number;

const PLAYER_COLUMN: usize = 1;
const ROUND_COLUMN: usize = 2;
const TABLE_COLUMN: usize = 3;
const AVAILABILITY_COLUMN: usize = 4;
const COLUMN_COUNT: usize = 5;

/// A single form submission: one player's availability for one table and round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailabilityRow {
    pub player: String,
    pub table: String,
    pub round: String,
    pub raw_slots: String,
}

impl AvailabilityRow {
    /// Reads a `[timestamp, player, round, table, availability]` sheet row.
    pub fn from_sheet_row(cells: &[String]) -> Option<AvailabilityRow> {
        if cells.len() < COLUMN_COUNT {
            return None;
        }

        Some(AvailabilityRow {
            player: cells[PLAYER_COLUMN].trim().to_string(),
            table: cells[TABLE_COLUMN].clone(),
            round: cells[ROUND_COLUMN].clone(),
            raw_slots: cells[AVAILABILITY_COLUMN].clone(),
        })
    }

    pub fn table_number(&self) -> Option<u32> {
        embedded_number(&self.table)
    }

    pub fn round_number(&self) -> Option<u32> {
        embedded_number(&self.round)
    }

    pub fn is_for(&self, table: u32, round: u32) -> bool {
        self.table_number() == Some(table) && self.round_number() == Some(round)
    }
}

/// Converts the raw sheet values, skipping the header row and incomplete rows.
pub fn rows_from_sheet(values: Vec<Vec<String>>) -> Vec<AvailabilityRow> {
    values
        .iter()
        .skip(1)
        .filter_map(|cells| AvailabilityRow::from_sheet_row(cells))
        .collect()
}

/// The rows of one table and round, in sheet order.
#[derive(Clone, Debug)]
pub struct ScheduleRequest {
    pub table: u32,
    pub round: u32,
    pub rows: Vec<AvailabilityRow>,
}

impl ScheduleRequest {
    pub fn filter(table: u32, round: u32, rows: Vec<AvailabilityRow>) -> ScheduleRequest {
        let rows = rows
            .into_iter()
            .filter(|row| row.is_for(table, round))
            .collect();

        ScheduleRequest { table, round, rows }
    }

    pub fn player_names(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.player.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
