use tracing::info;

use crate::{
    commands::{arguments::EmbeddedNumber, internal_err, user_err, CommandResult, Context},
    models::rows_from_sheet,
    report::AvailabilityOverview,
    utils::formatting::split_message,
};

const MAX_MESSAGE_LENGTH: usize = 2000;

/// List every submitted time slot per table and round.
#[poise::command(slash_command, guild_only)]
pub async fn overview(
    ctx: Context<'_>,
    #[description = "Only show this table (e.g. 1)"] table: Option<EmbeddedNumber>,
) -> CommandResult {
    ctx.defer().await?;

    let values = ctx
        .data()
        .availability_source
        .fetch_rows()
        .await
        .map_err(|err| internal_err(format!("Could not fetch data: {err:#}")))?;

    let rows = rows_from_sheet(values);
    let overview = AvailabilityOverview::build(
        rows.iter()
            .filter(|row| table.map_or(true, |table| table.matches(&row.table))),
    );

    if overview.is_empty() {
        return Err(match table {
            Some(table) => user_err(format!("❌ No availability found for table {table}.")),
            None => user_err("❌ No availability has been submitted yet."),
        });
    }

    let messages = split_message(&overview.render(), MAX_MESSAGE_LENGTH);
    info!("Sending availability overview in {} messages", messages.len());

    for message in messages {
        ctx.say(message).await?;
    }

    Ok(())
}
