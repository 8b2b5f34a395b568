use poise::samples::HelpConfiguration;

use super::{CommandResult, Context};

/// Get help for the scheduling commands.
#[poise::command(slash_command, ephemeral)]
pub async fn help(
    ctx: Context<'_>,

    #[description = "The command to provide help about."]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> CommandResult {
    let config = HelpConfiguration {
        extra_text_at_bottom: "Times are always in UTC. Availability comes from the tournament form.",
        ..Default::default()
    };

    poise::builtins::help(ctx, command.as_deref(), config).await?;

    Ok(())
}
