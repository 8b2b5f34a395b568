use poise::{Context, CreateReply, FrameworkError};
use tracing::{error, warn};

use crate::{commands::CommandError, BotState};

pub async fn handle_error(error: poise::FrameworkError<'_, BotState, CommandError>) {
    use FrameworkError::*;

    match error {
        Setup { error, .. } => {
            error!("Error in bot setup: {}", error);
        }

        EventHandler { error, event, .. } => {
            error!(
                "Error in event {} handler: {}",
                event.snake_case_name(),
                error
            );
        }

        Command { error, ctx, .. } => match error {
            CommandError::User { message } | CommandError::InvalidArgument { message } => {
                warn!(
                    "Command `{}` failed: {}",
                    ctx.command().qualified_name,
                    message
                );
                reply_with_error(ctx, &message).await;
            }

            CommandError::Internal { message } => {
                error!(
                    "Internal error in command `{}`: {}",
                    ctx.command().qualified_name,
                    message
                );
                reply_with_internal_error(ctx, &message).await;
            }

            CommandError::Serenity(error) => {
                error!(
                    "Serenity error in command `{}`: {}",
                    ctx.command().qualified_name,
                    error
                );
                reply_with_internal_error(ctx, &error.to_string()).await;
            }
        },

        ArgumentParse {
            error, input, ctx, ..
        } => {
            let usage = ctx
                .command()
                .help_text
                .as_deref()
                .unwrap_or("Table and round should contain a number, e.g. `3` or `Table 3`.");

            let response = if let Some(input) = input {
                format!(
                    "**Sorry, cannot parse `{}` as an argument: {}**\n{}",
                    input, error, usage
                )
            } else {
                format!("**{}**\n{}", error, usage)
            };

            reply_with_error(ctx, &response).await;
        }

        CommandStructureMismatch {
            description, ctx, ..
        } => {
            error!(
                "Failed to deserialize interaction arguments for `{}`: {}",
                ctx.command.qualified_name, description
            );
        }

        MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            warn!("Missing bot permissions: {missing_permissions}");
            reply_with_error(
                ctx,
                &format!(
                    "Sorry, the bot needs these permissions to schedule matches here: {missing_permissions}."
                ),
            )
            .await;
        }

        MissingUserPermissions { ctx, .. } => {
            reply_with_error(
                ctx,
                "Sorry, you don't have permissions necessary to run this command.",
            )
            .await;
        }

        GuildOnly { ctx, .. } => {
            reply_with_error(
                ctx,
                "Sorry, matches can only be scheduled in the tournament server.",
            )
            .await;
        }

        CommandCheckFailed { error, ctx, .. } => {
            let message = if let Some(error) = error {
                format!(
                    "Sorry, can't run this command due to a failed command check: {}",
                    error
                )
            } else {
                "Sorry, can't run this command due to a failed command check.".to_string()
            };

            reply_with_error(ctx, &message).await;
        }

        UnknownInteraction { interaction, .. } => {
            warn!("Received an unknown interaction: {:?}", interaction.data.name);
        }

        error => {
            error!("Unknown error: {}", error);
        }
    }
}

async fn reply_with_error(ctx: Context<'_, BotState, CommandError>, error_message: &str) {
    if let Err(send_error) = poise::send_reply(
        ctx,
        CreateReply::default()
            .content(error_message)
            .ephemeral(true),
    )
    .await
    {
        error!(
            "Failed to send an error message to the user: {}\nThe message was: {}",
            send_error, error_message
        );
    }
}

async fn reply_with_internal_error(ctx: Context<'_, BotState, CommandError>, error_message: &str) {
    reply_with_error(
        ctx,
        &format!(
            "Sorry, something went wrong while executing your command: {}",
            error_message
        ),
    )
    .await;
}
