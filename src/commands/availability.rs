use std::sync::Arc;

use indoc::formatdoc;
use poise::serenity_prelude::{
    ButtonStyle, Colour, ComponentInteraction, ComponentInteractionCollector,
    ComponentInteractionDataKind, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponseFollowup, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, EditMessage, ModalInteraction, ModalInteractionCollector,
};
use poise::{CreateReply, Modal};
use serenity::{futures::StreamExt, http::Http};
use time::OffsetDateTime;
use tokio::select;
use tracing::{error, info, warn};

use crate::{
    commands::{
        arguments::{EmbeddedNumber, ManualDateTime},
        internal_err, CommandResult, Context,
    },
    matching::MatchResult,
    models::TimeSlot,
    repository::GuildEventSink,
    session::{Proposal, ScheduledMatch, SchedulingSession, SessionError},
    utils::{
        formatting::{format_local, format_utc, truncate},
        timestamp, TimestampStyle,
    },
};

const SLOT_SELECT_ID: &str = "availability_slot";
const MANUAL_BUTTON_ID: &str = "availability_manual";
const MANUAL_MODAL_ID: &str = "availability_manual_modal";

const MAX_SELECT_OPTIONS: usize = 25;
const MAX_PLAYER_FIELDS: usize = 20;
const MAX_FIELD_NAME_LENGTH: usize = 256;
const MAX_FIELD_VALUE_LENGTH: usize = 1024;

#[derive(Debug, poise::Modal)]
#[name = "Manual Match Scheduling"]
struct ManualScheduleModal {
    #[name = "Date (YYYY-MM-DD)"]
    #[placeholder = "2025-06-15"]
    date: String,

    #[name = "Time (HH:MM, 24h UTC)"]
    #[placeholder = "18:00"]
    time: String,
}

/// Show availability for a table and round and schedule the match.
#[poise::command(slash_command, guild_only)]
pub async fn availability(
    ctx: Context<'_>,
    #[description = "Table number (e.g. 1)"] table: EmbeddedNumber,
    #[description = "Round number (e.g. 1, 2, semifinal, final)"] round: EmbeddedNumber,
) -> CommandResult {
    ctx.defer().await?;

    let guild = ctx.guild_id().ok_or(internal_err(
        "The availability command should only be invoked in guilds",
    ))?;
    let http = ctx.serenity_context().http.clone();

    info!("Availability requested for table {table}, round {round}");

    let mut session = SchedulingSession::new(
        table.get(),
        round.get(),
        ctx.data().availability_source.clone(),
        Arc::new(GuildEventSink::new(http.clone(), guild)),
        ctx.data().session_settings,
    );

    let proposal = session.prepare().await?;

    let reply = ctx
        .send(
            CreateReply::default()
                .embed(proposal_embed(&proposal))
                .components(proposal_components(&proposal)),
        )
        .await?;
    let message = reply.message().await?;
    let (channel_id, message_id) = (message.channel_id, message.id);

    // One modal ID per proposal message.
    let modal_id = format!("{MANUAL_MODAL_ID}:{message_id}");

    let mut components = Box::pin(
        ComponentInteractionCollector::new(ctx.serenity_context())
            .message_id(message_id)
            .stream(),
    );
    let mut submissions = Box::pin(
        ModalInteractionCollector::new(ctx.serenity_context())
            .custom_ids(vec![modal_id.clone()])
            .stream(),
    );

    while !session.is_scheduled() {
        let handled = select! {
            Some(interaction) = components.next() => {
                on_component(&http, &mut session, &modal_id, &interaction).await
            }
            Some(submission) = submissions.next() => {
                on_manual_entry(&http, &mut session, &submission).await
            }
            else => break,
        };

        if let Err(err) = handled {
            error!("Could not answer an interaction for table {table}, round {round}: {err}");
        }
    }

    if session.is_scheduled() {
        let edit = EditMessage::new().components(Vec::new());

        if let Err(err) = channel_id.edit_message(http.as_ref(), message_id, edit).await {
            warn!("Could not remove the scheduling controls: {err}");
        }
    }

    Ok(())
}

fn proposal_embed(proposal: &Proposal) -> CreateEmbed {
    let colour = match proposal.outcome {
        MatchResult::Full(_) => Colour::DARK_GREEN,
        MatchResult::Partial(_) => Colour::GOLD,
        MatchResult::None => Colour::RED,
    };

    let fields = proposal
        .players
        .iter()
        .take(MAX_PLAYER_FIELDS)
        .map(|player| player.field())
        .chain(proposal.outcome_fields())
        .map(|(name, value)| {
            (
                truncate(&name, MAX_FIELD_NAME_LENGTH),
                truncate(&value, MAX_FIELD_VALUE_LENGTH),
                false,
            )
        });

    let mut embed = CreateEmbed::new()
        .title(proposal.title())
        .description("Below are the time slots provided by each player.")
        .colour(colour)
        .fields(fields);

    if proposal.options.len() > MAX_SELECT_OPTIONS {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Only the first {MAX_SELECT_OPTIONS} common slots can be picked from the menu."
        )));
    }

    embed
}

fn proposal_components(proposal: &Proposal) -> Vec<CreateActionRow> {
    let mut rows = Vec::new();

    if !proposal.options.is_empty() {
        let options = proposal
            .options
            .iter()
            .take(MAX_SELECT_OPTIONS)
            .map(|slot| CreateSelectMenuOption::new(slot.to_string(), slot.to_string()))
            .collect();

        let menu = CreateSelectMenu::new(SLOT_SELECT_ID, CreateSelectMenuKind::String { options })
            .placeholder("🕒 Choose a time slot for the match...")
            .min_values(1)
            .max_values(1);

        rows.push(CreateActionRow::SelectMenu(menu));
    }

    if proposal.offers_manual_entry() {
        rows.push(CreateActionRow::Buttons(vec![CreateButton::new(
            MANUAL_BUTTON_ID,
        )
        .label("📆 Manually Schedule Match")
        .style(ButtonStyle::Primary)]));
    }

    rows
}

fn scheduled_message(headline: String, scheduled: &ScheduledMatch) -> String {
    formatdoc! {"
        {headline}
        Event created: {}
        Starts {} UTC ({}, {}).",
        scheduled.event_name,
        format_utc(scheduled.start),
        format_local(scheduled.start),
        timestamp(scheduled.start, TimestampStyle::RelativeTime),
    }
}

/// Public announcement on success, an ephemeral note to the acting player otherwise.
fn outcome_followup(outcome: Result<String, SessionError>) -> CreateInteractionResponseFollowup {
    match outcome {
        Ok(content) => CreateInteractionResponseFollowup::new().content(content),
        Err(err) => {
            warn!("Scheduling attempt rejected: {err}");

            CreateInteractionResponseFollowup::new()
                .content(format!("❌ {err}"))
                .ephemeral(true)
        }
    }
}

fn chosen_slot(kind: &ComponentInteractionDataKind) -> Result<TimeSlot, SessionError> {
    let ComponentInteractionDataKind::StringSelect { values } = kind else {
        return Err(SessionError::Validation(
            "The slot menu should be a string select menu.".to_string(),
        ));
    };

    values
        .first()
        .ok_or(SessionError::Validation(
            "No time slot has been selected.".to_string(),
        ))?
        .parse::<TimeSlot>()
        .map_err(|err| SessionError::Validation(err.to_string()))
}

async fn on_component(
    http: &Http,
    session: &mut SchedulingSession,
    modal_id: &str,
    interaction: &ComponentInteraction,
) -> Result<(), serenity::Error> {
    match interaction.data.custom_id.as_str() {
        SLOT_SELECT_ID => select_slot(http, session, interaction).await,
        MANUAL_BUTTON_ID => {
            interaction
                .create_response(http, ManualScheduleModal::create(None, modal_id.to_string()))
                .await
        }
        id => {
            warn!("Unknown component interaction ID: {id}");
            Ok(())
        }
    }
}

async fn select_slot(
    http: &Http,
    session: &mut SchedulingSession,
    interaction: &ComponentInteraction,
) -> Result<(), serenity::Error> {
    interaction.defer(http).await?;

    let outcome = match chosen_slot(&interaction.data.kind) {
        Ok(slot) => session
            .schedule_slot(slot, OffsetDateTime::now_utc())
            .await
            .map(|scheduled| {
                scheduled_message(format!("✅ Match scheduled for **{slot}**!"), &scheduled)
            }),
        Err(err) => Err(err),
    };

    interaction
        .create_followup(http, outcome_followup(outcome))
        .await?;

    Ok(())
}

async fn on_manual_entry(
    http: &Http,
    session: &mut SchedulingSession,
    submission: &ModalInteraction,
) -> Result<(), serenity::Error> {
    submission.defer(http).await?;

    let outcome = match ManualScheduleModal::parse(submission.data.clone()) {
        Ok(input) => match ManualDateTime::parse(&input.date, &input.time) {
            Ok(start) => session
                .schedule_manual(start.to_utc())
                .await
                .map(|scheduled| {
                    let headline = format!(
                        "📅 Manual match scheduled for **{} {} UTC**!",
                        input.date.trim(),
                        input.time.trim()
                    );
                    scheduled_message(headline, &scheduled)
                }),
            Err(err) => Err(SessionError::Validation(err.to_string())),
        },
        Err(err) => Err(SessionError::Validation(err.to_string())),
    };

    submission
        .create_followup(http, outcome_followup(outcome))
        .await?;

    Ok(())
}
