#![forbid(unsafe_code)]

mod commands;
mod matching;
mod models;
mod poise_error_handler;
mod report;
mod repository;
mod session;
mod utils;

use std::{process::exit, sync::Arc};

use poise::{serenity_prelude::*, Framework};
use poise_error_handler::handle_error;
use repository::{AvailabilitySource, SheetsAvailabilitySource};
use serde::Deserialize;
use session::SessionSettings;
use tokio::{select, signal};
use tracing::{error, info, info_span, warn, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
struct AppConfig {
    discord_bot_token: String,
    register_commands_globally: Option<bool>,
    register_commands_in_guilds: Option<Vec<u64>>,

    spreadsheet_id: String,
    google_sheets_api_key: String,
    #[serde(default = "default_sheet_range")]
    sheet_range: String,
    #[serde(default = "default_sheets_api_base")]
    sheets_api_base: String,

    #[serde(default = "default_partial_match_shortfall")]
    partial_match_shortfall: usize,
    #[serde(default = "default_premier_league_max_table")]
    premier_league_max_table: u32,
}

fn default_sheet_range() -> String {
    "'Formulierreacties 1'!A:E".to_string()
}

fn default_sheets_api_base() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_partial_match_shortfall() -> usize {
    SessionSettings::default().partial_match_shortfall
}

fn default_premier_league_max_table() -> u32 {
    SessionSettings::default().premier_league_max_table
}

pub struct BotState {
    pub availability_source: Arc<dyn AvailabilitySource>,
    pub session_settings: SessionSettings,
}

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        warn!("Could not load config from .env file: {err}");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(
                    "match_scheduler_bot=info"
                        .parse()
                        .expect("Hard-coded default directive should be correct"),
                )
                .from_env_lossy(),
        )
        .init();

    let app_config = match envy::from_env::<AppConfig>() {
        Ok(config) => config,
        Err(err) => {
            error!("Could not load app config: {err}");
            exit(255);
        }
    };

    let availability_source = match SheetsAvailabilitySource::new(
        &app_config.sheets_api_base,
        &app_config.spreadsheet_id,
        &app_config.sheet_range,
        &app_config.google_sheets_api_key,
    ) {
        Ok(source) => source,
        Err(err) => {
            error!("Could not set up the spreadsheet client: {err:#}");
            exit(255);
        }
    };

    let app_state = BotState {
        availability_source: Arc::new(availability_source),
        session_settings: SessionSettings {
            partial_match_shortfall: app_config.partial_match_shortfall,
            premier_league_max_table: app_config.premier_league_max_table,
        },
    };

    let framework = Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::availability(),
                commands::overview(),
                commands::help(),
            ],
            on_error: |error| Box::pin(handle_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(
                async move {
                    let commands = &framework.options().commands;

                    if let Some(true) = app_config.register_commands_globally {
                        info!("Registering commands globally");
                        poise::builtins::register_globally(ctx, commands).await?;
                    }

                    if let Some(guilds) = app_config.register_commands_in_guilds {
                        for guild in guilds.iter().map(|g| GuildId::new(*g)) {
                            let guild_name = ctx
                                .http()
                                .get_guild(guild)
                                .await
                                .map(|g| g.name)
                                .unwrap_or("???".to_string());

                            info!("Registering commands in guild {guild} ({guild_name})");

                            poise::builtins::register_in_guild(ctx, commands, guild).await?;
                        }
                    }

                    Ok(app_state)
                }
                .instrument(info_span!("bot_setup")),
            )
        })
        .build();

    let mut client = match ClientBuilder::new(
        app_config.discord_bot_token,
        GatewayIntents::non_privileged(),
    )
    .framework(framework)
    .await
    {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to create the client: {err}");
            exit(255);
        }
    };

    select! {
        _ = signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
            client.shard_manager.shutdown_all().await;
        },

        result = client.start() => {
            if let Err(err) = result {
                error!("Failed to start the client: {err}");
            }
        },
    };
}
