mod arguments;
mod availability;
mod help;
mod overview;

use crate::{session::SessionError, BotState};

pub use availability::availability;
pub use help::help;
pub use overview::overview;

type CommandResult = Result<(), CommandError>;
type Context<'a> = poise::Context<'a, BotState, CommandError>;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("{message}")]
    User { message: String },
    #[error("{message}")]
    InvalidArgument { message: String },
    #[error("{message}")]
    Internal { message: String },
    #[error(transparent)]
    Serenity(#[from] serenity::Error),
}

impl From<SessionError> for CommandError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::DataSource(_) | SessionError::EventCreation(_) => {
                internal_err(value.to_string())
            }
            SessionError::Validation(_) | SessionError::NoData { .. } => {
                user_err(format!("❌ {value}"))
            }
        }
    }
}

fn user_err(message: impl Into<String>) -> CommandError {
    CommandError::User {
        message: message.into(),
    }
}

fn internal_err(message: impl Into<String>) -> CommandError {
    CommandError::Internal {
        message: message.into(),
    }
}
