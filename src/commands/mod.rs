mod arguments;
mod balance;
mod vouch;
mod vouches;

use crate::BotState;

pub use balance::{add_balance, balance, withdraw};
pub use vouch::vouch;
pub use vouches::vouches;

type CommandResult = Result<(), CommandError>;
type Context<'a> = poise::Context<'a, BotState, CommandError>;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("{message}")]
    User { message: String },
    #[error("{message}")]
    Internal { message: String },
    #[error(transparent)]
    Serenity(#[from] serenity::Error),
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

/// Commands registered with Discord.
pub fn all() -> Vec<poise::Command<BotState, CommandError>> {
    vec![balance(), add_balance(), withdraw(), vouch(), vouches()]
}
