use poise::{
    serenity_prelude::{CreateAllowedMentions, User},
    CreateReply,
};
use tracing::info;

use crate::{
    commands::{internal_err, user_err, CommandResult, Context},
    repository::WithdrawResult,
    utils::formatting::mention,
};

fn reply(content: String) -> CreateReply {
    CreateReply::default()
        .content(content)
        .allowed_mentions(CreateAllowedMentions::new())
}

/// Check your or another user's balance.
#[poise::command(slash_command, guild_only)]
pub async fn balance(
    ctx: Context<'_>,

    #[rename = "target-user"]
    #[description = "The user whose balance you want to see (defaults to yourself)."]
    target_user: Option<User>,
) -> CommandResult {
    let target = target_user.as_ref().unwrap_or(ctx.author()).id;

    ctx.defer().await?;

    let profile = ctx
        .data()
        .profile_repository
        .get_or_create(target)
        .await
        .map_err(|err| internal_err(format!("Could not check the balance: {err}")))?;

    let message = if target == ctx.author().id {
        format!("Your current balance is **${}**.", profile.balance)
    } else {
        format!(
            "{}'s current balance is **${}**.",
            mention(target),
            profile.balance
        )
    };

    ctx.send(reply(message)).await?;

    Ok(())
}

/// Add $ to a user's balance.
#[poise::command(
    slash_command,
    guild_only,
    rename = "add-balance",
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR"
)]
pub async fn add_balance(
    ctx: Context<'_>,

    #[description = "The amount of money to add."]
    #[min = 1]
    amount: i64,

    #[rename = "target-user"]
    #[description = "The user whose balance you want to add to (defaults to yourself)."]
    target_user: Option<User>,
) -> CommandResult {
    if amount <= 0 {
        return Err(user_err(
            "Please specify a positive whole number amount to add.",
        ));
    }

    let target = target_user.as_ref().unwrap_or(ctx.author()).id;

    ctx.defer().await?;

    let profile = ctx
        .data()
        .profile_repository
        .add_balance(target, amount)
        .await
        .map_err(|err| internal_err(format!("Could not add to the balance: {err}")))?;

    info!(
        "{} added ${amount} to {target}, new balance ${}",
        ctx.author().id,
        profile.balance
    );

    let message = if target == ctx.author().id {
        format!(
            "Successfully added ${amount} to your balance. Your new balance is ${}.",
            profile.balance
        )
    } else {
        format!(
            "Successfully added ${amount} to {}'s balance. Their new balance is ${}.",
            mention(target),
            profile.balance
        )
    };

    ctx.send(reply(message)).await?;

    Ok(())
}

/// Withdraw money from a user's balance (Admin only).
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR"
)]
pub async fn withdraw(
    ctx: Context<'_>,

    #[rename = "target-user"]
    #[description = "The user whose balance you want to withdraw from."]
    target_user: User,

    #[description = "The amount of money to withdraw."]
    #[min = 1]
    amount: i64,
) -> CommandResult {
    if amount <= 0 {
        return Err(user_err(
            "You must specify a positive whole number amount to withdraw.",
        ));
    }

    let target = target_user.id;

    ctx.defer().await?;

    let result = ctx
        .data()
        .profile_repository
        .withdraw(target, amount)
        .await
        .map_err(|err| internal_err(format!("Could not withdraw from the balance: {err}")))?;

    let message = match result {
        WithdrawResult::InsufficientFunds { balance } => format!(
            "The user {} does not have enough $ to withdraw ${amount}. Their current balance is ${balance}.",
            mention(target),
        ),

        WithdrawResult::Withdrawn(profile) => {
            info!(
                "{} withdrew ${amount} from {target}, new balance ${}",
                ctx.author().id,
                profile.balance
            );

            if target == ctx.author().id {
                format!(
                    "Successfully withdrew ${amount} from your balance. Your new balance is ${}.",
                    profile.balance
                )
            } else {
                format!(
                    "Successfully withdrew ${amount} from {}'s balance. Their new balance is ${}. ✅",
                    mention(target),
                    profile.balance
                )
            }
        }
    };

    ctx.send(reply(message)).await?;

    Ok(())
}
