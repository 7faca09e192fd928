use poise::{
    serenity_prelude::{CreateAllowedMentions, User},
    CreateReply,
};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    commands::{internal_err, CommandResult, Context},
    models::types::UtcDateTime,
    pagination::{listing_embeds, render, ListingSubject, NavigationSession, VouchListing},
};

/// View all vouches/reviews for a user.
#[poise::command(slash_command, guild_only)]
pub async fn vouches(
    ctx: Context<'_>,

    #[description = "The user whose vouches you want to see (defaults to yourself)."]
    user: Option<User>,
) -> CommandResult {
    let requester = ctx.author().id;
    let target = user.as_ref().unwrap_or(ctx.author());

    let display_name = display_name(ctx, target).await;

    ctx.defer().await?;

    let vouches = ctx
        .data()
        .vouch_repository
        .list_by_target(target.id)
        .await
        .map_err(|err| internal_err(format!("Could not fetch vouches: {err}")))?;

    let listing = VouchListing {
        subject: ListingSubject {
            user: target.id,
            display_name,
            avatar_url: target.face(),
            is_requester: target.id == requester,
            listed_at: UtcDateTime::now(),
        },
        vouches,
    };

    let first_page = render(&listing, 0);
    let session = NavigationSession::open(requester, listing, Instant::now());

    let mut reply = listing_embeds(&first_page)
        .into_iter()
        .fold(CreateReply::default(), CreateReply::embed)
        .allowed_mentions(CreateAllowedMentions::new());

    if let Some(controls) = session.as_ref().and_then(NavigationSession::controls) {
        reply = reply.components(vec![controls.action_row()]);
    }

    let handle = ctx.send(reply).await?;

    if let Some(session) = session {
        let message = handle.message().await?;

        debug!(
            "Listing {} pages of vouches for {}",
            session.total_pages(),
            target.id
        );

        ctx.data()
            .vouch_sessions
            .open(message.channel_id, message.id, session)
            .await;
    }

    Ok(())
}

/// Server nickname if the target is a member, otherwise their global display name.
async fn display_name(ctx: Context<'_>, user: &User) -> String {
    if let Some(guild) = ctx.guild_id() {
        match guild.member(ctx.serenity_context(), user.id).await {
            Ok(member) => return member.display_name().to_string(),
            Err(err) => warn!("Could not fetch member {} of {guild}: {err}", user.id),
        }
    }

    user.global_name.clone().unwrap_or_else(|| user.name.clone())
}
