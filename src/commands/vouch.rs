use indoc::formatdoc;
use poise::{
    serenity_prelude::{Colour, CreateAllowedMentions, CreateEmbed, User},
    CreateReply,
};
use tracing::info;

use crate::{
    commands::{
        arguments::{RatingChoice, VouchComment},
        internal_err, user_err, CommandResult, Context,
    },
    models::{types::UtcDateTime, NewVouch},
    pagination::with_timestamp,
    repository::AddVouchResult,
    utils::formatting::{mention, rating_stars},
};

/// Give a vouch/review to another user with star rating.
#[poise::command(slash_command, guild_only)]
pub async fn vouch(
    ctx: Context<'_>,

    #[description = "The user you want to vouch for."] user: User,

    #[description = "Star rating (1-5 stars)."] rating: RatingChoice,

    #[description = "Your review/comment (max 500 characters)."] comment: VouchComment,
) -> CommandResult {
    let voucher = ctx.author();

    if user.id == voucher.id {
        return Err(user_err("**You cannot vouch for yourself!**"));
    }

    let already_vouched = || {
        user_err(formatdoc! {
            r#"
                **You have already vouched for {target}.**

                Each user can only vouch once per person.
            "#,
            target = mention(user.id),
        })
    };

    let existing = ctx
        .data()
        .vouch_repository
        .find_existing(voucher.id, user.id)
        .await
        .map_err(|err| internal_err(format!("Could not check existing vouches: {err}")))?;

    if existing.is_some() {
        return Err(already_vouched());
    }

    ctx.defer().await?;

    let new_vouch = NewVouch {
        voucher: voucher.id,
        target: user.id,
        rating: rating.rating(),
        comment: comment.into(),
        voucher_tag: voucher.tag(),
        target_tag: user.tag(),
        created_at: UtcDateTime::now(),
    };

    // The pair is checked again inside the insert transaction.
    let vouch = match ctx.data().vouch_repository.add_vouch(&new_vouch).await {
        Ok(AddVouchResult::Added(vouch)) => vouch,
        Ok(AddVouchResult::AlreadyVouched(_)) => return Err(already_vouched()),
        Err(err) => return Err(internal_err(format!("Could not create the vouch: {err}"))),
    };

    info!("Vouch {:?} added", vouch.id);

    let embed = CreateEmbed::new()
        .colour(Colour(0x00ff00))
        .title("✅ Vouch Added Successfully")
        .thumbnail(user.face())
        .field("Vouched User", mention(vouch.target), true)
        .field("Rating", rating_stars(vouch.rating), true)
        .field("Comment", &vouch.comment, false)
        .field("Vouched by", mention(vouch.voucher), true);

    ctx.send(
        CreateReply::default()
            .embed(with_timestamp(embed, vouch.created_at))
            .allowed_mentions(CreateAllowedMentions::new()),
    )
    .await?;

    Ok(())
}
