use std::str::FromStr;

use indoc::formatdoc;
use poise::serenity_prelude::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Mentionable,
};
use tokio::time::Instant;
use tracing::debug;

use super::{ComponentSurface, Dispatch, NavAction, SessionRegistry};

/// Routes a vouch navigation button press. Presses on other components are left alone.
#[tracing::instrument(skip_all, fields(custom_id = %interaction.data.custom_id, user = %interaction.user.id))]
pub async fn handle_component(
    ctx: &Context,
    interaction: &ComponentInteraction,
    registry: &SessionRegistry,
) -> Result<(), serenity::Error> {
    let Ok(action) = NavAction::from_str(&interaction.data.custom_id) else {
        return Ok(());
    };

    let surface = ComponentSurface { ctx, interaction };

    let dispatch = registry
        .dispatch(
            interaction.message.id,
            interaction.user.id,
            action,
            Instant::now(),
            &surface,
        )
        .await;

    let notice = match dispatch {
        Ok(Dispatch::Rendered { page }) => {
            debug!("Showing page {page}");
            return Ok(());
        }

        Ok(Dispatch::Ignored { requester }) => format!(
            "Only {} can flip through this list. Use `/vouches` to open your own.",
            requester.mention()
        ),

        Ok(Dispatch::Inactive) => formatdoc! {
            r#"
                **This vouch list is no longer active.**

                Use `/vouches` again to browse it.
            "#
        },

        Err(super::DeliveryError::Serenity(err)) => return Err(err),
    };

    interaction
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(notice)
                    .ephemeral(true),
            ),
        )
        .await
}
