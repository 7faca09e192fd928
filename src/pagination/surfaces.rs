use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude::{
    ChannelId, ComponentInteraction, Context, CreateAllowedMentions, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditMessage, Http, MessageId,
};

use super::{embeds::listing_embeds, DeliveryError, NavControls, RenderedListing, ReplySurface};

fn action_rows(controls: Option<NavControls>) -> Vec<poise::serenity_prelude::CreateActionRow> {
    controls.iter().map(NavControls::action_row).collect()
}

/// Answers a button press by updating the message the button belongs to.
pub struct ComponentSurface<'a> {
    pub ctx: &'a Context,
    pub interaction: &'a ComponentInteraction,
}

#[async_trait]
impl ReplySurface for ComponentSurface<'_> {
    async fn show(
        &self,
        listing: &RenderedListing,
        controls: Option<NavControls>,
    ) -> Result<(), DeliveryError> {
        let message = CreateInteractionResponseMessage::new()
            .embeds(listing_embeds(listing))
            .components(action_rows(controls))
            .allowed_mentions(CreateAllowedMentions::new());

        self.interaction
            .create_response(self.ctx, CreateInteractionResponse::UpdateMessage(message))
            .await?;

        Ok(())
    }
}

/// Edits an already posted message, used when no interaction is available.
pub struct MessageSurface {
    pub http: Arc<Http>,
    pub channel: ChannelId,
    pub message: MessageId,
}

#[async_trait]
impl ReplySurface for MessageSurface {
    async fn show(
        &self,
        listing: &RenderedListing,
        controls: Option<NavControls>,
    ) -> Result<(), DeliveryError> {
        let edit = EditMessage::new()
            .embeds(listing_embeds(listing))
            .components(action_rows(controls))
            .allowed_mentions(CreateAllowedMentions::new());

        self.channel
            .edit_message(&self.http, self.message, edit)
            .await?;

        Ok(())
    }
}
