//! Button-driven browsing of a user's vouches.
//!
//! A `/vouches` reply with more than one page gets a [`NavigationSession`], stored in the
//! [`SessionRegistry`] under the reply's message id. Button presses are routed to it by
//! [`handle_component`], and the [`SessionSweeper`] expires sessions that have been idle
//! for [`session::SESSION_TIMEOUT`].

mod controls;
mod embeds;
mod interactions;
mod registry;
mod render;
mod session;
mod surfaces;
mod sweeper;

use async_trait::async_trait;

pub use controls::{NavAction, NavControls};
pub use embeds::{listing_embeds, with_timestamp};
pub use interactions::handle_component;
pub use registry::{Dispatch, SessionRegistry};
pub use render::{render, ListingSubject, RenderedListing, VouchListing};
pub use session::{NavigationSession, Transition};
pub use surfaces::{ComponentSurface, MessageSurface};
pub use sweeper::SessionSweeper;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Could not update the vouch list message: {0}")]
    Serenity(#[from] serenity::Error),
}

/// Somewhere a rendered listing can be shown: an interaction response or a posted message.
#[async_trait]
pub trait ReplySurface: Send + Sync {
    /// Replaces the displayed content. `None` removes all buttons.
    async fn show(
        &self,
        listing: &RenderedListing,
        controls: Option<NavControls>,
    ) -> Result<(), DeliveryError>;
}
