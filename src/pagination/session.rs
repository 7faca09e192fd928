use std::time::Duration;

use poise::serenity_prelude::UserId;
use tokio::time::Instant;

use super::{
    controls::{NavAction, NavControls},
    render::{render, RenderedListing, VouchListing},
};

/// How long a session stays interactive after the last navigation by its requester.
pub const SESSION_TIMEOUT: Duration = Duration::from_millis(300_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The requester navigated; the page may or may not have changed and must be re-rendered.
    Navigated { page: usize },
    /// Someone other than the requester pressed a button.
    Ignored,
    /// The session is no longer interactive.
    Expired,
}

/// Navigation state for one `/vouches` reply.
#[derive(Debug)]
pub struct NavigationSession {
    requester: UserId,
    listing: VouchListing,
    current_page: usize,
    total_pages: usize,
    state: SessionState,
    expires_at: Instant,
}

impl NavigationSession {
    /// Starts a session on the first page. Listings that fit on one page get no session.
    pub fn open(requester: UserId, listing: VouchListing, now: Instant) -> Option<Self> {
        let total_pages = listing.total_pages();
        if total_pages <= 1 {
            return None;
        }

        Some(NavigationSession {
            requester,
            listing,
            current_page: 0,
            total_pages,
            state: SessionState::Active,
            expires_at: now + SESSION_TIMEOUT,
        })
    }

    pub fn requester(&self) -> UserId {
        self.requester
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.state == SessionState::Active && now >= self.expires_at
    }

    pub fn handle(&mut self, actor: UserId, action: NavAction, now: Instant) -> Transition {
        if self.state == SessionState::Expired || now >= self.expires_at {
            return Transition::Expired;
        }

        if actor != self.requester {
            return Transition::Ignored;
        }

        match action {
            NavAction::Prev if self.current_page > 0 => self.current_page -= 1,
            NavAction::Next if self.current_page + 1 < self.total_pages => self.current_page += 1,
            _ => {}
        }

        self.expires_at = now + SESSION_TIMEOUT;

        Transition::Navigated {
            page: self.current_page,
        }
    }

    /// Moves the session to [`SessionState::Expired`].
    ///
    /// Returns the final content exactly once, on the first call.
    pub fn expire(&mut self) -> Option<RenderedListing> {
        match self.state {
            SessionState::Active => {
                self.state = SessionState::Expired;
                Some(self.render())
            }
            SessionState::Expired => None,
        }
    }

    pub fn render(&self) -> RenderedListing {
        render(&self.listing, self.current_page)
    }

    /// `None` once the session has expired, so the final render carries no buttons.
    pub fn controls(&self) -> Option<NavControls> {
        match self.state {
            SessionState::Active => Some(NavControls::for_page(
                self.current_page,
                self.total_pages,
            )),
            SessionState::Expired => None,
        }
    }
}
