use std::{collections::HashMap, sync::Arc};

use poise::serenity_prelude::{ChannelId, MessageId, UserId};
use tokio::{sync::Mutex, time::Instant};
use tracing::debug;

use super::{
    DeliveryError, NavAction, NavigationSession, RenderedListing, ReplySurface, Transition,
};

/// Outcome of routing a button press to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The session handled the press and the surface was updated.
    Rendered { page: usize },
    /// The press came from someone other than `requester`; nothing changed.
    Ignored { requester: UserId },
    /// There is no active session for the message.
    Inactive,
}

/// A session removed by [`SessionRegistry::sweep`], with the content of its final render.
#[derive(Debug)]
pub struct ExpiredSession {
    pub channel: ChannelId,
    pub message: MessageId,
    pub listing: RenderedListing,
}

struct SessionEntry {
    channel: ChannelId,
    session: Mutex<NavigationSession>,
}

/// Live navigation sessions keyed by the id of the message showing them.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<MessageId, Arc<SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> SessionRegistry {
        SessionRegistry::default()
    }

    pub async fn open(&self, channel: ChannelId, message: MessageId, session: NavigationSession) {
        let entry = Arc::new(SessionEntry {
            channel,
            session: Mutex::new(session),
        });
        self.sessions.lock().await.insert(message, entry);
        debug!("Opened vouch session for message {message}");
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Applies a button press and updates `surface` while holding the session, so presses on
    /// one message are handled strictly one after another.
    pub async fn dispatch(
        &self,
        message: MessageId,
        actor: UserId,
        action: NavAction,
        now: Instant,
        surface: &impl ReplySurface,
    ) -> Result<Dispatch, DeliveryError> {
        let Some(entry) = self.sessions.lock().await.get(&message).cloned() else {
            return Ok(Dispatch::Inactive);
        };

        let mut session = entry.session.lock().await;

        match session.handle(actor, action, now) {
            Transition::Navigated { page } => {
                surface.show(&session.render(), session.controls()).await?;
                Ok(Dispatch::Rendered { page })
            }
            Transition::Ignored => Ok(Dispatch::Ignored {
                requester: session.requester(),
            }),
            Transition::Expired => Ok(Dispatch::Inactive),
        }
    }

    /// Removes every session whose timeout has elapsed and expires it.
    ///
    /// Sessions busy handling a press are left for the next sweep.
    pub async fn sweep(&self, now: Instant) -> Vec<ExpiredSession> {
        let removed: Vec<(MessageId, Arc<SessionEntry>)> = {
            let mut sessions = self.sessions.lock().await;

            let due: Vec<MessageId> = sessions
                .iter()
                .filter(|(_, entry)| {
                    entry
                        .session
                        .try_lock()
                        .map(|session| session.is_due(now))
                        .unwrap_or(false)
                })
                .map(|(message, _)| *message)
                .collect();

            due.into_iter()
                .filter_map(|message| sessions.remove(&message).map(|entry| (message, entry)))
                .collect()
        };

        let mut expired = Vec::with_capacity(removed.len());
        for (message, entry) in removed {
            if let Some(listing) = entry.session.lock().await.expire() {
                expired.push(ExpiredSession {
                    channel: entry.channel,
                    message,
                    listing,
                });
            }
        }

        expired
    }
}
