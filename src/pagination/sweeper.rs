use std::{sync::Arc, time::Duration};

use poise::serenity_prelude::Http;
use tokio::{select, sync::Notify, time::Instant};
use tracing::{debug, info, info_span, Instrument};

use super::{MessageSurface, RenderedListing, ReplySurface, SessionRegistry};

const SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Expires idle vouch sessions and strips the buttons from their messages.
pub struct SessionSweeper {
    http: Arc<Http>,
    registry: Arc<SessionRegistry>,
}

impl SessionSweeper {
    pub fn create_and_start(shutdown: Arc<Notify>, http: Arc<Http>, registry: Arc<SessionRegistry>) {
        let sweeper = SessionSweeper { http, registry };

        tokio::spawn(
            async move {
                let mut interval = tokio::time::interval(SWEEP_INTERVAL);

                loop {
                    select! {
                        _ = interval.tick() => sweeper.sweep_once().await,

                        _ = shutdown.notified() => {
                            info!("Shutting down");
                            break;
                        }
                    }
                }
            }
            .instrument(info_span!("session_sweeper")),
        );
    }

    async fn sweep_once(&self) {
        let expired = self.registry.sweep(Instant::now()).await;
        if expired.is_empty() {
            return;
        }

        debug!(
            "Expired {} vouch sessions, {} still active",
            expired.len(),
            self.registry.len().await
        );

        for session in expired {
            let surface = MessageSurface {
                http: self.http.clone(),
                channel: session.channel,
                message: session.message,
            };
            show_final(&surface, &session.listing).await;
        }
    }
}

/// One attempt, no retry. The message may well be gone by now.
pub(super) async fn show_final(surface: &impl ReplySurface, listing: &RenderedListing) {
    if let Err(err) = surface.show(listing, None).await {
        debug!("Ignoring failed final render: {err}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use test_log::test;

    use super::show_final;
    use crate::pagination::{
        registry::tests::RecordingSurface, render::tests::listing, render, DeliveryError,
        NavControls, RenderedListing, ReplySurface,
    };

    #[derive(Default)]
    struct DeletedMessage {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl ReplySurface for DeletedMessage {
        async fn show(
            &self,
            _listing: &RenderedListing,
            _controls: Option<NavControls>,
        ) -> Result<(), DeliveryError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(DeliveryError::Serenity(serenity::Error::Other(
                "Unknown Message",
            )))
        }
    }

    #[test(tokio::test)]
    async fn final_render_removes_controls() {
        let surface = RecordingSurface::default();
        show_final(&surface, &render(&listing(7), 2)).await;
        assert_eq!(*surface.shown.lock().unwrap(), vec![(2, false)]);
    }

    #[test(tokio::test)]
    async fn failed_final_render_is_not_retried() {
        let surface = DeletedMessage::default();
        show_final(&surface, &render(&listing(7), 0)).await;
        assert_eq!(surface.attempts.load(Ordering::SeqCst), 1);
    }
}
