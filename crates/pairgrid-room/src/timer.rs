//! One-shot resolve timer for the room actor's select loop.

use std::time::Duration;

use tokio::time::{self, Instant};

/// Schedules the deferred match/mismatch judgment.
///
/// While unarmed, [`fired`](Self::fired) pends forever, so it can sit
/// in a `tokio::select!` next to the command channel without that
/// branch ever winning — the room stays purely event-driven. Arming
/// sets a deadline; when it is reached the wait resolves once and the
/// timer disarms itself.
///
/// Drop-safe inside `select!`: the deadline survives cancellation (a
/// command arriving mid-wait) and only clears when the wait actually
/// completes.
#[derive(Debug, Default)]
pub(crate) struct ResolveTimer {
    deadline: Option<Instant>,
}

impl ResolveTimer {
    /// Arms the timer to fire `delay` from now. Re-arming replaces any
    /// previous deadline.
    pub(crate) fn arm(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    /// Waits until the armed deadline. Pends forever while unarmed.
    pub(crate) async fn fired(&mut self) {
        match self.deadline {
            Some(at) => {
                time::sleep_until(at).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
