// Poller - owns the single repeating refresh timer
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

/// One timer firing. `timer_id` identifies the timer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTick {
    pub timer_id: u64,
}

struct ActiveTimer {
    id: u64,
    interval: Duration,
    handle: JoinHandle<()>,
}

/// At most one timer task is alive at a time. Starting a new one aborts the
/// old one first, and ticks from a replaced timer fail `is_current`.
pub struct Poller<E> {
    tx: mpsc::Sender<E>,
    active: Option<ActiveTimer>,
    next_id: u64,
}

impl<E> Poller<E>
where
    E: From<PollTick> + Send + 'static,
{
    pub fn new(tx: mpsc::Sender<E>) -> Self {
        Self {
            tx,
            active: None,
            next_id: 1,
        }
    }

    /// First tick fires one interval from now. Calling it again replaces the timer.
    pub fn start(&mut self, interval: Duration) {
        self.stop();

        let id = self.next_id;
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval_at(Instant::now() + interval, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = IntervalStream::new(timer);

            while ticks.next().await.is_some() {
                if tx.send(E::from(PollTick { timer_id: id })).await.is_err() {
                    tracing::debug!(timer_id = id, "tick receiver closed, timer exiting");
                    break;
                }
            }
        });

        tracing::debug!(
            timer_id = id,
            interval_ms = interval.as_millis() as u64,
            "poll timer started"
        );
        self.active = Some(ActiveTimer { id, interval, handle });
    }

    pub fn restart(&mut self, interval: Duration) {
        self.start(interval);
        tracing::info!(interval_ms = interval.as_millis() as u64, "refresh interval changed");
    }

    pub fn stop(&mut self) {
        if let Some(timer) = self.active.take() {
            timer.handle.abort();
            tracing::debug!(
                timer_id = timer.id,
                interval_ms = timer.interval.as_millis() as u64,
                "poll timer stopped"
            );
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    #[cfg(test)]
    pub fn interval(&self) -> Option<Duration> {
        self.active.as_ref().map(|t| t.interval)
    }

    /// False for ticks that were queued by a timer that has since been replaced or stopped.
    pub fn is_current(&self, tick: &PollTick) -> bool {
        self.active.as_ref().is_some_and(|t| t.id == tick.timer_id)
    }
}

impl<E> Drop for Poller<E> {
    fn drop(&mut self) {
        if let Some(timer) = self.active.take() {
            timer.handle.abort();
        }
    }
}
