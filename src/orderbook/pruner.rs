//! Background worker that cancels good-for-day orders at the daily close.

use super::book::EngineShared;
use crate::orders::{OrderIds, OrderType};
use chrono::{NaiveDateTime, Timelike};
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::{debug, info};

/// Local hour at which good-for-day orders expire. Engine policy.
const CLOSE_HOUR: u32 = 16;

/// Slack added past the close so a wakeup lands strictly after it.
const CLOSE_SLACK: Duration = Duration::from_millis(100);

/// How long to sleep from `now` until the next close, slack included. If
/// the close hour has already passed today, the deadline is tomorrow's.
pub(super) fn time_until_close(now: NaiveDateTime) -> Duration {
    let mut date = now.date();
    if now.hour() >= CLOSE_HOUR {
        date = date.succ_opt().expect("calendar overflow");
    }
    let cutoff = date
        .and_hms_opt(CLOSE_HOUR, 0, 0)
        .expect("valid wall-clock time");

    (cutoff - now).to_std().unwrap_or_default() + CLOSE_SLACK
}

/// Pruner main loop.
///
/// Each cycle waits on the shutdown condition variable under the engine
/// mutex until the next close deadline. Anything other than a pure timeout
/// (shutdown flag, notification, spurious wakeup) means teardown; a pure
/// timeout scans the book and cancels every good-for-day order while the
/// lock is still held from the wait.
pub(super) fn run(shared: &EngineShared) {
    loop {
        let wait = time_until_close(shared.clock.local_now());
        debug!("good-for-day pruner sleeping for {:?}", wait);

        let guard = shared.state.lock().expect("order book mutex poisoned");
        if shared.shutdown.load(Ordering::Acquire) {
            return;
        }

        let (mut state, result) = shared
            .shutdown_cv
            .wait_timeout(guard, wait)
            .expect("order book mutex poisoned");

        if shared.shutdown.load(Ordering::Acquire) || !result.timed_out() {
            return;
        }

        let expired: OrderIds = state
            .orders
            .iter()
            .filter_map(|(&id, &key)| match state.arena.get(key) {
                Some(order) if order.order_type() == OrderType::GoodForDay => Some(id),
                _ => None,
            })
            .collect();

        info!(
            "Order book {}: pruning {} good-for-day orders",
            state.symbol,
            expired.len()
        );
        state.cancel_many(&expired);
    }
}
