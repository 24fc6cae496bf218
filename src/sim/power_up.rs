/// Power-up coordinator.
///
/// ## Protocol
///
/// Each power pill spawns one thread that runs:
///   1. `arm_or_extend`: under the timer lock: empower every adversary,
///      stop the pending timer (if any), arm a new one.
///   2. `await_and_revert`: wait on the condvar until the deadline, which
///      releases the timer lock while blocked; then, under the lock,
///      revert every adversary to Normal.
///
/// Stopping a timer empties the slot and wakes all waiters. A waiter
/// whose handle is no longer the armed one returns without reverting.
/// So overlapping pickups collapse into one window that ends `duration`
/// after the last pickup, with exactly one revert.
///
/// Lock order is always timer → status. The game loop never touches the
/// timer lock.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::entity::Status;
use super::adversaries::AdversaryState;

/// Proof of arming, consumed by `await_and_revert`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
    deadline: Instant,
}

#[derive(Debug, Default)]
struct TimerSlot {
    /// The live timer, `None` when idle.
    armed: Option<TimerHandle>,
    next_generation: u64,
    reverts: usize,
}

#[derive(Debug)]
pub struct PowerUp {
    adversaries: Arc<AdversaryState>,
    duration: Duration,
    timer: Mutex<TimerSlot>,
    timer_changed: Condvar,
}

impl PowerUp {
    pub fn new(adversaries: Arc<AdversaryState>, duration: Duration) -> Self {
        PowerUp {
            adversaries,
            duration,
            timer: Mutex::new(TimerSlot::default()),
            timer_changed: Condvar::new(),
        }
    }

    /// Fire-and-forget: the caller never waits for the window to end.
    pub fn trigger(self: &Arc<Self>) {
        let coordinator = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name("power-up".into())
            .spawn(move || {
                let handle = coordinator.arm_or_extend();
                coordinator.await_and_revert(handle);
            });
        if let Err(e) = spawned {
            log::error!("could not spawn power-up thread: {e}");
        }
    }

    /// Empower everyone and (re)arm the single timer.
    pub fn arm_or_extend(&self) -> TimerHandle {
        let mut slot = self.lock_timer();
        self.adversaries.bulk_set_status(Status::Empowered);

        if let Some(stale) = slot.armed.take() {
            log::debug!("power-up extended, stopping timer #{}", stale.generation);
            self.timer_changed.notify_all();
        }

        let handle = TimerHandle {
            generation: slot.next_generation,
            deadline: Instant::now() + self.duration,
        };
        slot.next_generation += 1;
        slot.armed = Some(handle);
        log::debug!("power-up timer #{} armed for {:?}", handle.generation, self.duration);
        handle
    }

    /// Block until `handle` fires, then revert. Returns `false` (and
    /// leaves statuses alone) if the timer was stopped by a later pickup.
    pub fn await_and_revert(&self, handle: TimerHandle) -> bool {
        let mut slot = self.lock_timer();
        loop {
            if slot.armed != Some(handle) {
                return false;
            }
            let now = Instant::now();
            if now >= handle.deadline {
                break;
            }
            slot = self
                .timer_changed
                .wait_timeout(slot, handle.deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }

        slot.armed = None;
        slot.reverts += 1;
        self.adversaries.bulk_set_status(Status::Normal);
        log::debug!("power-up timer #{} fired, adversaries back to normal", handle.generation);
        true
    }

    pub fn is_armed(&self) -> bool {
        self.lock_timer().armed.is_some()
    }

    /// Number of empowerment windows that have ended.
    pub fn reverts(&self) -> usize {
        self.lock_timer().reverts
    }

    fn lock_timer(&self) -> MutexGuard<'_, TimerSlot> {
        self.timer.lock().unwrap_or_else(|e| e.into_inner())
    }
}
