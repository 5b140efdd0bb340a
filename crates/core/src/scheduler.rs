//! Tick scheduler - fixed-timestep pacing for automatic drops
//!
//! The host calls the game loop once per frame with a timestamp. The
//! scheduler turns those timestamps into at most one tick per frame:
//! elapsed time is accumulated, and once it exceeds the interval a single
//! tick fires and the accumulator goes back to zero. Missed intervals are not
//! replayed, so a long stall (a backgrounded window) costs one row, not many.
//!
//! Arming hands out a fresh [`ScheduleHandle`]; cancelling releases it. While
//! no handle is armed, nothing ever ticks.

/// Identity of one armed schedule. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    next_id: u64,
    armed: Option<ScheduleHandle>,
    last_frame_ms: Option<u64>,
    accumulated_ms: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new schedule with a zeroed counter, releasing any previous one.
    ///
    /// The next frame only records its timestamp; counting starts after it.
    pub fn arm(&mut self) -> ScheduleHandle {
        self.cancel();
        self.next_id += 1;
        let handle = ScheduleHandle(self.next_id);
        self.armed = Some(handle);
        handle
    }

    /// Release the armed handle, if any. Takes effect immediately.
    pub fn cancel(&mut self) -> Option<ScheduleHandle> {
        self.last_frame_ms = None;
        self.accumulated_ms = 0;
        self.armed.take()
    }

    pub fn handle(&self) -> Option<ScheduleHandle> {
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Whether `handle` is the schedule currently armed.
    pub fn is_current(&self, handle: ScheduleHandle) -> bool {
        self.armed == Some(handle)
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Zero the accumulator without touching the frame clock.
    pub fn reset_counter(&mut self) {
        self.accumulated_ms = 0;
    }

    /// Account for a frame at `now_ms`. Returns true when one tick is due.
    pub fn advance(&mut self, now_ms: u64, interval_ms: u32) -> bool {
        if self.armed.is_none() {
            return false;
        }

        let elapsed = self
            .last_frame_ms
            .map(|last| now_ms.saturating_sub(last))
            .unwrap_or(0);
        self.last_frame_ms = Some(now_ms);
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed);

        if self.accumulated_ms > interval_ms as u64 {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }

    /// [`advance`](Self::advance) on behalf of `handle`; a released handle never ticks.
    pub fn advance_for(&mut self, handle: ScheduleHandle, now_ms: u64, interval_ms: u32) -> bool {
        if !self.is_current(handle) {
            return false;
        }
        self.advance(now_ms, interval_ms)
    }
}
