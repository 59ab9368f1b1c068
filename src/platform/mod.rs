//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (delta from display-refresh timestamps)
//! - Repeating round timers (setInterval on web, a virtual clock natively)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Repeating jobs a round arms while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundTask {
    /// Spawn one word
    Spawn,
    /// Take one second off the clock
    Countdown,
}

/// Cancel handle for an armed task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u32);

/// Something that can run `RoundTask`s on a fixed cadence
pub trait TimerHost {
    /// Start firing `task` every `interval_ms`
    fn arm(&mut self, task: RoundTask, interval_ms: u32) -> TaskHandle;
    /// Stop a previously armed task (unknown handles are ignored)
    fn cancel(&mut self, handle: TaskHandle);
}

/// Turns display-refresh timestamps into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous timestamp (0 on the first frame or if time went backwards)
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}

#[derive(Debug, Clone)]
struct Armed {
    handle: TaskHandle,
    task: RoundTask,
    interval_ms: f64,
    next_due_ms: f64,
}

/// Timer host driven by an explicit virtual clock (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct VirtualTimers {
    now_ms: f64,
    next_handle: u32,
    armed: Vec<Armed>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn is_armed(&self, task: RoundTask) -> bool {
        self.armed.iter().any(|a| a.task == task)
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Pop the earliest task due at or before `until_ms` and reschedule it.
    ///
    /// Ties fire in arm order. Once nothing is due the clock settles at
    /// `until_ms`. Call in a loop so a task that cancels another takes effect
    /// before the next one fires.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<RoundTask> {
        let due = self
            .armed
            .iter_mut()
            .filter(|a| a.next_due_ms <= until_ms)
            .min_by(|a, b| {
                a.next_due_ms
                    .total_cmp(&b.next_due_ms)
                    .then(a.handle.0.cmp(&b.handle.0))
            });

        match due {
            Some(armed) => {
                self.now_ms = armed.next_due_ms;
                armed.next_due_ms += armed.interval_ms;
                Some(armed.task)
            }
            None => {
                self.now_ms = self.now_ms.max(until_ms);
                None
            }
        }
    }
}

impl TimerHost for VirtualTimers {
    fn arm(&mut self, task: RoundTask, interval_ms: u32) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        let interval_ms = f64::from(interval_ms.max(1));
        self.armed.push(Armed {
            handle,
            task,
            interval_ms,
            next_due_ms: self.now_ms + interval_ms,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.armed.retain(|a| a.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
        assert_eq!(clock.delta(900.0), 0.0);
    }

    #[test]
    fn test_virtual_timers_fire_in_order() {
        let mut timers = VirtualTimers::new();
        let spawn = timers.arm(RoundTask::Spawn, 1000);
        timers.arm(RoundTask::Countdown, 1000);

        assert_eq!(timers.pop_due(999.0), None);
        assert_eq!(timers.pop_due(2000.0), Some(RoundTask::Spawn));
        assert_eq!(timers.pop_due(2000.0), Some(RoundTask::Countdown));
        assert_eq!(timers.pop_due(2000.0), Some(RoundTask::Spawn));
        assert_eq!(timers.pop_due(2000.0), Some(RoundTask::Countdown));
        assert_eq!(timers.pop_due(2000.0), None);
        assert_eq!(timers.now_ms(), 2000.0);

        timers.cancel(spawn);
        assert!(!timers.is_armed(RoundTask::Spawn));
        assert_eq!(timers.pop_due(3000.0), Some(RoundTask::Countdown));
        assert_eq!(timers.pop_due(3000.0), None);
    }

    #[test]
    fn test_arm_counts_from_now() {
        let mut timers = VirtualTimers::new();
        assert_eq!(timers.pop_due(500.0), None);
        timers.arm(RoundTask::Countdown, 1000);
        assert_eq!(timers.pop_due(1400.0), None);
        assert_eq!(timers.pop_due(1500.0), Some(RoundTask::Countdown));
    }
}
