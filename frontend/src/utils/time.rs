use chrono::Utc;
use std::time::Duration;

/// Wall-clock source in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Runs a task once after `delay`. Dropping the returned handle cancels the task.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

#[cfg(target_arch = "wasm32")]
impl Scheduler for BrowserScheduler {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, task)
    }
}

// No timers exist during server-side rendering.
#[cfg(not(target_arch = "wasm32"))]
impl Scheduler for BrowserScheduler {
    type Handle = ();

    fn schedule(&self, _delay: Duration, _task: Box<dyn FnOnce()>) -> Self::Handle {}
}

pub fn elapsed_ms(since_ms: i64, now_ms: i64) -> i64 {
    now_ms.saturating_sub(since_ms)
}

pub fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_never_overflows() {
        assert_eq!(elapsed_ms(1_000, 4_000), 3_000);
        assert_eq!(elapsed_ms(i64::MIN, i64::MAX), i64::MAX);
    }

    #[test]
    fn duration_ms_converts_minutes() {
        assert_eq!(duration_ms(Duration::from_secs(20 * 60)), 1_200_000);
    }
}
