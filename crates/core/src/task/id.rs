//! Identifier generation
//!
//! Ids are millisecond Unix timestamps. When the clock has not advanced since
//! the previous id, the previous id plus one is used instead, so ids handed
//! out by one generator are strictly increasing. Once `u64::MAX` has been
//! handed out or loaded, the generator is exhausted.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use super::model::TaskId;

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above an already issued id
    pub fn starting_after(last: TaskId) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// Produce the next id, or `None` when no larger id exists
    pub fn next_id(&self) -> Option<TaskId> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last.checked_add(1)?);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return Some(candidate),
                Err(current) => last = current,
            }
        }
    }
}
