//! Thread list presenter.
//!
//! Groups a user's threads into the recency buckets the thread picker
//! renders: today, yesterday, and the previous seven days. Pure
//! functions over `Thread` rows; selection itself goes through
//! `SessionController::select_thread`.

use chrono::{DateTime, Duration, Utc};

use crate::models::Thread;

/// Threads partitioned by recency, each bucket newest first.
///
/// Buckets never overlap. Threads older than seven days are omitted —
/// out of scope for display, not deleted.
#[derive(Debug, Clone, Default)]
pub struct ThreadBuckets {
    /// Created on the current calendar day
    pub today: Vec<Thread>,
    /// Created on the calendar day before
    pub yesterday: Vec<Thread>,
    /// Created within the last seven days, excluding today and yesterday
    pub previous_week: Vec<Thread>,
}

impl ThreadBuckets {
    /// True when every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.yesterday.is_empty() && self.previous_week.is_empty()
    }

    /// Total number of displayed threads.
    pub fn len(&self) -> usize {
        self.today.len() + self.yesterday.len() + self.previous_week.len()
    }
}

/// Partition `threads` into recency buckets relative to `now`.
pub fn bucket_threads(threads: &[Thread], now: DateTime<Utc>) -> ThreadBuckets {
    let today = now.date_naive();
    let yesterday = today - Duration::days(1);
    let week_ago = now - Duration::days(7);

    let mut buckets = ThreadBuckets::default();
    for thread in threads {
        let created_day = thread.created_at.date_naive();
        if created_day == today {
            buckets.today.push(thread.clone());
        } else if created_day == yesterday {
            buckets.yesterday.push(thread.clone());
        } else if thread.created_at > week_ago {
            buckets.previous_week.push(thread.clone());
        }
    }

    for bucket in [
        &mut buckets.today,
        &mut buckets.yesterday,
        &mut buckets.previous_week,
    ] {
        bucket.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    buckets
}
