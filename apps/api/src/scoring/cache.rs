//! Bounded least-recently-used cache of role → skill lists.
//!
//! Shared across requests behind a `std::sync::Mutex`; the lock is only held for a
//! lookup or an insert and never across an `.await`.

use std::collections::HashMap;
use std::sync::Mutex;

struct Slot {
    skills: Vec<String>,
    last_used: u64,
}

struct Inner {
    slots: HashMap<String, Slot>,
    clock: u64,
}

pub struct SkillCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl SkillCache {
    /// A capacity of zero disables caching entirely.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                slots: HashMap::with_capacity(capacity),
                clock: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached skills for `role` (case-sensitive key) and marks it as recently used.
    pub fn get(&self, role: &str) -> Option<Vec<String>> {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        inner.clock += 1;
        let now = inner.clock;
        let slot = inner.slots.get_mut(role)?;
        slot.last_used = now;
        Some(slot.skills.clone())
    }

    /// Inserts or replaces `role`, evicting the least recently used entry when full.
    pub fn insert(&self, role: &str, skills: Vec<String>) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        inner.clock += 1;
        let now = inner.clock;

        if !inner.slots.contains_key(role) && inner.slots.len() >= self.capacity {
            let oldest = inner
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("Evicting skill list for role '{oldest}'");
                inner.slots.remove(&oldest);
            }
        }

        inner.slots.insert(
            role.to_string(),
            Slot {
                skills,
                last_used: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .slots
            .len()
    }
}
