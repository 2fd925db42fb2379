//! Optimistic foul tallies shown on this station before the server confirms them.

use shared::domain::{Alliance, FoulKey, FoulSeverity};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalFoulCounts {
    counts: [u32; 4],
}

impl LocalFoulCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: FoulKey) -> u32 {
        let slot = &mut self.counts[Self::slot(key)];
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn get(&self, key: FoulKey) -> u32 {
        self.counts[Self::slot(key)]
    }

    pub fn all(&self) -> [(FoulKey, u32); 4] {
        FoulKey::ALL.map(|key| (key, self.get(key)))
    }

    pub fn reset_all(&mut self) {
        self.counts = [0; 4];
    }

    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }

    /// Index into `counts`, in `FoulKey::ALL` order.
    fn slot(key: FoulKey) -> usize {
        match (key.alliance, key.severity) {
            (Alliance::Red, FoulSeverity::Minor) => 0,
            (Alliance::Blue, FoulSeverity::Minor) => 1,
            (Alliance::Red, FoulSeverity::Major) => 2,
            (Alliance::Blue, FoulSeverity::Major) => 3,
        }
    }
}
