use std::collections::VecDeque;

use tolk_translator::TranslationResult;
use tolk_types::TextSource;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub source: TextSource,
    pub result: TranslationResult,
}

/// Bounded in-memory list of successful translations, oldest first
#[derive(Debug)]
pub struct TranslationHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl TranslationHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Store a result, evicting the oldest entry when full. A zero capacity keeps nothing.
    pub fn record(&mut self, source: TextSource, result: TranslationResult) -> Uuid {
        let id = Uuid::new_v4();
        if self.capacity == 0 {
            return id;
        }

        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry { id, source, result });
        id
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
