//! Download queue state machine.
//!
//! Items are consumed strictly from the front and advance only on a
//! confirmed success; a failed attempt leaves the front item in place.
//! The queue is rebuilt from a fresh scrape on every run, never persisted.

/// Lifecycle of one queued image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Done,
}

/// One queued image URL plus its download state.
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub url: String,
    pub state: ItemState,
    /// Failed attempts so far; feeds the bounded retry policy.
    pub attempts: u32,
}

/// Ordered download queue. Retries never reorder.
#[derive(Debug)]
pub struct DownloadQueue {
    items: Vec<QueueItem>,
    front: usize,
}

impl DownloadQueue {
    pub fn new(urls: Vec<String>) -> Self {
        let items = urls
            .into_iter()
            .map(|url| QueueItem {
                url,
                state: ItemState::Pending,
                attempts: 0,
            })
            .collect();
        Self { items, front: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items confirmed downloaded.
    pub fn completed(&self) -> usize {
        self.front
    }

    /// The next pending item, without consuming it.
    pub fn peek(&self) -> Option<&QueueItem> {
        self.items.get(self.front)
    }

    /// Records a failed attempt on the front item and returns its new count.
    pub fn record_failure(&mut self) -> u32 {
        match self.items.get_mut(self.front) {
            Some(item) => {
                item.attempts += 1;
                item.attempts
            }
            None => 0,
        }
    }

    /// Marks the front item `Done` and advances past it.
    pub fn mark_done(&mut self) {
        if let Some(item) = self.items.get_mut(self.front) {
            item.state = ItemState::Done;
            self.front += 1;
        }
    }
}
