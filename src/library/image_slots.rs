use std::{collections::HashMap, future::Future};
use tokio::task::JoinHandle;
use tracing::{trace_span, warn, Instrument};

/// Image fetch tasks keyed by the visual slot (row) that displays them.
///
/// Slots are recycled while scrolling, so assigning a new task to a slot
/// aborts whatever the slot was still fetching for its previous item.
#[derive(Default)]
pub struct ImageSlots {
    tasks: HashMap<usize, JoinHandle<()>>,
}

impl ImageSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `task` for `slot`, aborting the slot's previous task.
    pub fn assign<F>(&mut self, slot: usize, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let handle = tokio::spawn(task.instrument(trace_span!("spawn_image_fetch", slot)));
        if let Some(previous) = self.tasks.insert(slot, handle) {
            previous.abort();
        }
    }

    /// Aborts the task of `slot`. Returns true if one was still running.
    pub fn cancel(&mut self, slot: usize) -> bool {
        match self.tasks.remove(&slot) {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    /// Aborts all tasks, e.g. when the screen goes away.
    pub fn clear(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Waits until every assigned task has finished or was aborted.
    pub async fn join(&mut self) {
        for (slot, handle) in self.tasks.drain() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    warn!("image fetch of slot {slot} panicked: {e}");
                }
            }
        }
    }

    /// Number of slots with a task that has not finished yet.
    pub fn active(&self) -> usize {
        self.tasks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for ImageSlots {
    fn drop(&mut self) {
        self.clear();
    }
}
