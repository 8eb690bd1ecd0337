//! Minimal synchronous event dispatcher.
//!
//! Subscribers are called in subscription order on the same turn as `emit`.
//! Nothing is queued: a listener registered during an emit only sees later
//! events.

use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};

// Ids are unique across dispatchers so one id can be offered to several.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(T)>;

pub struct Dispatcher<T> {
    listeners: SmallVec<[(ListenerId, Listener<T>); 2]>,
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self {
            listeners: SmallVec::new(),
        }
    }
}

impl<T: Copy> Dispatcher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(T) + 'static) -> ListenerId {
        let id = ListenerId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was never registered or is already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, value: T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
