use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

type Listener<T> = Box<dyn FnMut(&T) + Send>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<T>)>,
}

/// Latest-value holder with synchronous change listeners.
///
/// `set` stores the value and then calls every listener in registration
/// order before returning. There is no buffering: a listener registered late
/// only sees the latest value, and only if it asks for it via [`observe`].
///
/// Listeners run while the listener list is locked. They must not call `set`,
/// `subscribe` or `unsubscribe` on the same observable; `get` is fine.
///
/// [`observe`]: Observable::observe
pub struct Observable<T> {
    value: Mutex<Option<T>>,
    listeners: Mutex<Listeners<T>>,
}

impl<T: Clone> Observable<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
            listeners: Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    /// Latest value, if one was ever set.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        lock(&self.value).clone()
    }

    /// Store `value` and notify listeners in registration order.
    pub fn set(&self, value: T) {
        *lock(&self.value) = Some(value.clone());
        let mut listeners = lock(&self.listeners);
        for (_, listener) in &mut listeners.entries {
            listener(&value);
        }
    }

    /// Register a listener for future values.
    pub fn subscribe(&self, listener: impl FnMut(&T) + Send + 'static) -> ListenerId {
        let mut listeners = lock(&self.listeners);
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));
        id
    }

    /// Register a listener and immediately hand it the current value, if any.
    pub fn observe(&self, mut listener: impl FnMut(&T) + Send + 'static) -> ListenerId {
        if let Some(current) = self.get() {
            listener(&current);
        }
        self.subscribe(listener)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = lock(&self.listeners);
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }
}

impl<T: Clone> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

pub(crate) fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
