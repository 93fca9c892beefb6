use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{FormAction, FormState, reduce};

/// Shared owner of one form's state.
///
/// `FormStore` uses `Arc<RwLock<FormState>>` internally, making it cheap to
/// clone into submit helpers and external handles. Every clone sees the same
/// state. Each dispatch runs the reducer under the write lock and replaces
/// the stored value, so transitions never interleave.
///
/// # Example
///
/// ```
/// use formstate::field::Field;
/// use formstate::form::{FormAction, FormState, FormStore};
///
/// let store = FormStore::new(FormState::default());
/// store.dispatch(FormAction::Initialize(vec![Field::new("name", "Name")]));
/// assert!(store.is_dirty());
/// assert_eq!(store.read(|state| state.data.len()), 1);
/// ```
#[derive(Debug)]
pub struct FormStore {
    inner: Arc<RwLock<FormState>>,
    dirty: Arc<AtomicBool>,
}

impl FormStore {
    /// Create a store holding the given state.
    pub fn new(state: FormState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current state.
    pub fn snapshot(&self) -> FormState {
        self.read(Clone::clone)
    }

    /// Read the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    /// Apply an action.
    pub fn dispatch(&self, action: FormAction) {
        self.dispatch_then(action, |_| ());
    }

    /// Apply an action and read the resulting state under the same lock.
    pub fn dispatch_then<R>(&self, action: FormAction, f: impl FnOnce(&FormState) -> R) -> R {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = reduce(&guard, action);
        self.dirty.store(true, Ordering::SeqCst);
        f(&guard)
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for FormStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(FormState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[test]
    fn test_clones_share_state() {
        let store = FormStore::default();
        let other = store.clone();

        other.dispatch(FormAction::Initialize(vec![Field::new("a", "A")]));
        assert_eq!(store.read(|state| state.data.len()), 1);
    }

    #[test]
    fn test_dirty_flag() {
        let store = FormStore::default();
        assert!(!store.is_dirty());

        store.dispatch(FormAction::SetLoading(true));
        assert!(store.is_dirty());

        store.clear_dirty();
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_dispatch_then_reads_new_state() {
        let store = FormStore::default();
        let loading = store.dispatch_then(FormAction::SetLoading(true), |state| state.is_loading);
        assert!(loading);
    }
}
