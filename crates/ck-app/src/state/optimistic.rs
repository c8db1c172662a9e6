use std::sync::{Mutex, PoisonError};

/// A value that can be changed ahead of confirmation and compensated later.
///
/// Apply locally, attempt remotely, roll back on rejection. Every change
/// bumps a generation so that a late rollback never clobbers a newer
/// value.
///
/// 乐观更新单元：先本地应用，失败时回滚。
pub struct OptimisticCell<T> {
    inner: Mutex<CellState<T>>,
}

struct CellState<T> {
    value: T,
    generation: u64,
}

/// Receipt for an optimistic change, needed to roll it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange<T> {
    previous: T,
    generation: u64,
}

impl<T> PendingChange<T> {
    pub fn previous(&self) -> &T {
        &self.previous
    }
}

impl<T: Clone> OptimisticCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(CellState {
                value,
                generation: 0,
            }),
        }
    }

    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Overwrite with a value the backend already confirmed.
    pub fn set_confirmed(&self, value: T) {
        let mut state = self.lock();
        state.value = value;
        state.generation += 1;
    }

    /// Show `value` immediately and remember what it replaced.
    pub fn apply(&self, value: T) -> PendingChange<T> {
        let mut state = self.lock();
        let previous = std::mem::replace(&mut state.value, value);
        state.generation += 1;
        PendingChange {
            previous,
            generation: state.generation,
        }
    }

    /// Restore the pre-change value unless something newer was applied since.
    ///
    /// Returns whether the rollback took effect.
    pub fn rollback(&self, pending: PendingChange<T>) -> bool {
        let mut state = self.lock();
        if state.generation != pending.generation {
            return false;
        }
        state.value = pending.previous;
        state.generation += 1;
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CellState<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
