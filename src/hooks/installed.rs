//! The process-wide slot holding the installed [`Hooks`].
//!
//! Readers take a reference-counted snapshot and drop the lock before any
//! hook runs, so hooks are free to annotate or to replace the installed
//! hooks.

#[cfg(feature = "std")]
use std::sync::{PoisonError, RwLock};

#[cfg(not(feature = "std"))]
use spin::RwLock;
use triomphe::Arc;

use super::Hooks;

static INSTALLED: RwLock<Option<Arc<Hooks>>> = RwLock::new(None);

/// The installed hooks, if any.
pub(super) fn current() -> Option<Arc<Hooks>> {
    #[cfg(feature = "std")]
    let guard = INSTALLED.read().unwrap_or_else(PoisonError::into_inner);

    #[cfg(not(feature = "std"))]
    let guard = INSTALLED.read();

    guard.clone()
}

/// Installs `hooks` unless some are already installed, in which case they
/// are handed back.
pub(super) fn install(hooks: Hooks) -> Result<(), Hooks> {
    update(|slot| match slot {
        Some(_) => Err(hooks),
        None => {
            *slot = Some(Arc::new(hooks));
            Ok(())
        }
    })
}

/// Swaps the installed hooks for `hooks`, returning the previous ones.
pub(super) fn replace(hooks: Option<Hooks>) -> Option<Arc<Hooks>> {
    let hooks = hooks.map(Arc::new);
    update(|slot| core::mem::replace(slot, hooks))
}

fn update<R>(f: impl FnOnce(&mut Option<Arc<Hooks>>) -> R) -> R {
    // The slot only ever holds fully built hooks, even after a panic
    #[cfg(feature = "std")]
    let mut guard = INSTALLED.write().unwrap_or_else(PoisonError::into_inner);

    #[cfg(not(feature = "std"))]
    let mut guard = INSTALLED.write();

    f(&mut *guard)
}
