//! Thread-safe controller handle.
//!
//! Every input takes the same lock, so the state check, the store write and
//! the state change of one transition happen before the next input is looked
//! at. The lock is never held across an `.await`.

use super::{AcquisitionState, Controller, Input, Outcome};
use crate::hardware::NfcHardware;
use crate::storage::IdentifierStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle serializing access to one controller.
#[derive(Debug)]
pub struct SharedController<S, H> {
    inner: Arc<Mutex<Controller<S, H>>>,
}

impl<S, H> Clone for SharedController<S, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, H> SharedController<S, H>
where
    S: IdentifierStore,
    H: NfcHardware,
{
    /// Wrap a controller.
    pub fn new(controller: Controller<S, H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Controller<S, H>> {
        // A panic inside a transition leaves the controller in a valid state,
        // so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed one input through the state machine.
    pub fn handle(&self, input: Input) -> Option<Outcome> {
        self.lock().handle(input)
    }

    /// Current state.
    pub fn state(&self) -> AcquisitionState {
        self.lock().state()
    }

    /// Run `f` with the controller locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Controller<S, H>) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{SimulatedHardware, TagEvent};
    use crate::storage::MemoryStore;
    use std::thread;

    #[test]
    fn test_only_one_tag_wins_a_scan() {
        let shared = SharedController::new(Controller::new(
            MemoryStore::new(),
            SimulatedHardware::available(),
        ));
        assert_eq!(shared.handle(Input::Scan), Some(Outcome::ScanStarted));

        let handles: Vec<_> = (0u8..8)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || shared.handle(Input::TagDetected(TagEvent::new(vec![n; 4]))))
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        let updates = outcomes.iter().flatten().filter(|o| o.is_update()).count();
        assert_eq!(updates, 1);
        assert_eq!(outcomes.iter().filter(|o| o.is_none()).count(), 7);
        assert_eq!(shared.state(), AcquisitionState::Idle);
        assert_eq!(shared.with(|c| c.store().writes()), 1);
    }
}
