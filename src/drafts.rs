// src/drafts.rs
//
// In-memory wizard sessions, one per signed-in host. Drafts live only as
// long as the process: cancelling, publishing, or a restart discards them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::wizard::WizardState;
use crate::errors::ServerError;

#[derive(Clone, Default)]
pub struct DraftStore {
    inner: Arc<Mutex<HashMap<i64, WizardState>>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the user's wizard state, creating a fresh one on
    /// first access.
    pub fn with_state<F, T>(&self, user_id: i64, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut WizardState) -> Result<T, ServerError>,
    {
        let mut map = self.inner.lock().map_err(|_| ServerError::InternalError)?;
        let state = map.entry(user_id).or_default();
        f(state)
    }

    /// Snapshot for rendering; None if the user hasn't started a draft.
    pub fn snapshot(&self, user_id: i64) -> Result<Option<WizardState>, ServerError> {
        let map = self.inner.lock().map_err(|_| ServerError::InternalError)?;
        Ok(map.get(&user_id).cloned())
    }

    /// Start over with an empty draft.
    pub fn reset(&self, user_id: i64) -> Result<(), ServerError> {
        let mut map = self.inner.lock().map_err(|_| ServerError::InternalError)?;
        map.insert(user_id, WizardState::new());
        Ok(())
    }

    /// Remove the draft entirely (after publish or cancel).
    pub fn discard(&self, user_id: i64) -> Result<(), ServerError> {
        let mut map = self.inner.lock().map_err(|_| ServerError::InternalError)?;
        map.remove(&user_id);
        Ok(())
    }
}
