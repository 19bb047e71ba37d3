//! Two-phase delete: a plain confirmation, and when the backend reports
//! dependents, a second prompt that picks a record to hand them to.
//!
//! ```text
//! Idle ──request──▶ ConfirmPending ──confirm──▶ Idle                (deleted)
//!                        │
//!                        └──conflict──▶ ReassignPending ──reassign──▶ Idle
//! ```
//!
//! `cancel` returns to `Idle` from anywhere without touching the network.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::api::{AdminApi, ApiError};
use crate::models::Record;

use super::loader::ListLoader;
use super::notice::Notifications;

pub const NO_REPLACEMENT_MESSAGE: &str = "Please select another faculty to reassign events.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteState {
    Idle,
    ConfirmPending { id: i64 },
    ReassignPending { id: i64, replacement: Option<i64> },
}

impl DeleteState {
    pub fn target(&self) -> Option<i64> {
        match *self {
            DeleteState::Idle => None,
            DeleteState::ConfirmPending { id } | DeleteState::ReassignPending { id, .. } => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The backend wants a replacement before it will delete.
    NeedsReassignment,
    Failed,
    /// Rejected locally; nothing was sent.
    Invalid,
    /// No delete was pending.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    NotReassigning,
    SameAsTarget(i64),
}

impl fmt::Display for ChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceError::NotReassigning => write!(f, "No reassignment is in progress"),
            ChoiceError::SameAsTarget(_) => {
                write!(f, "Events cannot be reassigned to the record being deleted")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DeleteWorkflow<R> {
    state: DeleteState,
    #[serde(skip)]
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Default for DeleteWorkflow<R> {
    fn default() -> Self {
        Self { state: DeleteState::Idle, _record: PhantomData }
    }
}

impl<R: Record> DeleteWorkflow<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DeleteState {
        self.state
    }

    /// Open the confirmation for `id`, replacing any other pending intent.
    pub fn request(&mut self, id: i64) {
        self.state = DeleteState::ConfirmPending { id };
    }

    pub fn cancel(&mut self) {
        self.state = DeleteState::Idle;
    }

    /// Records other than the one being deleted.
    pub fn replacement_options<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        let target = self.state.target();
        records.iter().filter(|r| Some(r.id()) != target).collect()
    }

    pub fn choose(&mut self, replacement: i64) -> Result<(), ChoiceError> {
        match &mut self.state {
            DeleteState::ReassignPending { id, .. } if *id == replacement => {
                Err(ChoiceError::SameAsTarget(replacement))
            }
            DeleteState::ReassignPending { replacement: choice, .. } => {
                *choice = Some(replacement);
                Ok(())
            }
            _ => Err(ChoiceError::NotReassigning),
        }
    }

    pub fn clear_choice(&mut self) {
        if let DeleteState::ReassignPending { replacement, .. } = &mut self.state {
            *replacement = None;
        }
    }

    /// First delete attempt, without a replacement.
    pub async fn confirm<A: AdminApi>(
        &mut self,
        api: &A,
        list: &mut ListLoader<R>,
        notes: &mut Notifications,
    ) -> DeleteOutcome {
        let DeleteState::ConfirmPending { id } = self.state else {
            return DeleteOutcome::Ignored;
        };
        let collection = R::COLLECTION;

        match api.delete(collection, id, None).await {
            Ok(()) => {
                log::info!("{collection} {id} deleted");
                self.state = DeleteState::Idle;
                notes.success(format!("{} deleted successfully", collection.noun()));
                let _ = list.load(api, notes).await;
                DeleteOutcome::Deleted
            }
            Err(ApiError::DependencyConflict { dependents, .. }) if collection.supports_reassignment() => {
                log::info!("{collection} {id} has dependents ({dependents:?}); asking for a replacement");
                self.state = DeleteState::ReassignPending { id, replacement: None };
                DeleteOutcome::NeedsReassignment
            }
            Err(e) => {
                self.state = DeleteState::Idle;
                notes.report(&e);
                DeleteOutcome::Failed
            }
        }
    }

    /// Second attempt, handing dependents to the chosen replacement.
    pub async fn reassign<A: AdminApi>(
        &mut self,
        api: &A,
        list: &mut ListLoader<R>,
        notes: &mut Notifications,
    ) -> DeleteOutcome {
        let DeleteState::ReassignPending { id, replacement } = self.state else {
            return DeleteOutcome::Ignored;
        };
        let Some(replacement) = replacement else {
            notes.error(NO_REPLACEMENT_MESSAGE);
            return DeleteOutcome::Invalid;
        };
        let collection = R::COLLECTION;

        match api.delete(collection, id, Some(replacement)).await {
            Ok(()) => {
                log::info!("{collection} {id} deleted, dependents moved to {replacement}");
                self.state = DeleteState::Idle;
                notes.success(format!(
                    "{} deleted and events reassigned successfully",
                    collection.noun()
                ));
                let _ = list.load(api, notes).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                notes.report(&e);
                DeleteOutcome::Failed
            }
        }
    }
}
