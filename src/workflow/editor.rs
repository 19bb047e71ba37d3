use serde::{Deserialize, Serialize};

use crate::api::AdminApi;
use crate::models::{FieldError, Record};

use super::loader::ListLoader;
use super::notice::Notifications;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    /// The draft is still open.
    Failed,
    NoDraft,
}

/// Holds at most one uncommitted copy of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "R: Record")]
pub struct RecordEditor<R> {
    draft: Option<R>,
}

impl<R: Record> Default for RecordEditor<R> {
    fn default() -> Self {
        Self { draft: None }
    }
}

impl<R: Record> RecordEditor<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a draft, replacing any unsaved one.
    pub fn begin(&mut self, record: &R) {
        self.draft = Some(record.clone());
    }

    pub fn draft(&self) -> Option<&R> {
        self.draft.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match self.draft.as_mut() {
            Some(draft) => draft.set_field(field, value),
            None => Err(FieldError::Unknown(field.to_string())),
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// PUT the whole draft. Success closes it and refreshes `list`.
    pub async fn submit<A: AdminApi>(
        &mut self,
        api: &A,
        list: &mut ListLoader<R>,
        notes: &mut Notifications,
    ) -> EditOutcome {
        let Some(draft) = self.draft.as_ref() else {
            return EditOutcome::NoDraft;
        };

        match api.update(draft).await {
            Ok(()) => {
                log::info!("{} {} updated", R::COLLECTION, draft.id());
                notes.success(format!("{} updated successfully", R::COLLECTION.noun()));
                self.draft = None;
                let _ = list.load(api, notes).await;
                EditOutcome::Saved
            }
            Err(e) => {
                notes.report(&e);
                EditOutcome::Failed
            }
        }
    }
}
