use crate::api::{AdminApi, ApiError};
use crate::models::Record;

use super::notice::Notifications;

/// What a list page should show.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, R> {
    Loading,
    Empty,
    Rows(&'a [R]),
}

/// One collection as last fetched from the backend. The vector is only
/// ever replaced wholesale.
#[derive(Debug)]
pub struct ListLoader<R> {
    records: Vec<R>,
    loading: bool,
    loaded: bool,
}

impl<R: Record> Default for ListLoader<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ListLoader<R> {
    pub fn new() -> Self {
        Self { records: Vec::new(), loading: true, loaded: false }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn contains(&self, id: i64) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn view(&self) -> ListView<'_, R> {
        if self.loading && !self.loaded {
            ListView::Loading
        } else if self.records.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(&self.records)
        }
    }

    /// Refetch the collection. Once a login redirect is pending nothing is
    /// fetched and the current list is left untouched.
    pub async fn load<A: AdminApi>(
        &mut self,
        api: &A,
        notes: &mut Notifications,
    ) -> Result<&[R], ApiError> {
        if notes.redirect_scheduled() {
            return Err(ApiError::Unauthorized);
        }

        self.loading = true;
        let result = api.list::<R>().await;
        self.loading = false;

        match result {
            Ok(records) => {
                self.records = records;
                self.loaded = true;
                Ok(&self.records)
            }
            Err(e @ ApiError::MalformedResponse { .. }) => {
                log::warn!("{} list rejected: {e:?}", R::COLLECTION);
                self.records = Vec::new();
                self.loaded = true;
                notes.report(&e);
                Err(e)
            }
            Err(e) => {
                notes.report(&e);
                Err(e)
            }
        }
    }
}
