//! Shared test infrastructure: an in-memory backend behind the `AdminApi`
//! trait.
//!
//! The fake enforces the same rules as the real portal backend:
//! - every call answers 401 once the session is revoked
//! - a faculty with assigned events cannot be deleted without a replacement
//! - a replacement inherits the deleted faculty's events

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use activity_admin::api::{AdminApi, ApiError};
use activity_admin::models::{AdminProfile, Collection, FacultyRecord, Record, StudentRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Me,
    List(Collection),
    Update(Collection, i64),
    Delete(Collection, i64, Option<i64>),
}

pub struct FakeBackend {
    pub faculties: RefCell<Vec<FacultyRecord>>,
    pub students: RefCell<Vec<StudentRecord>>,
    pub calls: RefCell<Vec<Call>>,
    pub authenticated: Cell<bool>,
    /// Returned (once) by the next call instead of doing the work.
    pub next_error: RefCell<Option<ApiError>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            faculties: RefCell::new(Vec::new()),
            students: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            authenticated: Cell::new(true),
            next_error: RefCell::new(None),
        }
    }

    /// Faculty `1..=n`; faculty 1 owns `events_on_first` events.
    pub fn with_faculties(n: i64, events_on_first: u32) -> Self {
        let backend = Self::new();
        for id in 1..=n {
            backend.faculties.borrow_mut().push(faculty(id, if id == 1 { events_on_first } else { 0 }));
        }
        backend
    }

    pub fn with_students(n: i64) -> Self {
        let backend = Self::new();
        for id in 1..=n {
            backend.students.borrow_mut().push(student(id));
        }
        backend
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.next_error.borrow_mut() = Some(err);
    }

    pub fn revoke_session(&self) {
        self.authenticated.set(false);
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn faculty_ids(&self) -> Vec<i64> {
        self.faculties.borrow().iter().map(|f| f.id).collect()
    }

    fn enter(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if !self.authenticated.get() {
            return Err(ApiError::Unauthorized);
        }
        match self.next_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AdminApi for FakeBackend {
    async fn me(&self) -> Result<AdminProfile, ApiError> {
        self.enter(Call::Me)?;
        Ok(AdminProfile { id: 1, username: "admin".to_string(), email: "admin@college.edu".to_string() })
    }

    async fn list<R: Record>(&self) -> Result<Vec<R>, ApiError> {
        self.enter(Call::List(R::COLLECTION))?;
        let value = match R::COLLECTION {
            Collection::Faculties => serde_json::to_value(&*self.faculties.borrow()),
            Collection::Students => serde_json::to_value(&*self.students.borrow()),
        }
        .expect("serialize fixtures");
        Ok(serde_json::from_value(value).expect("fixtures decode as R"))
    }

    async fn update<R: Record>(&self, record: &R) -> Result<(), ApiError> {
        self.enter(Call::Update(R::COLLECTION, record.id()))?;
        let value = serde_json::to_value(record).expect("serialize draft");
        match R::COLLECTION {
            Collection::Faculties => {
                let updated: FacultyRecord = serde_json::from_value(value).expect("faculty draft");
                let mut all = self.faculties.borrow_mut();
                let slot = all.iter_mut().find(|f| f.id == updated.id).ok_or(ApiError::Rejected {
                    status: 404,
                    message: String::new(),
                })?;
                *slot = updated;
            }
            Collection::Students => {
                let updated: StudentRecord = serde_json::from_value(value).expect("student draft");
                let mut all = self.students.borrow_mut();
                let slot = all
                    .iter_mut()
                    .find(|s| s.id == updated.id)
                    .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
                *slot = updated;
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: i64, replacement: Option<i64>) -> Result<(), ApiError> {
        self.enter(Call::Delete(collection, id, replacement))?;
        match collection {
            Collection::Faculties => {
                let mut all = self.faculties.borrow_mut();
                let idx = all.iter().position(|f| f.id == id).ok_or(ApiError::Rejected {
                    status: 500,
                    message: "Faculty not found".to_string(),
                })?;
                let events = all[idx].assigned_events_count;
                if events > 0 {
                    let Some(replacement) = replacement else {
                        return Err(ApiError::DependencyConflict {
                            resource: Collection::Faculties,
                            message: "Faculty has assigned events. Provide replacementFacultyId.".to_string(),
                            dependents: None,
                        });
                    };
                    let target = all
                        .iter_mut()
                        .find(|f| f.id == replacement && f.id != id)
                        .ok_or(ApiError::Rejected {
                            status: 500,
                            message: "Replacement faculty not found".to_string(),
                        })?;
                    target.assigned_events_count += events;
                }
                let idx = all.iter().position(|f| f.id == id).expect("still present");
                all.remove(idx);
            }
            Collection::Students => {
                let mut all = self.students.borrow_mut();
                let idx = all
                    .iter()
                    .position(|s| s.id == id)
                    .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
                all.remove(idx);
            }
        }
        Ok(())
    }
}

pub fn faculty(id: i64, events: u32) -> FacultyRecord {
    FacultyRecord {
        id,
        name: format!("Faculty {id}"),
        email: format!("faculty{id}@college.edu"),
        phone: "9000000000".to_string(),
        department: "CSE".to_string(),
        gender: "Female".to_string(),
        approved: true,
        assigned_events_count: events,
    }
}

pub fn student(id: i64) -> StudentRecord {
    StudentRecord {
        id,
        name: format!("Student {id}"),
        email: format!("student{id}@college.edu"),
        phone: "8000000000".to_string(),
        gender: "Male".to_string(),
        department: "ECE".to_string(),
        event_count: 1,
    }
}
