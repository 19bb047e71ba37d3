//! Request plumbing shared by the faculty and student pages: restore the
//! page's workflow state from the session, run one workflow step against
//! the backend, persist the state and notices, redirect back.

use actix_session::Session;
use actix_web::HttpResponse;

use crate::api::{BackendClient, BackendSession};
use crate::auth::in_flight::{InFlight, InFlightGuard};
use crate::auth::session::{
    browser_id, get_admin_name, get_credentials, load_state, queue_notices, save_state,
    take_notices,
};
use crate::errors::{AppError, see_other};
use crate::models::{Collection, Record};
use crate::workflow::{guard, DeleteWorkflow, GuardOutcome, ListLoader, ListView, Notifications, RecordEditor};

pub const SESSION_EXPIRED_PATH: &str = "/session-expired";

pub const ALREADY_RUNNING: &str = "Request already in progress";

pub const NO_BROWSER_ID: &str = "Your session is incomplete. Please sign in again.";

fn delete_key(collection: Collection) -> String {
    format!("{}.delete", collection.path())
}

fn draft_key(collection: Collection) -> String {
    format!("{}.draft", collection.path())
}

pub fn list_path(collection: Collection) -> String {
    format!("/{}", collection.path())
}

fn action(collection: Collection, verb: &str) -> &'static str {
    match (collection, verb) {
        (Collection::Faculties, "update") => "faculties.update",
        (Collection::Faculties, _) => "faculties.delete",
        (Collection::Students, "update") => "students.update",
        (Collection::Students, _) => "students.delete",
    }
}

pub fn backend<'a>(client: &'a BackendClient, session: &Session) -> BackendSession<'a> {
    client.session(get_credentials(session))
}

/// The CSRF token of a free-form field list.
pub fn form_csrf(fields: &[(String, String)]) -> &str {
    fields
        .iter()
        .find(|(name, _)| name == "csrf_token")
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

/// Persist notices and send the browser back to the list, or to the
/// session-expired interstitial when a login redirect is pending.
pub fn finish(session: &Session, notes: &Notifications, collection: Collection) -> Result<HttpResponse, AppError> {
    queue_notices(session, notes)?;
    if notes.redirect_scheduled() {
        return Ok(see_other(SESSION_EXPIRED_PATH));
    }
    Ok(see_other(&list_path(collection)))
}

fn claim(
    in_flight: &InFlight,
    session: &Session,
    collection: Collection,
    verb: &str,
    notes: &mut Notifications,
) -> Option<InFlightGuard> {
    let Some(browser) = browser_id(session) else {
        log::warn!("refused {verb} on {collection}: session has no browser id");
        notes.error(NO_BROWSER_ID);
        return None;
    };
    let slot = in_flight.try_begin(&browser, action(collection, verb));
    if slot.is_none() {
        log::warn!("refused duplicate {verb} on {collection}");
        notes.error(ALREADY_RUNNING);
    }
    slot
}

/// Everything a list page needs to render.
pub struct ListPage<R: Record> {
    pub admin_name: String,
    pub loader: ListLoader<R>,
    pub editor: RecordEditor<R>,
    pub delete: DeleteWorkflow<R>,
    pub notes: Notifications,
}

impl<R: Record> ListPage<R> {
    /// `(loading, rows)` for the table.
    pub fn rows(&self) -> (bool, Vec<R>) {
        match self.loader.view() {
            ListView::Loading => (true, Vec::new()),
            ListView::Empty => (false, Vec::new()),
            ListView::Rows(rows) => (false, rows.to_vec()),
        }
    }
}

/// Guard, then load. `Err(response)` means the page must not render.
pub async fn load_page<R: Record>(
    client: &BackendClient,
    session: &Session,
) -> Result<Result<ListPage<R>, HttpResponse>, AppError> {
    let api = backend(client, session);
    let mut notes = take_notices(session);
    let mut loader = ListLoader::<R>::new();

    let admin_name = match guard::check(&api, &mut notes).await {
        GuardOutcome::Proceed(profile) => {
            let _ = loader.load(&api, &mut notes).await;
            profile.display_name().to_string()
        }
        GuardOutcome::RedirectToLogin => String::new(),
        GuardOutcome::Blocked => get_admin_name(session).unwrap_or_default(),
    };

    if notes.redirect_scheduled() {
        queue_notices(session, &notes)?;
        return Ok(Err(see_other(SESSION_EXPIRED_PATH)));
    }

    let collection = R::COLLECTION;
    let editor = load_state::<RecordEditor<R>>(session, &draft_key(collection));
    let delete = load_state::<DeleteWorkflow<R>>(session, &delete_key(collection));

    Ok(Ok(ListPage { admin_name, loader, editor, delete, notes }))
}

pub async fn begin_edit<R: Record>(client: &BackendClient, session: &Session, id: i64) -> Result<HttpResponse, AppError> {
    let collection = R::COLLECTION;
    let api = backend(client, session);
    let mut notes = Notifications::new();

    let mut loader = ListLoader::<R>::new();
    if let Ok(records) = loader.load(&api, &mut notes).await {
        match records.iter().find(|r| r.id() == id) {
            Some(record) => {
                let mut editor = RecordEditor::<R>::new();
                editor.begin(record);
                save_state(session, &draft_key(collection), &editor)?;
                // One modal at a time.
                save_state(session, &delete_key(collection), &DeleteWorkflow::<R>::new())?;
            }
            None => notes.error(format!("{} not found", collection.noun())),
        }
    }
    finish(session, &notes, collection)
}

pub async fn submit_edit<R: Record>(
    client: &BackendClient,
    in_flight: &InFlight,
    session: &Session,
    fields: &[(String, String)],
) -> Result<HttpResponse, AppError> {
    let collection = R::COLLECTION;
    let mut notes = Notifications::new();
    let Some(_slot) = claim(in_flight, session, collection, "update", &mut notes) else {
        return finish(session, &notes, collection);
    };

    let key = draft_key(collection);
    let mut editor = load_state::<RecordEditor<R>>(session, &key);
    if !editor.is_open() {
        return finish(session, &notes, collection);
    }

    for (field, value) in fields {
        if field == "csrf_token" {
            continue;
        }
        if let Err(e) = editor.set_field(field, value) {
            notes.error(e.to_string());
            save_state(session, &key, &editor)?;
            return finish(session, &notes, collection);
        }
    }

    let api = backend(client, session);
    let mut loader = ListLoader::<R>::new();
    editor.submit(&api, &mut loader, &mut notes).await;
    save_state(session, &key, &editor)?;
    finish(session, &notes, collection)
}

pub fn cancel_edit<R: Record>(session: &Session) -> Result<HttpResponse, AppError> {
    let collection = R::COLLECTION;
    let key = draft_key(collection);
    let mut editor = load_state::<RecordEditor<R>>(session, &key);
    editor.cancel();
    save_state(session, &key, &editor)?;
    finish(session, &Notifications::new(), collection)
}

pub fn request_delete<R: Record>(session: &Session, id: i64) -> Result<HttpResponse, AppError> {
    let collection = R::COLLECTION;
    let key = delete_key(collection);
    let mut workflow = load_state::<DeleteWorkflow<R>>(session, &key);
    workflow.request(id);
    save_state(session, &key, &workflow)?;
    save_state(session, &draft_key(collection), &RecordEditor::<R>::new())?;
    finish(session, &Notifications::new(), collection)
}

pub async fn confirm_delete<R: Record>(
    client: &BackendClient,
    in_flight: &InFlight,
    session: &Session,
) -> Result<HttpResponse, AppError> {
    let collection = R::COLLECTION;
    let mut notes = Notifications::new();
    let Some(_slot) = claim(in_flight, session, collection, "delete", &mut notes) else {
        return finish(session, &notes, collection);
    };

    let key = delete_key(collection);
    let mut workflow = load_state::<DeleteWorkflow<R>>(session, &key);
    let api = backend(client, session);
    let mut loader = ListLoader::<R>::new();
    workflow.confirm(&api, &mut loader, &mut notes).await;
    save_state(session, &key, &workflow)?;
    finish(session, &notes, collection)
}

pub async fn reassign_delete<R: Record>(
    client: &BackendClient,
    in_flight: &InFlight,
    session: &Session,
    replacement: Option<i64>,
) -> Result<HttpResponse, AppError> {
    let collection = R::COLLECTION;
    let mut notes = Notifications::new();
    let Some(_slot) = claim(in_flight, session, collection, "delete", &mut notes) else {
        return finish(session, &notes, collection);
    };

    let key = delete_key(collection);
    let mut workflow = load_state::<DeleteWorkflow<R>>(session, &key);
    match replacement {
        Some(replacement) => {
            if let Err(e) = workflow.choose(replacement) {
                notes.error(e.to_string());
                return finish(session, &notes, collection);
            }
        }
        None => workflow.clear_choice(),
    }

    let api = backend(client, session);
    let mut loader = ListLoader::<R>::new();
    workflow.reassign(&api, &mut loader, &mut notes).await;
    save_state(session, &key, &workflow)?;
    finish(session, &notes, collection)
}

pub fn cancel_delete<R: Record>(session: &Session) -> Result<HttpResponse, AppError> {
    let collection = R::COLLECTION;
    let key = delete_key(collection);
    let mut workflow = load_state::<DeleteWorkflow<R>>(session, &key);
    workflow.cancel();
    save_state(session, &key, &workflow)?;
    finish(session, &Notifications::new(), collection)
}
