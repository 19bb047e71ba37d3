//! Page-level admin workflows, written against [`crate::api::AdminApi`].

pub mod delete;
pub mod editor;
pub mod guard;
pub mod loader;
pub mod notice;

pub use self::delete::{ChoiceError, DeleteOutcome, DeleteState, DeleteWorkflow};
pub use self::editor::{EditOutcome, RecordEditor};
pub use self::guard::GuardOutcome;
pub use self::loader::{ListLoader, ListView};
pub use self::notice::{Level, Notice, Notifications, Redirect};
