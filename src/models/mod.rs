pub mod admin;
pub mod faculty;
pub mod record;
pub mod student;

pub use self::admin::{AdminProfile, LoginRequest};
pub use self::faculty::FacultyRecord;
pub use self::record::{Collection, FieldError, Record};
pub use self::student::StudentRecord;
