use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Backend collections the admin pages manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collection {
    Faculties,
    Students,
}

impl Collection {
    /// Path segment under the backend base URL.
    pub fn path(self) -> &'static str {
        match self {
            Collection::Faculties => "faculties",
            Collection::Students => "students",
        }
    }

    /// Singular noun used in notices ("Faculty deleted successfully").
    pub fn noun(self) -> &'static str {
        match self {
            Collection::Faculties => "Faculty",
            Collection::Students => "Student",
        }
    }

    /// Only faculty deletes can hand their dependents to another record.
    pub fn supports_reassignment(self) -> bool {
        matches!(self, Collection::Faculties)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Unknown(String),
    Invalid { field: String, reason: String },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Unknown(name) => write!(f, "Unknown field '{name}'"),
            FieldError::Invalid { field, reason } => write!(f, "Invalid value for {field}: {reason}"),
        }
    }
}

/// A backend-owned entity the front end holds a transient projection of.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> i64;

    /// Display label used in selection lists.
    fn label(&self) -> String;

    /// Mutate exactly one editable field from its form representation.
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError>;
}

/// The backend serialises missing strings as `null`.
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn parse_flag(field: &str, value: &str) -> Result<bool, FieldError> {
    match value.trim() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        other => Err(FieldError::Invalid {
            field: field.to_string(),
            reason: format!("'{other}' is not a yes/no value"),
        }),
    }
}
