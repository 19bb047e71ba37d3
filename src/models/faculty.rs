use serde::{Deserialize, Serialize};

use super::record::{nullable_string, parse_flag, Collection, FieldError, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub department: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub gender: String,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub assigned_events_count: u32,
}

impl Record for FacultyRecord {
    const COLLECTION: Collection = Collection::Faculties;

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.department)
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "department" => self.department = value.to_string(),
            "gender" => self.gender = value.to_string(),
            "approved" => self.approved = parse_flag(field, value)?,
            other => return Err(FieldError::Unknown(other.to_string())),
        }
        Ok(())
    }
}
