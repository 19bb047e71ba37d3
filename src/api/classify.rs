//! Mapping of non-2xx backend replies onto [`ApiError`].

use serde::Deserialize;

use super::{ApiError, REPLACEMENT_PARAM};
use crate::models::Collection;

/// Which call produced a response; some statuses only mean something for
/// a particular operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Logout,
    Me,
    List(Collection),
    Update(Collection),
    Delete { collection: Collection, reassigning: bool },
}

/// Structured error body. `code` is the contract; Spring's default error
/// page contributes `error`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    error: Option<String>,
    dependents: Option<u32>,
}

const DEPENDENCY_CONFLICT_CODE: &str = "DEPENDENCY_CONFLICT";

pub fn classify(status: u16, body: &str, op: Operation) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }

    let structured: Option<ErrorBody> = serde_json::from_str(body).ok();
    let message = structured
        .as_ref()
        .and_then(|b| b.message.clone().or_else(|| b.error.clone()))
        .unwrap_or_else(|| body.trim().to_string());

    if let Some(b) = &structured {
        if b.code.as_deref() == Some(DEPENDENCY_CONFLICT_CODE) {
            if let Operation::Delete { collection, .. } = op {
                return ApiError::DependencyConflict {
                    resource: collection,
                    message,
                    dependents: b.dependents,
                };
            }
        }
    }

    if is_legacy_conflict(status, body, op) {
        if let Operation::Delete { collection, .. } = op {
            return ApiError::DependencyConflict { resource: collection, message, dependents: None };
        }
    }

    match status {
        404 => ApiError::NotFound(message),
        _ => ApiError::Rejected { status, message },
    }
}

/// The current backend has no error codes: it answers a plain-text 400
/// naming the reassignment parameter. Only a first-attempt faculty delete
/// can mean that.
fn is_legacy_conflict(status: u16, body: &str, op: Operation) -> bool {
    status == 400
        && matches!(
            op,
            Operation::Delete { collection: Collection::Faculties, reassigning: false }
        )
        && body.contains(REPLACEMENT_PARAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACULTY_DELETE: Operation =
        Operation::Delete { collection: Collection::Faculties, reassigning: false };

    #[test]
    fn unauthorized_wins_regardless_of_body() {
        assert_eq!(classify(401, "Not logged in", FACULTY_DELETE), ApiError::Unauthorized);
        assert_eq!(classify(401, "", Operation::Me), ApiError::Unauthorized);
    }

    #[test]
    fn legacy_text_maps_to_conflict() {
        let body = "Faculty has assigned events. Provide replacementFacultyId.";
        match classify(400, body, FACULTY_DELETE) {
            ApiError::DependencyConflict { resource, dependents, .. } => {
                assert_eq!(resource, Collection::Faculties);
                assert_eq!(dependents, None);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn legacy_text_ignored_outside_first_faculty_delete() {
        let body = "Faculty has assigned events. Provide replacementFacultyId.";
        let reassigning = Operation::Delete { collection: Collection::Faculties, reassigning: true };
        assert!(matches!(classify(400, body, reassigning), ApiError::Rejected { status: 400, .. }));
        let student = Operation::Delete { collection: Collection::Students, reassigning: false };
        assert!(matches!(classify(400, body, student), ApiError::Rejected { .. }));
    }

    #[test]
    fn structured_code_carries_dependents() {
        let body = r#"{"code":"DEPENDENCY_CONFLICT","message":"3 events assigned","dependents":3}"#;
        let err = classify(409, body, FACULTY_DELETE);
        assert_eq!(
            err,
            ApiError::DependencyConflict {
                resource: Collection::Faculties,
                message: "3 events assigned".to_string(),
                dependents: Some(3),
            }
        );
    }

    #[test]
    fn spring_error_page_uses_error_field() {
        let body = r#"{"timestamp":"2024-01-01","status":500,"error":"Internal Server Error","path":"/api/admin/faculties/9"}"#;
        let err = classify(500, body, FACULTY_DELETE);
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn not_found_keeps_backend_text() {
        let err = classify(404, "Student not found", Operation::Delete {
            collection: Collection::Students,
            reassigning: false,
        });
        assert_eq!(err, ApiError::NotFound("Student not found".to_string()));
    }
}
