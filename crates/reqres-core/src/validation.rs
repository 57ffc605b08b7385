//! Validation utilities.

use crate::FieldError;
use validator::ValidationErrors;

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Query {
        #[validate(range(min = 1, message = "page must be at least 1"))]
        page: u64,
        #[validate(range(min = 1))]
        per_page: u64,
    }

    #[test]
    fn test_valid_query_has_no_errors() {
        let query = Query { page: 1, per_page: 6 };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_field_errors_are_sorted_with_messages() {
        let query = Query { page: 0, per_page: 0 };
        let errors = query.validate().unwrap_err();
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "page");
        assert_eq!(fields[0].message, "page must be at least 1");
        assert_eq!(fields[0].code, "range");
        assert_eq!(fields[1].field, "per_page");
        assert_eq!(fields[1].message, "range");
    }
}
