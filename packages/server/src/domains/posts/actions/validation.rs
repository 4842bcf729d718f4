/// Field-keyed validation errors accumulated during one save request.
///
/// An error in this bag is expected and recoverable: the pipeline stops
/// mutating but still returns the post so the editor can correct the field.
#[derive(Debug, Default, Clone)]
pub struct ValidationState {
    errors: Vec<(String, String)>,
}

impl ValidationState {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| f == field)
    }

    /// Error messages in the order they were recorded.
    pub fn into_messages(self) -> Vec<String> {
        self.errors.into_iter().map(|(_, message)| message).collect()
    }
}

/// The orchestrator's sole output contract.
///
/// `value` is present on success AND on validation failure (carrying the
/// unmutated post); it is `None` only for unexpected faults.
#[derive(Debug)]
pub struct CommandResult<T> {
    pub value: Option<T>,
    pub succeeded: bool,
    pub errors: Vec<String>,
}

impl<T> CommandResult<T> {
    /// A clean save.
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            succeeded: true,
            errors: Vec::new(),
        }
    }

    /// Validation failed; the (unpersisted) value is still returned.
    pub fn invalid(value: T, errors: Vec<String>) -> Self {
        Self {
            value: Some(value),
            succeeded: false,
            errors,
        }
    }

    /// An unexpected fault; no partial result leaks.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            value: None,
            succeeded: false,
            errors: vec![message.into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_state_tracks_fields_in_order() {
        let mut validation = ValidationState::default();
        assert!(validation.is_clean());

        validation.add("Slug", "taken");
        validation.add("Title", "empty");

        assert!(!validation.is_clean());
        assert!(validation.has_error_for("Slug"));
        assert!(!validation.has_error_for("Author"));
        assert_eq!(validation.into_messages(), vec!["taken", "empty"]);
    }

    #[test]
    fn test_command_result_shapes() {
        let ok = CommandResult::ok(1);
        assert!(ok.succeeded && ok.value == Some(1) && ok.errors.is_empty());

        let invalid = CommandResult::invalid(2, vec!["bad".to_string()]);
        assert!(!invalid.succeeded);
        assert_eq!(invalid.value, Some(2));

        let failed = CommandResult::<i32>::failed("boom");
        assert!(!failed.succeeded);
        assert!(failed.value.is_none());
    }
}
