//! Vault creation form state and validation.

use hwvault_common::{FormError, Secret};

/// Transient fields of the "create vault" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFormState {
    pub name: String,
    /// Stored result of name validation; kept in step with `name`.
    pub name_error: Option<FormError>,
    pub password: Secret,
    pub password_hint: String,
    pub password_repeat: Secret,
}

impl VaultFormState {
    /// Mismatch between password and repeat, derived on every call.
    pub fn password_repeat_error(&self) -> Option<FormError> {
        if self.password == self.password_repeat {
            None
        } else {
            Some(FormError::NoMatchPassword)
        }
    }

    /// First error blocking submission, name first.
    pub fn validation_error(&self) -> Option<FormError> {
        self.name_error.or_else(|| self.password_repeat_error())
    }

    /// Set the name and revalidate it against `known`.
    pub fn set_name(&mut self, name: impl Into<String>, known: &[String]) {
        self.name = name.into();
        self.revalidate_name(known);
    }

    /// Recompute `name_error` for the current name.
    pub fn revalidate_name(&mut self, known: &[String]) {
        self.name_error = validate_name(&self.name, known);
    }
}

impl Default for VaultFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            name_error: Some(FormError::NoName),
            password: Secret::default(),
            password_hint: String::new(),
            password_repeat: Secret::default(),
        }
    }
}

/// Validate a vault name.
///
/// Blank names are rejected, as are exact matches of a known vault name.
pub fn validate_name(name: &str, known: &[String]) -> Option<FormError> {
    if name.trim().is_empty() {
        Some(FormError::NoName)
    } else if known.iter().any(|k| k == name) {
        Some(FormError::DuplicateName)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn known() -> Vec<String> {
        vec!["v1".to_string(), "v2".to_string()]
    }

    #[test]
    fn test_default_form() {
        let form = VaultFormState::default();
        assert_eq!(form.name_error, Some(FormError::NoName));
        assert_eq!(form.password_repeat_error(), None);
        assert_eq!(form.validation_error(), Some(FormError::NoName));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("", &known()), Some(FormError::NoName));
        assert_eq!(validate_name("  \t", &known()), Some(FormError::NoName));
        assert_eq!(validate_name("v1", &known()), Some(FormError::DuplicateName));
        assert_eq!(validate_name("v3", &known()), None);
    }

    #[test]
    fn test_repeat_error_tracks_fields() {
        let mut form = VaultFormState::default();
        form.password = Secret::new("a");
        form.password_repeat = Secret::new("b");
        assert_eq!(form.password_repeat_error(), Some(FormError::NoMatchPassword));

        form.password_repeat = Secret::new("a");
        assert_eq!(form.password_repeat_error(), None);
    }

    #[test]
    fn test_revalidate_on_new_names() {
        let mut form = VaultFormState::default();
        form.set_name("v3", &known());
        assert_eq!(form.name_error, None);

        form.revalidate_name(&["v3".to_string()]);
        assert_eq!(form.name_error, Some(FormError::DuplicateName));
    }

    proptest! {
        #[test]
        fn prop_blank_names_rejected(name in "[ \t]{0,8}") {
            prop_assert_eq!(validate_name(&name, &known()), Some(FormError::NoName));
        }

        #[test]
        fn prop_unknown_names_accepted(name in "[a-z]{1,12}") {
            let known = vec![format!("{}-taken", name)];
            prop_assert_eq!(validate_name(&name, &known), None);
        }

        #[test]
        fn prop_known_names_duplicate(names in proptest::collection::vec("[a-z]{1,12}", 1..8)) {
            for name in &names {
                prop_assert_eq!(validate_name(name, &names), Some(FormError::DuplicateName));
            }
        }
    }
}
