//! Per-user note collection addressing.

use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Invalid collection path segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionPathError {
    #[error("{segment} cannot be empty")]
    EmptySegment { segment: &'static str },
    #[error("{segment} cannot contain `/`, got `{value}`")]
    InvalidSegment {
        segment: &'static str,
        value: String,
    },
}

/// Location of one user's notes: `artifacts/{app_id}/users/{user_id}/study_notes`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    app_id: String,
    user_id: String,
}

impl CollectionPath {
    pub fn new(app_id: &str, user_id: &str) -> Result<Self, CollectionPathError> {
        Ok(Self {
            app_id: validate_segment("app_id", app_id)?,
            user_id: validate_segment("user_id", user_id)?,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl Display for CollectionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "artifacts/{}/users/{}/study_notes",
            self.app_id, self.user_id
        )
    }
}

fn validate_segment(segment: &'static str, value: &str) -> Result<String, CollectionPathError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CollectionPathError::EmptySegment { segment });
    }
    if trimmed.contains('/') {
        return Err(CollectionPathError::InvalidSegment {
            segment,
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{CollectionPath, CollectionPathError};

    #[test]
    fn renders_per_user_path() {
        let path = CollectionPath::new("default-app-id", "user-42").expect("collection path should be valid");
        assert_eq!(
            path.to_string(),
            "artifacts/default-app-id/users/user-42/study_notes"
        );
    }

    #[test]
    fn rejects_blank_and_nested_segments() {
        assert_eq!(
            CollectionPath::new(" ", "u").expect_err("collection path should be rejected"),
            CollectionPathError::EmptySegment { segment: "app_id" }
        );
        assert!(matches!(
            CollectionPath::new("app", "a/b").expect_err("collection path should be rejected"),
            CollectionPathError::InvalidSegment {
                segment: "user_id",
                ..
            }
        ));
    }
}
