//! Permission levels granted through shares.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access tier on a document.
///
/// Totally ordered by privilege: View < Comment < Edit < Manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "permission_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read the document and its discussion.
    View,
    /// Add comments and annotations.
    Comment,
    /// Change document metadata.
    Edit,
    /// Share the document and read its access history.
    Manage,
}

impl PermissionLevel {
    /// Every level, lowest first.
    pub const ALL: [PermissionLevel; 4] = [Self::View, Self::Comment, Self::Edit, Self::Manage];

    /// Return the privilege rank (higher = more privileged).
    pub fn rank(&self) -> u8 {
        match self {
            Self::View => 1,
            Self::Comment => 2,
            Self::Edit => 3,
            Self::Manage => 4,
        }
    }

    /// Check if this level grants at least `required`.
    pub fn has_at_least(&self, required: PermissionLevel) -> bool {
        self.rank() >= required.rank()
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Comment => "comment",
            Self::Edit => "edit",
            Self::Manage => "manage",
        }
    }
}

impl PartialOrd for PermissionLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PermissionLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "comment" => Ok(Self::Comment),
            "edit" => Ok(Self::Edit),
            "manage" => Ok(Self::Manage),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid permission level: '{s}' (expected view, comment, edit, or manage)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use docvault_core::ErrorKind;

    use super::*;

    #[test]
    fn test_total_order() {
        assert!(PermissionLevel::View < PermissionLevel::Comment);
        assert!(PermissionLevel::Comment < PermissionLevel::Edit);
        assert!(PermissionLevel::Edit < PermissionLevel::Manage);
        assert_eq!(
            PermissionLevel::ALL.iter().max(),
            Some(&PermissionLevel::Manage)
        );
    }

    #[test]
    fn test_has_at_least() {
        assert!(PermissionLevel::Manage.has_at_least(PermissionLevel::View));
        assert!(PermissionLevel::Comment.has_at_least(PermissionLevel::Comment));
        assert!(!PermissionLevel::Comment.has_at_least(PermissionLevel::Edit));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "MANAGE".parse::<PermissionLevel>().expect("parse"),
            PermissionLevel::Manage
        );
        assert_eq!(
            " comment ".parse::<PermissionLevel>().expect("parse"),
            PermissionLevel::Comment
        );
    }

    #[test]
    fn test_unknown_level_is_validation_error() {
        let err = "owner".parse::<PermissionLevel>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
