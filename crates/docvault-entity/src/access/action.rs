//! Kinds of audited document actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a user did to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "access_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessAction {
    /// Read the document.
    View,
    /// Changed document metadata.
    Edit,
    /// Granted or revoked a share.
    Share,
    /// Added a comment or an annotation.
    Comment,
}

impl AccessAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Share => "share",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for AccessAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessAction {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "share" => Ok(Self::Share),
            "comment" => Ok(Self::Comment),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid access action: '{s}'"
            ))),
        }
    }
}
