use std::{fmt::Display, str::FromStr};

use crate::commands::CommandError;

pub const MAX_COMMENT_LENGTH: usize = 500;

/// A vouch comment: trimmed, not empty and at most [`MAX_COMMENT_LENGTH`] characters.
#[derive(Debug)]
pub struct VouchComment(String);

impl FromStr for VouchComment {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(super::invalid_argument(
                "The comment can't be empty.".to_string(),
            ));
        }

        let length = s.chars().count();
        if length > MAX_COMMENT_LENGTH {
            return Err(super::invalid_argument(format!(
                "The comment is {length} characters long, the limit is {MAX_COMMENT_LENGTH}."
            )));
        }

        Ok(VouchComment(s.to_owned()))
    }
}

impl From<VouchComment> for String {
    fn from(value: VouchComment) -> Self {
        value.0
    }
}

impl Display for VouchComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VouchComment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
