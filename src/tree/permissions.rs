//! Symbolic permission strings (`rwxr--r--`).

use crate::error::HierarchyError;
use std::fmt;

const GROUP_AND_OTHER: &str = "r--r--";

/// Nine-character permission string: owner, group, other triplets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permissions(String);

impl Default for Permissions {
    fn default() -> Self {
        Permissions("rwxr--r--".to_string())
    }
}

impl Permissions {
    /// Build permissions from a single octal owner digit.
    ///
    /// Bits 4/2/1 of the digit map to r/w/x of the owner triplet; group and
    /// other are always `r--r--`.
    pub fn from_owner_digit(digit: &str) -> Result<Self, HierarchyError> {
        let value: i64 = digit.trim().parse().map_err(|_| {
            HierarchyError::InvalidArgument(format!("permission '{}' is not a number", digit))
        })?;
        if !(0..=7).contains(&value) {
            return Err(HierarchyError::InvalidArgument(format!(
                "permission {} is out of range 0-7",
                value
            )));
        }

        let mut owner = String::with_capacity(9);
        owner.push(if value & 4 != 0 { 'r' } else { '-' });
        owner.push(if value & 2 != 0 { 'w' } else { '-' });
        owner.push(if value & 1 != 0 { 'x' } else { '-' });
        owner.push_str(GROUP_AND_OTHER);
        Ok(Permissions(owner))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
