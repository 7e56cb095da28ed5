// Queue Entry Domain Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Entry ID (store-assigned rowid)
pub type EntryId = i64;

/// 1-indexed rank in the active queue; 1 = next to be served
pub type Position = i64;

/// Maximum display-name length accepted at the boundary
pub const MAX_NAME_LEN: usize = 20;

/// Priority tier of a waiting client.
///
/// Wire form is the single letter `"N"` / `"P"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceClass {
    #[serde(rename = "N")]
    Normal,
    #[serde(rename = "P")]
    Priority,
}

impl ServiceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::Normal => "N",
            ServiceClass::Priority => "P",
        }
    }
}

impl std::fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(ServiceClass::Normal),
            "P" => Ok(ServiceClass::Priority),
            other => Err(DomainError::InvalidClass(other.to_string())),
        }
    }
}

/// One person waiting at the counter.
///
/// `served = true` means logically removed from the active queue
/// (soft-delete, retained for history). Positions are dense 1..N
/// among active entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: EntryId,
    pub name: String,
    pub arrival_time: i64, // epoch ms
    pub position: Position,
    pub class: ServiceClass,
    pub served: bool,
}

/// Entry data before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub name: String,
    pub arrival_time: i64,
    pub position: Position,
    pub class: ServiceClass,
}

/// Trim and bound-check a display name.
///
/// Must be non-empty and at most `MAX_NAME_LEN` characters after
/// trimming. Checked before any store interaction.
pub fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidName("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "name exceeds {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name.to_string())
}

impl NewEntry {
    /// Build a validated entry with an injected arrival timestamp.
    pub fn new(
        name: impl Into<String>,
        class: ServiceClass,
        position: Position,
        arrival_time: i64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: validate_name(&name.into())?,
            arrival_time,
            position,
            class,
        })
    }
}
