use std::str::FromStr;

use crate::error::ModelError;
use uuid::Uuid;

/// Strongly typed ID for books
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BookID(pub Uuid);

impl Default for BookID {
    fn default() -> Self {
        Self::new()
    }
}

impl BookID {
    pub fn new() -> Self {
        BookID(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for BookID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for BookID {
    fn from(value: Uuid) -> Self {
        BookID(value)
    }
}

impl FromStr for BookID {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BookID(Uuid::parse_str(s.trim())?))
    }
}

impl std::fmt::Display for BookID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for authors
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AuthorID(pub Uuid);

impl Default for AuthorID {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorID {
    pub fn new() -> Self {
        AuthorID(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for AuthorID {
    fn from(value: Uuid) -> Self {
        AuthorID(value)
    }
}

impl FromStr for AuthorID {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AuthorID(Uuid::parse_str(s.trim())?))
    }
}

impl std::fmt::Display for AuthorID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_id_parses_with_surrounding_whitespace() {
        let raw = "25320c5e-f58a-4b1f-b63a-8ee07a840bdf";
        let id: BookID = format!("  {raw} ").parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn malformed_id_is_rejected() {
        let err = "not-a-uuid".parse::<AuthorID>().unwrap_err();
        assert!(matches!(err, ModelError::InvalidId(_)));
    }
}
