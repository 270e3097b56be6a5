//! Catalogue records: collection entries and classification lookups.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Validation errors for catalogue primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    /// Entry identifiers are positive integers.
    #[error("book id must be a positive integer")]
    InvalidEntryId,
    /// Work identifiers must contain a non-blank value.
    #[error("work id must not be empty")]
    EmptyWorkId,
    /// Classification codes must contain a non-blank value.
    #[error("classification code must not be empty")]
    EmptyClassification,
}

/// Store-assigned identifier of a collection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EntryId(i64);

impl EntryId {
    /// Validate a raw identifier.
    pub fn new(raw: i64) -> Result<Self, CatalogValidationError> {
        if raw <= 0 {
            return Err(CatalogValidationError::InvalidEntryId);
        }
        Ok(Self(raw))
    }

    /// Raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for EntryId {
    type Error = CatalogValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for i64 {
    fn from(value: EntryId) -> Self {
        value.0
    }
}

impl FromStr for EntryId {
    type Err = CatalogValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| CatalogValidationError::InvalidEntryId)?;
        Self::new(raw)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Online Work Identifier assigned by the classification service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkId(String);

impl WorkId {
    /// Trim and validate an OWI.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CatalogValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::EmptyWorkId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for WorkId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WorkId {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkId> for String {
    fn from(value: WorkId) -> Self {
        value.0
    }
}

/// Subject classification code, as recommended by the upstream service.
///
/// Codes are usually Dewey numbers such as `813.54`, but the service also
/// returns non-numeric codes such as `FIC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassificationCode(String);

impl ClassificationCode {
    /// Trim and validate a classification code.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CatalogValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CatalogValidationError::EmptyClassification);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Integer class number used for range filtering.
    ///
    /// The integer part of a leading decimal number: `813.54` gives 813,
    /// `FIC` gives `None`.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::ClassificationCode;
    ///
    /// let code = ClassificationCode::new("813.54").unwrap();
    /// assert_eq!(code.class_number(), Some(813));
    /// assert_eq!(ClassificationCode::new("FIC").unwrap().class_number(), None);
    /// ```
    pub fn class_number(&self) -> Option<i64> {
        let digits: String = self
            .0
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

impl AsRef<str> for ClassificationCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClassificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClassificationCode {
    type Error = CatalogValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassificationCode> for String {
    fn from(value: ClassificationCode) -> Self {
        value.0
    }
}

/// One work returned by a title search. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Work title.
    pub title: String,
    /// Author statement as returned upstream.
    pub author: String,
    /// Earliest publication year, when the service reports one.
    pub year: Option<i32>,
    /// Work identifier used to add the work to a collection.
    #[schema(value_type = String, example = "1234567")]
    pub work_id: WorkId,
}

/// Resolved work with its most popular classification. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// Work title.
    pub title: String,
    /// Author statement.
    pub author: String,
    /// Work identifier.
    pub work_id: WorkId,
    /// Most popular classification recommendation.
    pub classification: ClassificationCode,
}

/// A book in a member's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Entry identifier, used for removal.
    #[schema(value_type = i64, example = 7)]
    pub id: EntryId,
    /// Work title.
    pub title: String,
    /// Author statement.
    pub author: String,
    /// Work identifier.
    #[schema(value_type = String)]
    pub work_id: WorkId,
    /// Classification code.
    #[schema(value_type = String, example = "813.54")]
    pub classification: ClassificationCode,
    /// When the entry was added.
    #[schema(value_type = String, format = DateTime)]
    pub added_at: DateTime<Utc>,
    /// Owning member.
    #[serde(skip)]
    #[schema(ignore)]
    pub owner: UserId,
}

/// Entry about to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogEntry {
    /// Owning member.
    pub owner: UserId,
    /// Work title.
    pub title: String,
    /// Author statement.
    pub author: String,
    /// Work identifier.
    pub work_id: WorkId,
    /// Classification code.
    pub classification: ClassificationCode,
}

impl NewCatalogEntry {
    /// Build an entry for `owner` from a classification lookup.
    pub fn from_lookup(owner: UserId, lookup: LookupResult) -> Self {
        let LookupResult {
            title,
            author,
            work_id,
            classification,
        } = lookup;
        Self {
            owner,
            title,
            author,
            work_id,
            classification,
        }
    }

    /// Attach the store-assigned id and insertion time.
    pub fn into_entry(self, id: EntryId, added_at: DateTime<Utc>) -> CatalogEntry {
        CatalogEntry {
            id,
            title: self.title,
            author: self.author,
            work_id: self.work_id,
            classification: self.classification,
            added_at,
            owner: self.owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("813.54", Some(813))]
    #[case("813", Some(813))]
    #[case("005.133", Some(5))]
    #[case("FIC", None)]
    #[case("[Fic]", None)]
    fn class_number_reads_leading_integer(#[case] raw: &str, #[case] expected: Option<i64>) {
        let code = ClassificationCode::new(raw).expect("valid code");
        assert_eq!(code.class_number(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("seven")]
    #[case("7; DELETE FROM books")]
    fn entry_id_rejects_invalid_values(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<EntryId>(),
            Err(CatalogValidationError::InvalidEntryId)
        );
    }

    #[test]
    fn blank_work_id_is_rejected() {
        assert_eq!(WorkId::new("  "), Err(CatalogValidationError::EmptyWorkId));
    }

    #[test]
    fn new_entry_keeps_lookup_fields() {
        let owner = UserId::new(3).expect("valid id");
        let lookup = LookupResult {
            title: "1984".into(),
            author: "Orwell".into(),
            work_id: WorkId::new("123").expect("valid owi"),
            classification: ClassificationCode::new("813").expect("valid code"),
        };
        let entry = NewCatalogEntry::from_lookup(owner, lookup)
            .into_entry(EntryId::new(9).expect("valid id"), Utc::now());
        assert_eq!(entry.owner, owner);
        assert_eq!(entry.classification.as_ref(), "813");
        assert_eq!(entry.id.get(), 9);
    }
}
