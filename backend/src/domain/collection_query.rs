//! Owner-scoped listing and removal queries over a member's collection.
//!
//! Raw request text is reduced here to closed enums and typed bounds, so
//! adapters only ever see values they can bind as parameters.

use std::cmp::Ordering;

use serde::Serialize;
use utoipa::ToSchema;

use super::{CatalogEntry, EntryId, User, UserId};

/// Width of a classification filter window.
pub const CLASSIFICATION_WINDOW: i64 = 100;

/// Column a collection listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Alphabetical by title.
    #[default]
    Title,
    /// Alphabetical by author statement.
    Author,
    /// By classification code text.
    Classification,
}

impl SortKey {
    /// Map a raw `sort` parameter to a key.
    ///
    /// Anything other than the three exact key names falls back to
    /// [`SortKey::Title`].
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::SortKey;
    ///
    /// assert_eq!(SortKey::parse_or_default(Some("author")), SortKey::Author);
    /// assert_eq!(SortKey::parse_or_default(Some("id; DROP TABLE books")), SortKey::Title);
    /// assert_eq!(SortKey::parse_or_default(None), SortKey::Title);
    /// ```
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("author") => Self::Author,
            Some("classification") => Self::Classification,
            _ => Self::Title,
        }
    }

    /// Parameter spelling of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Classification => "classification",
        }
    }
}

/// Half-open window `[lower, lower + 100)` over integer class numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassificationRange {
    lower: i64,
}

impl ClassificationRange {
    /// Window starting at `lower`.
    pub fn new(lower: i64) -> Self {
        Self { lower }
    }

    /// Parse a raw `filter` parameter.
    ///
    /// Only a value that is an integer once trimmed yields a window. Any
    /// other text means "no filter".
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::ClassificationRange;
    ///
    /// let range = ClassificationRange::parse(Some("800")).unwrap();
    /// assert_eq!(range.upper_exclusive(), 900);
    /// assert!(ClassificationRange::parse(Some("800 OR 1=1")).is_none());
    /// ```
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw?.trim().parse::<i64>().ok().map(Self::new)
    }

    /// Inclusive lower bound.
    pub fn lower(self) -> i64 {
        self.lower
    }

    /// Exclusive upper bound, saturating at `i64::MAX`.
    pub fn upper_exclusive(self) -> i64 {
        self.lower.saturating_add(CLASSIFICATION_WINDOW)
    }

    /// Whether `class` falls inside the window.
    pub fn contains(self, class: i64) -> bool {
        self.lower <= class && class < self.upper_exclusive()
    }
}

/// Listing of one member's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Only entries owned by this member are returned.
    pub owner: UserId,
    /// Ordering column; ties break on entry id.
    pub sort: SortKey,
    /// Optional class-number window.
    pub filter: Option<ClassificationRange>,
}

impl ListQuery {
    /// Whether `entry` belongs in the result set.
    ///
    /// Entries without a numeric class never match a filter.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if entry.owner != self.owner {
            return false;
        }
        match self.filter {
            None => true,
            Some(range) => entry
                .classification
                .class_number()
                .is_some_and(|class| range.contains(class)),
        }
    }

    /// Result ordering for in-process stores.
    pub fn compare(&self, a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
        let primary = match self.sort {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Author => a.author.cmp(&b.author),
            SortKey::Classification => a.classification.as_ref().cmp(b.classification.as_ref()),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Deletion of one entry, scoped to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveQuery {
    /// Member requesting removal.
    pub owner: UserId,
    /// Entry to delete.
    pub entry: EntryId,
}

/// Result of executing a [`RemoveQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry existed, belonged to the owner, and is gone.
    Removed,
    /// Nothing matched both the id and the owner.
    NotOwned,
}

/// Build the listing query for `owner`.
pub fn build_list_query(
    owner: &User,
    sort: SortKey,
    filter: Option<ClassificationRange>,
) -> ListQuery {
    ListQuery {
        owner: owner.id(),
        sort,
        filter,
    }
}

/// Build the removal query for `entry` on behalf of `owner`.
pub fn build_remove_query(owner: &User, entry: EntryId) -> RemoveQuery {
    RemoveQuery {
        owner: owner.id(),
        entry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassificationCode, Username, WorkId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> User {
        User::new(
            UserId::new(1).expect("valid id"),
            Username::new("ada").expect("valid username"),
        )
    }

    fn entry(id: i64, owner: i64, title: &str, classification: &str) -> CatalogEntry {
        CatalogEntry {
            id: EntryId::new(id).expect("valid entry id"),
            title: title.to_owned(),
            author: format!("author of {title}"),
            work_id: WorkId::new(format!("owi-{id}")).expect("valid owi"),
            classification: ClassificationCode::new(classification).expect("valid code"),
            added_at: chrono::Utc::now(),
            owner: UserId::new(owner).expect("valid owner"),
        }
    }

    #[rstest]
    #[case(Some("title"), SortKey::Title)]
    #[case(Some("author"), SortKey::Author)]
    #[case(Some("classification"), SortKey::Classification)]
    #[case(Some("Author"), SortKey::Title)]
    #[case(Some("title DESC"), SortKey::Title)]
    #[case(Some("1; DROP TABLE books"), SortKey::Title)]
    #[case(Some(""), SortKey::Title)]
    #[case(None, SortKey::Title)]
    fn unknown_sort_keys_fall_back_to_title(#[case] raw: Option<&str>, #[case] expected: SortKey) {
        assert_eq!(SortKey::parse_or_default(raw), expected);
    }

    #[rstest]
    #[case(Some("800"), Some(800))]
    #[case(Some(" 300 "), Some(300))]
    #[case(Some("-5"), Some(-5))]
    #[case(Some(""), None)]
    #[case(Some("abc"), None)]
    #[case(Some("800.5"), None)]
    #[case(Some("0 OR 1=1"), None)]
    #[case(Some("0); DELETE FROM books; --"), None)]
    #[case(None, None)]
    fn filter_accepts_only_integers(#[case] raw: Option<&str>, #[case] lower: Option<i64>) {
        assert_eq!(
            ClassificationRange::parse(raw).map(ClassificationRange::lower),
            lower
        );
    }

    #[rstest]
    #[case(799, false)]
    #[case(800, true)]
    #[case(899, true)]
    #[case(900, false)]
    fn range_is_half_open(#[case] class: i64, #[case] inside: bool) {
        assert_eq!(ClassificationRange::new(800).contains(class), inside);
    }

    #[test]
    fn upper_bound_saturates() {
        let range = ClassificationRange::new(i64::MAX - 10);
        assert_eq!(range.upper_exclusive(), i64::MAX);
        assert!(range.contains(i64::MAX - 1));
    }

    #[rstest]
    fn list_query_is_owner_scoped_and_filtered(owner: User) {
        let query =
            build_list_query(&owner, SortKey::Title, ClassificationRange::parse(Some("800")));
        assert!(query.matches(&entry(1, 1, "Mine", "813.54")));
        assert!(!query.matches(&entry(2, 2, "Theirs", "813.54")));
        assert!(!query.matches(&entry(3, 1, "Out of range", "920")));
        assert!(!query.matches(&entry(4, 1, "Fiction", "FIC")));
    }

    #[rstest]
    fn unfiltered_query_keeps_non_numeric_codes(owner: User) {
        let query = build_list_query(&owner, SortKey::Title, None);
        assert!(query.matches(&entry(4, 1, "Fiction", "FIC")));
    }

    #[rstest]
    fn compare_breaks_ties_on_id(owner: User) {
        let query = build_list_query(&owner, SortKey::Classification, None);
        let first = entry(1, 1, "B", "813");
        let second = entry(2, 1, "A", "813");
        assert_eq!(query.compare(&first, &second), Ordering::Less);
        let by_title = build_list_query(&owner, SortKey::Title, None);
        assert_eq!(by_title.compare(&first, &second), Ordering::Greater);
    }

    #[rstest]
    fn remove_query_carries_owner(owner: User) {
        let entry = EntryId::new(7).expect("valid id");
        let query = build_remove_query(&owner, entry);
        assert_eq!(query.owner, owner.id());
        assert_eq!(query.entry, entry);
    }
}
