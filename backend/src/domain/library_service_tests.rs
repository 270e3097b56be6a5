//! Tests for the collection service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockClassificationSource, MockCollectionRepository};
use crate::domain::{
    ClassificationCode, ErrorCode, ListQuery, LookupResult, RemoveQuery, UserId, Username,
};

type Service = LibraryServiceImpl<MockClassificationSource, MockCollectionRepository>;

fn make_service(source: MockClassificationSource, collection: MockCollectionRepository) -> Service {
    LibraryServiceImpl::new(Arc::new(source), Arc::new(collection))
}

#[fixture]
fn member() -> User {
    User::new(
        UserId::new(1).expect("valid id"),
        Username::new("ada").expect("valid username"),
    )
}

fn nineteen_eighty_four() -> LookupResult {
    LookupResult {
        title: "1984".into(),
        author: "Orwell".into(),
        work_id: WorkId::new("123").expect("valid owi"),
        classification: ClassificationCode::new("813").expect("valid code"),
    }
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn blank_search_skips_upstream(member: User, #[case] query: &str) {
    let mut source = MockClassificationSource::new();
    source.expect_search_by_title().never();
    let results = make_service(source, MockCollectionRepository::new())
        .search(&member, query)
        .await
        .expect("empty search succeeds");
    assert!(results.is_empty());
}

#[rstest]
#[tokio::test]
async fn search_passes_trimmed_query(member: User) {
    let mut source = MockClassificationSource::new();
    source
        .expect_search_by_title()
        .withf(|query| query == "1984")
        .times(1)
        .return_once(|_| {
            Ok(vec![SearchResult {
                title: "1984".into(),
                author: "Orwell".into(),
                year: Some(1949),
                work_id: WorkId::new("123").expect("valid owi"),
            }])
        });
    let results = make_service(source, MockCollectionRepository::new())
        .search(&member, " 1984 ")
        .await
        .expect("search succeeds");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].year, Some(1949));
}

#[rstest]
#[case(ClassificationSourceError::transport("connection refused"))]
#[case(ClassificationSourceError::parse("missing response"))]
#[tokio::test]
async fn upstream_failures_are_generic_bad_gateway(
    member: User,
    #[case] failure: ClassificationSourceError,
) {
    let mut source = MockClassificationSource::new();
    source
        .expect_search_by_title()
        .return_once(move |_| Err(failure));
    let error = make_service(source, MockCollectionRepository::new())
        .search(&member, "1984")
        .await
        .expect_err("upstream failure");
    assert_eq!(error.code(), ErrorCode::UpstreamUnavailable);
    assert_eq!(error.message(), "classification service unavailable");
}

#[rstest]
#[tokio::test]
async fn add_book_inserts_exactly_one_owned_entry(member: User) {
    let mut source = MockClassificationSource::new();
    source
        .expect_lookup_by_work_id()
        .withf(|work_id| work_id.as_ref() == "123")
        .times(1)
        .return_once(|_| Ok(nineteen_eighty_four()));
    let mut collection = MockCollectionRepository::new();
    collection
        .expect_insert()
        .withf(|entry: &NewCatalogEntry| {
            entry.owner.get() == 1
                && entry.title == "1984"
                && entry.author == "Orwell"
                && entry.classification.as_ref() == "813"
        })
        .times(1)
        .returning(|entry| {
            Ok(entry
                .clone()
                .into_entry(EntryId::new(10).expect("valid id"), chrono::Utc::now()))
        });

    let work_id = WorkId::new("123").expect("valid owi");
    let entry = make_service(source, collection)
        .add_book(&member, &work_id)
        .await
        .expect("added");
    assert_eq!(entry.id.get(), 10);
    assert_eq!(entry.owner, member.id());
}

#[rstest]
#[tokio::test]
async fn failed_lookup_writes_nothing(member: User) {
    let mut source = MockClassificationSource::new();
    source
        .expect_lookup_by_work_id()
        .return_once(|_| Err(ClassificationSourceError::parse("no mostPopular")));
    let mut collection = MockCollectionRepository::new();
    collection.expect_insert().never();
    let work_id = WorkId::new("123").expect("valid owi");
    let error = make_service(source, collection)
        .add_book(&member, &work_id)
        .await
        .expect_err("lookup failure");
    assert_eq!(error.code(), ErrorCode::UpstreamUnavailable);
}

#[rstest]
#[tokio::test]
async fn removing_foreign_entry_is_forbidden(member: User) {
    let mut collection = MockCollectionRepository::new();
    collection
        .expect_remove()
        .withf(|query: &RemoveQuery| query.owner.get() == 1 && query.entry.get() == 7)
        .times(1)
        .return_once(|_| Ok(RemoveOutcome::NotOwned));
    let error = make_service(MockClassificationSource::new(), collection)
        .remove_book(&member, EntryId::new(7).expect("valid id"))
        .await
        .expect_err("not owned");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn removing_own_entry_succeeds(member: User) {
    let mut collection = MockCollectionRepository::new();
    collection
        .expect_remove()
        .times(1)
        .return_once(|_| Ok(RemoveOutcome::Removed));
    make_service(MockClassificationSource::new(), collection)
        .remove_book(&member, EntryId::new(7).expect("valid id"))
        .await
        .expect("removed");
}

#[rstest]
#[tokio::test]
async fn list_builds_owner_scoped_query(member: User) {
    let mut collection = MockCollectionRepository::new();
    collection
        .expect_list()
        .withf(|query: &ListQuery| {
            query.owner.get() == 1
                && query.sort == SortKey::Author
                && query.filter == Some(ClassificationRange::new(800))
        })
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let books = make_service(MockClassificationSource::new(), collection)
        .list_books(&member, SortKey::Author, Some(ClassificationRange::new(800)))
        .await
        .expect("listed");
    assert!(books.is_empty());
}

#[rstest]
#[tokio::test]
async fn collection_outage_is_service_unavailable(member: User) {
    let mut collection = MockCollectionRepository::new();
    collection
        .expect_list()
        .return_once(|_| Err(CollectionPersistenceError::connection("refused")));
    let error = make_service(MockClassificationSource::new(), collection)
        .list_books(&member, SortKey::Title, None)
        .await
        .expect_err("outage");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
