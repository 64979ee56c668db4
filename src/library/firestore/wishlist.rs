use async_trait::async_trait;
use chrono::{DateTime, Utc};
use firestore::{
    FirestoreDb, FirestoreDocument, FirestoreQueryCursor, FirestoreQueryDirection,
    FirestoreReference, FirestoreTimestamp, FirestoreValue,
};
use futures::StreamExt;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    api::FirestoreApi,
    documents::WishlistReference,
    library::{Identity, PageCursor, WishlistPage, PAGE_SIZE},
    logging::{FirestoreEvent, WishlistEvent},
    traits::WishlistStore,
    Status,
};

use super::utils::{make_status, USERS};

/// Returns the page of `users/{user_id}/wishlist` that follows `after`,
/// newest first.
#[instrument(
    name = "wishlist::fetch_page",
    level = "trace",
    skip(firestore, identity, after),
    fields(first_page = after.is_none())
)]
pub async fn fetch_page(
    firestore: &FirestoreApi,
    identity: Option<&Identity>,
    after: Option<&PageCursor>,
) -> Result<WishlistPage, Status> {
    let identity = identity.ok_or_else(|| {
        Status::not_authenticated("wishlist can only be read for a signed in user")
    })?;
    let collection = collection_path(&identity.user_id);

    let parent_path = firestore
        .db()
        .parent_path(USERS, &identity.user_id)
        .map_err(|e| make_status(e, &collection, ""))?;

    let query = firestore
        .db()
        .fluent()
        .select()
        .from(WISHLIST)
        .parent(&parent_path)
        .order_by([
            (CREATED_AT, FirestoreQueryDirection::Descending),
            (DOCUMENT_ID, FirestoreQueryDirection::Descending),
        ])
        .limit(PAGE_SIZE);
    let query = match after {
        Some(cursor) => query.start_at(FirestoreQueryCursor::AfterValue(cursor_values(
            firestore.db(),
            &identity.user_id,
            cursor,
        ))),
        None => query,
    };

    // Documents are decoded one by one so that a malformed document is
    // skipped without losing its position in the query order.
    let mut documents = query
        .stream_query_with_errors()
        .await
        .map_err(|e| make_status(e, &collection, ""))?;

    let mut reader = PageReader::default();
    while let Some(doc) = documents.next().await {
        match doc {
            Ok(doc) => {
                if let Err(e) = reader.read(&doc) {
                    WishlistEvent::decode_skipped(&identity.user_id, e);
                }
            }
            Err(e) => {
                FirestoreEvent::query(
                    collection.clone(),
                    reader.references.len(),
                    reader.skipped,
                    vec![e.to_string()],
                );
                return Err(make_status(e, &collection, ""));
            }
        }
    }
    FirestoreEvent::query(collection, reader.references.len(), reader.skipped, vec![]);

    Ok(reader.into_page())
}

/// Adds `game_id` to the user's wishlist. Re-adding a game refreshes its
/// creation time.
#[instrument(name = "wishlist::add_entry", level = "trace", skip(firestore, identity))]
pub async fn add_entry(
    firestore: &FirestoreApi,
    identity: &Identity,
    game_id: &str,
) -> Result<WishlistReference, Status> {
    let collection = collection_path(&identity.user_id);
    let parent_path = firestore
        .db()
        .parent_path(USERS, &identity.user_id)
        .map_err(|e| make_status(e, &collection, game_id))?;

    let reference = WishlistReference::new(&identity.user_id, game_id);
    let result = firestore
        .db()
        .fluent()
        .update()
        .in_col(WISHLIST)
        .document_id(game_id)
        .parent(&parent_path)
        .object(&reference)
        .execute::<()>()
        .await;

    match result {
        Ok(()) => {
            FirestoreEvent::write(collection, game_id.to_owned(), None);
            Ok(reference)
        }
        Err(e) => {
            FirestoreEvent::write(collection.clone(), game_id.to_owned(), Some(e.to_string()));
            Err(make_status(e, &collection, game_id))
        }
    }
}

#[instrument(
    name = "wishlist::remove_entry",
    level = "trace",
    skip(firestore, identity)
)]
pub async fn remove_entry(
    firestore: &FirestoreApi,
    identity: &Identity,
    game_id: &str,
) -> Result<(), Status> {
    let collection = collection_path(&identity.user_id);
    let parent_path = firestore
        .db()
        .parent_path(USERS, &identity.user_id)
        .map_err(|e| make_status(e, &collection, game_id))?;

    let result = firestore
        .db()
        .fluent()
        .delete()
        .from(WISHLIST)
        .document_id(game_id)
        .parent(&parent_path)
        .execute()
        .await;

    match result {
        Ok(()) => {
            FirestoreEvent::delete(collection, game_id.to_owned(), None);
            Ok(())
        }
        Err(e) => {
            FirestoreEvent::delete(collection.clone(), game_id.to_owned(), Some(e.to_string()));
            Err(make_status(e, &collection, game_id))
        }
    }
}

#[async_trait]
impl WishlistStore for FirestoreApi {
    async fn fetch_page(
        &self,
        identity: Option<&Identity>,
        after: Option<&PageCursor>,
    ) -> Result<WishlistPage, Status> {
        fetch_page(self, identity, after).await
    }
}

/// Accumulates the documents of one page in query order.
#[derive(Default)]
struct PageReader {
    references: Vec<WishlistReference>,
    skipped: usize,
    read: usize,
    last_position: Option<PageCursor>,
}

impl PageReader {
    /// Reads the next document of the page. Returns the decode error of a
    /// skipped document.
    fn read(&mut self, doc: &FirestoreDocument) -> Result<(), String> {
        self.read += 1;
        if let Some(position) = position(doc) {
            self.last_position = Some(position);
        }

        match FirestoreDb::deserialize_doc_to::<WishlistReference>(doc) {
            Ok(reference) => {
                self.references.push(reference);
                Ok(())
            }
            Err(e) => {
                self.skipped += 1;
                Err(format!("{}: {e}", doc.name))
            }
        }
    }

    // A short page (fewer documents than requested) is the last one. A full
    // page continues after its last document, decodable or not.
    fn into_page(self) -> WishlistPage {
        WishlistPage {
            next_cursor: match self.read < PAGE_SIZE as usize {
                true => None,
                false => self.last_position,
            },
            references: self.references,
        }
    }
}

#[derive(Deserialize)]
struct OrderingKey {
    #[serde(rename = "createdAt")]
    #[serde(with = "firestore::serialize_as_timestamp")]
    created_at: DateTime<Utc>,
}

/// Position of `doc` in the query order, read from its ordering fields only.
fn position(doc: &FirestoreDocument) -> Option<PageCursor> {
    let key = FirestoreDb::deserialize_doc_to::<OrderingKey>(doc).ok()?;
    let document_id = doc.name.rsplit('/').next()?;
    Some(PageCursor::new(key.created_at, document_id))
}

fn cursor_values(db: &FirestoreDb, user_id: &str, cursor: &PageCursor) -> Vec<FirestoreValue> {
    let name = document_name(db.get_documents_path(), user_id, &cursor.document_id);
    vec![
        FirestoreTimestamp(cursor.created_at).into(),
        FirestoreReference(name).into(),
    ]
}

fn document_name(documents_path: &str, user_id: &str, document_id: &str) -> String {
    format!("{documents_path}/{USERS}/{user_id}/{WISHLIST}/{document_id}")
}

fn collection_path(user_id: &str) -> String {
    format!("/{USERS}/{user_id}/{WISHLIST}")
}

const WISHLIST: &str = "wishlist";
const CREATED_AT: &str = "createdAt";
const DOCUMENT_ID: &str = "__name__";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde::Serialize;

    const DOCUMENTS: &str = "projects/topaz/databases/(default)/documents";

    fn created_at(i: usize) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap() - Duration::minutes(i as i64)
    }

    fn name(game_id: &str) -> String {
        document_name(DOCUMENTS, "user", game_id)
    }

    fn valid(i: usize) -> FirestoreDocument {
        let reference = WishlistReference {
            user_id: "user".to_owned(),
            game_id: format!("game_{i}"),
            created_at: created_at(i),
        };
        FirestoreDb::serialize_to_doc(name(&reference.game_id), &reference).unwrap()
    }

    #[derive(Serialize)]
    struct Malformed {
        #[serde(rename = "createdAt")]
        #[serde(with = "firestore::serialize_as_timestamp")]
        created_at: DateTime<Utc>,

        #[serde(rename = "gameID")]
        game_id: i64,
    }

    fn malformed(i: usize) -> FirestoreDocument {
        let doc = Malformed {
            created_at: created_at(i),
            game_id: i as i64,
        };
        FirestoreDb::serialize_to_doc(name(&format!("game_{i}")), &doc).unwrap()
    }

    fn read_page(docs: &[FirestoreDocument]) -> (WishlistPage, usize) {
        let mut reader = PageReader::default();
        for doc in docs {
            let _ = reader.read(doc);
        }
        let skipped = reader.skipped;
        (reader.into_page(), skipped)
    }

    // Emulates the store query: documents strictly after the cursor, in
    // (createdAt desc, document id desc) order, at most one page.
    fn query(docs: &[FirestoreDocument], after: Option<&PageCursor>) -> Vec<FirestoreDocument> {
        docs.iter()
            .filter(|doc| match (after, position(doc)) {
                (Some(cursor), Some(p)) => {
                    (p.created_at, &p.document_id) < (cursor.created_at, &cursor.document_id)
                }
                _ => true,
            })
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect()
    }

    #[test]
    fn full_page_continues_after_last_document() {
        let docs: Vec<_> = (0..20).map(valid).collect();
        let (page, skipped) = read_page(&docs);
        assert_eq!(skipped, 0);
        assert_eq!(page.references.len(), 20);
        assert_eq!(
            page.next_cursor,
            Some(PageCursor::new(created_at(19), "game_19"))
        );
    }

    #[test]
    fn short_page_is_the_last() {
        let docs: Vec<_> = (0..19).map(valid).collect();
        assert_eq!(read_page(&docs).0.next_cursor, None);
        assert_eq!(read_page(&[]).0.next_cursor, None);
    }

    #[test]
    fn undecodable_last_document_still_advances_cursor() {
        let mut docs: Vec<_> = (0..19).map(valid).collect();
        docs.push(malformed(19));

        let (page, skipped) = read_page(&docs);
        assert_eq!(skipped, 1);
        assert_eq!(page.references.len(), 19);
        assert_eq!(
            page.next_cursor,
            Some(PageCursor::new(created_at(19), "game_19"))
        );
    }

    #[test]
    fn run_of_undecodable_documents_does_not_end_paging() {
        let docs: Vec<_> = (0..22)
            .map(|i| match i {
                0 | 21 => valid(i),
                _ => malformed(i),
            })
            .collect();

        let mut loaded = vec![];
        let mut cursor = None;
        let mut pages = 0;
        loop {
            let (page, _) = read_page(&query(&docs, cursor.as_ref()));
            pages += 1;
            loaded.extend(page.game_ids());
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        assert_eq!(pages, 2);
        assert_eq!(loaded, vec!["game_0", "game_21"]);
    }

    #[test]
    fn position_is_read_from_document_name() {
        let doc = malformed(7);
        assert_eq!(position(&doc), Some(PageCursor::new(created_at(7), "game_7")));
    }

    #[test]
    fn cursor_names_the_full_document() {
        assert_eq!(
            name("game_3"),
            "projects/topaz/databases/(default)/documents/users/user/wishlist/game_3"
        );
    }

    #[test]
    fn collection_path_is_per_user() {
        assert_eq!(collection_path("uid"), "/users/uid/wishlist");
    }
}
