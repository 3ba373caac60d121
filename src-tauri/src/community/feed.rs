use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde_json::json;
use tracing::{debug, info};

use crate::auth::User;
use crate::error::EcoConnectError;
use crate::store::{Document, DocumentStore, FieldUpdate, Query, Snapshot};
use crate::timefmt::label_rfc3339;

use super::types::{Comment, Post, PostBody, POSTS_COLLECTION};

pub const MSG_EMPTY_POST: &str = "Post content cannot be empty";
pub const MSG_SIGN_IN_TO_POST: &str = "You need to be signed in to post";
pub const MSG_SIGN_IN_TO_LIKE: &str = "You need to be signed in to like posts";
pub const MSG_EMPTY_COMMENT: &str = "Comment cannot be empty";
pub const MSG_SIGN_IN_TO_COMMENT: &str = "You need to be signed in to comment";

/// Newest-first query used by the feed, capped at `limit` posts.
pub fn feed_query(limit: usize) -> Query {
    Query::newest_first().with_limit(limit)
}

pub fn post_from_document(doc: &Document) -> Result<Post, EcoConnectError> {
    let body: PostBody = doc.decode()?;
    Ok(Post {
        id: doc.id.clone(),
        time_label: label_rfc3339(body.time.as_deref()),
        name: body.name,
        user_id: body.user_id,
        content: body.content,
        time: body.time,
        likes: body.likes,
        comments: body.comments,
    })
}

/// Decode a feed snapshot, skipping documents that are not posts.
pub fn posts_from_snapshot(snapshot: &Snapshot) -> Vec<Post> {
    snapshot
        .documents
        .iter()
        .filter_map(|doc| match post_from_document(doc) {
            Ok(post) => Some(post),
            Err(e) => {
                debug!("Skipping malformed post {}: {}", doc.id, e);
                None
            }
        })
        .collect()
}

pub fn list_posts(store: &DocumentStore, limit: usize) -> Result<Vec<Post>, EcoConnectError> {
    let docs = store.query(POSTS_COLLECTION, &feed_query(limit))?;
    docs.iter().map(post_from_document).collect()
}

/// Publish a post. Blank content is rejected before the sign-in check.
pub fn create_post(
    store: &DocumentStore,
    user: Option<&User>,
    content: &str,
) -> Result<Post, EcoConnectError> {
    if content.trim().is_empty() {
        return Err(EcoConnectError::Validation(MSG_EMPTY_POST.to_string()));
    }
    let user = user.ok_or_else(|| EcoConnectError::Auth(MSG_SIGN_IN_TO_POST.to_string()))?;

    let doc = store.add(
        POSTS_COLLECTION,
        json!({
            "name": user.name_or_anonymous(),
            "userId": user.uid,
            "content": content,
            "time": Utc::now().to_rfc3339(),
            "likes": [],
            "comments": [],
        }),
    )?;

    info!("User {} created post {}", user.uid, doc.id);
    post_from_document(&doc)
}

/// Like the post, or remove the like if the user already liked it.
pub fn toggle_like(
    store: &DocumentStore,
    user: Option<&User>,
    post_id: &str,
) -> Result<Post, EcoConnectError> {
    let user = user.ok_or_else(|| EcoConnectError::Auth(MSG_SIGN_IN_TO_LIKE.to_string()))?;

    let post = store
        .get(POSTS_COLLECTION, post_id)?
        .ok_or_else(|| EcoConnectError::NotFound(format!("post {}", post_id)))
        .and_then(|doc| post_from_document(&doc))?;

    let update = if post.is_liked_by(&user.uid) {
        FieldUpdate::ArrayRemove(json!(user.uid))
    } else {
        FieldUpdate::ArrayUnion(json!(user.uid))
    };
    let doc = store.update(POSTS_COLLECTION, post_id, &[("likes", update)])?;

    debug!("User {} toggled like on {}", user.uid, post_id);
    post_from_document(&doc)
}

pub fn add_comment(
    store: &DocumentStore,
    user: Option<&User>,
    post_id: &str,
    content: &str,
) -> Result<Post, EcoConnectError> {
    if content.trim().is_empty() {
        return Err(EcoConnectError::Validation(MSG_EMPTY_COMMENT.to_string()));
    }
    let user = user.ok_or_else(|| EcoConnectError::Auth(MSG_SIGN_IN_TO_COMMENT.to_string()))?;

    let comment = Comment {
        id: rand::rng()
            .sample_iter(&Alphanumeric)
            .take(20)
            .map(char::from)
            .collect(),
        user_id: user.uid.clone(),
        name: user.name_or_anonymous().to_string(),
        content: content.to_string(),
        time: Some(Utc::now().to_rfc3339()),
    };
    let doc = store.update(
        POSTS_COLLECTION,
        post_id,
        &[("comments", FieldUpdate::ArrayUnion(serde_json::to_value(&comment)?))],
    )?;

    info!("User {} commented on post {}", user.uid, post_id);
    post_from_document(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timefmt::JUST_NOW;

    fn user(uid: &str, name: Option<&str>) -> User {
        User {
            uid: uid.to_string(),
            email: format!("{}@example.com", uid),
            display_name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_post_rejected_before_auth_check() {
        let store = DocumentStore::in_memory().unwrap();
        let err = create_post(&store, None, "   ").unwrap_err();
        assert_eq!(err.user_message(), MSG_EMPTY_POST);
        assert!(store.query(POSTS_COLLECTION, &Query::default()).unwrap().is_empty());
    }

    #[test]
    fn test_signed_out_post_rejected() {
        let store = DocumentStore::in_memory().unwrap();
        let err = create_post(&store, None, "Planted a tree").unwrap_err();
        assert_eq!(err.user_message(), MSG_SIGN_IN_TO_POST);
    }

    #[test]
    fn test_create_post_fields() {
        let store = DocumentStore::in_memory().unwrap();
        let post = create_post(&store, Some(&user("u1", None)), "Planted a tree").unwrap();
        assert_eq!(post.name, "Anonymous");
        assert_eq!(post.user_id, "u1");
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());
        assert!(post.time.is_some());
        assert_ne!(post.time_label, JUST_NOW);
    }

    #[test]
    fn test_feed_is_newest_first_and_limited() {
        let store = DocumentStore::in_memory().unwrap();
        let author = user("u1", Some("Priya"));
        for text in ["first", "second", "third"] {
            create_post(&store, Some(&author), text).unwrap();
        }
        let posts = list_posts(&store, 2).unwrap();
        let contents: Vec<&str> = posts.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["third", "second"]);
    }

    #[test]
    fn test_toggle_like_on_and_off() {
        let store = DocumentStore::in_memory().unwrap();
        let author = user("u1", Some("Priya"));
        let fan = user("u2", Some("Rahul"));
        let post = create_post(&store, Some(&author), "Cycled to work").unwrap();

        let liked = toggle_like(&store, Some(&fan), &post.id).unwrap();
        assert_eq!(liked.likes, vec!["u2".to_string()]);
        assert!(liked.is_liked_by("u2"));

        let unliked = toggle_like(&store, Some(&fan), &post.id).unwrap();
        assert!(unliked.likes.is_empty());
    }

    #[test]
    fn test_toggle_like_requires_sign_in_and_existing_post() {
        let store = DocumentStore::in_memory().unwrap();
        let err = toggle_like(&store, None, "missing").unwrap_err();
        assert_eq!(err.user_message(), MSG_SIGN_IN_TO_LIKE);

        let err = toggle_like(&store, Some(&user("u1", None)), "missing").unwrap_err();
        assert!(matches!(err, EcoConnectError::NotFound(_)));
    }

    #[test]
    fn test_add_comment() {
        let store = DocumentStore::in_memory().unwrap();
        let author = user("u1", Some("Priya"));
        let post = create_post(&store, Some(&author), "Compost tips?").unwrap();

        let err = add_comment(&store, Some(&author), &post.id, "").unwrap_err();
        assert_eq!(err.user_message(), MSG_EMPTY_COMMENT);

        let updated =
            add_comment(&store, Some(&user("u2", Some("Ananya"))), &post.id, "Use a bin").unwrap();
        assert_eq!(updated.comments.len(), 1);
        assert_eq!(updated.comments[0].name, "Ananya");
        assert_eq!(updated.comments[0].content, "Use a bin");
    }

    #[test]
    fn test_snapshot_decoding_skips_malformed() {
        let store = DocumentStore::in_memory().unwrap();
        create_post(&store, Some(&user("u1", None)), "ok").unwrap();
        store
            .add(POSTS_COLLECTION, json!({"likes": "not a list"}))
            .unwrap();

        let mut sub = store.subscribe(POSTS_COLLECTION, feed_query(50)).unwrap();
        let snapshot = sub.try_next().unwrap();
        assert_eq!(snapshot.documents.len(), 2);
        let posts = posts_from_snapshot(&snapshot);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "ok");
    }
}
