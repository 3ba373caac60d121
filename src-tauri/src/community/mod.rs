//! Community feed on top of the document store, plus the static group and
//! event listings.
//!
//! Posts live in the `communityPosts` collection and are read newest first.
//! Likes are an array of user ids updated with array union/remove, so two
//! users liking at once never overwrite each other.

mod directory;
mod feed;
mod types;

pub use directory::community_directory;
pub use feed::{
    add_comment, create_post, feed_query, list_posts, post_from_document, posts_from_snapshot,
    toggle_like, MSG_EMPTY_COMMENT, MSG_EMPTY_POST, MSG_SIGN_IN_TO_COMMENT, MSG_SIGN_IN_TO_LIKE,
    MSG_SIGN_IN_TO_POST,
};
pub use types::{Comment, CommunityDirectory, CommunityEvent, CommunityGroup, Post, POSTS_COLLECTION};
