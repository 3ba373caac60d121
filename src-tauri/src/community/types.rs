use serde::{Deserialize, Serialize};

/// Collection holding community feed posts.
pub const POSTS_COLLECTION: &str = "communityPosts";

/// A feed post as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub content: String,
    /// RFC 3339 creation time.
    pub time: Option<String>,
    /// Display label derived from `time`.
    pub time_label: String,
    pub likes: Vec<String>,
    pub comments: Vec<Comment>,
}

impl Post {
    pub fn is_liked_by(&self, uid: &str) -> bool {
        self.likes.iter().any(|l| l == uid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub content: String,
    pub time: Option<String>,
}

/// Stored shape of a post document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PostBody {
    pub name: String,
    pub user_id: String,
    pub content: String,
    pub time: Option<String>,
    pub likes: Vec<String>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityGroup {
    pub name: String,
    pub members: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityEvent {
    pub name: String,
    pub date: String,
    pub location: String,
    pub description: String,
}

/// Static groups and events listed beside the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityDirectory {
    pub groups: Vec<CommunityGroup>,
    pub events: Vec<CommunityEvent>,
}
