//! Wishlists, flattened items and the shared-with-me view.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A wishlist stored under `users/{userId}/wishlists/{wishlistId}`.
///
/// Fields this backend does not interpret are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub privacy: String,
    #[serde(default)]
    pub shared_with: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Wishlist {
    /// Returns true if `user_id` is in the shared-with list.
    pub fn is_shared_with(&self, user_id: &str) -> bool {
        self.shared_with.iter().any(|id| id == user_id)
    }
}

/// Summary of one wishlist shared with the viewing user, stored under
/// `users/{viewerId}/sharedWithMe/{wishlistId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedWithMeEntry {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub owner_name: String,
    pub privacy: String,
    /// Store path of the source wishlist.
    pub path: String,
}

/// Fields added to an item when it is copied into the global collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalItemProvenance {
    pub item_id: String,
    pub wishlist_id: String,
    pub owner_id: String,
    pub flattened_at: u64,
}
