use crate::errors::LinkhutError;
use serde::Deserialize;
use serde_json::Value;

/// The maximal length of a bookmark url accepted by the service.
const MAX_URL_LENGTH: usize = 2048;

/// The reserved tag which marks a bookmark as part of the reading list.
pub const UNREAD_TAG: &str = "unread";

/// A bookmark stored in the remote service.
///
/// Bookmarks are uniquely addressed by their url; no separate identifier
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub url: String,
    /// The display text, named `description` on the wire.
    pub title: String,
    /// The free-text annotation, named `extended` on the wire.
    pub note: String,
    pub tags: Vec<String>,
    pub private: bool,
    pub to_read: bool,
}

/// The wire representation of a bookmark in a `posts` response.
#[derive(Debug, Deserialize)]
struct RawPost {
    href: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    extended: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    shared: String,
    #[serde(default)]
    toread: String,
}

impl From<RawPost> for Bookmark {
    fn from(post: RawPost) -> Self {
        let tags = if post.tags.is_empty() {
            Vec::new()
        } else {
            post.tags.split(',').map(ToOwned::to_owned).collect()
        };
        Self {
            url: post.href,
            title: post.description,
            note: post.extended,
            tags,
            private: post.shared == "no",
            to_read: post.toread == "yes",
        }
    }
}

impl Bookmark {
    /// Parse the bookmarks from the `posts` field of a response body.
    pub fn from_posts(body: &Value) -> Result<Vec<Bookmark>, LinkhutError> {
        let posts = body
            .get("posts")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let raw_posts = serde_json::from_value::<Vec<RawPost>>(posts)
            .map_err(LinkhutError::DeserializeJson)?;
        Ok(raw_posts.into_iter().map(Bookmark::from).collect())
    }
}

/// Validate the scheme and length of a bookmark url.
pub fn verify_url(url: &str) -> Result<(), LinkhutError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(LinkhutError::InvalidUrlScheme(url.to_owned()));
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(LinkhutError::InvalidUrlLength(url.to_owned()));
    }

    Ok(())
}

/// Percent-encode a url for use as a query field value.
///
/// Filter urls are passed through unencoded by default; encoding is applied
/// only where a caller opts in.
pub fn encode_url(url: &str) -> String {
    url.replace(':', "%3A")
        .replace('/', "%2F")
        .replace('?', "%3F")
        .replace('&', "%26")
        .replace('=', "%3D")
}
