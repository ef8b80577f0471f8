use log::debug;

/// The default count for the recent endpoint when no filters are given.
const DEFAULT_RECENT_COUNT: u32 = 15;

/// Filters to select bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkFilter {
    pub tags: Vec<String>,
    /// Filter by date in `CCYY-MM-DDThh:mm:ssZ` format.
    pub date: Option<String>,
    pub url: Option<String>,
    pub count: Option<u32>,
}

impl BookmarkFilter {
    pub fn by_url(url: &str) -> Self {
        Self {
            url: Some(url.to_owned()),
            ..Default::default()
        }
    }
}

/// A request to one of the service endpoints.
///
/// One variant per endpoint so that the field names are checked at compile
/// time instead of being assembled in an untyped map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Fetch the most recent bookmarks, optionally filtered by a single tag.
    Recent { count: u32, tag: Option<String> },
    /// Fetch the bookmarks matching the given filters.
    Get {
        tags: Option<String>,
        date: Option<String>,
        url: Option<String>,
    },
    /// Create a bookmark, or replace the bookmark with the same url.
    Add {
        url: String,
        title: String,
        note: Option<String>,
        private: bool,
        tags: Option<String>,
        to_read: bool,
        replace: bool,
    },
    /// Delete a bookmark.
    Delete { url: String },
    /// Rename a tag across all bookmarks.
    RenameTag { old: String, new: String },
    /// Delete a tag from all bookmarks.
    DeleteTag { tag: String },
    /// Fetch suggested tags for a url.
    SuggestTags { url: String },
}

impl ApiRequest {
    /// Select the endpoint and fields for the given filters.
    ///
    /// A count selects the recent endpoint which supports a single tag
    /// filter only; remaining tags are dropped. Without a count, any filter
    /// selects the get endpoint. Without any filters, the most recent
    /// bookmarks are fetched with a default count.
    pub fn from_filter(filter: &BookmarkFilter) -> ApiRequest {
        if let Some(count) = filter.count {
            if filter.tags.len() > 1 {
                debug!(
                    "The recent endpoint accepts a single tag, ignoring: {}",
                    filter.tags[1..].join(", ")
                );
            }
            ApiRequest::Recent {
                count,
                tag: filter.tags.first().cloned(),
            }
        } else if !filter.tags.is_empty() || filter.date.is_some() || filter.url.is_some() {
            ApiRequest::Get {
                tags: if filter.tags.is_empty() {
                    None
                } else {
                    Some(filter.tags.join(","))
                },
                // Passed through as-is; the service expects
                // CCYY-MM-DDThh:mm:ssZ.
                date: filter.date.clone(),
                url: filter.url.clone(),
            }
        } else {
            ApiRequest::Recent {
                count: DEFAULT_RECENT_COUNT,
                tag: None,
            }
        }
    }

    /// The endpoint path for this request.
    pub fn path(&self) -> &'static str {
        match self {
            ApiRequest::Recent { .. } => "/v1/posts/recent",
            ApiRequest::Get { .. } => "/v1/posts/get",
            ApiRequest::Add { .. } => "/v1/posts/add",
            ApiRequest::Delete { .. } => "/v1/posts/delete",
            ApiRequest::RenameTag { .. } => "/v1/tags/rename",
            ApiRequest::DeleteTag { .. } => "/v1/tags/delete",
            ApiRequest::SuggestTags { .. } => "/v1/posts/suggest",
        }
    }

    /// The query fields for this request.
    ///
    /// Field values are not percent-encoded; see
    /// [`crate::bookmarks::encode_url`].
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ApiRequest::Recent { count, tag } => {
                let mut fields = vec![("count", count.to_string())];
                if let Some(tag) = tag {
                    fields.push(("tag", tag.clone()));
                }
                fields
            }
            ApiRequest::Get { tags, date, url } => {
                let mut fields = Vec::new();
                if let Some(tags) = tags {
                    fields.push(("tags", tags.clone()));
                }
                if let Some(date) = date {
                    fields.push(("dt", date.clone()));
                }
                if let Some(url) = url {
                    fields.push(("url", url.clone()));
                }
                fields
            }
            ApiRequest::Add {
                url,
                title,
                note,
                private,
                tags,
                to_read,
                replace,
            } => {
                let mut fields = vec![("url", url.clone()), ("description", title.clone())];
                if let Some(note) = note {
                    fields.push(("extended", note.clone()));
                }
                if *private {
                    fields.push(("shared", "no".to_owned()));
                }
                if let Some(tags) = tags {
                    fields.push(("tags", tags.clone()));
                }
                if *to_read {
                    fields.push(("toread", "yes".to_owned()));
                }
                if *replace {
                    fields.push(("replace", "yes".to_owned()));
                }
                fields
            }
            ApiRequest::Delete { url } => vec![("url", url.clone())],
            ApiRequest::RenameTag { old, new } => {
                vec![("old", old.clone()), ("new", new.clone())]
            }
            ApiRequest::DeleteTag { tag } => vec![("tag", tag.clone())],
            ApiRequest::SuggestTags { url } => {
                vec![("url", url.clone()), ("fields", "tags".to_owned())]
            }
        }
    }

    /// The full request url against the given base url.
    pub fn request_url(&self, base_url: &str) -> String {
        let mut request_url = format!("{}{}", base_url, self.path());

        for (i, (name, value)) in self.fields().iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            request_url.push(separator);
            request_url.push_str(name);
            request_url.push('=');
            request_url.push_str(value);
        }

        request_url
    }
}
