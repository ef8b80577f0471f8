use crate::{
    bookmarks::{verify_url, Bookmark, UNREAD_TAG},
    client::Fetch,
    config::Config,
    enrich,
    errors::LinkhutError,
    request::{ApiRequest, BookmarkFilter},
};
use log::{debug, error, warn};
use reqwest::StatusCode;
use serde_json::Value;

/// The fields for creating or replacing a bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookmark {
    pub url: String,
    /// The title of the bookmark, fetched from the page if not given.
    pub title: Option<String>,
    pub note: Option<String>,
    /// The tags of the bookmark; suggested tags are fetched if not given
    /// and `fetch_tags` is set.
    pub tags: Option<Vec<String>>,
    pub fetch_tags: bool,
    pub private: bool,
    pub to_read: bool,
    /// Replace an existing bookmark with the same url.
    pub replace: bool,
}

impl CreateBookmark {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            title: None,
            note: None,
            tags: None,
            fetch_tags: true,
            private: false,
            to_read: false,
            replace: false,
        }
    }
}

/// The client for the bookmarking service.
///
/// Mutating operations reconcile the caller-supplied fields with the
/// existing remote state: the current bookmark is read immediately before
/// writing, and fields not supplied by the caller are preserved from the
/// remote record. The remote service is the only state of record; the last
/// write wins.
#[derive(Debug, Clone)]
pub struct LinkhutApi<C: Fetch> {
    client: C,
    config: Config,
}

impl<C: Fetch> LinkhutApi<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self { client, config }
    }

    /// Perform a request, surfacing error statuses as status codes.
    ///
    /// A 404 status means the requested bookmark does not exist and is used
    /// as the existence check by the reconcile operations.
    async fn call(&self, request: &ApiRequest) -> Result<(Value, StatusCode), LinkhutError> {
        let url = request.request_url(&self.config.linkhut_url);
        let headers = self.config.linkhut_headers()?;

        match self.client.get(&url, headers).await {
            Ok((body, status)) => Ok((body, status)),
            Err(LinkhutError::HttpStatus { status, body }) => {
                debug!("Request to {} failed with status {status}: {body}", request.path());
                Ok((Value::Null, status))
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch the bookmarks matching the given filters.
    pub async fn get_bookmarks(
        &self,
        filter: &BookmarkFilter,
    ) -> Result<(Vec<Bookmark>, StatusCode), LinkhutError> {
        let request = ApiRequest::from_filter(filter);
        let (body, status) = self.call(&request).await?;

        let bookmarks = if status == StatusCode::OK {
            Bookmark::from_posts(&body)?
        } else {
            Vec::new()
        };

        Ok((bookmarks, status))
    }

    /// Fetch the bookmark for the given url.
    async fn get_bookmark(
        &self,
        url: &str,
    ) -> Result<(Option<Bookmark>, StatusCode), LinkhutError> {
        let (bookmarks, status) = self.get_bookmarks(&BookmarkFilter::by_url(url)).await?;
        Ok((bookmarks.into_iter().next(), status))
    }

    /// Create a bookmark, returning the status code of the write.
    ///
    /// Enrichment failures never abort the operation: a missing title falls
    /// back to the url, missing tag suggestions fall back to an empty tag
    /// set.
    pub async fn create_bookmark(&self, create: CreateBookmark) -> Result<StatusCode, LinkhutError> {
        verify_url(&create.url)?;

        let title = match create.title {
            Some(title) => title,
            None => match enrich::fetch_title(&self.client, &self.config, &create.url).await {
                Ok(title) => {
                    debug!("Fetched title: {title}");
                    title
                }
                Err(err) => {
                    warn!("Can't fetch title for {}: {err}", create.url);
                    create.url.clone()
                }
            },
        };

        let tags = match create.tags {
            Some(tags) => tags,
            None if create.fetch_tags => {
                match enrich::suggest_tags(&self.client, &self.config, &create.url).await {
                    Ok(tags) => {
                        debug!("Fetched tag suggestions: {}", tags.join(","));
                        tags
                    }
                    Err(err) => {
                        warn!("Can't fetch tag suggestions for {}: {err}", create.url);
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        let request = ApiRequest::Add {
            url: create.url,
            title,
            note: create.note.filter(|note| !note.is_empty()),
            private: create.private,
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.join(","))
            },
            to_read: create.to_read,
            replace: create.replace,
        };
        let (_, status) = self.call(&request).await?;

        if status == StatusCode::OK {
            debug!("Created bookmark");
        }

        Ok(status)
    }

    /// Update the bookmark for the given url, merging the supplied fields
    /// with the existing remote state.
    ///
    /// Supplied tags replace the existing tags; a supplied note is appended
    /// to the existing note; the read status is preserved. A missing
    /// bookmark is created from the supplied fields as a private bookmark.
    ///
    /// Returns true whenever a create or merge path was taken, regardless
    /// of the status of the downstream write.
    pub async fn update_bookmark(
        &self,
        url: &str,
        new_tags: Option<Vec<String>>,
        new_note: Option<String>,
        private: Option<bool>,
    ) -> Result<bool, LinkhutError> {
        // A fully specified update is treated as a no-op.
        if new_tags.is_some() && new_note.is_some() && private.is_some() {
            debug!("Nothing to update for {url}");
            return Ok(false);
        }

        let (existing, status) = self.get_bookmark(url).await?;

        if status == StatusCode::NOT_FOUND {
            debug!("Bookmark for {url} not found, creating a new one");
            let create = CreateBookmark {
                note: new_note,
                tags: new_tags,
                private: true,
                ..CreateBookmark::new(url)
            };
            self.create_bookmark(create).await?;
        } else if status == StatusCode::OK {
            let bookmark = existing.ok_or(LinkhutError::MissingField("posts"))?;
            debug!("Bookmark for {url} exists, updating it");

            let note = match &new_note {
                Some(new_note) => format!("{}{new_note}", bookmark.note),
                None => bookmark.note,
            };
            let create = CreateBookmark {
                url: url.to_owned(),
                title: Some(bookmark.title),
                note: Some(note),
                tags: Some(
                    new_tags
                        .filter(|tags| !tags.is_empty())
                        .unwrap_or(bookmark.tags),
                ),
                fetch_tags: false,
                private: private.unwrap_or(bookmark.private),
                to_read: bookmark.to_read,
                replace: true,
            };
            self.create_bookmark(create).await?;
        }

        Ok(true)
    }

    /// Set the to-read flag of the bookmark for the given url, creating the
    /// bookmark if it does not exist.
    ///
    /// Returns false without writing if the bookmark already has the
    /// desired flag and no note is supplied; otherwise true iff the
    /// downstream write succeeded.
    pub async fn toggle_read_status(
        &self,
        url: &str,
        to_read: bool,
        note: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Result<bool, LinkhutError> {
        let (existing, status) = self.get_bookmark(url).await?;

        let write_status = if status == StatusCode::NOT_FOUND {
            debug!("Bookmark for {url} not found, creating a new one");
            let create = CreateBookmark {
                note,
                tags,
                to_read,
                ..CreateBookmark::new(url)
            };
            self.create_bookmark(create).await?
        } else if status == StatusCode::OK {
            let bookmark = existing.ok_or(LinkhutError::MissingField("posts"))?;
            debug!(
                "Bookmark for {url} has to_read = {}, desired {to_read}",
                bookmark.to_read
            );

            if bookmark.to_read == to_read && note.is_none() {
                debug!("Bookmark for {url} already has the desired read status");
                return Ok(false);
            }

            let note = match &note {
                Some(new_note) => format!("{}{new_note}", bookmark.note),
                None => bookmark.note,
            };
            let create = CreateBookmark {
                url: url.to_owned(),
                title: Some(bookmark.title),
                note: Some(note),
                tags: Some(bookmark.tags),
                fetch_tags: false,
                private: bookmark.private,
                to_read,
                replace: true,
            };
            self.create_bookmark(create).await?
        } else {
            error!("Can't read bookmark for {url}: status {status}");
            return Ok(false);
        };

        if write_status == StatusCode::OK {
            Ok(true)
        } else {
            error!("Can't create or update bookmark for {url}: status {write_status}");
            Ok(false)
        }
    }

    /// Delete the bookmark for the given url.
    pub async fn delete_bookmark(&self, url: &str) -> Result<bool, LinkhutError> {
        let request = ApiRequest::Delete {
            url: url.to_owned(),
        };
        let (_, status) = self.call(&request).await?;

        if status == StatusCode::OK {
            debug!("Deleted bookmark for {url}");
            Ok(true)
        } else {
            error!("Can't delete bookmark for {url}: status {status}");
            Ok(false)
        }
    }

    /// Rename a tag across all bookmarks.
    pub async fn rename_tag(&self, old: &str, new: &str) -> Result<bool, LinkhutError> {
        let request = ApiRequest::RenameTag {
            old: old.to_owned(),
            new: new.to_owned(),
        };
        let (_, status) = self.call(&request).await?;

        if status == StatusCode::OK {
            debug!("Renamed tag {old} to {new}");
            Ok(true)
        } else {
            error!("Can't rename tag {old}: status {status}");
            Ok(false)
        }
    }

    /// Delete a tag from all bookmarks.
    pub async fn delete_tag(&self, tag: &str) -> Result<bool, LinkhutError> {
        let request = ApiRequest::DeleteTag {
            tag: tag.to_owned(),
        };
        let (_, status) = self.call(&request).await?;

        if status == StatusCode::OK {
            debug!("Deleted tag {tag}");
            Ok(true)
        } else {
            error!("Can't delete tag {tag}: status {status}");
            Ok(false)
        }
    }

    /// Fetch up to `count` bookmarks of the reading list.
    pub async fn get_reading_list(&self, count: u32) -> Result<Vec<Bookmark>, LinkhutError> {
        let filter = BookmarkFilter {
            tags: vec![UNREAD_TAG.to_owned()],
            count: Some(count),
            ..Default::default()
        };
        let (bookmarks, _) = self.get_bookmarks(&filter).await?;
        Ok(bookmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use serde_json::json;

    const RECENT_PATH: &str = "/v1/posts/recent";
    const GET_PATH: &str = "/v1/posts/get";
    const ADD_PATH: &str = "/v1/posts/add";
    const DELETE_PATH: &str = "/v1/posts/delete";
    const SUGGEST_PATH: &str = "/v1/posts/suggest";

    fn test_api() -> (MockClient, LinkhutApi<MockClient>) {
        let client = MockClient::new();
        let config = Config::new(
            "https://api.example.com",
            "https://preview.example.com",
            "token",
            Some("key".to_owned()),
        );
        let api = LinkhutApi::new(client.clone(), config);
        (client, api)
    }

    fn existing_post() -> Value {
        json!({
            "posts": [{
                "href": "https://example.com",
                "description": "Example",
                "extended": "A",
                "tags": "dev,articles",
                "shared": "no",
                "toread": "yes",
            }]
        })
    }

    fn query(url: &str) -> &str {
        url.split_once('?').map(|(_, query)| query).unwrap_or("")
    }

    #[tokio::test]
    async fn test_create_bookmark() {
        let (client, api) = test_api();
        client.mock("/", 200, json!({"title": "Example Domain"}));
        client.mock(SUGGEST_PATH, 200, json!([{"popular": ["rust"]}, {"recommended": []}]));
        client.mock(ADD_PATH, 200, json!({}));

        let status = api
            .create_bookmark(CreateBookmark::new("https://example.com"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);

        let writes = client.requests_to(ADD_PATH);
        assert_eq!(writes.len(), 1);
        let fields = query(&writes[0]);
        assert!(fields.contains("url=https://example.com"));
        assert!(fields.contains("description=Example Domain"));
        assert!(fields.contains("tags=rust"));
        assert!(!fields.contains("replace"));
        assert!(!fields.contains("toread"));
        assert!(!fields.contains("shared"));
        assert!(!fields.contains("extended"));
    }

    #[tokio::test]
    async fn test_create_bookmark_enrichment_failure() {
        let (client, api) = test_api();
        client.mock("/", 500, json!({}));
        client.mock(SUGGEST_PATH, 500, json!({}));
        client.mock(ADD_PATH, 200, json!({}));

        let status = api
            .create_bookmark(CreateBookmark::new("https://example.org"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);

        let writes = client.requests_to(ADD_PATH);
        assert_eq!(writes.len(), 1);
        let fields = query(&writes[0]);
        assert!(fields.contains("description=https://example.org"));
        assert!(!fields.contains("tags="));
    }

    #[tokio::test]
    async fn test_create_bookmark_invalid_url() {
        let (client, api) = test_api();

        let res = api
            .create_bookmark(CreateBookmark::new("ftp://example.com"))
            .await;
        assert!(matches!(res, Err(LinkhutError::InvalidUrlScheme(_))));
        // No request is sent for an invalid url.
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_bookmark_all_fields() {
        let (client, api) = test_api();
        client.mock(ADD_PATH, 200, json!({}));

        let create = CreateBookmark {
            title: Some("Example".to_owned()),
            note: Some("A note".to_owned()),
            tags: Some(vec!["dev".to_owned(), "articles".to_owned()]),
            private: true,
            to_read: true,
            replace: true,
            ..CreateBookmark::new("https://example.com")
        };
        let status = api.create_bookmark(create).await.unwrap();
        assert_eq!(status, StatusCode::OK);

        // Title and tags were supplied, so no enrichment requests are sent.
        assert_eq!(client.requests().len(), 1);
        let writes = client.requests_to(ADD_PATH);
        let fields = query(&writes[0]);
        assert!(fields.contains("extended=A note"));
        assert!(fields.contains("shared=no"));
        assert!(fields.contains("tags=dev,articles"));
        assert!(fields.contains("toread=yes"));
        assert!(fields.contains("replace=yes"));
    }

    #[tokio::test]
    async fn test_create_bookmark_write_failure() {
        let (client, api) = test_api();
        client.mock(ADD_PATH, 500, json!({}));

        let create = CreateBookmark {
            title: Some("Example".to_owned()),
            fetch_tags: false,
            ..CreateBookmark::new("https://example.com")
        };
        let status = api.create_bookmark(create).await.unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_update_bookmark_tags_only() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());
        client.mock(ADD_PATH, 200, json!({}));

        let updated = api
            .update_bookmark(
                "https://example.com",
                Some(vec!["rust".to_owned()]),
                None,
                None,
            )
            .await
            .unwrap();
        assert!(updated);

        let writes = client.requests_to(ADD_PATH);
        assert_eq!(writes.len(), 1);
        let fields = query(&writes[0]);
        // The note and the unsupplied fields are preserved from the
        // existing bookmark.
        assert!(fields.contains("extended=A"));
        assert!(fields.contains("tags=rust"));
        assert!(fields.contains("shared=no"));
        assert!(fields.contains("toread=yes"));
        assert!(fields.contains("replace=yes"));
        assert!(fields.contains("description=Example"));
    }

    #[tokio::test]
    async fn test_update_bookmark_appends_note() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());
        client.mock(ADD_PATH, 200, json!({}));

        let updated = api
            .update_bookmark("https://example.com", None, Some(" B".to_owned()), None)
            .await
            .unwrap();
        assert!(updated);

        let writes = client.requests_to(ADD_PATH);
        let fields = query(&writes[0]);
        assert!(fields.contains("extended=A B"));
        assert!(fields.contains("tags=dev,articles"));
    }

    #[tokio::test]
    async fn test_update_bookmark_visibility() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());
        client.mock(ADD_PATH, 200, json!({}));

        let updated = api
            .update_bookmark("https://example.com", None, None, Some(false))
            .await
            .unwrap();
        assert!(updated);

        let writes = client.requests_to(ADD_PATH);
        let fields = query(&writes[0]);
        assert!(!fields.contains("shared=no"));
        assert!(fields.contains("extended=A"));
        assert!(fields.contains("toread=yes"));
    }

    // All three fields supplied at once short-circuits without any request.
    #[tokio::test]
    async fn test_update_bookmark_all_fields_is_noop() {
        let (client, api) = test_api();

        let updated = api
            .update_bookmark(
                "https://example.com",
                Some(vec!["rust".to_owned()]),
                Some("note".to_owned()),
                Some(true),
            )
            .await
            .unwrap();
        assert!(!updated);
        assert!(client.requests().is_empty());
    }

    // A missing bookmark is created as private even when the caller asked
    // for a public one.
    #[tokio::test]
    async fn test_update_bookmark_not_found_creates_private() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 404, json!({}));
        client.mock(SUGGEST_PATH, 500, json!({}));
        client.mock("/", 500, json!({}));
        client.mock(ADD_PATH, 200, json!({}));

        let updated = api
            .update_bookmark("https://example.com", None, None, Some(false))
            .await
            .unwrap();
        assert!(updated);

        let writes = client.requests_to(ADD_PATH);
        assert_eq!(writes.len(), 1);
        let fields = query(&writes[0]);
        assert!(fields.contains("shared=no"));
        assert!(!fields.contains("replace"));
    }

    // The return value reflects the merge path, not the write status.
    #[tokio::test]
    async fn test_update_bookmark_ignores_write_status() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());
        client.mock(ADD_PATH, 500, json!({}));

        let updated = api
            .update_bookmark("https://example.com", Some(vec!["rust".to_owned()]), None, None)
            .await
            .unwrap();
        assert!(updated);
    }

    // An unknown status from the existence check issues no write, but the
    // operation still reports true.
    #[tokio::test]
    async fn test_update_bookmark_unknown_status() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 500, json!({}));

        let updated = api
            .update_bookmark(
                "https://example.com",
                Some(vec!["rust".to_owned()]),
                None,
                None,
            )
            .await
            .unwrap();
        assert!(updated);
        assert!(client.requests_to(ADD_PATH).is_empty());
    }

    #[tokio::test]
    async fn test_toggle_read_status_noop() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());

        let toggled = api
            .toggle_read_status("https://example.com", true, None, None)
            .await
            .unwrap();
        assert!(!toggled);
        // The existence check is the only request.
        assert!(client.requests_to(ADD_PATH).is_empty());
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_read_status_unmarks() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());
        client.mock(ADD_PATH, 200, json!({}));

        let toggled = api
            .toggle_read_status("https://example.com", false, None, None)
            .await
            .unwrap();
        assert!(toggled);

        let writes = client.requests_to(ADD_PATH);
        assert_eq!(writes.len(), 1);
        let fields = query(&writes[0]);
        assert!(!fields.contains("toread"));
        assert!(fields.contains("replace=yes"));
        // Title, tags and visibility are preserved.
        assert!(fields.contains("description=Example"));
        assert!(fields.contains("tags=dev,articles"));
        assert!(fields.contains("shared=no"));
    }

    #[tokio::test]
    async fn test_toggle_read_status_appends_note() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());
        client.mock(ADD_PATH, 200, json!({}));

        // Same flag, but a supplied note still triggers a write.
        let toggled = api
            .toggle_read_status("https://example.com", true, Some(" B".to_owned()), None)
            .await
            .unwrap();
        assert!(toggled);

        let writes = client.requests_to(ADD_PATH);
        let fields = query(&writes[0]);
        assert!(fields.contains("extended=A B"));
        assert!(fields.contains("toread=yes"));
    }

    #[tokio::test]
    async fn test_toggle_read_status_not_found() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 404, json!({}));
        client.mock("/", 500, json!({}));
        client.mock(ADD_PATH, 200, json!({}));

        let toggled = api
            .toggle_read_status(
                "https://example.com",
                true,
                None,
                Some(vec!["rust".to_owned()]),
            )
            .await
            .unwrap();
        assert!(toggled);

        let writes = client.requests_to(ADD_PATH);
        assert_eq!(writes.len(), 1);
        let fields = query(&writes[0]);
        assert!(fields.contains("toread=yes"));
        assert!(fields.contains("tags=rust"));
        assert!(!fields.contains("replace"));
    }

    // An unknown status from the existence check aborts without a write.
    #[tokio::test]
    async fn test_toggle_read_status_unknown_status() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 500, json!({}));

        let toggled = api
            .toggle_read_status("https://example.com", true, None, None)
            .await
            .unwrap();
        assert!(!toggled);
        assert!(client.requests_to(ADD_PATH).is_empty());
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_read_status_write_failure() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 200, existing_post());
        client.mock(ADD_PATH, 500, json!({}));

        let toggled = api
            .toggle_read_status("https://example.com", false, None, None)
            .await
            .unwrap();
        assert!(!toggled);
    }

    #[tokio::test]
    async fn test_get_bookmarks_not_found() {
        let (client, api) = test_api();
        client.mock(GET_PATH, 404, json!({}));

        let (bookmarks, status) = api
            .get_bookmarks(&BookmarkFilter::by_url("https://example.com"))
            .await
            .unwrap();
        assert!(bookmarks.is_empty());
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_bookmark() {
        let (client, api) = test_api();
        client.mock(DELETE_PATH, 200, json!({}));

        let deleted = api.delete_bookmark("https://example.com").await.unwrap();
        assert!(deleted);

        client.mock(DELETE_PATH, 404, json!({}));
        let deleted = api.delete_bookmark("https://example.com").await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_rename_tag() {
        let (client, api) = test_api();
        client.mock("/v1/tags/rename", 200, json!({}));

        let renamed = api.rename_tag("articles", "reading").await.unwrap();
        assert!(renamed);

        let requests = client.requests_to("/v1/tags/rename");
        assert_eq!(query(&requests[0]), "old=articles&new=reading");
    }

    #[tokio::test]
    async fn test_delete_tag() {
        let (client, api) = test_api();
        client.mock("/v1/tags/delete", 404, json!({}));

        let deleted = api.delete_tag("articles").await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_get_reading_list() {
        let (client, api) = test_api();
        client.mock(RECENT_PATH, 200, existing_post());

        let bookmarks = api.get_reading_list(5).await.unwrap();
        assert_eq!(bookmarks.len(), 1);

        let requests = client.requests_to(RECENT_PATH);
        assert_eq!(query(&requests[0]), "count=5&tag=unread");
    }
}
