use crate::{client::Fetch, config::Config, errors::LinkhutError, request::ApiRequest};
use log::debug;
use serde_json::Value;

/// Fetch the title of a page from the link preview service.
pub async fn fetch_title(
    client: &impl Fetch,
    config: &Config,
    url: &str,
) -> Result<String, LinkhutError> {
    let request_url = format!(
        "{}/?fields=title,description,url&q={url}",
        config.linkpreview_url
    );
    debug!("Fetch title for {url}");

    let headers = config.linkpreview_headers()?;
    let (body, _) = client.get(&request_url, headers).await?;

    body.get("title")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or(LinkhutError::MissingField("title"))
}

/// Fetch suggested tags for a url from the bookmarking service.
///
/// The response holds `popular` and `recommended` tag groups which are
/// combined in order.
pub async fn suggest_tags(
    client: &impl Fetch,
    config: &Config,
    url: &str,
) -> Result<Vec<String>, LinkhutError> {
    let request = ApiRequest::SuggestTags {
        url: url.to_owned(),
    };
    debug!("Fetch tag suggestions for {url}");

    let headers = config.linkhut_headers()?;
    let (body, _) = client
        .get(&request.request_url(&config.linkhut_url), headers)
        .await?;

    let groups = body
        .as_array()
        .ok_or(LinkhutError::MissingField("popular"))?;
    let mut tags = Vec::new();

    for group_name in ["popular", "recommended"] {
        if let Some(group_tags) = groups
            .iter()
            .find_map(|group| group.get(group_name))
            .and_then(Value::as_array)
        {
            tags.extend(
                group_tags
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToOwned::to_owned),
            );
        }
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockClient;
    use serde_json::json;

    fn test_config() -> Config {
        Config::new(
            "https://api.example.com",
            "https://preview.example.com",
            "token",
            Some("key".to_owned()),
        )
    }

    #[tokio::test]
    async fn test_fetch_title() {
        let client = MockClient::new();
        client.mock(
            "/",
            200,
            json!({"title": "Example Domain", "url": "https://example.com"}),
        );

        let title = fetch_title(&client, &test_config(), "https://example.com")
            .await
            .unwrap();
        assert_eq!(title, "Example Domain");
        assert_eq!(
            client.requests(),
            vec![
                "https://preview.example.com/?fields=title,description,url&q=https://example.com"
                    .to_owned()
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_title_missing_field() {
        let client = MockClient::new();
        client.mock("/", 200, json!({"url": "https://example.com"}));

        let res = fetch_title(&client, &test_config(), "https://example.com").await;
        assert!(matches!(res, Err(LinkhutError::MissingField("title"))));
    }

    #[tokio::test]
    async fn test_fetch_title_missing_key() {
        let client = MockClient::new();
        let config = Config::new(
            "https://api.example.com",
            "https://preview.example.com",
            "token",
            None,
        );

        let res = fetch_title(&client, &config, "https://example.com").await;
        assert!(matches!(res, Err(LinkhutError::MissingCredential(_))));
        // No request is sent without a credential.
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_tags() {
        let client = MockClient::new();
        client.mock(
            "/v1/posts/suggest",
            200,
            json!([
                {"popular": ["rust", "cli"]},
                {"recommended": ["bookmarks"]},
            ]),
        );

        let tags = suggest_tags(&client, &test_config(), "https://example.com")
            .await
            .unwrap();
        assert_eq!(tags, vec!["rust", "cli", "bookmarks"]);
    }

    #[tokio::test]
    async fn test_suggest_tags_empty_groups() {
        let client = MockClient::new();
        client.mock(
            "/v1/posts/suggest",
            200,
            json!([{"popular": []}, {"recommended": []}]),
        );

        let tags = suggest_tags(&client, &test_config(), "https://example.com")
            .await
            .unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_tags_error_status() {
        let client = MockClient::new();
        client.mock("/v1/posts/suggest", 500, json!({}));

        let res = suggest_tags(&client, &test_config(), "https://example.com").await;
        assert!(matches!(res, Err(LinkhutError::HttpStatus { .. })));
    }
}
