use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    HttpStatus(u16),
}

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(client)
}

pub fn feed_url(feed_host: &str, blog_id: &str) -> String {
    format!("{}/{blog_id}", feed_host.trim_end_matches('/'))
}

pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<FetchedFeed, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);
    let body = response.bytes().await?.to_vec();

    Ok(FetchedFeed { body, content_type })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::Response;
    use axum::routing::get;
    use axum::Router;

    async fn feed_handler() -> Response {
        let mut response = Response::new(axum::body::Body::from(
            include_str!("../../../fixtures/sample.rss.xml").to_string(),
        ));
        *response.status_mut() = StatusCode::OK;
        response.headers_mut().insert(
            reqwest::header::CONTENT_TYPE,
            "application/rss+xml".parse().expect("header must parse"),
        );
        response
    }

    async fn unavailable_handler() -> Response {
        let mut response = Response::new(axum::body::Body::from("maintenance".to_string()));
        *response.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
        response
    }

    async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route("/joecool00", get(feed_handler))
            .route("/down", get(unavailable_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    #[test]
    fn feed_url_joins_host_and_blog_id() {
        assert_eq!(
            feed_url("https://rss.blog.naver.com/", "joecool00"),
            "https://rss.blog.naver.com/joecool00"
        );
    }

    #[tokio::test]
    async fn fetch_feed_returns_body_on_success() {
        let (host, server_task) = spawn_test_server().await;
        let client = build_client(Duration::from_secs(5)).expect("client should build");

        let fetched = fetch_feed(&client, &feed_url(&host, "joecool00"))
            .await
            .expect("fetch should succeed");
        assert!(fetched.body.starts_with(b"<?xml"));
        assert_eq!(fetched.content_type.as_deref(), Some("application/rss+xml"));

        server_task.abort();
    }

    #[tokio::test]
    async fn fetch_feed_reports_non_success_status() {
        let (host, server_task) = spawn_test_server().await;
        let client = build_client(Duration::from_secs(5)).expect("client should build");

        let error = fetch_feed(&client, &format!("{host}/down"))
            .await
            .expect_err("503 must fail");
        assert!(matches!(error, FetchError::HttpStatus(503)));
        assert_eq!(error.to_string(), "503");

        server_task.abort();
    }
}
