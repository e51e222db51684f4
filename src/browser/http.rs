use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::PageRenderer;
use crate::utils::http::fetch;

/// Fetches pages without a browser. Listings that are built by client-side
/// scripts come back empty.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        let response = fetch(&self.client, url, &[]).await?;
        Ok(response.text().await?)
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::utils::http::create_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn renders_page_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all-courses/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><h4>Go</h4></html>"))
            .mount(&server)
            .await;

        let renderer = HttpRenderer::new(create_client(&test_config()).unwrap());
        let html = renderer
            .render(&format!("{}/all-courses/", server.uri()))
            .await
            .unwrap();
        assert!(html.contains("<h4>Go</h4>"));
        tokio_test::assert_ok!(renderer.shutdown().await);
    }

    #[tokio::test]
    async fn missing_page_is_an_error() {
        let server = MockServer::start().await;
        let renderer = HttpRenderer::new(create_client(&test_config()).unwrap());
        assert!(renderer.render(&format!("{}/gone", server.uri())).await.is_err());
    }
}
