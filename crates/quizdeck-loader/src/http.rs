//! Static-file fetch over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use quizdeck_core::bank::parse_bank_str;
use quizdeck_core::error::LoadError;
use quizdeck_core::model::QuestionBank;
use quizdeck_core::traits::BankSource;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A bank served as a static JSON file.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LoadError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl BankSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<QuestionBank, LoadError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        parse_bank_str(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_fetch() {
        let server = MockServer::start().await;

        let body = serde_json::json!([
            {
                "questionNumber": 1,
                "questionUp": "2 + 2?",
                "questionDown": "",
                "answers": [{"A": "3"}, {"B": "4"}],
                "correctAnwser": "B"
            },
            {
                "questionNumber": 2,
                "questionUp": "3 + 3?",
                "questionDown": "",
                "answers": [{"A": "6"}, {"B": "7"}],
                "correctAnwser": "A"
            }
        ]);

        Mock::given(method("GET"))
            .and(path("/xarici-dil.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/xarici-dil.json", server.uri())).unwrap();
        let bank = source.fetch().await.unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[1].correct, "A");
    }

    #[tokio::test]
    async fn not_found_is_http_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/missing.json", server.uri())).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn non_sequence_body_gives_empty_bank() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/odd.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"oops": true})),
            )
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/odd.json", server.uri())).unwrap();
        let bank = source.fetch().await.unwrap();
        assert!(bank.is_empty());
    }

    #[tokio::test]
    async fn html_error_page_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/page.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/page.json", server.uri())).unwrap();
        assert!(matches!(
            source.fetch().await.unwrap_err(),
            LoadError::Parse(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let source = HttpSource::new("http://127.0.0.1:9/bank.json").unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(err.is_transport());
    }
}
