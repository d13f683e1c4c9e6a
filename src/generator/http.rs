use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{GenerationFailed, GenerationParameters, Generator};

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Generator backed by the question API over HTTP.
pub struct HttpGenerator {
    http: Client,
    base: String,
}

impl HttpGenerator {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base, route.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl Generator for HttpGenerator {
    async fn generate(
        &self,
        route: &str,
        params: &GenerationParameters,
    ) -> Result<Value, GenerationFailed> {
        let url = self.url(route);
        debug!("POST {} {:?}", url, params);

        let resp = self.http.post(&url).json(params).send().await.map_err(|e| {
            warn!("could not reach generator at {}: {}", url, e);
            GenerationFailed::new(None)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            warn!("generator {} answered {} ({:?})", url, status, message);
            return Err(GenerationFailed::new(message));
        }

        resp.json::<Value>().await.map_err(|e| {
            warn!("generator {} sent an unreadable body: {}", url, e);
            GenerationFailed::new(None)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_route() {
        let g = HttpGenerator::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(g.url("/grc/generate_question"), "http://localhost:5000/api/grc/generate_question");
        assert_eq!(g.url("scenario/generate_scenario"), "http://localhost:5000/api/scenario/generate_scenario");
    }
}
