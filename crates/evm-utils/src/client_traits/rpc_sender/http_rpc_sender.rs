//! HTTP RPC sender implementation.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::{Duration, Instant},
};

use backon::{DefaultSleeper, Sleeper};
use reqwest::{header, StatusCode};

use crate::{error::RpcErrorObject, RpcRequest};

use super::{RpcSender, RpcTransportStats};

const TOO_MANY_REQUESTS_RETRIES: usize = 5;
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// HTTP RPC sender implementation.
pub struct HttpRpcSender {
    client: Arc<reqwest::Client>,
    url: String,
    request_id: AtomicU64,
    stats: RwLock<RpcTransportStats>,
    sleeper: DefaultSleeper,
}

impl std::fmt::Debug for HttpRpcSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRpcSender")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpRpcSender {
    /// Create an HTTP RPC sender with default reqwest client.
    pub fn new(url: impl ToString) -> Self {
        Self::new_with_client(url, Default::default())
    }

    /// Create an HTTP RPC sender.
    pub fn new_with_client(url: impl ToString, client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
            url: url.to_string(),
            request_id: AtomicU64::new(1),
            stats: Default::default(),
            sleeper: DefaultSleeper::default(),
        }
    }

    fn retry_after(response: &reqwest::Response) -> Duration {
        response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs < MAX_RETRY_AFTER_SECS)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_millis(500))
    }
}

struct StatsUpdater<'a> {
    stats: &'a RwLock<RpcTransportStats>,
    request_start_time: Instant,
    rate_limited_time: Duration,
}

impl<'a> StatsUpdater<'a> {
    fn new(stats: &'a RwLock<RpcTransportStats>) -> Self {
        Self {
            stats,
            request_start_time: Instant::now(),
            rate_limited_time: Duration::default(),
        }
    }

    fn add_rate_limited_time(&mut self, duration: Duration) {
        self.rate_limited_time += duration;
    }
}

impl Drop for StatsUpdater<'_> {
    fn drop(&mut self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.request_count += 1;
            stats.elapsed_time += self.request_start_time.elapsed();
            stats.rate_limited_time += self.rate_limited_time;
        }
    }
}

impl RpcSender for HttpRpcSender {
    async fn send(
        &self,
        request: RpcRequest,
        params: serde_json::Value,
    ) -> crate::Result<serde_json::Value> {
        let mut stats_updater = StatsUpdater::new(&self.stats);

        let request_id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let request_json = request.build_request_json(request_id, params).to_string();
        tracing::trace!(%request, request_id, "sending rpc request");

        let mut retries = TOO_MANY_REQUESTS_RETRIES;
        loop {
            let response = self
                .client
                .post(&self.url)
                .header(header::CONTENT_TYPE, "application/json")
                .body(request_json.clone())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                if status == StatusCode::TOO_MANY_REQUESTS && retries > 0 {
                    let duration = Self::retry_after(&response);
                    retries -= 1;
                    tracing::debug!(
                        %request,
                        retries,
                        "too many requests, pausing for {duration:?}"
                    );
                    self.sleeper.sleep(duration).await;
                    stats_updater.add_rate_limited_time(duration);
                    continue;
                }
                return Err(match response.error_for_status() {
                    Err(err) => err.into(),
                    Ok(_) => crate::Error::custom(format!("unexpected http status {status}")),
                });
            }

            let mut json = response.json::<serde_json::Value>().await?;
            if json["error"].is_object() {
                let object = serde_json::from_value::<RpcErrorObject>(json["error"].take())
                    .map_err(|err| {
                        crate::Error::custom(format!("failed to deserialize rpc error: {err}"))
                    })?;
                return Err(object.into());
            }
            return Ok(json["result"].take());
        }
    }

    fn get_transport_stats(&self) -> RpcTransportStats {
        self.stats
            .read()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn url(&self) -> String {
        self.url.clone()
    }
}
