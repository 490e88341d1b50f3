use std::sync::LazyLock;
use std::time::Duration;

use super::user_agent::random_user_agent;

/// Process-wide HTTP client, built on first use.
///
/// Connection pooling, compression and HTTP/2 are shared by every outbound
/// call. Per-request timeouts can still be tightened with
/// `RequestBuilder::timeout`.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .http2_adaptive_window(true)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(random_user_agent())
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        let _ = &*HTTP_CLIENT;
    }
}
