//! Network reachability probe.
//!
//! One short TCP connect decides online vs offline for the current request.
//! Public DNS resolvers are the targets: highly available and reachable even
//! when HTTP egress is filtered.

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

const PROBE_HOSTS: &[&str] = &["8.8.8.8:53", "1.1.1.1:53"];

/// Reachability seam so the orchestrator can be tested without a network.
#[async_trait]
pub trait Reachability: Send + Sync {
    async fn is_online(&self, budget: Duration) -> bool;
}

/// Probe backed by real TCP connects.
#[derive(Debug, Default)]
pub struct NetworkChecker;

impl NetworkChecker {
    pub fn new() -> Self {
        Self
    }

    /// Try the probe hosts within one shared budget. Any failure or timeout
    /// collapses to `false`; the caller never blocks past `budget` in total.
    pub async fn check(&self, budget: Duration) -> bool {
        Self::check_hosts(PROBE_HOSTS.iter().copied(), budget).await
    }

    async fn check_hosts<'a>(
        hosts: impl Iterator<Item = &'a str> + Send,
        budget: Duration,
    ) -> bool {
        let attempt = async move {
            for host in hosts {
                match TcpStream::connect(host).await {
                    Ok(_) => {
                        tracing::debug!("probe reached {}", host);
                        return true;
                    }
                    Err(e) => tracing::debug!("probe to {} failed: {}", host, e),
                }
            }
            false
        };
        match timeout(budget, attempt).await {
            Ok(online) => online,
            Err(_) => {
                tracing::debug!("probe timed out");
                false
            }
        }
    }
}

#[async_trait]
impl Reachability for NetworkChecker {
    async fn is_online(&self, budget: Duration) -> bool {
        self.check(budget).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_false() {
        // TEST-NET-1 address: never routable, so connect fails or times out.
        let online =
            NetworkChecker::check_hosts(["192.0.2.1:9"].into_iter(), Duration::from_millis(300))
                .await;
        assert!(!online);
    }

    #[tokio::test]
    async fn test_local_listener_is_reachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let online =
            NetworkChecker::check_hosts([addr.as_str()].into_iter(), Duration::from_secs(1)).await;
        assert!(online);
    }

    #[tokio::test]
    async fn test_bad_address_is_false() {
        let online =
            NetworkChecker::check_hosts(["not-a-host"].into_iter(), Duration::from_millis(300))
                .await;
        assert!(!online);
    }

    #[tokio::test]
    async fn test_budget_is_shared_across_hosts() {
        // Two dead hosts must not each get their own timeout window.
        let budget = Duration::from_millis(300);
        let start = std::time::Instant::now();
        let _ = NetworkChecker::check_hosts(
            ["192.0.2.1:9", "192.0.2.2:9"].into_iter(),
            budget,
        )
        .await;
        assert!(
            start.elapsed() < budget * 2,
            "check took {:?}, longer than one budget allows",
            start.elapsed()
        );
    }
}
