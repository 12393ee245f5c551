use crate::config::SendingConfig;
use crate::error::SendError;
use crate::security::{is_private_host, is_private_ip};
use async_trait::async_trait;
use reqwest::redirect;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Form field appended to every protocol POST so endpoints can allow-list
/// or rate-limit by sender implementation.
const IDENTITY_PARAM: (&str, &str) = ("source_is_outmention", "true");

/// Resolves an endpoint host to the addresses a connection would reach.
///
/// Seam for the rebinding defense: every address returned here is checked
/// against reserved ranges before the request goes out.
#[async_trait]
trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str, port: u16) -> std::io::Result<Vec<IpAddr>>;
}

struct DnsResolver;

#[async_trait]
impl HostResolver for DnsResolver {
    async fn resolve(&self, host: &str, port: u16) -> std::io::Result<Vec<IpAddr>> {
        Ok(tokio::net::lookup_host(format!("{host}:{port}"))
            .await?
            .map(|addr| addr.ip())
            .collect())
    }
}

/// The three URLs needed for one protocol exchange. Transient, not persisted.
#[derive(Debug, Clone)]
pub struct OutboundNotification {
    pub source: Url,
    pub target: Url,
    pub endpoint: Url,
}

/// Performs the webmention POST after validating the endpoint against
/// private/reserved address ranges.
///
/// Redirects are never followed: a redirect could point the validated
/// request back into a private range, and bounded re-validated redirect
/// support has not been decided on yet.
pub struct SafeHttpSender {
    client: reqwest::Client,
    resolver: Arc<dyn HostResolver>,
    allow_private_endpoints: bool,
}

impl SafeHttpSender {
    pub fn new(config: &SendingConfig) -> anyhow::Result<Self> {
        Self::with_resolver(config, Arc::new(DnsResolver))
    }

    fn with_resolver(
        config: &SendingConfig,
        resolver: Arc<dyn HostResolver>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            resolver,
            allow_private_endpoints: config.allow_private_endpoints,
        })
    }

    /// Notify one endpoint that `source` links to `target`.
    ///
    /// The endpoint host is resolved and every address checked against
    /// reserved ranges *before* any byte goes out, so a name that points at
    /// a private range (directly or via DNS) never produces a request.
    /// 2xx is success; anything else is a classified failure.
    pub async fn send(&self, notification: &OutboundNotification) -> Result<(), SendError> {
        let endpoint = &notification.endpoint;
        let host = endpoint.host_str().ok_or(SendError::MissingHost)?;

        if !self.allow_private_endpoints {
            self.check_endpoint_addresses(endpoint, host).await?;
        }

        let form = [
            ("source", notification.source.as_str()),
            ("target", notification.target.as_str()),
            IDENTITY_PARAM,
        ];

        let response = self
            .client
            .post(endpoint.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| SendError::Network {
                cause: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                target = %notification.target,
                endpoint = %endpoint,
                status = %status,
                "webmention sent"
            );
            Ok(())
        } else {
            Err(SendError::Protocol { status })
        }
    }

    /// Literal check first, then DNS resolution; every resolved address must
    /// be public (rebinding defense).
    async fn check_endpoint_addresses(&self, endpoint: &Url, host: &str) -> Result<(), SendError> {
        if is_private_host(host) {
            let address = host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse()
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
            tracing::warn!(host, %address, "blocked webmention to private endpoint");
            return Err(SendError::Security {
                host: host.to_string(),
                address,
            });
        }

        let port = endpoint.port_or_known_default().unwrap_or(443);
        let addrs = self
            .resolver
            .resolve(host, port)
            .await
            .map_err(|e| SendError::Network {
                cause: e.to_string(),
            })?;
        for addr in addrs {
            if is_private_ip(&addr) {
                tracing::warn!(host, address = %addr, "blocked webmention to private endpoint");
                return Err(SendError::Security {
                    host: host.to_string(),
                    address: addr,
                });
            }
        }
        Ok(())
    }
}
