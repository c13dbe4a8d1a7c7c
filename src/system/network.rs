use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use async_trait::async_trait;
use reqwest::Client;
use tokio::net::UdpSocket;

use super::NetworkIdentity;
use crate::core::config;
use crate::core::SystemError;

/// Network identity lookups: an HTTPS echo service for the public address and
/// the routing table for the local one.
#[derive(Debug, Clone)]
pub struct OsNetwork {
    client: Client,
    public_ip_url: String,
}

impl OsNetwork {
    pub fn new(client: Client, public_ip_url: impl Into<String>) -> Self {
        Self {
            client,
            public_ip_url: public_ip_url.into(),
        }
    }

    /// Client with the configured request timeout and echo endpoint.
    pub fn from_config() -> Result<Self, SystemError> {
        let client = Client::builder().timeout(config::network::timeout()).build()?;
        Ok(Self::new(client, config::PUBLIC_IP_URL.as_str()))
    }
}

/// Parses the echo service's plain-text body.
fn parse_address(body: &str) -> Result<IpAddr, SystemError> {
    let trimmed = body.trim();
    trimmed
        .parse()
        .map_err(|_| SystemError::InvalidAddress(trimmed.chars().take(64).collect()))
}

#[async_trait]
impl NetworkIdentity for OsNetwork {
    async fn resolve_public_address(&self) -> Result<IpAddr, SystemError> {
        let response = self.client.get(&self.public_ip_url).send().await?;
        if !response.status().is_success() {
            return Err(SystemError::HttpStatus(response.status()));
        }
        parse_address(&response.text().await?)
    }

    /// Source address the OS would use for an outbound route. Connecting a UDP
    /// socket only selects the route; no packet leaves the host.
    async fn resolve_local_address(&self) -> Result<IpAddr, SystemError> {
        let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))).await?;
        socket.connect(config::network::ROUTE_PROBE_ADDR).await?;
        let local = socket.local_addr()?.ip();
        if local.is_unspecified() {
            return Err(SystemError::Unavailable("local address"));
        }
        Ok(local)
    }
}
