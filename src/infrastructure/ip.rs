use crate::domain::ports::IpResolver;
use std::net::IpAddr;

/// Always answers with the address it was built with.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticIpResolver {
    ip: Option<IpAddr>,
}

impl StaticIpResolver {
    pub fn new(ip: Option<IpAddr>) -> Self {
        Self { ip }
    }
}

impl IpResolver for StaticIpResolver {
    fn resolve(&self) -> Option<IpAddr> {
        self.ip
    }
}

/// Resolves the payer's address from proxy headers as exposed by a CGI-style
/// environment: the first `X-Forwarded-For` entry, then `REMOTE_ADDR`.
#[derive(Debug, Clone, Default)]
pub struct ForwardedIpResolver {
    forwarded_for: Option<String>,
    remote_addr: Option<String>,
}

impl ForwardedIpResolver {
    pub fn new(forwarded_for: Option<String>, remote_addr: Option<String>) -> Self {
        Self {
            forwarded_for,
            remote_addr,
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            std::env::var("HTTP_X_FORWARDED_FOR").ok(),
            std::env::var("REMOTE_ADDR").ok(),
        )
    }
}

impl IpResolver for ForwardedIpResolver {
    fn resolve(&self) -> Option<IpAddr> {
        let forwarded = self
            .forwarded_for
            .as_deref()
            .and_then(|header| header.split(',').next())
            .and_then(|first| first.trim().parse().ok());

        forwarded.or_else(|| {
            self.remote_addr
                .as_deref()
                .and_then(|addr| addr.trim().parse().ok())
        })
    }
}
