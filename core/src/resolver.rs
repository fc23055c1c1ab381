//! Hostname resolution behind a narrow seam.
//!
//! The engine only needs "name in, addresses out"; tests substitute a
//! table-backed implementation so no real DNS traffic is involved.

use std::net::{IpAddr, ToSocketAddrs};

use anyhow::Context;

/// Turns a hostname into the addresses it currently resolves to.
///
/// Implementations may block; workers run on dedicated OS threads.
pub trait Resolve: Send + Sync {
    fn resolve(&self, name: &str) -> anyhow::Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system's stub resolver, the same
/// `getaddrinfo` path the rest of the host uses.
///
/// No deadline of its own is imposed; each lookup is bounded only by the
/// system resolver's configured timeouts.
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, name: &str) -> anyhow::Result<Vec<IpAddr>> {
        let addrs = (name, 0u16)
            .to_socket_addrs()
            .with_context(|| format!("looking up {name}"))?;

        let mut ips: Vec<IpAddr> = addrs.map(|sock| sock.ip()).collect();
        // getaddrinfo repeats an address per socket type on some platforms.
        ips.dedup();
        Ok(ips)
    }
}
