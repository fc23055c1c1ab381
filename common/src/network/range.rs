//! # Network Range Model
//!
//! CIDR parsing and the immutable set of ranges the sweep consults.
//!
//! A [`RangeSet`] is built once during startup from one or more line-oriented
//! CIDR sources and then shared read-only across every worker, so lookups
//! need no synchronization.

use std::io::BufRead;
use std::net::IpAddr;

use ipnetwork::IpNetwork;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RangeParseError {
    #[error("invalid CIDR {line:?}: {source}")]
    InvalidCidr {
        line: String,
        source: ipnetwork::IpNetworkError,
    },
    #[error("invalid CIDR {line:?}: missing the /prefix part")]
    MissingPrefix { line: String },
}

/// Parses one line of CIDR text into a network, IPv4 or IPv6.
///
/// A bare address without a prefix length is rejected; range sources are
/// CIDR lists, not host lists.
pub fn parse_cidr(line: &str) -> Result<IpNetwork, RangeParseError> {
    let line = line.trim();
    if !line.contains('/') {
        return Err(RangeParseError::MissingPrefix {
            line: line.to_owned(),
        });
    }
    line.parse::<IpNetwork>()
        .map_err(|source| RangeParseError::InvalidCidr {
            line: line.to_owned(),
            source,
        })
}

/// The set of network ranges hostnames are tested against.
#[derive(Debug, Default, Clone)]
pub struct RangeSet {
    ranges: Vec<IpNetwork>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn add(&mut self, range: IpNetwork) {
        self.ranges.push(range);
    }

    /// Reads CIDR lines from `reader`, keeping the valid ones in source
    /// order.
    ///
    /// Malformed lines are logged and skipped rather than failing the whole
    /// build; only an I/O failure on the source itself is an error.
    pub fn extend_from_lines<R: BufRead>(&mut self, reader: R) -> std::io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            debug!("parsing CIDR {}", line.trim());
            match parse_cidr(&line) {
                Ok(range) => self.ranges.push(range),
                Err(e) => warn!("skipping range line: {e}"),
            }
        }
        Ok(())
    }

    /// Returns the first range containing `addr`, if any.
    ///
    /// A v4 address never matches a v6 range and vice versa.
    pub fn match_for(&self, addr: IpAddr) -> Option<&IpNetwork> {
        self.ranges.iter().find(|range| range.contains(addr))
    }

    pub fn contains(&self, addr: IpAddr) -> bool {
        self.match_for(addr).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpNetwork> {
        self.ranges.iter()
    }
}
