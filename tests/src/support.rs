use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use anyhow::bail;
use rangehound_common::network::range::RangeSet;
use rangehound_core::engine::MatchSink;
use rangehound_core::resolver::Resolve;

/// Resolver backed by a fixed table, so scenarios run without any real DNS
/// traffic. Names missing from the table fail to resolve, like NXDOMAIN.
pub struct TableResolver {
    table: HashMap<String, Vec<IpAddr>>,
}

impl TableResolver {
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        let table = entries
            .iter()
            .map(|(name, addrs)| {
                let addrs = addrs
                    .iter()
                    .map(|addr| addr.parse().expect("test table address"))
                    .collect();
                (name.to_string(), addrs)
            })
            .collect();
        Self { table }
    }
}

impl Resolve for TableResolver {
    fn resolve(&self, name: &str) -> anyhow::Result<Vec<IpAddr>> {
        match self.table.get(name) {
            Some(addrs) => Ok(addrs.clone()),
            None => bail!("no such host: {name}"),
        }
    }
}

/// Collects every reported match for later assertions.
#[derive(Default)]
pub struct MatchLog {
    names: Arc<Mutex<Vec<String>>>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sink(&self) -> MatchSink {
        let names = self.names.clone();
        Arc::new(move |name: &str| names.lock().unwrap().push(name.to_owned()))
    }

    /// Reported names in sorted order; report order is not deterministic
    /// across workers.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.names.lock().unwrap().clone();
        names.sort();
        names
    }

    pub fn count(&self) -> u64 {
        self.names.lock().unwrap().len() as u64
    }
}

pub fn range_set(lines: &str) -> RangeSet {
    let mut set = RangeSet::new();
    set.extend_from_lines(lines.as_bytes())
        .expect("in-memory range source");
    set
}
