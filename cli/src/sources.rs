//! Acquisition of CIDR text from file or HTTP(S) sources.
//!
//! Failures here are startup errors: the sweep never begins with a partial
//! range set.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use tracing::info;
use url::Url;

/// Fetches the full body of one range source as text.
///
/// `file://` URLs and plain paths read from disk; `http://` and `https://`
/// fetch over the network. Anything else is rejected.
pub async fn fetch(source: &str) -> anyhow::Result<String> {
    let url = match Url::parse(source) {
        Ok(url) => url,
        // A bare path like "ranges.txt" is not a URL; read it directly.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            info!("reading CIDRs from {source}");
            return read_file(Path::new(source));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("parsing range source {source:?}"));
        }
    };

    info!("reading CIDRs from {url}");
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| anyhow::anyhow!("{url} is not a usable file path"))?;
            read_file(&path)
        }
        "http" | "https" => fetch_http(url).await,
        other => bail!("unsupported range source scheme {other:?} in {url}"),
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading CIDRs from {}", path.display()))
}

async fn fetch_http(url: Url) -> anyhow::Result<String> {
    let response = reqwest::get(url.clone())
        .await
        .with_context(|| format!("fetching CIDRs from {url}"))?;

    if !response.status().is_success() {
        bail!(
            "fetching CIDRs from {url}: server answered {}",
            response.status()
        );
    }

    response
        .text()
        .await
        .with_context(|| format!("reading CIDR body from {url}"))
}
