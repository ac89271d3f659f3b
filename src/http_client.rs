use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const BROWSER_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// GETs an HTML page; the whole request, body included, must finish
/// within `timeout`.
pub fn fetch_page(url: &str, timeout: Duration) -> Result<String> {
    let client = http_client()?;
    let resp = client
        .get(url)
        .header(USER_AGENT, BROWSER_UA)
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .timeout(timeout)
        .send()
        .with_context(|| format!("request to {url} failed"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http {} from {}", status, url));
    }
    resp.text().context("failed reading body")
}
