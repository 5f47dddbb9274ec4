use chromiumoxide::browser::{Browser, BrowserConfig};
use curtain_core::{LoaderConfig, NetworkClient, NetworkRequest};
use curtain_gate::{page_load_channel, start};
use curtain_http::HttpClient;
use futures::StreamExt;
use serde_json::json;
use tokio::time::{Duration, sleep};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let browser_config = BrowserConfig::builder()
        .with_head()
        .build()
        .map_err(anyhow::Error::msg)?;
    let (browser, mut handler) = Browser::launch(browser_config).await?;
    tokio::spawn(async move { while handler.next().await.is_some() {} });

    let page = browser
        .new_page("data:text/html,<html><head></head><body><main id='main-content'>Hello</main></body></html>")
        .await?;

    // Mounting is async, so resolve the options here and hand the same
    // config to the gate.
    let options = json!({ "graphicPath": "https://i.imgur.com/llF5iyg.gif" });
    let config = LoaderConfig::from_options(Some(&options));
    let (display, _driver) = curtain_page::attach(&page, &config).await?;

    let (page_loaded, load_signal) = page_load_channel();
    let loader = start(config, display, HttpClient::new(), load_signal)?;

    page.wait_for_navigation().await?;
    page_loaded.send(()).ok();

    let response = loader.client.call(NetworkRequest::get("https://example.com/")).await?;
    println!("status {}", response.status);

    sleep(Duration::from_secs(3)).await;
    println!("{:?}", loader.gate.snapshot());
    Ok(())
}
