use curtain_core::{NetworkClient, NetworkRequest};
use curtain_gate::{initialize, page_load_channel};
use curtain_http::HttpClient;
use curtain_page::DocumentDisplay;
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HOST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Dashboard</title></head>
<body>
<main id="main-content"><h1>Dashboard</h1></main>
</body>
</html>"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let options = json!({ "graphicReference": "/static/spinner.gif" });
    let mut display = None;
    let (page_loaded, load_signal) = page_load_channel();

    let loader = initialize(
        Some(&options),
        |config| {
            let d = DocumentDisplay::from_html(HOST_PAGE, config)?;
            display = Some(d.clone());
            Ok(d)
        },
        HttpClient::new(),
        load_signal,
    )?;
    let display = display.expect("display built during initialize");
    let client = Arc::new(loader.client);

    // Two overlapping calls, issued from separate tasks the way page scripts would.
    let calls: Vec<_> = ["https://example.com/", "https://example.org/"]
        .into_iter()
        .map(|url| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.call(NetworkRequest::get(url)).await })
        })
        .collect();

    page_loaded.send(()).ok();
    loader.page_load.await?;
    println!("after load: {:?}", loader.gate.snapshot());

    for outcome in futures::future::join_all(calls).await {
        match outcome? {
            Ok(response) => println!("status {} ({} bytes)", response.status, response.body.len()),
            Err(err) => println!("call failed: {}", err),
        }
    }

    println!("settled: {:?}", loader.gate.snapshot());
    println!("{}", display.render());
    Ok(())
}
