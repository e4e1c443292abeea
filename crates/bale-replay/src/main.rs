use std::path::PathBuf;

use tokio::io::{AsyncWriteExt, BufReader};

use bale_core::config::Config;
use bale_replay::{replay, DryRunClient};

/// Replay NDJSON update payloads (from a file argument or stdin) against a
/// dry-run client and print the requests it would have sent.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bale_core::logging::init("bale_replay")?;

    let cfg = Config::load()?;
    tracing::info!(api = %cfg.api_base_url, token = %cfg.masked_token(), "starting dry run");
    let client = DryRunClient::new(cfg);

    let summary = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let file = tokio::fs::File::open(&path).await?;
            replay(BufReader::new(file), &client).await?
        }
        None => replay(BufReader::new(tokio::io::stdin()), &client).await?,
    };

    let mut out = tokio::io::stdout();
    for req in client.requests() {
        let line = serde_json::to_string(&req.to_json())?;
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;

    tracing::info!(
        messages = summary.messages,
        callback_queries = summary.callback_queries,
        unknown = summary.unknown,
        skipped = summary.skipped,
        replies = summary.replies,
        "replay finished"
    );
    Ok(())
}
