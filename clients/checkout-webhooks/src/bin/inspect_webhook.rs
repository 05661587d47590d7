//! Decode stored webhook deliveries and print their canonical encoding.
//!
//! Usage: `inspect_webhook <file>...`

use anyhow::{bail, Context};
use checkout_webhooks::WebhookCodec;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: inspect_webhook <file>...");
    }

    let codec = WebhookCodec::from_env().context("Invalid webhook configuration")?;
    let mut stdout = std::io::stdout().lock();
    let mut rejected = 0usize;

    for path in &paths {
        let body = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;

        match codec.decode(&body) {
            Ok(envelope) => {
                tracing::info!(
                    file = %path,
                    id = %envelope.id,
                    event = %envelope.kind(),
                    "Accepted"
                );
                let canonical = codec
                    .encode(&envelope)
                    .with_context(|| format!("Failed to re-encode {}", path))?;
                stdout.write_all(&canonical)?;
                stdout.write_all(b"\n")?;
            }
            Err(e) => {
                tracing::error!(file = %path, kind = ?e.kind(), "Rejected: {}", e);
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        bail!("{} of {} deliveries rejected", rejected, paths.len());
    }

    Ok(())
}
