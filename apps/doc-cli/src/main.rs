//! # render-doc
//!
//! Renders invoice and receipt PDFs from order snapshots, and quotes carts.
//!
//! ## Usage
//! ```bash
//! # A4 invoice, written to TT-2026-AB12CD.pdf
//! cargo run -p titiktemu-doc-cli -- invoice order.json
//!
//! # 58mm receipt to an explicit path
//! cargo run -p titiktemu-doc-cli -- receipt order.json --out struk.pdf
//!
//! # Checkout quote as JSON
//! cargo run -p titiktemu-doc-cli -- quote checkout.json
//! ```
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► AppConfig::load ──► read order.json ──► OrderSnapshot::check │
//! │                                                        │                │
//! │            BrandMark::load(logo_path) ──► RenderContext │                │
//! │                                                 ▼       ▼                │
//! │                                  render_invoice / render_receipt        │
//! │                                                 │                        │
//! │                                                 ▼                        │
//! │                                    --out or suggested filename           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Log level comes from `RUST_LOG` (default `info`). Logs go to stderr so
//! `quote` output can be piped.

mod args;
mod config;
mod error;
mod snapshot;

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use titiktemu_core::checkout::generate_invoice_number;
use titiktemu_core::quote_checkout;
use titiktemu_docs::{
    render_invoice, render_receipt, verification_url, BrandMark, RenderContext, RenderedDocument,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::args::{parse_args, Action, Command, USAGE};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::snapshot::{read_json, CheckoutRequest, OrderSnapshot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let (action, input, out, config_path) = match command {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Run {
            action,
            input,
            out,
            config,
        } => (action, input, out, config),
    };

    let config = AppConfig::load(config_path.as_deref())?;
    info!(
        brand = %config.settings.brand_name,
        logo = %config.logo_path.display(),
        "Configuration loaded"
    );

    match action {
        Action::Quote => quote(&input).await?,
        Action::Invoice | Action::Receipt => {
            let written = render(action, &input, out, &config).await?;
            println!("{}", written.display());
        }
    }

    Ok(())
}

async fn render(
    action: Action,
    input: &Path,
    out: Option<PathBuf>,
    config: &AppConfig,
) -> AppResult<PathBuf> {
    let snapshot: OrderSnapshot = read_json(input).await?;
    snapshot.check()?;

    let brand_mark = BrandMark::load(&config.logo_path).await;
    if brand_mark.is_none() {
        warn!(
            path = %config.logo_path.display(),
            "No brand mark, printing initials instead"
        );
    }
    let ctx = RenderContext::new(config.settings.clone(), brand_mark);

    let target = verification_url(&config.base_url(), &snapshot.order.id);
    let document: RenderedDocument = match action {
        Action::Receipt => render_receipt(&snapshot.order, &snapshot.items, &target, &ctx)?,
        _ => render_invoice(&snapshot.order, &snapshot.items, &target, &ctx)?,
    };

    let path = out.unwrap_or_else(|| PathBuf::from(&document.filename));
    tokio::fs::write(&path, &document.bytes)
        .await
        .map_err(|source| AppError::Io {
            path: path.clone(),
            source,
        })?;

    info!(
        kind = document.kind.as_str(),
        order_id = %snapshot.order.id,
        path = %path.display(),
        size = document.bytes.len(),
        "Document written"
    );

    Ok(path)
}

async fn quote(input: &Path) -> AppResult<()> {
    let request: CheckoutRequest = read_json(input).await?;
    let now = Utc::now();

    let quote = quote_checkout(&request.lines, request.coupon.as_ref(), now)?;
    if request.coupon.is_some() && quote.coupon_code.is_none() {
        warn!("Coupon not eligible, quoting without discount");
    }

    let output = serde_json::json!({
        "quote": quote,
        "invoice_number": generate_invoice_number(now.year(), Uuid::new_v4()),
    });
    let rendered = serde_json::to_string_pretty(&output).map_err(|source| AppError::Json {
        path: input.to_path_buf(),
        source,
    })?;
    println!("{}", rendered);

    Ok(())
}
