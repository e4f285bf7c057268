//! # Commands
//!
//! One function per CLI subcommand. Output goes to the supplied writer,
//! diagnostics go through `tracing`.

use crate::cli::Command;
use crate::container::GateContainer;
use anyhow::{Context, Result};
use gmn_03_chain_reader::TransactionUpdate;
use gmn_04_token_gate::SignInError;
use gmn_05_content::ContentError;
use gmn_telemetry::{metric_inc, CONTENT_REQUESTS, SIGN_IN_ATTEMPTS, SIGN_IN_OUTCOMES};
use shared_types::Address;
use std::io::Write;
use tracing::warn;

/// Run `command` against the container.
pub async fn run(container: &GateContainer, command: &Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Network => network(container, out).await,
        Command::Account => account(container, out).await,
        Command::Verify => verify(container, out).await,
        Command::Posts { search, verify } => {
            posts(container, search.as_deref(), *verify, out).await
        }
        Command::Post { slug } => post(container, slug, out).await,
        Command::Mint { quantity, wait } => mint(container, *quantity, *wait, out).await,
    }
}

pub async fn network(container: &GateContainer, out: &mut dyn Write) -> Result<()> {
    let status = container
        .chain
        .network_status()
        .await
        .context("reading the node's chain id")?;
    writeln!(out, "{}: {}", container.network.name, status)?;
    Ok(())
}

pub async fn account(container: &GateContainer, out: &mut dyn Write) -> Result<()> {
    let address = container.connect_wallet().await?;
    let overview = container
        .chain
        .account_overview(address)
        .await
        .context("reading account overview")?;
    writeln!(out, "{overview}")?;
    Ok(())
}

pub async fn verify(container: &GateContainer, out: &mut dyn Write) -> Result<()> {
    container.connect_wallet().await?;
    let address = sign_in(container).await?;
    writeln!(out, "authorized: {address}")?;
    Ok(())
}

pub async fn posts(
    container: &GateContainer,
    search: Option<&str>,
    verify: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if verify {
        container.connect_wallet().await?;
        // A failed sign-in still shows the locked listing.
        if let Err(e) = sign_in(container).await {
            warn!(error = %e, "Listing without access");
        }
    }

    let entries = record_content("listing", container.content.listing(search).await)?;
    if entries.is_empty() {
        writeln!(out, "no posts")?;
    }
    for entry in entries {
        let author = entry.author.as_deref().unwrap_or("unknown");
        let link = entry.view_path.as_deref().unwrap_or("locked");
        writeln!(out, "{} by {} [{}]", entry.title, author, link)?;
    }
    Ok(())
}

pub async fn post(container: &GateContainer, slug: &str, out: &mut dyn Write) -> Result<()> {
    container.connect_wallet().await?;
    sign_in(container).await?;

    let post = record_content("post", container.content.open_post(slug).await)?;
    writeln!(out, "{}", post.title)?;
    if let Some(name) = &post.name {
        writeln!(out, "by {name}")?;
    }
    if let Some(url) = post.main_image.as_ref().and_then(|m| m.asset.as_ref()).map(|a| &a.url) {
        writeln!(out, "image: {url}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", post.body_text())?;
    Ok(())
}

pub async fn mint(
    container: &GateContainer,
    quantity: u64,
    wait: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let from = container.connect_wallet().await?;
    if !wait {
        let tx_hash = container
            .mint
            .mint(from, quantity)
            .await
            .context("submitting mint")?;
        writeln!(out, "submitted: {tx_hash}")?;
        write_tx_url(container, &tx_hash, out)?;
        return Ok(());
    }

    let mut lines = Vec::new();
    let terminal = container
        .mint
        .mint_and_wait(from, quantity, |update| lines.push(describe(update)))
        .await
        .context("minting")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    match terminal {
        TransactionUpdate::Failed { reason, .. } => anyhow::bail!("mint failed: {reason}"),
        TransactionUpdate::Confirmed { tx_hash, .. } | TransactionUpdate::Submitted { tx_hash } => {
            write_tx_url(container, &tx_hash, out)
        }
    }
}

async fn sign_in(container: &GateContainer) -> Result<Address, SignInError> {
    metric_inc!(SIGN_IN_ATTEMPTS);
    let result = container.gate.sign_in().await;
    let outcome = match &result {
        Ok(_) => "authorized",
        Err(e) => e.label(),
    };
    metric_inc!(SIGN_IN_OUTCOMES, &[outcome]);
    result
}

fn record_content<T>(kind: &str, result: Result<T, ContentError>) -> Result<T, ContentError> {
    let label = match &result {
        Ok(_) => "ok",
        Err(e) => e.label(),
    };
    metric_inc!(CONTENT_REQUESTS, &[kind, label]);
    result
}

fn describe(update: &TransactionUpdate) -> String {
    match update {
        TransactionUpdate::Submitted { tx_hash } => format!("submitted: {tx_hash}"),
        TransactionUpdate::Confirmed {
            tx_hash,
            block_number,
        } => format!("confirmed: {tx_hash} in block {block_number}"),
        TransactionUpdate::Failed { tx_hash, reason } => format!("failed: {tx_hash} ({reason})"),
    }
}

fn write_tx_url(container: &GateContainer, tx_hash: &str, out: &mut dyn Write) -> Result<()> {
    if let Some(url) = container.network.tx_url(tx_hash) {
        writeln!(out, "explorer: {url}")?;
    }
    Ok(())
}
