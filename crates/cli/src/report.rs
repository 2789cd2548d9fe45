//! `meterlink report`

use std::sync::Arc;

use anyhow::Context;
use meterlink_core::ReportOptions;
use meterlink_domain::{ApiResult, ReporterConfig, UsageError, UsageItem};
use meterlink_infra::{
    config, usage_service, ChainedCredentialsSupplier, EnvCredentialsSupplier,
    InMemoryCredentialsSupplier,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::args::ReportArgs;

/// Exit status for a submission whose idempotency key was already consumed;
/// schedulers treat it as done.
pub const DUPLICATE_EXIT_STATUS: u8 = 3;

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsFile {
    Many(Vec<UsageItem>),
    One(UsageItem),
}

/// Parse an items file: a single usage item object or an array of them.
pub fn parse_items(contents: &str) -> anyhow::Result<Vec<UsageItem>> {
    let parsed: ItemsFile = serde_json::from_str(contents)
        .context("Items file must hold a usage item or an array of usage items")?;

    Ok(match parsed {
        ItemsFile::Many(items) => items,
        ItemsFile::One(item) => vec![item],
    })
}

/// Load config, read the items file and report it once.
///
/// With `--retryable`, failed outcomes come back as `UsageError`s inside the
/// `anyhow::Error`; otherwise they are returned as an unsuccessful
/// [`ApiResult`].
pub async fn run_report(args: &ReportArgs) -> anyhow::Result<ApiResult> {
    let config = resolve_config(args)?;

    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read items file {}", args.file.display()))?;
    let items = parse_items(&contents)?;

    let credentials = ChainedCredentialsSupplier::new()
        .then(Arc::new(InMemoryCredentialsSupplier::from_config(&config)))
        .then(Arc::new(EnvCredentialsSupplier::new()));
    let service = usage_service(&config, Arc::new(credentials))?;

    let options = report_options(args, &config.base_url, items);
    info!(items = options.items.len(), billable = options.billable, "Reporting usage");

    let result = if args.retryable {
        service.retryable_report_usage(options).await?
    } else {
        service.report_usage(options).await?
    };
    Ok(result)
}

/// Process exit status for a failed run.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<UsageError>() {
        Some(UsageError::DuplicateSubmission { .. }) => DUPLICATE_EXIT_STATUS,
        _ => 1,
    }
}

fn resolve_config(args: &ReportArgs) -> anyhow::Result<ReporterConfig> {
    let mut config = match (&args.config, &args.base_url) {
        (Some(path), _) => config::load_from_file(Some(path.clone()))?,
        (None, None) => config::load()?,
        // An explicit base URL is enough to run without a config file.
        (None, Some(_)) => config::load().unwrap_or_else(|err| {
            debug!(error = %err, "No configuration found, using defaults");
            ReporterConfig::default()
        }),
    };

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

fn report_options(args: &ReportArgs, base_url: &str, items: Vec<UsageItem>) -> ReportOptions {
    let mut options = ReportOptions::batch(base_url, args.secret_key.clone(), items, args.billable);
    options.idempotency_key = args.idempotency_key.clone();
    options.secret = args.secret.clone();
    options.source_type = args.source_type.clone();
    options
}
