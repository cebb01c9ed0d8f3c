use chrono::Utc;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::ProbeConfig;
use crate::error::ContractError;
use crate::report::{CheckOutcome, SuiteReport};
use crate::schema::{schema_for, PluginSchema, BUILTIN_SCHEMAS};
use crate::validator::ContractChecker;

/// Run the whole contract suite: /ping first, then each selected plugin's
/// sources endpoint. Strictly sequential (one unit completes or fails before
/// the next starts) and units are independent: a failure is recorded and the
/// suite moves on to the next endpoint.
pub async fn run_suite(config: &ProbeConfig, checker: &ContractChecker) -> SuiteReport {
    let schemas = selected_schemas(config);
    let started_at = Utc::now();
    let mut checks = Vec::with_capacity(schemas.len() + 1);

    checks.push(ping_check(config, checker).await);
    for schema in schemas {
        checks.push(sources_check(config, checker, schema).await);
    }

    SuiteReport::new(started_at, config.base_url.as_str(), checks)
}

/// Schemas selected by --plugin, or all builtin plugins when none given.
/// Unknown names were already rejected at startup.
pub fn selected_schemas(config: &ProbeConfig) -> Vec<&'static PluginSchema> {
    if config.plugins.is_empty() {
        BUILTIN_SCHEMAS.iter().collect()
    } else {
        config
            .plugins
            .iter()
            .filter_map(|name| schema_for(name))
            .collect()
    }
}

async fn ping_check(config: &ProbeConfig, checker: &ContractChecker) -> CheckOutcome {
    let started = Instant::now();
    let (result, attempts) = run_with_retries(config.retries, config.retry_delay_ms, || {
        async move { checker.ping().await.map(|()| None) }
    })
    .await;

    match &result {
        Ok(_) => info!(latency_ms = started.elapsed().as_millis() as u64, "Ping succeeded"),
        Err(e) => warn!(error = %e, "Ping failed"),
    }

    CheckOutcome::from_result("/ping".to_string(), None, result, attempts, started.elapsed())
}

async fn sources_check(
    config: &ProbeConfig,
    checker: &ContractChecker,
    schema: &'static PluginSchema,
) -> CheckOutcome {
    let path = schema.sources_path();
    let started = Instant::now();
    let (result, attempts) = run_with_retries(config.retries, config.retry_delay_ms, || {
        async move { checker.check_sources(schema).await.map(Some) }
    })
    .await;

    match &result {
        Ok(records) => info!(
            plugin = schema.plugin,
            records = records.unwrap_or(0),
            latency_ms = started.elapsed().as_millis() as u64,
            "Sources contract satisfied"
        ),
        Err(e) => warn!(plugin = schema.plugin, endpoint = %path, error = %e, "Sources contract violated"),
    }

    CheckOutcome::from_result(
        path,
        Some(schema.plugin.to_string()),
        result,
        attempts,
        started.elapsed(),
    )
}

/// Wrap one validation unit in a bounded fixed-delay retry. The default of
/// zero retries keeps a single failed attempt terminal; with retries the
/// failure surfaces only after attempts are exhausted.
async fn run_with_retries<F, Fut>(
    retries: u32,
    retry_delay_ms: u64,
    mut attempt_fn: F,
) -> (Result<Option<usize>, ContractError>, u32)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<usize>, ContractError>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt_fn().await {
            Ok(records) => return (Ok(records), attempts),
            Err(e) if attempts <= retries => {
                warn!(attempt = attempts, error = %e, "Check failed, retrying");
                sleep(Duration::from_millis(retry_delay_ms)).await;
            }
            Err(e) => return (Err(e), attempts),
        }
    }
}
