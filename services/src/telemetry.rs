//! Tracing subscriber setup.
//!
//! Local runs print human-readable logs. Every other environment emits
//! Stackdriver JSON with Cloud Trace correlation, and incoming W3C
//! `traceparent` headers become the parent of each request span.

use crate::config::Config;
use anyhow::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::env;
use tracing_stackdriver::CloudTraceConfiguration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,filemanager_services=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    if config.is_local() {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("failed to install the local tracing subscriber")?;
        return Ok(());
    }

    let project_id = env::var("GOOGLE_CLOUD_PROJECT").with_context(|| {
        format!(
            "GOOGLE_CLOUD_PROJECT must be set for {} environment",
            config.environment()
        )
    })?;

    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let stackdriver_layer =
        tracing_stackdriver::layer().with_cloud_trace(CloudTraceConfiguration { project_id });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_opentelemetry::layer())
        .with(stackdriver_layer)
        .try_init()
        .context("failed to install the stackdriver tracing subscriber")?;

    Ok(())
}
