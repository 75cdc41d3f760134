//! RBAC admin console
//!
//! Builds every service over in-memory stores, optionally seeds them from a
//! JSON file and prints a JSON report of what each `list` call returns.

use std::collections::BTreeMap;

use anyhow::Context;
use rbac_core::config::AppConfig;
use rbac_core::traits::Entity;
use rbac_services::{CrudService, EntityDefinition, Services};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod seed;

use seed::{SeedData, SeedOutcome};

#[derive(Debug, Serialize)]
struct Report {
    version: &'static str,
    seed_file: Option<String>,
    seeded: BTreeMap<&'static str, SeedOutcome>,
    visible: BTreeMap<&'static str, VisibleRows>,
}

#[derive(Debug, Serialize)]
struct VisibleRows {
    filter: rbac_core::policy::ListFilter,
    count: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config(std::env::var("RBAC_CONFIG").ok())?;

    init_tracing(&config);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        overrides = config.policies.len(),
        "Starting RBAC admin console"
    );

    let services = Services::in_memory(&config)?;

    let seeded = match config.seed.file.as_deref() {
        Some(path) => {
            let data = SeedData::from_file(path)?;
            seed::apply(&services, data).await
        }
        None => {
            warn!("No seed file configured (RBAC_SEED_FILE); stores start empty");
            BTreeMap::new()
        }
    };

    let report = Report {
        version: env!("CARGO_PKG_VERSION"),
        seed_file: config.seed.file.clone(),
        seeded,
        visible: visible_rows(&services).await?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Config from the file at `path`, or from the environment alone
fn load_config(path: Option<String>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load(&path)
            .with_context(|| format!("loading config file {}", path))?,
        None => AppConfig::from_env().context("loading config from environment")?,
    };
    Ok(config)
}

/// Initialize tracing/logging
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.as_str().into());

    // logs go to stderr so the report on stdout stays machine-readable
    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn count<D: EntityDefinition>(
    service: &CrudService<D>,
    out: &mut BTreeMap<&'static str, VisibleRows>,
) -> anyhow::Result<()> {
    let rows = service.list().await?;
    out.insert(
        <D::Entity as Entity>::TYPE_NAME,
        VisibleRows {
            filter: service.list_filter(),
            count: rows.len(),
        },
    );
    Ok(())
}

async fn visible_rows(services: &Services) -> anyhow::Result<BTreeMap<&'static str, VisibleRows>> {
    let mut out = BTreeMap::new();
    count(&services.persons, &mut out).await?;
    count(&*services.users, &mut out).await?;
    count(&services.roles, &mut out).await?;
    count(&services.permissions, &mut out).await?;
    count(&services.forms, &mut out).await?;
    count(&services.modules, &mut out).await?;
    count(&*services.module_forms, &mut out).await?;
    count(&*services.role_users, &mut out).await?;
    count(&*services.role_form_permissions, &mut out).await?;
    count(&*services.state_infractions, &mut out).await?;
    count(&services.type_infractions, &mut out).await?;
    count(&*services.information_infractions, &mut out).await?;
    count(&services.type_payments, &mut out).await?;
    count(&*services.bills, &mut out).await?;
    count(&services.payment_histories, &mut out).await?;
    count(&services.payment_users, &mut out).await?;
    count(&services.payment_agreements, &mut out).await?;
    count(&*services.user_notifications, &mut out).await?;
    count(&*services.access_logs, &mut out).await?;
    Ok(out)
}
