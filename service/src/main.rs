use std::env;
use std::fs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod config;
mod error;
mod operations;

use config::Config;
use error::ServiceError;
use operations::{
    compose_and_schedule, plan_assignments, replan_route, ComposeAndScheduleRequest,
    PlanAssignmentsRequest, ReplanRequest,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warehouse_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let mut args = env::args().skip(1);
    let operation = args.next().ok_or_else(|| {
        anyhow::anyhow!("usage: warehouse-service <plan|schedule|replan> <scenario.json>")
    })?;
    let path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("missing scenario file path"))?;

    let raw = fs::read_to_string(&path)?;

    let output = match operation.as_str() {
        "plan" => {
            let request: PlanAssignmentsRequest = serde_json::from_str(&raw)?;
            let response = run(|| plan_assignments(&request, &config))?;
            serde_json::to_string_pretty(&response)?
        }
        "schedule" => {
            let request: ComposeAndScheduleRequest = serde_json::from_str(&raw)?;
            let response = run(|| compose_and_schedule(&request, &config))?;
            serde_json::to_string_pretty(&response)?
        }
        "replan" => {
            let request: ReplanRequest = serde_json::from_str(&raw)?;
            let response = run(|| replan_route(&request))?;
            serde_json::to_string_pretty(&response)?
        }
        other => anyhow::bail!("unknown operation '{other}': expected plan, schedule, or replan"),
    };

    println!("{output}");
    Ok(())
}

/// Runs an operation, logging and converting its `ServiceError` on failure.
fn run<T>(f: impl FnOnce() -> Result<T, ServiceError>) -> anyhow::Result<T> {
    f().map_err(ServiceError::log).map_err(anyhow::Error::from)
}
