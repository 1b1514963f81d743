//! Command handlers for the CLI.
//!
//! These are called from `main` after config and the engine are established.
//! The engine itself never fails a query; the only errors here are JSON
//! serialization of the output.

use carefinder_core::{TriageRequest, TriageResult};
use carefinder_triage::TriageEngine;

pub(crate) async fn run_triage(
    engine: &TriageEngine,
    reason: String,
    location: String,
    services: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let request = TriageRequest::new(reason, location).with_services(services);
    let result = engine.run(&request).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_result(&result);
    Ok(())
}

pub(crate) async fn run_services(engine: &TriageEngine, json: bool) -> anyhow::Result<()> {
    let services = engine.available_services().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }

    if services.is_empty() {
        println!("No services advertised (catalog empty or unavailable).");
        return Ok(());
    }
    for service in services {
        println!("{service}");
    }
    Ok(())
}

fn print_result(result: &TriageResult) {
    if result.is_emergency {
        println!("EMERGENCY: {}", result.emergency_warning.as_deref().unwrap_or("call 911"));
        println!("Call 911 or go to the nearest emergency room now.");
        return;
    }

    if !result.detected_requirements.is_empty() {
        let names: Vec<&str> = result
            .detected_requirements
            .iter()
            .map(|r| r.as_str())
            .collect();
        println!("Detected requirements: {}", names.join(", "));
    }

    if result.facilities.is_empty() {
        println!("No matching facilities found.");
        return;
    }

    for facility in &result.facilities {
        let distance = facility
            .distance
            .map_or(String::new(), |d| format!(" ({d} mi)"));
        println!("{}{distance}", facility.name);
        if !facility.address_plain.is_empty() {
            println!("  {}", facility.address_plain);
        }
        println!("  {}", facility.open_status);
        if let Some(phone) = &facility.phone {
            println!("  {phone}");
        }
        if let Some(match_reason) = &facility.match_reason {
            println!("  Match: {match_reason}");
        }
    }
}
