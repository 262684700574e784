//! Replays canned play sessions through the director and prints each step.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin harness                 # all scenarios
//! cargo run --bin harness -- panic ending # selected scenarios
//! cargo run --bin harness -- --json       # machine-readable rows
//! ```

use anyhow::bail;
use anomaly_director::config::DirectorConfig;
use anomaly_director::director::scenarios::{self, run_scenario, TraceRow};

fn print_rows(name: &str, rows: &[TraceRow]) {
    println!("\n{} SCENARIO: {} {}", "=".repeat(10), name, "=".repeat(10));
    for row in rows {
        let obs = &row.observation;
        println!(
            "STEP {}: correct={} hesitation={}s repeats={}",
            row.step, obs.correct, obs.hesitation, obs.repetition
        );
        println!(
            "   [PROFILE]  logic {:.2} | trust {:.2} | adapt {:.2}",
            row.logic_confidence, row.trust_level, row.adaptability
        );
        println!(
            "   [DIRECTOR] {} {} (p={}) via {} | lie: {}",
            row.anomaly_level.as_str().to_uppercase(),
            row.anomaly_category,
            row.anomaly_probability,
            row.rule,
            row.lie_allowed
        );
        println!("{}", "-".repeat(40));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut json = false;
    let mut names = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            other => names.push(other.to_string()),
        }
    }

    let selected = if names.is_empty() {
        scenarios::all()
    } else {
        let mut selected = Vec::with_capacity(names.len());
        for name in &names {
            match scenarios::by_name(name) {
                Some(scenario) => selected.push(scenario),
                None => bail!("unknown scenario '{}'", name),
            }
        }
        selected
    };

    let director = DirectorConfig::load()?.build_director();
    for scenario in &selected {
        let rows = run_scenario(&director, scenario);
        if json {
            println!(
                "{}",
                serde_json::json!({ "scenario": scenario.name, "rows": rows })
            );
        } else {
            print_rows(scenario.name, &rows);
        }
    }
    Ok(())
}
