// UI layer: a small read-eval-print loop over `dialoguer` prompts.
// Every command error is printed and swallowed here; only a broken
// terminal ends the session early.

use crate::api::ApiClient;
use crate::models::{DemographicCreateRequest, InterpretationOptions};
use anyhow::{Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Main interactive loop. Reads one command word per iteration and
/// dispatches; unknown input is a no-op. `quit` (or `q`) exits.
pub fn repl(api: &ApiClient) -> Result<()> {
    loop {
        let cmd: String = Input::new()
            .with_prompt("next command: openarray | demo | report | quit")
            .interact_text()?;
        let outcome = match cmd.trim().to_lowercase().as_str() {
            "openarray" => handle_openarray(api),
            "demo" => handle_demo(api),
            "report" => handle_report(api),
            "q" | "quit" => break,
            _ => continue,
        };
        // a failed command never ends the session
        if let Err(e) = outcome {
            println!("command failed: {e:#}");
        }
    }
    Ok(())
}

/// Prompt for an OpenArray file path and upload it.
fn handle_openarray(api: &ApiClient) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Enter path to an OpenArray file")
        .interact_text()?;
    let pb = PathBuf::from(path.trim());

    let spinner = spinner("Uploading...");
    let result = api.upload_open_array(&pb);
    spinner.finish_and_clear();

    let batch = result?;
    println!("openarray upload response: {batch}");
    println!("sample names: {:?}", batch.sample_names);
    Ok(())
}

/// Prompt for a demographic JSON file, decode it locally, post it.
fn handle_demo(api: &ApiClient) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Enter path to a demographic (JSON) file")
        .interact_text()?;
    let text = std::fs::read_to_string(path.trim())
        .with_context(|| format!("reading {}", path.trim()))?;
    let demo: DemographicCreateRequest =
        serde_json::from_str(&text).context("decoding demographic JSON")?;
    println!("read: {}", serde_json::to_string(&demo)?);

    let spinner = spinner("Posting demographics...");
    let result = api.post_demographics(&demo);
    spinner.finish_and_clear();

    println!("demographic response: {}", result?);
    Ok(())
}

/// Prompt for a batch id and sample name, then trigger report
/// generation with default options.
fn handle_report(api: &ApiClient) -> Result<()> {
    let batch: String = Input::new()
        .with_prompt("Batch id (UUID)")
        .interact_text()?;
    let batch_id = Uuid::parse_str(batch.trim()).context("parsing batch id")?;
    let sample: String = Input::new().with_prompt("Sample name").interact_text()?;

    let spinner = spinner("Generating report...");
    let result = api.create_interpretation(batch_id, sample.trim(), &InterpretationOptions::default());
    spinner.finish_and_clear();

    result?;
    println!("report generation accepted for {}", sample.trim());
    Ok(())
}

fn spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
