use std::io;

use anyhow::Context;

use shopsim_cli::{ConsoleDecisions, ConsoleReport, RunConfig, ScriptedDecisions, SharedInput};
use shopsim_core::SeededSource;
use shopsim_engine::SimulationEngine;

fn main() -> anyhow::Result<()> {
    let config = RunConfig::from_env().context("invalid configuration")?;
    shopsim_observability::init(config.log_format);

    let seed = config.seed.unwrap_or_else(|| {
        let seed = SeededSource::from_entropy().seed();
        tracing::info!(seed, "SHOPSIM_SEED not set; drew a seed from entropy");
        seed
    });
    let engine = SimulationEngine::seeded(seed);
    tracing::info!(run_id = %engine.run_id(), seed, "starting shop simulation");

    println!("SHOP WITH CREDIT");

    let summary = match &config.decisions_path {
        Some(path) => {
            let mut plan = ScriptedDecisions::from_path(path)?;
            tracing::info!(path = %path.display(), days = plan.remaining(), "replaying decisions");
            let mut report = ConsoleReport::new(io::stdout());
            engine.run(&mut plan, &mut report)?
        }
        None => {
            let input = SharedInput::new(io::stdin().lock());
            let mut prompts = ConsoleDecisions::new(input.clone(), io::stdout());
            let report = ConsoleReport::new(io::stdout());
            if config.pause {
                engine.run(&mut prompts, &mut report.with_pause(input))?
            } else {
                let mut report = report;
                engine.run(&mut prompts, &mut report)?
            }
        }
    };

    tracing::debug!(totals = ?summary.totals, "run totals");
    Ok(())
}
