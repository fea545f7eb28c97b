use crate::cli::SelectArgs;
use crate::config::builder::build_config;
use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use examol::io::predictions::{Predictions, read_predictions_from_path};
use examol::io::selections::write_selections;
use examol::select::{RankingSelector, Selector};
use examol::store::database::MoleculeDatabase;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use tracing::{info, warn};

pub fn run(args: SelectArgs) -> Result<()> {
    info!("Building selection configuration...");
    let config = build_config(&args)?;

    let selections = execute(&config)?;

    let written = match &config.output_path {
        Some(path) => {
            let file = File::create(path)?;
            let written = write_selections(file, selections)?;
            eprintln!("Wrote {} selection(s) to {}", written, path.display());
            written
        }
        None => write_selections(std::io::stdout().lock(), selections)?,
    };

    if written == 0 {
        warn!("Selection round finished without selecting any candidate.");
    }
    Ok(())
}

/// Runs one selection round and returns the ranked `(key, score)` pairs.
fn execute(config: &AppConfig) -> Result<Vec<(String, f64)>> {
    info!("Loading predictions from {:?}", &config.predictions_path);
    let Predictions { keys, samples } = read_predictions_from_path(&config.predictions_path)
        .map_err(|e| CliError::parsing(&config.predictions_path, e))?;
    info!(
        "Loaded {} candidate(s) with samples shaped {:?}.",
        keys.len(),
        samples.shape()
    );

    let database = match &config.database_path {
        Some(path) => {
            info!("Loading molecule records from {:?}", path);
            MoleculeDatabase::from_csv_path(path).map_err(|e| CliError::parsing(path, e))?
        }
        None => MoleculeDatabase::new(),
    };

    if let Some(starter) = &config.starter {
        if starter.should_start(database.len()) {
            info!(
                "Database holds {} record(s), below the start threshold of {}. Selecting at random.",
                database.len(),
                starter.threshold
            );
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let chosen = starter.select(&keys, config.selection.to_select, &mut rng)?;
            return Ok(chosen.into_iter().map(|key| (key, f64::NAN)).collect());
        }
    }

    let mut selector = RankingSelector::<String, _>::from_config(&config.selection);
    if !config.recipes.is_empty() {
        if database.is_empty() {
            warn!("Recipes were given but no molecule records are available to learn from.");
        } else {
            selector.update(&database, &config.recipes)?;
        }
    }

    selector.add_possibilities(keys, samples.view().into_dyn())?;
    let selections: Vec<(String, f64)> = selector.dispense().collect();
    info!(
        "Dispensed {} of {} requested selection(s).",
        selections.len(),
        selector.to_select()
    );
    Ok(selections)
}
