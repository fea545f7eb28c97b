use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FilePolicyConfig};
use super::models::AppConfig;
use crate::cli::{PolicyKind, SelectArgs};
use crate::error::Result;
use examol::select::Maximize;
use examol::select::config::{PolicyConfig, SelectionConfigBuilder};
use examol::start::RandomStarter;
use examol::store::recipe::SimpleRecipe;
use tracing::debug;

pub fn build_config(args: &SelectArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let to_select = args
        .to_select
        .or(file_config.to_select)
        .unwrap_or(defaults.to_select);

    let maximize = match (args.direction.maximize, args.direction.minimize) {
        (true, false) => Maximize::All(true),
        (false, true) => Maximize::All(false),
        _ => file_config
            .maximize
            .clone()
            .map(Maximize::from)
            .unwrap_or(Maximize::All(defaults.maximize)),
    };

    let policy = resolve_policy(args, file_config.policy.as_ref(), &defaults);
    debug!("Resolved scoring policy: {:?}", policy);

    let selection = SelectionConfigBuilder::new()
        .to_select(to_select)
        .maximize(maximize)
        .policy(policy)
        .build()?;

    let recipes: Vec<SimpleRecipe> = if args.recipes.is_empty() {
        file_config
            .recipes
            .into_iter()
            .map(SimpleRecipe::from)
            .collect()
    } else {
        args.recipes.clone()
    };

    let starter = if args.no_cold_start {
        None
    } else {
        file_config.start.map(RandomStarter::from)
    };

    Ok(AppConfig {
        predictions_path: args.predictions.clone(),
        output_path: args.output.clone(),
        database_path: args.database.clone(),
        recipes,
        selection,
        starter,
        seed: args.seed.or(file_config.seed),
    })
}

fn resolve_policy(
    args: &SelectArgs,
    file_policy: Option<&FilePolicyConfig>,
    defaults: &DefaultsConfig,
) -> PolicyConfig {
    let kind = args.policy.unwrap_or(match file_policy {
        Some(FilePolicyConfig::Ucb { .. }) => PolicyKind::Ucb,
        Some(FilePolicyConfig::Pi { .. }) => PolicyKind::Pi,
        Some(FilePolicyConfig::Greedy) | None => PolicyKind::Greedy,
    });

    let (file_alpha, file_threshold, file_epsilon) = match file_policy {
        Some(FilePolicyConfig::Ucb { alpha }) => (*alpha, None, None),
        Some(FilePolicyConfig::Pi { threshold, epsilon }) => (None, *threshold, *epsilon),
        Some(FilePolicyConfig::Greedy) | None => (None, None, None),
    };

    match kind {
        PolicyKind::Greedy => PolicyConfig::Greedy,
        PolicyKind::Ucb => PolicyConfig::UpperConfidenceBound {
            alpha: args.alpha.or(file_alpha).unwrap_or(defaults.alpha),
        },
        PolicyKind::Pi => PolicyConfig::ProbabilityOfImprovement {
            threshold: args
                .threshold
                .or(file_threshold)
                .unwrap_or(defaults.threshold),
            epsilon: args.epsilon.or(file_epsilon).unwrap_or(defaults.epsilon),
        },
    }
}
