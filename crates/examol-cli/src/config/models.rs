use examol::select::config::SelectionConfig;
use examol::start::RandomStarter;
use examol::store::recipe::SimpleRecipe;
use std::path::PathBuf;

pub struct AppConfig {
    pub predictions_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub recipes: Vec<SimpleRecipe>,
    pub selection: SelectionConfig,
    pub starter: Option<RandomStarter>,
    pub seed: Option<u64>,
}
