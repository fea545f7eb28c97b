use crate::error::{CliError, Result};
use examol::select::Maximize;
use examol::start::RandomStarter;
use examol::store::recipe::SimpleRecipe;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileMaximize {
    All(bool),
    PerObjective(Vec<bool>),
}

impl From<FileMaximize> for Maximize {
    fn from(m: FileMaximize) -> Self {
        match m {
            FileMaximize::All(flag) => Maximize::All(flag),
            FileMaximize::PerObjective(flags) => Maximize::PerObjective(flags),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "type", deny_unknown_fields)]
pub enum FilePolicyConfig {
    Greedy,
    Ucb {
        alpha: Option<f64>,
    },
    Pi {
        threshold: Option<f64>,
        epsilon: Option<f64>,
    },
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileRecipe {
    pub name: String,
    pub level: String,
}

impl From<FileRecipe> for SimpleRecipe {
    fn from(r: FileRecipe) -> Self {
        SimpleRecipe::new(r.name, r.level)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileStartConfig {
    pub threshold: usize,
    #[serde(rename = "min-to-select", default)]
    pub min_to_select: usize,
    #[serde(rename = "max-to-consider")]
    pub max_to_consider: Option<usize>,
}

impl From<FileStartConfig> for RandomStarter {
    fn from(s: FileStartConfig) -> Self {
        RandomStarter {
            threshold: s.threshold,
            min_to_select: s.min_to_select,
            max_to_consider: s.max_to_consider,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "to-select")]
    pub to_select: Option<usize>,
    pub maximize: Option<FileMaximize>,
    pub seed: Option<u64>,
    pub policy: Option<FilePolicyConfig>,
    #[serde(default)]
    pub recipes: Vec<FileRecipe>,
    pub start: Option<FileStartConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading selection configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::parsing(path, e))
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_complete_file() {
        let content = r#"
            to-select = 8
            maximize = [true, false]
            seed = 3

            [policy]
            type = "ucb"
            alpha = 2.0

            [[recipes]]
            name = "ip"
            level = "xtb"

            [start]
            threshold = 10
            min-to-select = 4
        "#;
        let config = FileConfig::from_toml_str(content).unwrap();

        assert_eq!(config.to_select, Some(8));
        assert_eq!(
            config.maximize,
            Some(FileMaximize::PerObjective(vec![true, false]))
        );
        assert_eq!(config.policy, Some(FilePolicyConfig::Ucb { alpha: Some(2.0) }));
        assert_eq!(SimpleRecipe::from(config.recipes[0].clone()), SimpleRecipe::new("ip", "xtb"));
        let starter = RandomStarter::from(config.start.unwrap());
        assert_eq!(starter.threshold, 10);
        assert_eq!(starter.min_to_select, 4);
        assert_eq!(starter.max_to_consider, None);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml_str("").unwrap(), FileConfig::default());
    }

    #[test]
    fn scalar_maximize_is_accepted() {
        let config = FileConfig::from_toml_str("maximize = false").unwrap();
        assert_eq!(
            Maximize::from(config.maximize.unwrap()),
            Maximize::All(false)
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("batch-size = 3").is_err());
    }

    #[test]
    fn policy_table_rejects_unknown_keys() {
        let misspelled = FileConfig::from_toml_str("[policy]\ntype = \"ucb\"\nalfa = 3.0\n");
        assert!(misspelled.is_err());

        let spelled = FileConfig::from_toml_str("[policy]\ntype = \"ucb\"\nalpha = 3.0\n").unwrap();
        assert_eq!(spelled.policy, Some(FilePolicyConfig::Ucb { alpha: Some(3.0) }));
    }

    #[test]
    fn policy_table_rejects_parameters_of_other_policies() {
        let result = FileConfig::from_toml_str("[policy]\ntype = \"pi\"\nalpha = 3.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn unreadable_toml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "to-select = \"many\"").unwrap();

        let result = FileConfig::from_file(file.path());

        assert!(matches!(result, Err(CliError::FileParsing { path, .. }) if path == file.path()));
    }
}
