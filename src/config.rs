use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};

const ENV_PREFIX: &str = "REVIEW_SENTIMENT";


#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding `train/` and `test/` splits.
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Where trained parameters are saved and loaded.
    pub path: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}
impl Config {
    /// Defaults, then `file` (or an optional `config.toml` in the working
    /// directory), then `REVIEW_SENTIMENT__<SECTION>__<KEY>` environment variables.
    pub fn new(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder: ConfigBuilder<DefaultState> = ConfigBuilder::default()
            .set_default("corpus.root", "aclImdb")?
            .set_default("model.path", "_nbc_params.json")?
            .set_default("logging.level", "info")?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "corpus={} model={} log={}",
            self.corpus.root.display(),
            self.model.path.display(),
            self.logging.level
        )
    }
}
