use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use tolk_config::Config;

use crate::Args;

const DEFAULT_CONFIG_FILE: &str = "tolk.json";

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

/// Explicit file, else `./tolk.json` if it exists, else defaults. Environment overrides on top.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => Config::default(),
    };

    config.apply_env();
    Ok(config)
}

/// Command line flags win over everything else
pub fn apply_args(config: &mut Config, args: &Args) {
    if let Some(from) = &args.from {
        config.translator.source_lang = from.clone();
    }
    if let Some(to) = &args.to {
        config.translator.target_lang = to.clone();
    }
    if args.live {
        config.ui.live = true;
    }
    if let Some(mode) = args.speech {
        config.speech.mode = mode;
    }
}
