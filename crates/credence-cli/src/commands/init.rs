//! `credence init`: Write a default configuration file.

use clap::Args;
use std::path::PathBuf;

use crate::config::CredenceConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// Write a default config file, refusing to overwrite an existing one.
pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = args.dir.join("credence.toml");

    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }

    let mut config = CredenceConfig::default();
    config.storage.data_dir = args.dir.join("data");
    config.save(&config_path)?;
    std::fs::create_dir_all(&config.storage.data_dir)?;

    println!("Initialized Credence at {}", config_path.display());
    println!("Edit credence.toml to set the genesis admin before the first operation.");
    Ok(())
}
