use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use vidrank_core::config::{CONFIG_FILE_NAME, VidrankConfig};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write vidrank.toml into (default: current directory)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing vidrank.toml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let path = args.dir.join(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("Cannot create directory: {}", args.dir.display()))?;
    let text = VidrankConfig::default()
        .to_toml()
        .context("Cannot serialize default config")?;
    std::fs::write(&path, text)
        .with_context(|| format!("Cannot write config: {}", path.display()))?;

    println!("Wrote {}", path.display());
    Ok(())
}
