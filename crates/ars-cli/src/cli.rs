use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ars",
    about = "Asset Restore: rebuild named asset trees from a content-addressed object store",
    version,
)]
pub struct Cli {
    /// Directory containing `indexes/` and `objects/`
    #[arg(short, long, value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Directory to create output sets in [default: <ASSETS_DIR>/result]
    #[arg(short, long, value_name = "DIR")]
    pub result_dir: Option<PathBuf>,

    /// Comma-separated manifest names to restore [default: all]
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub manifests: Option<Vec<String>>,

    /// List available manifests and exit
    #[arg(short, long)]
    pub list: bool,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not carry permissions and modification times over to copies
    #[arg(long)]
    pub no_preserve_metadata: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[arg(short, long)]
    pub verbose: bool,
}
