use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loadlab", version, about = "Loadlab experiment dashboard CLI")]
pub struct Cli {
    /// Dashboard settings file (created with defaults if missing)
    #[arg(long, default_value = "loadlab.toml")]
    pub config: PathBuf,
    /// Use the in-memory mock backend instead of HTTP
    #[arg(long)]
    pub mock: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter experiment draft in the draft directory
    New {
        name: String,
    },
    /// Recompute workload ticks for a draft and save them back
    Compute {
        file: PathBuf,
    },
    /// Print the submission payload for a draft
    Export {
        file: PathBuf,
        /// Write the payload to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Drop maxRps and curve points from the payload
        #[arg(long)]
        strip_curve: bool,
    },
    /// Submit a draft to the experiment backend
    Submit {
        file: PathBuf,
    },
    /// List experiments known to the backend
    List,
    /// Cancel a queued or running experiment
    Cancel {
        id: String,
    },
    /// List balancing policies offered by the policy backend
    Policies,
}
