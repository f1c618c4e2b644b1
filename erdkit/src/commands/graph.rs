use clap::{Args, ValueEnum};
use eyre::Result;

use super::{ManifestArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct GraphCommand {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Root models to start from
    #[arg(required_unless_present = "all")]
    models: Vec<String>,

    /// Start from every declared model
    #[arg(long, conflicts_with = "models")]
    all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,
}

impl GraphCommand {
    pub fn run(&self) -> Result<()> {
        let erd = self.manifest.open();
        let roots = if self.all { None } else { Some(self.models.as_slice()) };
        let report = ops::graph(erd.namespace(), roots)?.unwrap_or_exit();

        match self.format {
            Format::Text => report.render(&mut TerminalOutput::new()),
            Format::Json => println!("{}", serde_json::to_string_pretty(&report.graph)?),
        }
        Ok(())
    }
}
