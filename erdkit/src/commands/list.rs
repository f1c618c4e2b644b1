use clap::Args;
use eyre::Result;

use super::ManifestArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Only list classes that some adapter accepts as a model
    #[arg(long)]
    models: bool,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let erd = self.manifest.open();
        let report = ops::list(erd.namespace(), self.models);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
