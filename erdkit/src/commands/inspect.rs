use clap::Args;
use eyre::Result;

use super::{ManifestArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InspectCommand {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Model to inspect, by bare or qualified name
    model: String,

    /// Adapter to use instead of selecting one automatically
    #[arg(long)]
    adapter: Option<String>,
}

impl InspectCommand {
    pub fn run(&self) -> Result<()> {
        let erd = self.manifest.open();
        let report =
            ops::inspect(erd.namespace(), &self.model, self.adapter.as_deref())?.unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
