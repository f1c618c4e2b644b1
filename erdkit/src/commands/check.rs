use clap::Args;
use eyre::Result;

use super::ManifestArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// Treat unresolved forward references as errors
    #[arg(long)]
    strict: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let erd = self.manifest.open();
        let report = ops::check(erd.manifest(), erd.path());
        report.render(&mut TerminalOutput::new());

        if self.strict && !report.unresolved.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }
}
