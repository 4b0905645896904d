//! Cid command implementation.
//!
//! The `ordertrack cid <file>` command prints the `/ipfs/Qm…` path a dataset
//! file would be published under.

use crate::cid::file_ipfs_path;
use crate::cli::args::CidArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The cid command implementation.
pub struct CidCommand {
    args: CidArgs,
}

impl CidCommand {
    pub fn new(args: CidArgs) -> Self {
        Self { args }
    }
}

impl Command for CidCommand {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.file.is_file() {
            ui.error(&format!("No such file: {}", self.args.file.display()));
            return Ok(CommandResult::failure(2));
        }

        let path = file_ipfs_path(&self.args.file)?;
        ui.message(&path);
        Ok(CommandResult::success())
    }
}
