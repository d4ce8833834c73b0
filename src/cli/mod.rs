pub mod commands;
pub mod parser;

pub use parser::Cli;

use crate::utils::Result;

pub fn execute_command(cli: Cli) -> Result<()> {
    cli.validate()?;
    commands::clear::execute(cli)
}
