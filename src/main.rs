use clap::Parser;
use clear_branches::cli::{execute_command, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute_command(cli) {
        eprintln!("clear-branches: {}", e);
        std::process::exit(1);
    }
}
