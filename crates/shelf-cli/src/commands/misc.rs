use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::CompletionsArgs;
use crate::cli::Cli;

pub fn handle_completions(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "shelf", &mut std::io::stdout());
    Ok(())
}
