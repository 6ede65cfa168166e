use std::process::ExitCode;

use clap::Parser;

use folio_tui::cli::Cli;
use folio_tui::error::Error;
use folio_tui::runtime;
use folio_tui::theme::{ThemeMode, set_theme_mode};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The session handle restores the terminal before we get here
            eprintln!("folio: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let portfolio = cli.load_portfolio()?;
    if cli.light {
        set_theme_mode(ThemeMode::Light);
    }

    let mut handle = runtime::mount(portfolio, cli.layout.into())?;
    let result = runtime::run(&mut handle);
    runtime::unmount(handle)?;
    result?;
    Ok(())
}
