use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use detheme::{app, cli, logging, Action, Args, Config};

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.action() {
        Action::Completion(shell) => {
            cli::write_completion(shell, &mut io::stdout());
            Ok(())
        }
        Action::Man => cli::write_man(&mut io::stdout()).context("Can't write man page"),
        Action::Convert => Config::from_args(args).and_then(|config| convert(&config)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", style(format!("{:#}", err)).red());
            ExitCode::FAILURE
        }
    }
}

fn convert(config: &Config) -> Result<()> {
    console::set_colors_enabled(config.color);
    console::set_colors_enabled_stderr(config.stderr_color);
    logging::init(config.stderr_color);

    app::run(config)?;
    Ok(())
}
