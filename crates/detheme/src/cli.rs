//! Command-line arguments.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use clap_mangen::Man;
use uuid::Uuid;

const BIN_NAME: &str = "detheme";

const EXAMPLES: &str = "\
Examples:
  detheme my-theme.sublime-color-scheme
    Convert custom theme to tmTheme format

  detheme -o theme1.tmTheme my-theme.sublime-color-scheme
    Convert custom theme to tmTheme format and save as theme1.tmTheme";

/// SublimeText color theme downgrader (sublime-color-scheme → tmTheme converter)
#[derive(Debug, Clone, Parser)]
#[command(name = "detheme", version, after_help = EXAMPLES, arg_required_else_help = true)]
pub struct Args {
    /// Path to the .sublime-color-scheme file
    #[arg(
        value_name = "THEME-FILE",
        required_unless_present_any = ["completion", "generate_man"]
    )]
    pub theme_file: Option<PathBuf>,

    /// Path to output file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    /// Use this UUID for the theme instead of a random one
    #[arg(long, value_name = "UUID")]
    pub uuid: Option<Uuid>,

    /// Print completion script for the given shell
    #[arg(long, value_name = "SHELL", conflicts_with = "generate_man")]
    pub completion: Option<Shell>,

    /// Print man page
    #[arg(long)]
    pub generate_man: bool,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Convert,
    Completion(Shell),
    Man,
}

impl Args {
    pub fn action(&self) -> Action {
        if let Some(shell) = self.completion {
            Action::Completion(shell)
        } else if self.generate_man {
            Action::Man
        } else {
            Action::Convert
        }
    }
}

/// Writes the completion script for `shell`.
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut Args::command(), BIN_NAME, out);
}

/// Writes the roff man page.
pub fn write_man(out: &mut dyn Write) -> io::Result<()> {
    Man::new(Args::command()).render(out)
}
