//! Command-line argument parsing and help for fbrowse.
//!
//! When invoked with no args (fb), fbrowse opens the current directory.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Decides what to do with the arguments after the program name.
/// Informational flags print and return [CliAction::Exit].
pub fn parse_args(args: &[String]) -> CliAction {
    match args {
        [] => CliAction::RunApp,
        [arg] => match arg.as_str() {
            "--version" | "-v" => {
                println!("fbrowse {}", env!("CARGO_PKG_VERSION"));
                CliAction::Exit
            }
            "-h" | "--help" => {
                print_help();
                CliAction::Exit
            }
            "--init" => {
                if let Err(e) = Config::generate_default(&Config::default_path()) {
                    eprintln!("Error: {}", e);
                }
                CliAction::Exit
            }
            arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
                CliAction::RunAppAtPath(arg.to_string())
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                eprintln!("Try --help for available options");
                CliAction::Exit
            }
        },
        _ => {
            eprintln!("Error: fbrowse accepts only one argument at a time.");
            eprintln!("Usage: fb [PATH] or fb [OPTION]");
            CliAction::Exit
        }
    }
}

fn print_help() {
    println!(
        r#"fbrowse - A small terminal file browser

USAGE:
  fb [PATH]

PATH:
  Directory to open (defaults to current directory)

OPTIONS:
      --init              Generate the default configuration
  -h, --help              Print help information
  -v, --version           Display the current installed version of fbrowse

KEYS (defaults):
  Up / k                  Move the selection up
  Down / j                Move the selection down
  Enter                   Enter a directory or open a file in the editor
  Backspace               Go to the parent directory
  Ctrl+d                  Delete the selected entry
  q                       Quit

ENVIRONMENT:
  FBROWSE_CONFIG          Override the default config path
"#
    );
}
