//! main.rs
//! Entry point for fbrowse

use fbrowse::app::AppState;
use fbrowse::config::Config;
use fbrowse::core::{FmResult, terminal};
use fbrowse::utils::cli::{CliAction, handle_args};
use fbrowse::utils::log_file_path;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

fn main() {
    // With panic = "abort" no guard runs, so the hook puts the startup mode back itself.
    #[cfg(unix)]
    let startup_mode = Mutex::new(nix::sys::termios::tcgetattr(std::io::stdin()).ok());

    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        #[cfg(unix)]
        {
            if let Ok(mode) = startup_mode.lock()
                && let Some(mode) = mode.as_ref()
            {
                use nix::sys::termios::{SetArg, tcsetattr};
                let _ = tcsetattr(std::io::stdin(), SetArg::TCSANOW, mode);
            }
        }
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        tracing::error!("panic: {}", info);
        eprintln!("\n[fbrowse] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let initial_path = match handle_args() {
        CliAction::Exit => return,
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path_arg) => Some(PathBuf::from(path_arg)),
    };

    let config = Config::load();
    init_logging(config.general().log_level());

    if let Err(e) = run(&config, initial_path) {
        tracing::error!(error = %e, fatal = e.is_fatal(), "exiting");
        eprintln!("[fbrowse] Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, initial_path: Option<PathBuf>) -> FmResult<()> {
    let mut app = match initial_path {
        Some(path) => AppState::from_dir(config, &path)?,
        None => AppState::new(config)?,
    };
    terminal::run_terminal(&mut app)
}

/// Sends tracing output to the log file. Logging stays off if the file cannot be opened,
/// the UI owns the terminal.
fn init_logging(level: Level) {
    let path = log_file_path();
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init();
}
