use std::env;
use std::io;
use std::process::ExitCode;

use reliefnet::cli::Menu;
use reliefnet::session::Session;

fn main() -> ExitCode {
    let path = env::args().nth(1).unwrap_or_else(|| "graph.txt".to_owned());

    let session = match Session::load(&path) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error reading file {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut menu = Menu::new(session, stdin.lock(), io::stdout());
    match menu.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
