use std::{env, io, path::Path, process};

use fpoke::FileSession;

fn usage(program: &str) -> String {
    format!("Usage: {program} <file> {{r<length> | R<length> | w<string> | s<offset>}}...")
}

/// True when the arguments call for printing usage instead of opening
/// anything: too few of them, or an explicit `--help`.
fn wants_usage(args: &[String]) -> bool {
    args.len() < 3 || args[1] == "--help"
}

fn run_session(path: &str, commands: &[String]) -> fpoke::Result<()> {
    let mut session = FileSession::open(Path::new(path))?;
    let stdout = io::stdout();
    let result = fpoke::run(&mut session, commands, &mut stdout.lock());
    // Close exactly once whether or not the run failed; the first error wins.
    result.and(session.close())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("fpoke");

    if wants_usage(&args) {
        eprintln!("{}", usage(program));
        process::exit(1);
    }

    if let Err(e) = run_session(&args[1], &args[2..]) {
        eprintln!("{program}: {e}");
        if e.is_usage() {
            eprintln!("{}", usage(program));
        }
        process::exit(1);
    }
}
