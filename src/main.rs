use std::{env, fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use gofront::{display_error, lexer::lexer::scan, parser::parser::parse_tree};
use log::{info, LevelFilter};

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: {} <file.go>", args.first().map(String::as_str).unwrap_or("gofront"));
        return ExitCode::from(2);
    }

    let file_path = PathBuf::from(&args[1]);
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args[1].clone());

    let file_contents = match read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let tree = match parse_tree(scan(&file_name, &file_contents)) {
        Ok(tree) => tree,
        Err(err) => {
            display_error(&err, &file_contents);
            return ExitCode::FAILURE;
        }
    };

    info!("Parsed {} in {:?}", file_name, start.elapsed());

    if !tree.errors.is_empty() {
        for diagnostic in &tree.errors {
            eprintln!("{}", diagnostic);
        }
        return ExitCode::FAILURE;
    }

    println!("{}", tree);
    ExitCode::SUCCESS
}
