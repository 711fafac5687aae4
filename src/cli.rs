use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::{default_base_dir, Config, RECORD_TYPES};
use crate::convert::run;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Convert,
    Types,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        None | Some("convert") => Some(Command::Convert),
        Some(flag) if flag.starts_with("--") => Some(Command::Convert),
        Some("types") => Some(Command::Types),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Convert) => handle_convert(args),
        Some(Command::Types) => handle_types(),
        None => {
            eprintln!("usage: dns_records [convert [--pretty] [--base-dir <dir>] | types]");
            2
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ConvertOptions {
    pretty: bool,
    base_dir: Option<PathBuf>,
}

fn parse_convert_options(args: &[String]) -> Result<ConvertOptions, String> {
    let mut options = ConvertOptions::default();
    let first_option = if args.get(1).map(String::as_str) == Some("convert") {
        2
    } else {
        1
    };
    let mut rest = args.iter().skip(first_option);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--pretty" => options.pretty = true,
            "--base-dir" => {
                let Some(dir) = rest.next() else {
                    return Err("--base-dir requires a directory".to_string());
                };
                options.base_dir = Some(PathBuf::from(dir));
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

fn handle_convert(args: &[String]) -> i32 {
    let options = match parse_convert_options(args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: dns_records convert [--pretty] [--base-dir <dir>]");
            return 2;
        }
    };

    let base_dir = options.base_dir.unwrap_or_else(default_base_dir);
    let config = Config::for_base_dir(base_dir).with_echo(std::io::stdout().is_terminal());

    match run(&config).and_then(|document| document.to_json(options.pretty)) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("conversion failed: {err}");
            1
        }
    }
}

fn handle_types() -> i32 {
    for record_type in RECORD_TYPES {
        println!("{}\t{}", record_type.name, record_type.file_name);
    }
    0
}
