use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ini::{Ini, Section};

/// Print the contents of an INI file, or look up a single section or value.
#[derive(Debug, Parser)]
#[command(name = "ini", version)]
struct Args {
    /// Path to the INI file
    path: PathBuf,

    /// Only print this section (use "" for the default section)
    section: Option<String>,

    /// Only print the value of this key within SECTION
    key: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let ini = match Ini::load_file(&args.path) {
        Ok(ini) => ini,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    match (args.section.as_deref(), args.key.as_deref()) {
        (None, _) => {
            for section in &ini {
                print_section(section);
            }
        }
        (Some(name), None) => {
            let Some(section) = ini.section(name) else {
                eprintln!("error: no section named {name:?}");
                return ExitCode::FAILURE;
            };
            print_section(section);
        }
        (Some(name), Some(key)) => {
            let Some(value) = ini.get(name, key) else {
                eprintln!("error: no key {key:?} in section {name:?}");
                return ExitCode::FAILURE;
            };
            println!("{value}");
        }
    }

    ExitCode::SUCCESS
}

fn print_section(section: &Section) {
    if !section.name().is_empty() {
        println!("[{}]", section.name());
    }

    for (key, value) in section.iter() {
        println!("{key} = {value}");
    }

    println!();
}
