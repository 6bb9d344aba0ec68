use std::{path::PathBuf, process, time::Instant};

use clap::{ArgAction, ArgGroup, Parser};
use rescsv::FileNameCodec;
use rescsv_cli::{
    ExportOptions, ImportOptions, load_config, run_export, run_import,
    validation::validate_file_id,
};
use tracing_subscriber::EnvFilter;

/// Exports a family of .properties files to one CSV sheet, or syncs an
/// edited sheet back into the files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["create", "sync"])))]
#[command(after_help = "\
Examples:
  rescsv -c account     create account.csv from account*.properties
  rescsv -c             create all.csv from every .properties file
  rescsv -s account     update the resource files from account.csv
  rescsv -d -s account  update, and delete entries missing from account.csv")]
struct Args {
    /// Create a CSV sheet from the resource files of FILE_ID (all files when omitted)
    #[arg(short = 'c', long = "create", value_name = "FILE_ID", num_args = 0..=1, default_missing_value = "")]
    create: Option<String>,

    /// Sync the resource files from FILE_ID.csv
    #[arg(short = 's', long = "sync", value_name = "FILE_ID")]
    sync: Option<String>,

    /// When syncing, delete entries that are not in the sheet
    #[arg(short = 'd', long = "delete", requires = "sync")]
    delete: bool,

    /// Directory holding the resource files and sheets
    #[arg(short = 'C', long = "dir", value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Configuration file (defaults to DIR/rescsv.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: serde::Serialize>(report: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Error serializing report: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn run(args: &Args) -> Result<(), String> {
    let config = load_config(&args.dir, args.config.as_deref()).map_err(|e| e.to_string())?;
    let codec = FileNameCodec::new(config).map_err(|e| e.to_string())?;

    if let Some(file_id) = &args.create {
        let file_id = if file_id.is_empty() {
            None
        } else {
            validate_file_id(file_id)?;
            Some(file_id.clone())
        };
        let options = ExportOptions {
            dir: args.dir.clone(),
            file_id,
        };
        let report = run_export(&options, &codec)
            .map_err(|e| format!("Error while creating the csv file: {}", e))?;
        if args.json {
            print_json(&report)?;
        } else {
            report.print();
        }
    } else if let Some(file_id) = &args.sync {
        validate_file_id(file_id)?;
        let options = ImportOptions {
            dir: args.dir.clone(),
            file_id: file_id.clone(),
            delete: args.delete,
        };
        let report = run_import(&options, &codec)
            .map_err(|e| format!("Error while updating resource files: {}", e))?;
        if args.json {
            print_json(&report)?;
        } else {
            report.print();
        }
    }

    Ok(())
}

fn main() {
    let started = Instant::now();
    let args = Args::parse();
    init_tracing(args.verbose);

    let code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("❌ {}", e);
            1
        }
    };

    if !args.json {
        println!("⏱ {:.2?}", started.elapsed());
    }
    process::exit(code);
}
