// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use logging::LoggingConfig;
use runtime::{DatasetSource, LoaderRuntime};
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use txgrid_app::Grid;
use txgrid_testkit::TransactionFaker;

const DEFAULT_DEMO_ROWS: usize = 100_000;
const DEFAULT_GENERATE_ROWS: usize = 1_000_000;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `txgrid --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let grid_options = config.grid_options()?;

    let _log_guard = logging::init(&LoggingConfig {
        log_dir: config.log_dir()?,
        default_filter: config.log_filter().to_owned(),
    })?;

    let seed = options.seed.unwrap_or_else(default_seed);
    if let Some(path) = &options.generate {
        let count = options.count.unwrap_or(DEFAULT_GENERATE_ROWS);
        println!("Generating {count} transactions...");
        let mut faker = TransactionFaker::new(seed);
        let written = txgrid_data::write_dataset_file(path, faker.transactions(count))
            .with_context(|| format!("generate dataset {}", path.display()))?;
        println!("Done. Wrote {written} records to {}", path.display());
        return Ok(());
    }

    let source = match options.demo {
        Some(count) => DatasetSource::Demo { count, seed },
        None => {
            let path = match &options.data_path {
                Some(path) => path.clone(),
                None => config.data_path()?,
            };
            DatasetSource::File(path)
        }
    };

    if options.check_only {
        let rows = source.load()?.len();
        tracing::info!(rows, "check passed");
        return Ok(());
    }

    let mut grid = Grid::new(grid_options);
    let mut runtime = LoaderRuntime::new(source);
    txgrid_tui::run_app(&mut grid, &mut runtime)
}

fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    data_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    demo: Option<usize>,
    generate: Option<PathBuf>,
    count: Option<usize>,
    seed: Option<u64>,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        data_path: None,
        print_config_path: false,
        print_example: false,
        demo: None,
        generate: None,
        count: None,
        seed: None,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--data" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--data requires a file path"))?;
                options.data_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                let count = match iter.peek().map(|next| next.as_ref().parse::<usize>()) {
                    Some(Ok(count)) => {
                        iter.next();
                        count
                    }
                    _ => DEFAULT_DEMO_ROWS,
                };
                options.demo = Some(count);
            }
            "--generate" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--generate requires an output file path"))?;
                options.generate = Some(PathBuf::from(value.as_ref()));
            }
            "--count" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--count requires a number"))?;
                let raw = value.as_ref();
                let count = raw
                    .parse()
                    .with_context(|| format!("invalid --count {raw:?}"))?;
                options.count = Some(count);
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--seed requires a number"))?;
                let raw = value.as_ref();
                let seed = raw
                    .parse()
                    .with_context(|| format!("invalid --seed {raw:?}"))?;
                options.seed = Some(seed);
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options");
            }
        }
    }

    if options.demo.is_some() && options.data_path.is_some() {
        bail!("--demo and --data cannot be combined; pick one dataset source");
    }
    if options.generate.is_some() && options.demo.is_some() {
        bail!("--generate writes a file and --demo runs in memory; pick one");
    }
    if options.count.is_some() && options.generate.is_none() {
        bail!("--count only applies to --generate; use --demo <N> for an in-memory grid");
    }

    Ok(options)
}

fn print_help() {
    println!("txgrid");
    println!("  --config <path>             Use a specific config path");
    println!("  --data <path>               Open a specific dataset file");
    println!("  --print-config-path         Print resolved config path");
    println!("  --print-example-config      Print a v1 config template");
    println!("  --demo [N]                  Launch with N generated rows in memory (default 100000)");
    println!("  --generate <path>           Write a generated dataset file and exit");
    println!("      --count <N>             Rows to generate (default 1000000)");
    println!("      --seed <S>              Generator seed (default: clock based)");
    println!("  --check                     Validate config and dataset, then exit");
    println!("  --help                      Show this help");
}
