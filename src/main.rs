use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use greenhouse_fuzzy::{curves, dataset, repl, ControlSession};

#[derive(Parser)]
#[command(name = "greenhouse", about = "Fuzzy cooling and watering controller for a greenhouse")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single reading
    Eval {
        /// Temperature in °C, 0-50
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        /// Relative humidity in %, 0-100
        #[arg(long, allow_negative_numbers = true)]
        humidity: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare controller output with the labels of a CSV dataset
    Validate {
        dataset: PathBuf,
        /// Only use the first N rows
        #[arg(long)]
        limit: Option<usize>,
        /// Number of rows to print in detail
        #[arg(long, default_value_t = 5)]
        show: usize,
    },
    /// Write sampled membership curves as CSV
    Curves {
        /// Output file, stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interactive prompt (default)
    Repl,
}

fn init_tracing(verbose: u8, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json)?;

    let session = ControlSession::new()?;

    match cli.cmd.unwrap_or(Commands::Repl) {
        Commands::Eval {
            temperature,
            humidity,
            json,
        } => {
            let out = session.evaluate(temperature, humidity)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                repl::print_output(&mut io::stdout().lock(), &out)?;
            }
        },
        Commands::Validate { dataset, limit, show } => {
            let mut samples = dataset::load(&dataset)?;

            if let Some(limit) = limit {
                samples.truncate(limit);
            }

            let report = dataset::validate(&session, &samples);

            for (i, row) in report.rows.iter().take(show).enumerate() {
                let s = &row.sample;

                println!("\nSample {}:", i + 1);
                match &s.temperature_category {
                    Some(category) => println!("Temperature: {}°C ({category})", s.temperature),
                    None => println!("Temperature: {}°C", s.temperature),
                }
                match &s.humidity_category {
                    Some(category) => println!("Humidity: {}% ({category})", s.humidity),
                    None => println!("Humidity: {}%", s.humidity),
                }
                match &row.outcome {
                    Ok(out) => {
                        println!("Cooling: {:.2} ({})", out.cooling.value(), out.cooling_category);
                        println!("Watering: {:.2} ({})", out.watering.value(), out.watering_category);
                    },
                    Err(err) => println!("Skipped: {err}"),
                }
                println!(
                    "Expected - Cooling: {}, Watering: {}",
                    s.cooling_level, s.watering_level
                );
            }

            println!(
                "\nEvaluated {} of {} rows ({} skipped, {} degenerate)",
                report.evaluated(),
                report.rows.len(),
                report.skipped(),
                report.degenerate()
            );
            if let (Some(c), Some(w)) = (report.cooling_accuracy(), report.watering_accuracy()) {
                println!("Cooling accuracy: {:.1}%", c * 100.);
                println!("Watering accuracy: {:.1}%", w * 100.);
            }
        },
        Commands::Curves { out } => match out {
            Some(path) => curves::write_csv(session.variables(), File::create(path)?)?,
            None => curves::write_csv(session.variables(), io::stdout().lock())?,
        },
        Commands::Repl => {
            repl::run(&session, io::stdin().lock(), io::stdout().lock())?;
        },
    }

    Ok(())
}
