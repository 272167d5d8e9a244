//! Solana Vanity Address Grinder CLI
//!
//! Usage:
//!   sol_vanity -p So1                 # Find an address starting with "So1"
//!   sol_vanity -s pump -i -n 5        # Find 5 addresses ending with "pump", any case
//!   sol_vanity -m 12 -l 5             # Find an address starting with 5 identical characters

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{error, info, LevelFilter};

use sol_vanity::{Config, KeyWriter, VanityResult, WorkerPool};

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::parse();

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let spec = config.pattern_spec()?;
    let seeds = config.seed_source()?;
    let writer = KeyWriter::new(&config.output_dir);

    // Print startup info
    println!("Solana Vanity Address Grinder");
    println!("=============================");
    println!("Pattern:    {}", spec);
    println!("Difficulty: {}", spec.difficulty_description());
    println!("Workers:    {}", config.worker_count());
    println!("Batch size: {}", config.batch_size);
    println!("Target:     {} address(es)", config.count);
    println!("Output:     {}", writer.dir().display());
    println!();

    let mut pool = WorkerPool::new(config.worker_count(), config.batch_size, spec, seeds)?;

    // Set up ctrl-c handler
    ctrlc_handler(pool.stop_flag_clone())?;

    println!("Searching... (Press Ctrl+C to stop)\n");

    let mut found = 0;
    let report_interval = Duration::from_secs(config.report_interval);

    loop {
        // Wait for result or timeout for progress report
        match pool.wait_for_result(report_interval) {
            Some(result) => {
                found += 1;
                save_result(&writer, &result, found)?;

                if config.count > 0 && found >= config.count {
                    println!("\nTarget reached! Found {} address(es).", found);
                    break;
                }
            }
            None => {
                // Timeout - print progress
                print_progress(&pool, found);
            }
        }

        // Check if we should stop (ctrl-c was pressed)
        if pool.is_stopped() {
            println!("\nStopped by user.");
            break;
        }
    }

    // Matches already sent by the dispatcher are saved too
    for result in pool.drain() {
        found += 1;
        save_result(&writer, &result, found)?;
    }

    // Print final stats
    println!("\n--- Final Statistics ---");
    println!("Total keys generated: {}", format_number(pool.total_keys()));
    println!("Total keys saved:     {}", found);
    println!("Time elapsed:         {}", format_elapsed(pool.elapsed()));
    println!("Average speed:        {}", format_rate(pool.keys_per_second()));

    Ok(())
}

fn save_result(
    writer: &KeyWriter,
    result: &VanityResult,
    index: usize,
) -> Result<(), sol_vanity::OutputError> {
    print_result(result, index);
    let path = writer.write(&result.address, &result.keypair)?;
    info!("Saved keypair to {}", path.display());
    Ok(())
}

fn print_result(result: &VanityResult, index: usize) {
    println!("=== Match #{} ===", index);
    println!("Address:     {}", result.address);
    println!(
        "Private Key: {}",
        bs58::encode(result.keypair.secret_bytes()).into_string()
    );
    println!("Batch:       {}", result.batch);
    println!();
}

fn print_progress(pool: &WorkerPool, found: usize) {
    println!(
        "[{}] Attempts: {} | {} found | {}",
        format_elapsed(pool.elapsed()),
        format_number(pool.total_keys()),
        found,
        format_rate(pool.keys_per_second())
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn format_rate(mut speed: f64) -> String {
    const UNITS: [&str; 5] = ["H/s", "KH/s", "MH/s", "GH/s", "TH/s"];

    for unit in &UNITS[..UNITS.len() - 1] {
        if speed < 1000.0 {
            return format!("{:.2} {}", speed, unit);
        }
        speed /= 1000.0;
    }
    format!("{:.2} {}", speed, UNITS[UNITS.len() - 1])
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn ctrlc_handler(stop_flag: Arc<AtomicBool>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    })
}
