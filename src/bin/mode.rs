use std::io::{self, Read};

use clap::{Parser, ValueEnum};
use hashmaps::{DEFAULT_CAPACITY, HashFunction, ModeError, find_mode_with, hash_function_1, hash_function_2};
use log::{debug, trace};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    /// Derived IO error
    #[error("Io error: {0}")]
    IoError(#[from] io::Error),

    #[error(transparent)]
    Mode(#[from] ModeError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HashChoice {
    /// Sum of the key's bytes
    #[value(name = "1")]
    Sum,
    /// Position-weighted sum of the key's bytes
    #[value(name = "2")]
    Weighted,
}

impl HashChoice {
    fn function(self) -> HashFunction {
        match self {
            HashChoice::Sum => hash_function_1 as HashFunction,
            HashChoice::Weighted => hash_function_2 as HashFunction,
        }
    }
}

/// Reads whitespace separated words from stdin and prints the most
/// frequent ones.
#[derive(Parser, Debug)]
#[command(name = "mode", about = "Most frequent words on stdin", version)]
struct Args {
    /// Hash function backing the frequency table
    #[arg(long, value_enum, default_value_t = HashChoice::Sum)]
    hash: HashChoice,

    /// Initial bucket count, rounded up to a prime
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
}

fn main() -> Result<(), CliError> {
    env_logger::builder().init();

    let args = Args::parse();
    debug!(target: "main", "{args:?}");

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    trace!(target: "main", "read {} bytes from stdin", input.len());

    let (mode, frequency) =
        find_mode_with(input.split_whitespace(), args.capacity, args.hash.function())?;
    debug!(target: "main", "{} value(s) share the top frequency", mode.length());

    let values: Vec<String> = mode.into_iter().collect();
    println!("mode: {}", values.join(", "));
    println!("frequency: {frequency}");
    Ok(())
}
