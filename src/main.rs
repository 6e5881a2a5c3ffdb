//! HOLODEQUE command-line demo.
//!
//! `demo` pushes tokens into a growable holodeque and shows the matrix that
//! encodes them; `parens` uses a fixed-alphabet holodeque as the stack of a
//! bracket matcher and cross-checks it against a `Vec` stack.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use holodeque::config::{resolve_repeat, DequeConfig};
use holodeque::prelude::*;

/// Holodeque demos.
#[derive(Parser, Debug)]
#[command(name = "holodeque", about = "A deque encoded in one integer matrix", version)]
struct Cli {
    /// Capacity of the holodeque (negative values are rejected).
    #[arg(long, global = true, allow_negative_numbers = true)]
    maxlen: Option<i64>,

    /// Matrix storage: nested, array or auto.
    #[arg(long, global = true, default_value = "auto")]
    backend: BackendKind,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Push whitespace-separated tokens and print the state matrix.
    Demo {
        /// Repeat the sequence this many times before draining.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        repeat: i64,

        /// Tokens to push on the right, in order.
        #[arg(trailing_var_arg = true)]
        tokens: Vec<String>,
    },
    /// Check bracket strings with a holodeque stack.
    Parens {
        /// String over `()[]{}`; random strings are generated when absent.
        input: Option<String>,

        /// Number of random strings.
        #[arg(short = 'n', long, default_value_t = 1000)]
        count: usize,

        /// Length of each random string.
        #[arg(short, long, default_value_t = 12)]
        length: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

const BRACKETS: &str = "()[]{}";

fn closer(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

/// Balanced-bracket check with a holodeque as the stack.
fn holodeque_valid(stack: &mut Holodeque<char, DispatchMatrix>, s: &str) -> anyhow::Result<bool> {
    stack.clear();
    for ch in s.chars() {
        if closer(ch).is_some() {
            stack.push_right(ch)?;
        } else if !stack.is_empty() && closer(*stack.peek_right()?) == Some(ch) {
            stack.pop_right()?;
        } else {
            return Ok(false);
        }
    }
    Ok(stack.is_empty())
}

/// Reference check with a `Vec` stack.
fn vec_valid(s: &str) -> bool {
    let mut stack = Vec::new();
    for ch in s.chars() {
        if closer(ch).is_some() {
            stack.push(ch);
        } else if stack.last().and_then(|&open| closer(open)) == Some(ch) {
            stack.pop();
        } else {
            return false;
        }
    }
    stack.is_empty()
}

fn run_demo(config: &DequeConfig, repeat: i64, tokens: Vec<String>) -> anyhow::Result<()> {
    let repeat = resolve_repeat(repeat)?;
    let mut dq = GrowableDeque::<String, DispatchMatrix>::with_config(Vec::new(), config)?;
    dq.extend_right(tokens)?;
    let mut dq = dq.repeat(repeat).context("repeating the sequence")?;

    tracing::info!(
        "{} elements, shape {}, backend {}",
        dq.len(),
        dq.shape(),
        dq.matrix().kind()
    );
    println!("alphabet: {:?}", dq.alphabet());
    for row in dq.matrix().to_rows() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("  [{}]", cells.join(", "));
    }
    println!("{dq:?}");

    let mut drained = Vec::with_capacity(dq.len());
    while !dq.is_empty() {
        drained.push(dq.pop_left()?);
    }
    println!("drained: {}", drained.join(" "));
    tracing::info!(shape = dq.shape(), "drained back to the identity");
    Ok(())
}

fn run_parens(
    config: &DequeConfig,
    input: Option<String>,
    count: usize,
    length: usize,
    seed: u64,
) -> anyhow::Result<()> {
    // a bounded stack would evict openers, so only the backend choice applies
    let stack_config = DequeConfig {
        maxlen: None,
        backend: config.backend,
    };
    let mut stack = Holodeque::<char, DispatchMatrix>::with_config(BRACKETS.chars(), &stack_config)?;

    if let Some(s) = input {
        if let Some(bad) = s.chars().find(|c| !BRACKETS.contains(*c)) {
            bail!("unexpected character {bad:?}; expected one of {BRACKETS}");
        }
        let valid = holodeque_valid(&mut stack, &s)?;
        println!("{s}: {}", if valid { "balanced" } else { "unbalanced" });
        return Ok(());
    }

    let symbols: Vec<char> = BRACKETS.chars().collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut balanced = 0;
    for _ in 0..count {
        let s: String = (0..length)
            .filter_map(|_| symbols.choose(&mut rng).copied())
            .collect();
        let valid = holodeque_valid(&mut stack, &s)?;
        if valid != vec_valid(&s) {
            bail!("holodeque and Vec stack disagree on {s}");
        }
        balanced += usize::from(valid);
    }
    tracing::info!("checked {count} strings of length {length}, seed {seed}");
    println!("{balanced}/{count} balanced; holodeque agrees with the Vec stack");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = DequeConfig::new(cli.maxlen, cli.backend).context("invalid --maxlen")?;
    tracing::debug!(?config, "configuration");

    match cli.command {
        Command::Demo { repeat, tokens } => run_demo(&config, repeat, tokens),
        Command::Parens {
            input,
            count,
            length,
            seed,
        } => run_parens(&config, input, count, length, seed),
    }
}
