//! Interactive prompting.
//!
//! Menus only ever need two questions: pick one of N labels, or yes/no.
//! Both go through [`Prompter`] so menu logic can be driven by a script in
//! tests.

use anyhow::{bail, Result};
use std::io::{self, Write};

pub trait Prompter {
    /// Index of the chosen option
    fn select(&mut self, title: &str, options: &[String]) -> Result<usize>;

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Numbered menus on stdout, answers read from stdin.
#[derive(Debug, Default)]
pub struct Terminal;

impl Prompter for Terminal {
    fn select(&mut self, title: &str, options: &[String]) -> Result<usize> {
        prompt_select(title, options)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        prompt_yes_no(question, default)
    }
}

fn read_line() -> Result<String> {
    io::stdout().flush()?;
    let mut input = String::new();
    let bytes_read = io::stdin().read_line(&mut input)?;

    if bytes_read == 0 {
        bail!("Unexpected end of input. Is stdin connected to a terminal?");
    }

    Ok(input.trim().to_string())
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    let default_str = if default { "Y/n" } else { "y/N" };
    print!("{} [{}]: ", prompt, default_str);
    io::stdout().flush()?;

    let input = read_line()?.to_lowercase();

    Ok(parse_yes_no(&input).unwrap_or(default))
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn prompt_select(prompt: &str, options: &[String]) -> Result<usize> {
    if options.is_empty() {
        bail!("Nothing to choose from in {}", prompt);
    }

    println!("\n{}:", prompt);
    for (i, label) in options.iter().enumerate() {
        println!("  [{}] {}", i + 1, label);
    }

    loop {
        print!("Select [1-{}]: ", options.len());
        io::stdout().flush()?;

        let input = read_line()?;

        match parse_selection(&input, options.len()) {
            Some(idx) => return Ok(idx),
            None if input.is_empty() => println!("Please make a selection"),
            None => println!("Invalid selection"),
        }
    }
}

/// 1-based menu number to 0-based index
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}
