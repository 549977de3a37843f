//! Interactive stdin prompts with defaults.

use std::io::{self, BufRead, Write};

/// Prompt for a positive integer, returning `default` on empty input
pub fn read_int(name: &str, default: i32) -> i32 {
    loop {
        print!("-> {} [default = {}]: ", name, default);
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            eprintln!("--> Failed to read input, try again!");
            continue;
        }
        if line.trim().is_empty() {
            return default;
        }
        match parse_positive_int(&line) {
            Some(value) => return value,
            None => eprintln!("--> Invalid value, try again!"),
        }
    }
}

/// Prompt for a yes/no answer, returning `default` on empty input
pub fn read_bool(name: &str, default: bool) -> bool {
    loop {
        print!("-> {} [default = {}]: ", name, if default { "Yes" } else { "No" });
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            eprintln!("--> Failed to read input, try again!");
            continue;
        }
        if line.trim().is_empty() {
            return default;
        }
        match parse_bool_input(&line) {
            Some(value) => return value,
            None => eprintln!("--> Invalid value, try again!"),
        }
    }
}

fn parse_positive_int(input: &str) -> Option<i32> {
    match input.trim().parse::<i32>() {
        Ok(value) if value > 0 => Some(value),
        _ => None,
    }
}

fn parse_bool_input(input: &str) -> Option<bool> {
    match input.trim().chars().next() {
        Some('y') | Some('Y') => Some(true),
        Some('n') | Some('N') => Some(false),
        _ => None,
    }
}
