//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "kokuban> ";

/// Redisplay the prompt after printing output
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}

/// Print a block of output followed by the prompt
pub fn print_and_prompt(output: &str) {
    print!("{}", output);
    redisplay_prompt();
}
