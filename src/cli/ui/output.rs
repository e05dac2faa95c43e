use std::io::Write;

use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Print a prompt and leave the cursor on the same line for the answer
    pub fn prompt(&self, message: &str) {
        print!("{} {} ", style("?").cyan(), message);
        let _ = std::io::stdout().flush();
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
