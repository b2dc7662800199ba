use chrono::Local;
use colored::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::utils::format::shorten_address;

static LOGS_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Console output for the CLI, mirrored to a daily log file.
pub struct Logger;

impl Logger {
    /// Sets the log directory once; later calls are ignored.
    pub fn init(logs_dir: impl Into<PathBuf>) {
        let _ = LOGS_DIR.set(logs_dir.into());
    }

    fn get_logs_dir() -> PathBuf {
        LOGS_DIR.get().cloned().unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("logs")
        })
    }

    pub fn log_file_name(logs_dir: &Path) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d").to_string();
        logs_dir.join(format!("fund-me-{}.log", date))
    }

    pub fn append_to(logs_dir: &Path, message: &str) -> std::io::Result<()> {
        fs::create_dir_all(logs_dir)?;
        let timestamp = Local::now().to_rfc3339();
        let log_entry = format!("[{}] {}\n", timestamp, message);

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(Self::log_file_name(logs_dir))?;
        file.write_all(log_entry.as_bytes())
    }

    fn write_to_file(message: &str) {
        // Silently fail; console output already happened.
        let _ = Self::append_to(&Self::get_logs_dir(), message);
    }

    pub fn format_address(address: &str) -> String {
        shorten_address(address)
    }

    pub fn header(title: &str) {
        println!("\n{}", "━".repeat(70).cyan());
        println!("{}", format!("  {}", title).cyan().bold());
        println!("{}\n", "━".repeat(70).cyan());
        Self::write_to_file(&format!("HEADER: {}", title));
    }

    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
        Self::write_to_file(&format!("INFO: {}", message));
    }

    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
        Self::write_to_file(&format!("SUCCESS: {}", message));
    }

    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
        Self::write_to_file(&format!("WARNING: {}", message));
    }

    pub fn error(message: &str) {
        println!("{} {}", "✗".red(), message);
        Self::write_to_file(&format!("ERROR: {}", message));
    }

    pub fn wallet(display: &str, contract: &str) {
        println!("{}", format!("  Connected wallet: {}", display).bright_black());
        println!("{}", format!("  Contract:         {}", contract).bright_black());
        println!();
    }

    pub fn confirmed(action: &str, hash: &str) {
        println!("{}", "─".repeat(70).magenta());
        println!("{}", format!("📨 {} confirmed", action).magenta().bold());
        println!("{}", format!("TX:     {}", hash).blue().underline());
        println!("{}", "─".repeat(70).magenta());
        Self::write_to_file(&format!("TX CONFIRMED: {} | {}", action, hash));
    }

    pub fn waiting(action: &str, frame: &str) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        print!(
            "\r{} {} {}",
            format!("[{}]", timestamp).bright_black(),
            frame.cyan(),
            format!("Waiting for {} transaction to be mined...", action).cyan()
        );
        let _ = std::io::stdout().flush();
    }

    pub fn clear_line() {
        print!("\r{}\r", " ".repeat(100));
        let _ = std::io::stdout().flush();
    }

    pub fn separator() {
        println!("{}", "─".repeat(70).bright_black());
    }
}
