//! Help command - displays all available commands and configuration

use colored::*;

fn main() {
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".cyan().bold());
    println!("{}", "     💸 FUND ME CLIENT - COMMANDS".cyan().bold());
    println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".cyan().bold());

    println!("{}\n", "👛 WALLET".yellow().bold());
    println!("  {}     Request accounts and show the connected wallet", "cargo run -- connect".green());
    println!("  {}     Show the shortened wallet address", "cargo run -- address".green());
    println!();

    println!("{}\n", "💰 CONTRACT".yellow().bold());
    println!("  {}     Show the contract balance in ETH", "cargo run -- balance".green());
    println!("  {}  Fund the contract and wait for the receipt", "cargo run -- fund 0.1".green());
    println!("  {}    Withdraw and wait for the receipt", "cargo run -- withdraw".green());
    println!();

    println!("{}\n", "⚙️  CONFIGURATION (.env)".yellow().bold());
    println!("  {}                  JSON-RPC endpoint (required)", "RPC_URL".cyan());
    println!("  {}         Deployed Fund Me contract (required)", "CONTRACT_ADDRESS".cyan());
    println!("  {}              Wallet key; without it no wallet is available", "PRIVATE_KEY".cyan());
    println!("  {}               Default fund amount (0.1)", "ETH_AMOUNT".cyan());
    println!("  {} Receipt polling cadence (4000)", "RECEIPT_POLL_INTERVAL_MS".cyan());
    println!("  {}       Wallet RPC request timeout (10000)", "REQUEST_TIMEOUT_MS".cyan());
    println!("  {} Give up waiting after N seconds (unset: wait forever)", "CONFIRMATION_TIMEOUT_SECS".cyan());
    println!("  {}                  Log file directory (logs)", "LOG_DIR".cyan());
    println!("  {}                 Diagnostic log filter, e.g. debug", "RUST_LOG".cyan());
    println!();

    println!("{}\n", "━".repeat(65).blue());
    println!("{}\n", "⚠️  A dropped or replaced transaction is never confirmed; set CONFIRMATION_TIMEOUT_SECS to bound the wait.".yellow());
}
