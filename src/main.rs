use anyhow::{Context, Result};
use colored::Colorize;
use fund_me_client::config::load_env;
use fund_me_client::services::{FundMeApp, LocalWalletProvider, RpcConnection, RpcFundMeContract};
use fund_me_client::utils::{Logger, Spinner};
use std::env;
use std::future::Future;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing_subscriber::EnvFilter;

type App = FundMeApp<LocalWalletProvider, RpcConnection, RpcFundMeContract>;

fn print_usage() {
    println!("\n{} fund-me <command> [args]\n", "Usage:".yellow().bold());
    println!("  {}           Request wallet accounts and show the connected address", "connect".green());
    println!("  {}           Show the shortened connected address", "address".green());
    println!("  {}           Show the contract balance in ETH", "balance".green());
    println!("  {}  Fund the contract (defaults to ETH_AMOUNT)", "fund [AMOUNT]".green());
    println!("  {}          Withdraw the contract balance", "withdraw".green());
    println!("\n  Full command list: {}\n", "cargo run --bin help".cyan());
}

/// Drives `task` to completion while animating a progress line.
async fn with_spinner<F: Future>(action: &str, task: F) -> F::Output {
    tokio::pin!(task);
    let mut spinner = Spinner::new();
    let mut ticker = interval(Duration::from_millis(250));
    let output = loop {
        tokio::select! {
            output = &mut task => break output,
            _ = ticker.tick() => Logger::waiting(action, spinner.next_frame()),
        }
    };
    Logger::clear_line();
    output
}

fn build_app() -> Result<App> {
    let env = load_env()?;
    Logger::init(&env.log_dir);

    let connection = Arc::new(
        RpcConnection::connect_http(&env.rpc_url, env.receipt_poll_interval())
            .context("Failed to create RPC connection")?,
    );
    let mut app: App = FundMeApp::new(connection)
        .with_confirmation_timeout(env.confirmation_timeout());

    match &env.private_key {
        Some(key) => {
            let wallet = LocalWalletProvider::new(key, &env.rpc_url, env.request_timeout())
                .context("Failed to load wallet")?;
            let contract =
                RpcFundMeContract::new(&env.rpc_url, env.contract_address, wallet.signer().clone())
                    .context("Failed to create contract proxy")?;
            app = app.with_wallet(wallet, contract);
        }
        None => Logger::warning("PRIVATE_KEY not set: running without a wallet"),
    }
    app.set_eth_amount(env.eth_amount.clone());

    Logger::header("💸 FUND ME");
    Logger::wallet(
        "Not connected",
        &Logger::format_address(&env.contract_address.to_checksum(None)),
    );
    Ok(app)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return Ok(());
    }
    if !matches!(command, "connect" | "address" | "balance" | "fund" | "withdraw") {
        eprintln!("{} Unknown command: {}", "✗".red(), command);
        print_usage();
        std::process::exit(2);
    }

    let mut app = build_app()?;

    match command {
        "connect" | "address" => {
            if app.connect().await {
                Logger::success(&format!("Connected wallet: {}", app.display_address()));
            } else {
                Logger::error(&format!("Connected wallet: {}", app.display_address()));
            }
        }
        "balance" => match app.get_balance().await {
            Some(balance) => Logger::success(&format!("Contract balance: {} ETH", balance)),
            None => Logger::error("Could not read the contract balance"),
        },
        "fund" => {
            if let Some(amount) = args.get(1) {
                app.set_eth_amount(amount.clone());
            }
            Logger::info(&format!("Funding with {} ETH...", app.eth_amount()));
            match with_spinner("fund", app.fund()).await {
                Some(receipt) if receipt.status => {
                    Logger::confirmed("Fund", &receipt.transaction_hash)
                }
                Some(receipt) => Logger::warning(&format!(
                    "Fund mined but reverted: {}",
                    receipt.transaction_hash
                )),
                None => Logger::error("Fund failed, see log output"),
            }
        }
        "withdraw" => {
            Logger::info("Withdrawing...");
            match with_spinner("withdraw", app.withdraw()).await {
                Some(receipt) if receipt.status => {
                    Logger::confirmed("Withdraw", &receipt.transaction_hash)
                }
                Some(receipt) => Logger::warning(&format!(
                    "Withdraw mined but reverted: {}",
                    receipt.transaction_hash
                )),
                None => Logger::error("Withdraw failed, see log output"),
            }
        }
        _ => unreachable!("command validated above"),
    }

    Logger::separator();
    Ok(())
}
