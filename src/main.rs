//! Tulobyte wallet CLI
//!
//! Interactive, single-invocation tool: create or recover a wallet, show
//! derived public info, and produce signed transaction artifacts for a
//! later broadcast step.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use tulobyte::chain::PlaceholderNode;
use tulobyte::config::{self, BatchMode, Config, Network};
use tulobyte::error::TbResult;
use tulobyte::tx::{preflight, sign_transfer, TransactionRecord};
use tulobyte::wallet::{
    create_wallet, recover_from_key, recover_from_phrase, wallet_info, FileWalletStore,
    WalletSummary, DERIVATION_PATH,
};
use tulobyte::{log_error, log_info};

#[derive(Parser)]
#[command(name = "tulobyte", version, about = "Tulobyte network wallet")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new wallet with a fresh recovery phrase
    Create {
        /// Recovery phrase length (12, 15, 18, 21 or 24; other values fall back to 12)
        #[arg(long, default_value_t = 12)]
        words: usize,

        /// Optional extra passphrase mixed into seed derivation
        #[arg(long, default_value = "")]
        passphrase: String,
    },

    /// Recover a wallet from a recovery phrase or a raw private key
    Recover {
        /// Recovery phrase, quoted as one argument
        #[arg(long, conflicts_with = "private_key")]
        mnemonic: Option<String>,

        /// Hex-encoded private key (64 hex characters)
        #[arg(long)]
        private_key: Option<String>,

        /// Passphrase used when the wallet was created (phrase recovery only)
        #[arg(long, default_value = "")]
        passphrase: String,
    },

    /// Show the wallet address
    Address,

    /// Show the wallet public key (uncompressed hex)
    Pubkey,

    /// Sign a transfer and save the transaction artifact
    Send {
        /// Recipient address (0x + 40 hex characters)
        recipient: String,

        /// Amount in TBYT
        amount: u64,

        /// Opaque data attached to the transaction
        #[arg(default_value = "")]
        data: String,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Switch the active network
    SetNetwork { network: Network },
    /// Switch the fee batching mode
    SetBatch { mode: BatchMode },
    /// Point the wallet store at a different file
    SetWalletPath { path: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.debug {
        tulobyte::utils::logging::enable_debug();
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error!("cli", err.to_string());
            eprintln!("Error: {}", err.message);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> TbResult<()> {
    config::init_dirs()?;
    let mut config = Config::load()?;
    let store = FileWalletStore::new(config.wallet_path.clone());

    match command {
        Command::Create { words, passphrase } => {
            let summary = create_wallet(&store, words, &passphrase)?;
            log_info!("cli", "Wallet created", address = summary.address);
            print_new_wallet(&summary);
        }

        Command::Recover {
            mnemonic,
            private_key,
            passphrase,
        } => {
            let summary = match (mnemonic, private_key) {
                (Some(phrase), None) => recover_from_phrase(&store, &phrase, &passphrase)?,
                (None, Some(key)) => {
                    let summary = recover_from_key(&store, &key)?;
                    println!("Note: recovery by private key cannot restore the recovery phrase.");
                    summary
                }
                _ => {
                    return Err(tulobyte::error::TbError::invalid_input(
                        "Provide exactly one of --mnemonic or --private-key",
                    ))
                }
            };
            log_info!("cli", "Wallet recovered", address = summary.address);
            print_wallet_info(&summary);
        }

        Command::Address => {
            let summary = wallet_info(&store)?;
            println!("{}", summary.address);
        }

        Command::Pubkey => {
            let summary = wallet_info(&store)?;
            println!("{}", summary.public_hex);
        }

        Command::Send {
            recipient,
            amount,
            data,
        } => {
            let local = wallet_info(&store)?;
            let node = PlaceholderNode;
            let plan = preflight(&node, &local.address, &recipient, amount)?;
            let record = sign_transfer(&store, &plan, &data, config.txn_batch)?;

            let artifact_path = save_artifact(&config, &record)?;
            println!("Transaction signed.");
            println!("  Hash:   {}", record.h);
            println!("  Fee:    {} TBYT", record.f);
            println!("  Saved:  {}", artifact_path.display());

            if prompt_yes_no("Broadcast transaction now? [y/N] ")? {
                // Broadcast is not implemented yet; the artifact stays queued.
                println!("Broadcast is not available yet. The signed artifact is kept for later.");
            } else {
                println!("Not broadcast. The signed artifact is kept for later.");
            }
        }

        Command::Config { action } => match action {
            ConfigAction::Show => {
                println!("network:     {}", config.network.as_str());
                println!("wallet_path: {}", config.wallet_path.display());
                println!("txn_batch:   {}", config.txn_batch.as_str());
            }
            ConfigAction::SetNetwork { network } => {
                config.network = network;
                config.save()?;
                println!("Network set to {}", network.as_str());
            }
            ConfigAction::SetBatch { mode } => {
                config.txn_batch = mode;
                config.save()?;
                println!("Batch mode set to {}", mode.as_str());
            }
            ConfigAction::SetWalletPath { path } => {
                config.wallet_path = path;
                config.save()?;
                println!("Wallet path set to {}", config.wallet_path.display());
            }
        },
    }

    Ok(())
}

/// Write the signed record, pretty-printed, into the next sequence folder
fn save_artifact(config: &Config, record: &TransactionRecord) -> TbResult<PathBuf> {
    let txns_dir = config.txns_dir()?;
    let seq = config::count_subdirs(&txns_dir)?;
    let folder = txns_dir.join(seq.to_string());
    fs::create_dir_all(&folder)?;

    let path = folder.join("txn.json");
    fs::write(&path, serde_json::to_string_pretty(record)?)?;
    Ok(path)
}

fn prompt_yes_no(prompt: &str) -> TbResult<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

fn print_new_wallet(summary: &WalletSummary) {
    println!("Wallet created.");
    println!();
    if let Some(ref phrase) = summary.mnemonic {
        println!("Recovery phrase (write this down, it is shown only once):");
        println!("  {}", phrase);
        println!();
    }
    print_wallet_info(summary);
    println!();
    println!("Derivation path: {}", DERIVATION_PATH);
}

fn print_wallet_info(summary: &WalletSummary) {
    println!("Address:    {}", summary.address);
    println!("Public key: {}", summary.public_hex);
}
