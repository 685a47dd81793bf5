use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use eversend_client::config::loader;
use eversend_client::resources::{
    BankBeneficiary, BankPayout, CreateAddress, MomoBeneficiary, MomoPayout, PayoutQuotation,
};
use eversend_client::utils::constants::{
    AMOUNT_TYPE_DESTINATION, AMOUNT_TYPE_SOURCE, PAYOUT_TYPE_BANK, PAYOUT_TYPE_MOMO,
};
use eversend_client::utils::logging::{self, LogLevel};
use eversend_client::EversendClient;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML settings file. Without it, settings come from EVERSEND_* variables.
    #[arg(short, long, env = "EVERSEND_CONFIG")]
    config: Option<String>,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// After the operation, write the client's metrics to stderr
    #[arg(long)]
    print_metrics: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Account profile
    Account,
    #[command(subcommand)]
    Wallets(WalletsCommand),
    #[command(subcommand)]
    Exchange(ExchangeCommand),
    #[command(subcommand)]
    Payouts(PayoutsCommand),
    #[command(subcommand)]
    Beneficiaries(BeneficiariesCommand),
    #[command(subcommand)]
    Crypto(CryptoCommand),
    /// Fetch a bearer token and print its expiry
    Token,
}

#[derive(Subcommand)]
enum WalletsCommand {
    List,
    Get { currency: String },
}

#[derive(Subcommand)]
enum ExchangeCommand {
    Quotation {
        #[arg(long)]
        from: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        to: String,
    },
    Create {
        /// Token returned by `exchange quotation`
        token: String,
    },
}

#[derive(ClapArgs)]
struct Person {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    country: String,
}

#[derive(ClapArgs)]
struct BankAccount {
    #[arg(long)]
    bank_name: String,
    #[arg(long)]
    bank_account_name: String,
    #[arg(long)]
    bank_code: String,
    #[arg(long)]
    bank_account_number: String,
}

#[derive(Subcommand)]
enum PayoutsCommand {
    Countries,
    Banks { country_code: String },
    Quotation {
        #[arg(long)]
        source_wallet: String,
        #[arg(long)]
        amount: f64,
        #[arg(long = "type", value_parser = [PAYOUT_TYPE_BANK, PAYOUT_TYPE_MOMO])]
        transaction_type: String,
        #[arg(long)]
        destination_country: String,
        #[arg(long)]
        destination_currency: String,
        #[arg(long, default_value = AMOUNT_TYPE_SOURCE, value_parser = [AMOUNT_TYPE_SOURCE, AMOUNT_TYPE_DESTINATION])]
        amount_type: String,
    },
    Momo {
        #[arg(long)]
        token: String,
        #[arg(long)]
        phone_number: String,
        #[command(flatten)]
        person: Person,
    },
    Bank {
        #[arg(long)]
        token: String,
        #[arg(long)]
        phone_number: String,
        #[command(flatten)]
        person: Person,
        #[command(flatten)]
        account: BankAccount,
    },
    Transaction { id: String },
}

#[derive(Subcommand)]
enum BeneficiariesCommand {
    List,
    Get { id: String },
    CreateMomo {
        #[arg(long)]
        phone_number: String,
        #[command(flatten)]
        person: Person,
    },
    CreateBank {
        #[arg(long)]
        phone_number: Option<String>,
        #[command(flatten)]
        person: Person,
        #[command(flatten)]
        account: BankAccount,
    },
}

#[derive(Subcommand)]
enum CryptoCommand {
    AssetChains { coin: String },
    Addresses,
    CreateAddress {
        #[arg(long)]
        asset_id: String,
        #[arg(long)]
        owner_name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        purpose: String,
    },
    Transactions,
    AddressTransactions { address: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => loader::load_settings(path)?,
        None => loader::settings_from_env().context("no --config given and environment is incomplete")?,
    };
    logging::init_logging(&logging::resolve(settings.logging.as_ref(), args.log_level));

    let client = EversendClient::from_settings(&settings)?;
    info!(base_url = %settings.base_url, "eversend client starting...");

    // metrics are written even when the operation failed
    let outcome = run(&client, args.command).await;
    if args.print_metrics {
        eprint!("{}", client.metrics().encode_text()?);
    }
    outcome
}

async fn run(client: &EversendClient, command: Command) -> Result<()> {
    match command {
        Command::Account => print(&client.account().profile().await?),
        Command::Wallets(cmd) => match cmd {
            WalletsCommand::List => print(&client.wallets().list().await?),
            WalletsCommand::Get { currency } => print(&client.wallets().get(&currency).await?),
        },
        Command::Exchange(cmd) => match cmd {
            ExchangeCommand::Quotation { from, amount, to } => {
                print(&client.exchange().create_quotation(&from, amount, &to).await?)
            }
            ExchangeCommand::Create { token } => print(&client.exchange().create_exchange(&token).await?),
        },
        Command::Payouts(cmd) => run_payouts(client, cmd).await,
        Command::Beneficiaries(cmd) => run_beneficiaries(client, cmd).await,
        Command::Crypto(cmd) => match cmd {
            CryptoCommand::AssetChains { coin } => print(&client.crypto().asset_chains(&coin).await?),
            CryptoCommand::Addresses => print(&client.crypto().addresses().await?),
            CryptoCommand::CreateAddress { asset_id, owner_name, description, purpose } => {
                let address = CreateAddress {
                    asset_id,
                    owner_name,
                    destination_address_description: description,
                    purpose,
                };
                print(&client.crypto().create_address(&address).await?)
            }
            CryptoCommand::Transactions => print(&client.crypto().transactions().await?),
            CryptoCommand::AddressTransactions { address } => {
                print(&client.crypto().address_transactions(&address).await?)
            }
        },
        Command::Token => {
            client.token_manager().get_valid_token().await?;
            let token = client.token_manager().cached_token().await;
            print(&json!({
                "expires_at": token.expires_at.map(|e| e.to_rfc3339()),
            }))
        }
    }
}

async fn run_payouts(client: &EversendClient, cmd: PayoutsCommand) -> Result<()> {
    let payouts = client.payouts();
    match cmd {
        PayoutsCommand::Countries => print(&payouts.delivery_countries().await?),
        PayoutsCommand::Banks { country_code } => print(&payouts.delivery_banks(&country_code).await?),
        PayoutsCommand::Quotation {
            source_wallet,
            amount,
            transaction_type,
            destination_country,
            destination_currency,
            amount_type,
        } => {
            let quotation = PayoutQuotation {
                source_wallet,
                amount,
                transaction_type,
                destination_country,
                destination_currency,
                amount_type,
            };
            print(&payouts.create_quotation(&quotation).await?)
        }
        PayoutsCommand::Momo { token, phone_number, person } => {
            let payout = MomoPayout {
                token,
                phone_number,
                first_name: person.first_name,
                last_name: person.last_name,
                country: person.country,
            };
            print(&payouts.momo_payout(&payout).await?)
        }
        PayoutsCommand::Bank { token, phone_number, person, account } => {
            let payout = BankPayout {
                token,
                phone_number,
                first_name: person.first_name,
                last_name: person.last_name,
                country: person.country,
                bank_name: account.bank_name,
                bank_account_name: account.bank_account_name,
                bank_code: account.bank_code,
                bank_account_number: account.bank_account_number,
            };
            print(&payouts.bank_payout(&payout).await?)
        }
        PayoutsCommand::Transaction { id } => print(&payouts.transaction(&id).await?),
    }
}

async fn run_beneficiaries(client: &EversendClient, cmd: BeneficiariesCommand) -> Result<()> {
    let beneficiaries = client.beneficiaries();
    match cmd {
        BeneficiariesCommand::List => print(&beneficiaries.list().await?),
        BeneficiariesCommand::Get { id } => print(&beneficiaries.get(&id).await?),
        BeneficiariesCommand::CreateMomo { phone_number, person } => {
            let beneficiary = MomoBeneficiary {
                first_name: person.first_name,
                last_name: person.last_name,
                country: person.country,
                phone_number,
            };
            print(&beneficiaries.create_momo(&beneficiary).await?)
        }
        BeneficiariesCommand::CreateBank { phone_number, person, account } => {
            let beneficiary = BankBeneficiary {
                first_name: person.first_name,
                last_name: person.last_name,
                country: person.country,
                phone_number,
                bank_name: account.bank_name,
                bank_account_name: account.bank_account_name,
                bank_code: account.bank_code,
                bank_account_number: account.bank_account_number,
            };
            print(&beneficiaries.create_bank(&beneficiary).await?)
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
