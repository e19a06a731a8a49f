//! Teller CLI
//!
//! Command-line interface for the Teller Console API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use teller_client::TellerClient;
use teller_types::{
    AccountId, AccountKind, AccountStatus, ClientId, CreateClientRequest, Currency,
    ExternalTransferRequest, InternalTransferRequest, LoanApplicationRequest, ServiceCategory,
    UpdateClientRequest,
};

#[derive(Parser)]
#[command(name = "teller")]
#[command(author, version, about = "Teller Console API client", long_about = None)]
struct Cli {
    /// Base URL of the Teller Console API
    #[arg(long, env = "TELLER_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Access token for authentication
    #[arg(long, env = "TELLER_API_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Client registry operations
    Client {
        #[command(subcommand)]
        action: ClientCommands,
    },
    /// Account operations
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Transfer operations
    Transfer {
        #[command(subcommand)]
        action: TransferCommands,
    },
    /// Service payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Loan operations
    Loan {
        #[command(subcommand)]
        action: LoanCommands,
    },
    /// Bootstrap the first access token
    Bootstrap {
        /// Name for the new access token
        #[arg(long, default_value = "bootstrap-token")]
        name: String,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum ClientCommands {
    /// Register a new client
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// National identity document (CI/NIT)
        #[arg(long)]
        national_id: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Get client details
    Get {
        /// Client ID (UUID)
        id: String,
    },
    /// List all clients
    List,
    /// Update a client's contact data
    Update {
        /// Client ID (UUID)
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Mark a client Inactive
    Deactivate {
        /// Client ID (UUID)
        id: String,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Open a new account
    Create {
        /// Owning client ID (UUID)
        #[arg(long)]
        client: String,
        /// Account kind (savings, checking)
        #[arg(long, default_value = "savings")]
        kind: String,
        /// Currency (BOB, USD)
        #[arg(long, default_value = "BOB")]
        currency: String,
        /// Initial balance in smallest currency unit
        #[arg(long, default_value = "0")]
        initial_balance: i64,
    },
    /// Get account details
    Get {
        /// Account ID (UUID)
        id: String,
    },
    /// List all accounts
    List,
    /// Block an account
    Block {
        /// Account ID (UUID)
        id: String,
    },
    /// Unblock an account
    Unblock {
        /// Account ID (UUID)
        id: String,
    },
    /// Deposit funds into an account
    Deposit {
        #[arg(long)]
        account: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "BOB")]
        currency: String,
    },
    /// Withdraw funds from an account
    Withdraw {
        #[arg(long)]
        account: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "BOB")]
        currency: String,
    },
}

#[derive(Subcommand)]
enum TransferCommands {
    /// Transfer between two local accounts
    Internal {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "BOB")]
        currency: String,
        #[arg(long)]
        memo: Option<String>,
    },
    /// Transfer to another holder's account at this bank
    ThirdParty {
        #[arg(long)]
        from: String,
        /// Destination account number
        #[arg(long)]
        destination: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "BOB")]
        currency: String,
        #[arg(long)]
        memo: Option<String>,
    },
    /// Transfer to an account at another bank
    Interbank {
        #[arg(long)]
        from: String,
        /// Destination account number
        #[arg(long)]
        destination: String,
        /// Receiving bank name
        #[arg(long)]
        bank: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "BOB")]
        currency: String,
        #[arg(long)]
        memo: Option<String>,
    },
    /// List transfer records
    List,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Pay a service bill
    Pay {
        #[arg(long)]
        account: String,
        /// Service category (electricity, water, phone, gas, internet, other)
        #[arg(long)]
        category: String,
        /// Supply/reference code of the bill
        #[arg(long)]
        supply_code: String,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "BOB")]
        currency: String,
        #[arg(long)]
        memo: Option<String>,
    },
    /// List payment records
    List {
        /// Filter by account ID (UUID)
        #[arg(long)]
        account: Option<String>,
    },
}

#[derive(Subcommand)]
enum LoanCommands {
    /// Submit a loan application
    Request {
        /// Requesting client ID (UUID)
        #[arg(long)]
        client: String,
        /// Principal in smallest currency unit
        #[arg(long)]
        principal: i64,
        #[arg(long, default_value = "BOB")]
        currency: String,
        /// Term in months (1..=360)
        #[arg(long)]
        term: u32,
        /// Annual interest rate, percent (0..=50)
        #[arg(long)]
        rate: f64,
    },
    /// List loan records
    List,
}

fn parse_currency(s: &str) -> Result<Currency> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}. Supported: BOB, USD", s))
}

fn parse_kind(s: &str) -> Result<AccountKind> {
    match s.to_lowercase().as_str() {
        "savings" => Ok(AccountKind::Savings),
        "checking" => Ok(AccountKind::Checking),
        _ => anyhow::bail!("Unknown account kind: {}. Supported: savings, checking", s),
    }
}

fn parse_category(s: &str) -> Result<ServiceCategory> {
    s.parse().map_err(|e: String| anyhow::anyhow!(e))
}

fn parse_account_id(s: &str) -> Result<AccountId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid account ID: {}", s))
}

fn parse_client_id(s: &str) -> Result<ClientId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid client ID: {}", s))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = TellerClient::new(&cli.api_url);
    if let Some(token) = cli.token {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("API is healthy");
            } else {
                println!("API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Bootstrap { name } => {
            let token = client.bootstrap(&name).await?;
            println!("{}", token);
        }

        Commands::Client { action } => match action {
            ClientCommands::Create {
                first_name,
                last_name,
                national_id,
                email,
                phone,
                address,
            } => {
                let created = client
                    .create_client(CreateClientRequest {
                        first_name,
                        last_name,
                        national_id,
                        email,
                        phone,
                        birth_date: None,
                        address,
                    })
                    .await?;
                print_json(&created)?;
            }
            ClientCommands::Get { id } => {
                let found = client.get_client(parse_client_id(&id)?).await?;
                print_json(&found)?;
            }
            ClientCommands::List => {
                let clients = client.list_clients().await?;
                print_json(&clients)?;
            }
            ClientCommands::Update {
                id,
                email,
                phone,
                address,
            } => {
                let updated = client
                    .update_client(
                        parse_client_id(&id)?,
                        UpdateClientRequest {
                            email,
                            phone,
                            address,
                            ..Default::default()
                        },
                    )
                    .await?;
                print_json(&updated)?;
            }
            ClientCommands::Deactivate { id } => {
                let deactivated = client.deactivate_client(parse_client_id(&id)?).await?;
                print_json(&deactivated)?;
            }
        },

        Commands::Account { action } => match action {
            AccountCommands::Create {
                client: owner,
                kind,
                currency,
                initial_balance,
            } => {
                let account = client
                    .create_account(
                        parse_client_id(&owner)?,
                        parse_kind(&kind)?,
                        parse_currency(&currency)?,
                        initial_balance,
                    )
                    .await?;
                print_json(&account)?;
            }
            AccountCommands::Get { id } => {
                let account = client.get_account(parse_account_id(&id)?).await?;
                print_json(&account)?;
            }
            AccountCommands::List => {
                let accounts = client.list_accounts().await?;
                print_json(&accounts)?;
            }
            AccountCommands::Block { id } => {
                let account = client
                    .set_account_status(parse_account_id(&id)?, AccountStatus::Blocked)
                    .await?;
                print_json(&account)?;
            }
            AccountCommands::Unblock { id } => {
                let account = client
                    .set_account_status(parse_account_id(&id)?, AccountStatus::Active)
                    .await?;
                print_json(&account)?;
            }
            AccountCommands::Deposit {
                account,
                amount,
                currency,
            } => {
                let updated = client
                    .deposit(
                        parse_account_id(&account)?,
                        amount,
                        parse_currency(&currency)?,
                    )
                    .await?;
                print_json(&updated)?;
            }
            AccountCommands::Withdraw {
                account,
                amount,
                currency,
            } => {
                let updated = client
                    .withdraw(
                        parse_account_id(&account)?,
                        amount,
                        parse_currency(&currency)?,
                    )
                    .await?;
                print_json(&updated)?;
            }
        },

        Commands::Transfer { action } => match action {
            TransferCommands::Internal {
                from,
                to,
                amount,
                currency,
                memo,
            } => {
                let record = client
                    .transfer_internal(InternalTransferRequest {
                        from_account_id: parse_account_id(&from)?,
                        to_account_id: parse_account_id(&to)?,
                        amount,
                        currency: parse_currency(&currency)?,
                        memo,
                    })
                    .await?;
                print_json(&record)?;
            }
            TransferCommands::ThirdParty {
                from,
                destination,
                amount,
                currency,
                memo,
            } => {
                let record = client
                    .transfer_third_party(ExternalTransferRequest {
                        from_account_id: parse_account_id(&from)?,
                        destination_account_number: destination,
                        bank_name: None,
                        amount,
                        currency: parse_currency(&currency)?,
                        memo,
                    })
                    .await?;
                print_json(&record)?;
            }
            TransferCommands::Interbank {
                from,
                destination,
                bank,
                amount,
                currency,
                memo,
            } => {
                let record = client
                    .transfer_interbank(ExternalTransferRequest {
                        from_account_id: parse_account_id(&from)?,
                        destination_account_number: destination,
                        bank_name: Some(bank),
                        amount,
                        currency: parse_currency(&currency)?,
                        memo,
                    })
                    .await?;
                print_json(&record)?;
            }
            TransferCommands::List => {
                let transfers = client.list_transfers().await?;
                print_json(&transfers)?;
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Pay {
                account,
                category,
                supply_code,
                amount,
                currency,
                memo,
            } => {
                let record = client
                    .pay_service(
                        parse_account_id(&account)?,
                        parse_category(&category)?,
                        &supply_code,
                        amount,
                        parse_currency(&currency)?,
                        memo,
                    )
                    .await?;
                print_json(&record)?;
            }
            PaymentCommands::List { account } => {
                let account_id = match account {
                    Some(raw) => Some(parse_account_id(&raw)?),
                    None => None,
                };
                let payments = client.list_payments(account_id).await?;
                print_json(&payments)?;
            }
        },

        Commands::Loan { action } => match action {
            LoanCommands::Request {
                client: owner,
                principal,
                currency,
                term,
                rate,
            } => {
                let loan = client
                    .request_loan(LoanApplicationRequest {
                        client_id: parse_client_id(&owner)?,
                        principal,
                        currency: parse_currency(&currency)?,
                        term_months: term,
                        annual_rate_pct: rate,
                    })
                    .await?;
                print_json(&loan)?;
            }
            LoanCommands::List => {
                let loans = client.list_loans().await?;
                print_json(&loans)?;
            }
        },
    }

    Ok(())
}
