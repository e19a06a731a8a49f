//! Client example demonstrating full console flows against a running server.
//!
//! Run with: cargo run -p teller-app --example console_demo

use std::time::Duration;

use teller_client::TellerClient;
use teller_hex::{ConsoleService, inbound::HttpServer, outbound::HttpBillerGateway};
use teller_repo::build_repo;
use teller_types::{
    AccountKind, CreateClientRequest, Currency, InternalTransferRequest, LoanApplicationRequest,
    ServiceCategory,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);

    println!("Starting server on port {port}...");

    // In-memory ledger; no biller is running, so the payment step below
    // demonstrates the compensating credit.
    let repo = build_repo(false).await?;
    let biller = HttpBillerGateway::new("http://127.0.0.1:9", Duration::from_millis(500))?;

    let service = ConsoleService::new(repo, biller);
    let server = HttpServer::new(service);

    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        server.run(&server_addr).await.unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(500)).await;

    let base_url = format!("http://127.0.0.1:{port}");
    let client = TellerClient::new(&base_url);

    // Health check
    let health = client.health().await?;
    println!("Server health: {health}");

    // Unauthorized without a token
    let response = client.list_accounts().await;
    assert!(response.is_err());
    println!("Unauthorized without token: {}", response.unwrap_err());

    // Bootstrap the first access token
    let token = client.bootstrap("demo").await?;
    println!("Access token generated: {token}");
    let client = client.with_token(token);

    // Register a client and open two accounts
    let juan = client
        .create_client(CreateClientRequest {
            first_name: "Juan".into(),
            last_name: "Perez Garcia".into(),
            national_id: "12345678".into(),
            email: "juan.perez@example.com".into(),
            phone: "76123456".into(),
            birth_date: None,
            address: "Calle Principal 123, La Paz".into(),
        })
        .await?;
    println!("Registered client: {} {}", juan.first_name, juan.last_name);

    let savings = client
        .create_account(juan.id, AccountKind::Savings, Currency::BOB, 550_050)
        .await?;
    let checking = client
        .create_account(juan.id, AccountKind::Checking, Currency::BOB, 230_000)
        .await?;
    println!(
        "Opened accounts {} ({}) and {} ({})",
        savings.account_number, savings.balance, checking.account_number, checking.balance
    );

    // Internal transfer of Bs 500.00
    let record = client
        .transfer_internal(InternalTransferRequest {
            from_account_id: savings.id,
            to_account_id: checking.id,
            amount: 50_000,
            currency: Currency::BOB,
            memo: Some("between my accounts".into()),
        })
        .await?;
    println!("Transfer {} -> {:?}", record.id, record.status);

    let savings = client.get_account(savings.id).await?;
    let checking = client.get_account(checking.id).await?;
    println!(
        "Balances after transfer: {} / {}",
        savings.balance, checking.balance
    );

    // Loan application: small principal auto-approves with an annuity installment
    let loan = client
        .request_loan(LoanApplicationRequest {
            client_id: juan.id,
            principal: 500_000,
            currency: Currency::BOB,
            term_months: 24,
            annual_rate_pct: 8.5,
        })
        .await?;
    println!(
        "Loan {:?}, monthly installment: {}",
        loan.status,
        loan.monthly_installment
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".into())
    );

    // Service payment: the biller is unreachable, so the debit is
    // compensated and the attempt is recorded as Failed.
    let payment = client
        .pay_service(
            savings.id,
            ServiceCategory::Electricity,
            "LUZ-123456",
            25_000,
            Currency::BOB,
            None,
        )
        .await;
    println!("Payment against dead biller: {}", payment.unwrap_err());

    let savings = client.get_account(savings.id).await?;
    println!("Balance after compensated payment: {}", savings.balance);

    let payments = client.list_payments(Some(savings.id)).await?;
    println!(
        "Payment records: {} (latest status {:?})",
        payments.len(),
        payments[0].status
    );

    println!("Demo complete.");
    Ok(())
}
