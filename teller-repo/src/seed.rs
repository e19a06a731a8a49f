//! Demo dataset for local development.
//!
//! Mirrors the dataset the console UI was built against: three clients,
//! four accounts (one of them blocked), so every screen has something to
//! show right after startup.

use chrono::NaiveDate;

use teller_types::{
    Account, AccountId, AccountKind, AccountStatus, Client, ClientId, ClientStatus, Currency,
    Money,
};

use crate::memory::MemoryLedger;

struct SeedClient {
    first_name: &'static str,
    last_name: &'static str,
    national_id: &'static str,
    email: &'static str,
    phone: &'static str,
    birth_date: (i32, u32, u32),
    address: &'static str,
}

const CLIENTS: [SeedClient; 3] = [
    SeedClient {
        first_name: "Juan",
        last_name: "Perez Garcia",
        national_id: "12345678",
        email: "juan.perez@example.com",
        phone: "76123456",
        birth_date: (1990, 5, 15),
        address: "Calle Principal 123, La Paz",
    },
    SeedClient {
        first_name: "Maria",
        last_name: "Lopez Rodriguez",
        national_id: "87654321",
        email: "maria.lopez@example.com",
        phone: "72654321",
        birth_date: (1992, 8, 22),
        address: "Avenida Heroinas 456, Cochabamba",
    },
    SeedClient {
        first_name: "Carlos",
        last_name: "Martinez Sanchez",
        national_id: "11111111",
        email: "carlos.martinez@example.com",
        phone: "70111111",
        birth_date: (1988, 12, 10),
        address: "Calle Murillo 789, Santa Cruz",
    },
];

// (owner index, account number, currency, balance in minor units, status)
const ACCOUNTS: [(usize, &str, Currency, i64, AccountStatus); 4] = [
    (0, "1001234567890", Currency::BOB, 550_050, AccountStatus::Active),
    (0, "1001234567891", Currency::USD, 230_000, AccountStatus::Active),
    (1, "1001234567892", Currency::BOB, 875_075, AccountStatus::Active),
    (2, "1001234567893", Currency::BOB, 1_245_000, AccountStatus::Blocked),
];

impl MemoryLedger {
    /// Loads the demo dataset. Intended for a freshly created ledger.
    pub async fn seed_demo(&self) {
        let mut state = self.state.lock().await;

        let mut client_ids = Vec::with_capacity(CLIENTS.len());
        for seed in &CLIENTS {
            let (y, m, d) = seed.birth_date;
            let client = Client::from_parts(
                ClientId::new(),
                seed.first_name.to_string(),
                seed.last_name.to_string(),
                seed.national_id.to_string(),
                seed.email.to_string(),
                seed.phone.to_string(),
                NaiveDate::from_ymd_opt(y, m, d),
                seed.address.to_string(),
                ClientStatus::Active,
                chrono::Utc::now(),
            );
            client_ids.push(client.id);
            state.clients.insert(client.id, client);
        }

        for (owner, number, currency, balance, status) in ACCOUNTS {
            let account = Account::from_parts(
                AccountId::new(),
                number.to_string(),
                client_ids[owner],
                AccountKind::Savings,
                Money::new(balance, currency).expect("seed balances are non-negative"),
                status,
                chrono::Utc::now(),
            );
            state.accounts.insert(account.id, account);
        }
    }
}
