//! # Teller Repository
//!
//! Concrete repository adapter for the teller console service. The only
//! adapter is in-memory: state is ephemeral and resets on restart, which
//! is the intended persistence model - durable storage belongs to
//! systems outside this service.

pub mod memory;
pub mod security;
pub mod seed;

pub use memory::MemoryLedger;

/// Build a ready-to-use ledger repository, optionally pre-loaded with
/// the demo dataset.
pub async fn build_repo(seed_demo: bool) -> anyhow::Result<MemoryLedger> {
    let ledger = MemoryLedger::new();
    if seed_demo {
        ledger.seed_demo().await;
    }
    Ok(ledger)
}
