//! Outbound adapters (driven ports).

mod biller;

pub use biller::HttpBillerGateway;
