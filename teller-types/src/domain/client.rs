//! Client (account holder) domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Creates a new random ClientId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ClientId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Whether a client may operate accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    Active,
    Inactive,
}

/// A registered account holder.
///
/// Clients are never physically deleted; deletion marks them Inactive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Given name
    pub first_name: String,
    /// Family names
    pub last_name: String,
    /// National identity document (CI/NIT)
    pub national_id: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
    pub status: ClientStatus,
    /// When the client was registered
    pub registered_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new active client.
    ///
    /// # Validation
    /// - First name, last name and email cannot be empty
    pub fn new(
        first_name: String,
        last_name: String,
        national_id: String,
        email: String,
        phone: String,
        birth_date: Option<NaiveDate>,
        address: String,
    ) -> Result<Self, DomainError> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Client name cannot be empty".into(),
            ));
        }
        if email.trim().is_empty() || !email.contains('@') {
            return Err(DomainError::ValidationError(
                "Client email is not valid".into(),
            ));
        }

        Ok(Self {
            id: ClientId::new(),
            first_name,
            last_name,
            national_id,
            email,
            phone,
            birth_date,
            address,
            status: ClientStatus::Active,
            registered_at: Utc::now(),
        })
    }

    /// Reconstructs a client from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ClientId,
        first_name: String,
        last_name: String,
        national_id: String,
        email: String,
        phone: String,
        birth_date: Option<NaiveDate>,
        address: String,
        status: ClientStatus,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            national_id,
            email,
            phone,
            birth_date,
            address,
            status,
            registered_at,
        }
    }

    /// Returns true if the client may operate accounts.
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_client() -> Result<Client, DomainError> {
        Client::new(
            "Juan".into(),
            "Perez Garcia".into(),
            "12345678".into(),
            "juan.perez@example.com".into(),
            "76123456".into(),
            None,
            "Calle Principal 123".into(),
        )
    }

    #[test]
    fn test_client_creation() {
        let client = valid_client().unwrap();
        assert_eq!(client.first_name, "Juan");
        assert_eq!(client.status, ClientStatus::Active);
        assert!(client.is_active());
    }

    #[test]
    fn test_empty_name_fails() {
        let result = Client::new(
            "  ".into(),
            "Perez".into(),
            "123".into(),
            "a@b.com".into(),
            String::new(),
            None,
            String::new(),
        );
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_email_fails() {
        let result = Client::new(
            "Juan".into(),
            "Perez".into(),
            "123".into(),
            "not-an-email".into(),
            String::new(),
            None,
            String::new(),
        );
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }
}
