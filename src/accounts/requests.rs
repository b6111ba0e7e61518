//! Typed request shapes and their field constraints.
//!
//! Missing fields decode to empty or absent values so that they are reported
//! by validation (`required`) rather than as undecodable input.

use serde::{Deserialize, Deserializer};

use crate::store::UpdateAccountParams;
use crate::validation::{Constraint, FieldViolation, Rules, Validate};

/// Currencies an account may be opened in.
pub const SUPPORTED_CURRENCIES: &[&str] = &["USD", "CAD", "EUR"];

pub const MIN_PAGE_SIZE: i64 = 5;
pub const MAX_PAGE_SIZE: i64 = 10;

/// Decode an explicit JSON `null` the same as an absent string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /accounts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub currency: String,
}

impl Validate for CreateAccountRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        Rules::new()
            .field("Owner", &self.owner, &[Constraint::Required])
            .field(
                "Currency",
                &self.currency,
                &[Constraint::Required, Constraint::OneOf(SUPPORTED_CURRENCIES)],
            )
            .finish()
    }
}

/// `:id` path segment of `GET` and `DELETE /accounts/:id`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AccountIdRequest {
    pub id: i64,
}

impl Validate for AccountIdRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        Rules::new()
            .field("ID", self.id, &[Constraint::Required, Constraint::Min(1)])
            .finish()
    }
}

/// Query string of `GET /accounts`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListAccountsRequest {
    pub page_id: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListAccountsRequest {
    /// Row offset of the requested page. Only meaningful once validated.
    pub fn offset(&self) -> i64 {
        let page_id = self.page_id.unwrap_or(1);
        (page_id - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        self.page_size.unwrap_or(MIN_PAGE_SIZE)
    }
}

impl Validate for ListAccountsRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        Rules::new()
            .field("PageID", self.page_id, &[Constraint::Required, Constraint::Min(1)])
            .field(
                "PageSize",
                self.page_size,
                &[
                    Constraint::Required,
                    Constraint::Min(MIN_PAGE_SIZE),
                    Constraint::Max(MAX_PAGE_SIZE),
                ],
            )
            .finish()
    }
}

/// Body of `PUT /accounts`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub balance: Option<i64>,
}

impl Validate for UpdateAccountRequest {
    fn validate(&self) -> Vec<FieldViolation> {
        Rules::new()
            .field("ID", self.id, &[Constraint::Required, Constraint::Min(1)])
            .field("Balance", self.balance, &[Constraint::Present])
            .finish()
    }
}

impl UpdateAccountRequest {
    /// Store parameters. Absent fields are rejected by validation first.
    pub fn params(&self) -> UpdateAccountParams {
        UpdateAccountParams {
            id: self.id.unwrap_or_default(),
            balance: self.balance.unwrap_or_default(),
        }
    }
}
