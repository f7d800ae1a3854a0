use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{Currency, ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::{
        date_format::{date_option, datetime_option},
        serde_helpers::null_as_default,
    },
};

pub type Account = Resource<AccountAttributes>;
pub type AccountTransaction = Resource<AccountTransactionAttributes>;

/// Kinds of cash and bank accounts.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Cash,
    Bank,
    Sys,
}

/// A cash or bank account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountAttributes {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: Currency,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_type: AccountType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    // Read-only fields maintained by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_for: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub last_adjustment_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_integration_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associate_email: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl AccountAttributes {
    #[must_use]
    pub fn new(name: impl Into<String>, currency: Currency, account_type: AccountType) -> Self {
        Self {
            name: name.into(),
            currency,
            account_type,
            ..Default::default()
        }
    }
}

impl ResourceType for AccountAttributes {
    const TYPE: &'static str = "accounts";
}

/// A debit or credit movement on an account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountTransactionAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for AccountTransactionAttributes {
    const TYPE: &'static str = "account_transactions";
}

/// API handler for account endpoints
#[derive(Debug)]
pub struct AccountsApi<'a> {
    pub(crate) client: &'a Client,
}

impl AccountsApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Account>> {
        self.client
            .list(&Collection::Accounts.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, account_id: &str) -> Result<Account> {
        self.client
            .get(&ParasutEndpoint::member(Collection::Accounts, account_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &AccountAttributes) -> Result<Account> {
        self.client
            .create(&Collection::Accounts.into(), attributes, None::<&NoRelationships>)
            .await
    }

    /// Replace the attributes of an existing account.
    #[instrument(skip(self, attributes))]
    pub async fn update(&self, account_id: &str, attributes: &AccountAttributes) -> Result<Account> {
        self.client
            .replace(
                &ParasutEndpoint::member(Collection::Accounts, account_id),
                account_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, account_id: &str) -> Result<()> {
        self.client
            .delete(&ParasutEndpoint::member(Collection::Accounts, account_id))
            .await
    }

    /// List the transactions booked on an account.
    #[instrument(skip(self))]
    pub async fn transactions(&self, account_id: &str) -> Result<ListResponse<AccountTransaction>> {
        self.client
            .list(
                &ParasutEndpoint::member_action(Collection::Accounts, account_id, "transactions"),
                &ListParameters::default(),
            )
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create_debit_transaction(
        &self,
        account_id: &str,
        attributes: &AccountTransactionAttributes,
    ) -> Result<AccountTransaction> {
        self.client
            .create(
                &ParasutEndpoint::member_action(Collection::Accounts, account_id, "debit_transactions"),
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create_credit_transaction(
        &self,
        account_id: &str,
        attributes: &AccountTransactionAttributes,
    ) -> Result<AccountTransaction> {
        self.client
            .create(
                &ParasutEndpoint::member_action(Collection::Accounts, account_id, "credit_transactions"),
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }
}
