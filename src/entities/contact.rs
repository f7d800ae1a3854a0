use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::{
        date_format::{date_option, datetime_option},
        serde_helpers::null_as_default,
    },
};

pub type Contact = Resource<ContactAttributes>;
pub type ContactTransaction = Resource<ContactTransactionAttributes>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    #[default]
    Person,
    Company,
}

/// Whether a contact is a customer, a supplier or both.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContactAccountType {
    Customer,
    Supplier,
    Both,
}

/// A customer or supplier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactAttributes {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_type: ContactType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<ContactAccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_abroad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untrackable_balance: Option<Decimal>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ContactAttributes {
    #[must_use]
    pub fn new(name: impl Into<String>, contact_type: ContactType) -> Self {
        Self {
            name: name.into(),
            contact_type,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_account_type(mut self, account_type: ContactAccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_tax_number(mut self, tax_number: impl Into<String>, tax_office: impl Into<String>) -> Self {
        self.tax_number = Some(tax_number.into());
        self.tax_office = Some(tax_office.into());
        self
    }
}

impl ResourceType for ContactAttributes {
    const TYPE: &'static str = "contacts";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactTransactionAttributes {
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

/// API handler for contact endpoints
#[derive(Debug)]
pub struct ContactsApi<'a> {
    pub(crate) client: &'a Client,
}

impl ContactsApi<'_> {
    /// Retrieve a page of contacts
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Contact>> {
        self.client
            .list(&Collection::Contacts.into(), parameters)
            .await
    }

    /// Retrieve a single contact by ID
    #[instrument(skip(self))]
    pub async fn get(&self, contact_id: &str) -> Result<Contact> {
        self.client
            .get(&ParasutEndpoint::member(Collection::Contacts, contact_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &ContactAttributes) -> Result<Contact> {
        self.client
            .create(&Collection::Contacts.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(&self, contact_id: &str, attributes: &ContactAttributes) -> Result<Contact> {
        self.client
            .replace(
                &ParasutEndpoint::member(Collection::Contacts, contact_id),
                contact_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, contact_id: &str) -> Result<()> {
        self.client
            .delete(&ParasutEndpoint::member(Collection::Contacts, contact_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn debit_transactions(&self, contact_id: &str) -> Result<ListResponse<ContactTransaction>> {
        self.client
            .list(
                &ParasutEndpoint::member_action(
                    Collection::Contacts,
                    contact_id,
                    "contact_debit_transactions",
                ),
                &ListParameters::default(),
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn credit_transactions(&self, contact_id: &str) -> Result<ListResponse<ContactTransaction>> {
        self.client
            .list(
                &ParasutEndpoint::member_action(
                    Collection::Contacts,
                    contact_id,
                    "contact_credit_transactions",
                ),
                &ListParameters::default(),
            )
            .await
    }
}
