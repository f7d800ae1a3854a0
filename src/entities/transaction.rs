use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::{date_option, datetime_option},
};

pub type Transaction = Resource<TransactionAttributes>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionAttributes {
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

impl ResourceType for TransactionAttributes {
    const TYPE: &'static str = "transactions";
}

/// API handler for transaction endpoints
#[derive(Debug)]
pub struct TransactionsApi<'a> {
    pub(crate) client: &'a Client,
}

impl TransactionsApi<'_> {
    fn member(transaction_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::Transactions, transaction_id)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, transaction_id: &str) -> Result<Transaction> {
        self.client.get(&Self::member(transaction_id)).await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(
        &self,
        transaction_id: &str,
        attributes: &TransactionAttributes,
    ) -> Result<Transaction> {
        self.client
            .replace(
                &Self::member(transaction_id),
                transaction_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, transaction_id: &str) -> Result<()> {
        self.client.delete(&Self::member(transaction_id)).await
    }
}
