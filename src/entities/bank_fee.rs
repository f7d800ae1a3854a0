use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{
        self, Currency, ListParameters, ListResponse, NoRelationships, Resource, ResourceType,
        payment::{self, Payment, PaymentAttributes},
    },
    error::Result,
    utils::{
        date_format::{date_option, datetime_option},
        serde_helpers::null_as_default,
    },
};

pub type BankFee = Resource<BankFeeAttributes>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BankFeeAttributes {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: Currency,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Date>,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default)]
    pub net_total: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_paid: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_in_trl: Option<Decimal>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for BankFeeAttributes {
    const TYPE: &'static str = "bank_fees";
}

/// API handler for bank fee endpoints
#[derive(Debug)]
pub struct BankFeesApi<'a> {
    pub(crate) client: &'a Client,
}

impl BankFeesApi<'_> {
    fn member(bank_fee_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::BankFees, bank_fee_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<BankFee>> {
        self.client
            .list(&Collection::BankFees.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, bank_fee_id: &str) -> Result<BankFee> {
        self.client.get(&Self::member(bank_fee_id)).await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &BankFeeAttributes) -> Result<BankFee> {
        self.client
            .create(&Collection::BankFees.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(&self, bank_fee_id: &str, attributes: &BankFeeAttributes) -> Result<BankFee> {
        self.client
            .replace(
                &Self::member(bank_fee_id),
                bank_fee_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, bank_fee_id: &str) -> Result<()> {
        entities::archive(self.client, &Self::member(bank_fee_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unarchive(&self, bank_fee_id: &str) -> Result<()> {
        entities::unarchive(self.client, &Self::member(bank_fee_id)).await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create_payment(
        &self,
        bank_fee_id: &str,
        attributes: &PaymentAttributes,
    ) -> Result<Payment> {
        payment::create_payment(self.client, &Self::member(bank_fee_id), attributes).await
    }
}
