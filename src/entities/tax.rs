use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{
        self, Currency, ListParameters, ListResponse, RelationshipData, Resource, ResourceType,
        payment::{self, Payment, PaymentAttributes},
    },
    error::Result,
    utils::date_format::{date_option, datetime_option},
};

pub type Tax = Resource<TaxAttributes, TaxRelationships>;

/// A tax liability such as VAT or withholding to be paid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for TaxAttributes {
    const TYPE: &'static str = "taxes";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRelationships {
    #[serde(
        default,
        deserialize_with = "crate::entities::to_many",
        skip_serializing_if = "Vec::is_empty",
    )]
    pub tags: Vec<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_many",
        skip_serializing_if = "Vec::is_empty",
    )]
    pub payments: Vec<RelationshipData>,
}

/// API handler for tax endpoints
#[derive(Debug)]
pub struct TaxesApi<'a> {
    pub(crate) client: &'a Client,
}

impl TaxesApi<'_> {
    fn member(tax_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::Taxes, tax_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Tax>> {
        self.client.list(&Collection::Taxes.into(), parameters).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, tax_id: &str) -> Result<Tax> {
        self.client.get(&Self::member(tax_id)).await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn create(
        &self,
        attributes: &TaxAttributes,
        relationships: Option<&TaxRelationships>,
    ) -> Result<Tax> {
        self.client
            .create(&Collection::Taxes.into(), attributes, relationships)
            .await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn update(
        &self,
        tax_id: &str,
        attributes: &TaxAttributes,
        relationships: Option<&TaxRelationships>,
    ) -> Result<Tax> {
        self.client
            .replace(&Self::member(tax_id), tax_id, attributes, relationships)
            .await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, tax_id: &str) -> Result<()> {
        entities::archive(self.client, &Self::member(tax_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unarchive(&self, tax_id: &str) -> Result<()> {
        entities::unarchive(self.client, &Self::member(tax_id)).await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create_payment(&self, tax_id: &str, attributes: &PaymentAttributes) -> Result<Payment> {
        payment::create_payment(self.client, &Self::member(tax_id), attributes).await
    }
}
