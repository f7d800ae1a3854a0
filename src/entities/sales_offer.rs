use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{
        self, Currency, ListParameters, ListResponse, NoRelationships, RelationshipData, Resource,
        ResourceType, WriteEnvelope,
    },
    error::Result,
    utils::date_format::{date_option, datetime_option},
};

pub type SalesOffer = Resource<SalesOfferAttributes, SalesOfferRelationships>;

/// A quotation sent to a customer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOfferAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_discount_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_excise_duty: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_communications_tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_vat: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_invoice_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_taxes_total: Option<Decimal>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for SalesOfferAttributes {
    const TYPE: &'static str = "sales_offers";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOfferRelationships {
    #[serde(
        default,
        deserialize_with = "crate::entities::to_one",
        skip_serializing_if = "Option::is_none",
    )]
    pub contact: Option<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_many",
        skip_serializing_if = "Vec::is_empty",
    )]
    pub details: Vec<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_many",
        skip_serializing_if = "Vec::is_empty",
    )]
    pub tags: Vec<RelationshipData>,
}

#[derive(Serialize)]
struct StatusAttributes<'a> {
    status: &'a str,
}

/// API handler for sales offer endpoints
#[derive(Debug)]
pub struct SalesOffersApi<'a> {
    pub(crate) client: &'a Client,
}

impl SalesOffersApi<'_> {
    fn member(offer_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::SalesOffers, offer_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<SalesOffer>> {
        self.client
            .list(&Collection::SalesOffers.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, offer_id: &str) -> Result<SalesOffer> {
        self.client.get(&Self::member(offer_id)).await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn create(
        &self,
        attributes: &SalesOfferAttributes,
        relationships: Option<&SalesOfferRelationships>,
    ) -> Result<SalesOffer> {
        self.client
            .create(&Collection::SalesOffers.into(), attributes, relationships)
            .await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn update(
        &self,
        offer_id: &str,
        attributes: &SalesOfferAttributes,
        relationships: Option<&SalesOfferRelationships>,
    ) -> Result<SalesOffer> {
        self.client
            .replace(&Self::member(offer_id), offer_id, attributes, relationships)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, offer_id: &str) -> Result<()> {
        self.client.delete(&Self::member(offer_id)).await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, offer_id: &str) -> Result<()> {
        entities::archive(self.client, &Self::member(offer_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unarchive(&self, offer_id: &str) -> Result<()> {
        entities::unarchive(self.client, &Self::member(offer_id)).await
    }

    #[instrument(skip(self))]
    pub async fn pdf(&self, offer_id: &str) -> Result<Vec<u8>> {
        self.client.get_pdf(&Self::member(offer_id).join("pdf")).await
    }

    /// The offer together with its line details.
    #[instrument(skip(self))]
    pub async fn details(&self, offer_id: &str) -> Result<SalesOffer> {
        self.client.get(&Self::member(offer_id).join("details")).await
    }

    /// Move the offer to a new status and return the updated offer.
    #[instrument(skip(self))]
    pub async fn update_status(&self, offer_id: &str, status: &str) -> Result<SalesOffer> {
        let attributes = StatusAttributes { status };
        let body = WriteEnvelope::new(
            Some(offer_id),
            SalesOfferAttributes::TYPE,
            &attributes,
            None::<&NoRelationships>,
        );
        self.client
            .action(&Self::member(offer_id).join("update_status"), &body)
            .await
    }
}
