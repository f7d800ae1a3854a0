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
    utils::{
        date_format::{date_option, datetime_option},
        serde_helpers::null_as_default,
    },
};

pub type PurchaseBill = Resource<PurchaseBillAttributes, PurchaseBillRelationships>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseBillItemType {
    #[default]
    Bill,
    Cancelled,
}

/// An incoming bill from a supplier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseBillAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_type: PurchaseBillItemType,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Date>,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withholding_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_withholding_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_discount_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_tax_office: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withholding: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_excise_duty: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_communications_tax: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_vat: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_withholding: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_invoice_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_taxes_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_in_trl: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl PurchaseBillAttributes {
    #[must_use]
    pub fn new(issue_date: Date) -> Self {
        Self {
            issue_date: Some(issue_date),
            ..Default::default()
        }
    }
}

impl ResourceType for PurchaseBillAttributes {
    const TYPE: &'static str = "purchase_bills";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseBillRelationships {
    #[serde(
        default,
        deserialize_with = "crate::entities::to_one",
        skip_serializing_if = "Option::is_none",
    )]
    pub supplier: Option<RelationshipData>,
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
    pub payments: Vec<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_many",
        skip_serializing_if = "Vec::is_empty",
    )]
    pub tags: Vec<RelationshipData>,
}

impl PurchaseBillRelationships {
    #[must_use]
    pub fn for_supplier(supplier_id: impl Into<String>) -> Self {
        Self {
            supplier: Some(RelationshipData::new(supplier_id, "contacts")),
            ..Default::default()
        }
    }
}

/// API handler for purchase bill endpoints
#[derive(Debug)]
pub struct PurchaseBillsApi<'a> {
    pub(crate) client: &'a Client,
}

impl PurchaseBillsApi<'_> {
    fn member(bill_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::PurchaseBills, bill_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<PurchaseBill>> {
        self.client
            .list(&Collection::PurchaseBills.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, bill_id: &str) -> Result<PurchaseBill> {
        self.client.get(&Self::member(bill_id)).await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn create(
        &self,
        attributes: &PurchaseBillAttributes,
        relationships: Option<&PurchaseBillRelationships>,
    ) -> Result<PurchaseBill> {
        self.client
            .create(&Collection::PurchaseBills.into(), attributes, relationships)
            .await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn update(
        &self,
        bill_id: &str,
        attributes: &PurchaseBillAttributes,
        relationships: Option<&PurchaseBillRelationships>,
    ) -> Result<PurchaseBill> {
        self.client
            .replace(&Self::member(bill_id), bill_id, attributes, relationships)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create_payment(
        &self,
        bill_id: &str,
        attributes: &PaymentAttributes,
    ) -> Result<Payment> {
        payment::create_payment(self.client, &Self::member(bill_id), attributes).await
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, bill_id: &str) -> Result<()> {
        entities::cancel(self.client, &Self::member(bill_id)).await
    }

    #[instrument(skip(self))]
    pub async fn recover(&self, bill_id: &str) -> Result<()> {
        entities::recover(self.client, &Self::member(bill_id)).await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, bill_id: &str) -> Result<()> {
        entities::archive(self.client, &Self::member(bill_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unarchive(&self, bill_id: &str) -> Result<()> {
        entities::unarchive(self.client, &Self::member(bill_id)).await
    }

    #[instrument(skip(self))]
    pub async fn pdf(&self, bill_id: &str) -> Result<Vec<u8>> {
        self.client.get_pdf(&Self::member(bill_id).join("pdf")).await
    }
}
