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

pub type SalesInvoice = Resource<SalesInvoiceAttributes, SalesInvoiceRelationships>;

/// What a sales invoice record represents.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalesInvoiceItemType {
    #[default]
    Invoice,
    Estimate,
    Cancelled,
    RecurringInvoice,
    RecurringEstimate,
    Refund,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesInvoiceAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_type: SalesInvoiceItemType,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<Date>,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withholding_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_withholding_rate: Option<Decimal>,
    /// `percentage` or `amount`
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
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_abroad: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub order_date: Option<Date>,

    // Totals and status are computed by the API
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

impl SalesInvoiceAttributes {
    #[must_use]
    pub fn new(item_type: SalesInvoiceItemType, issue_date: Date) -> Self {
        Self {
            item_type,
            issue_date: Some(issue_date),
            ..Default::default()
        }
    }
}

impl ResourceType for SalesInvoiceAttributes {
    const TYPE: &'static str = "sales_invoices";
}

/// Resources a sales invoice links to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesInvoiceRelationships {
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
    pub payments: Vec<RelationshipData>,
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
    pub sharings: Vec<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_one",
        skip_serializing_if = "Option::is_none",
    )]
    pub recurrence_plan: Option<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_one",
        skip_serializing_if = "Option::is_none",
    )]
    pub active_e_document: Option<RelationshipData>,
}

impl SalesInvoiceRelationships {
    /// Relationships pointing at the invoiced contact.
    #[must_use]
    pub fn for_contact(contact_id: impl Into<String>) -> Self {
        Self {
            contact: Some(RelationshipData::new(contact_id, "contacts")),
            ..Default::default()
        }
    }
}

/// API handler for sales invoice endpoints
#[derive(Debug)]
pub struct SalesInvoicesApi<'a> {
    pub(crate) client: &'a Client,
}

impl SalesInvoicesApi<'_> {
    fn member(invoice_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::SalesInvoices, invoice_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<SalesInvoice>> {
        self.client
            .list(&Collection::SalesInvoices.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, invoice_id: &str) -> Result<SalesInvoice> {
        self.client.get(&Self::member(invoice_id)).await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn create(
        &self,
        attributes: &SalesInvoiceAttributes,
        relationships: Option<&SalesInvoiceRelationships>,
    ) -> Result<SalesInvoice> {
        self.client
            .create(&Collection::SalesInvoices.into(), attributes, relationships)
            .await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn update(
        &self,
        invoice_id: &str,
        attributes: &SalesInvoiceAttributes,
        relationships: Option<&SalesInvoiceRelationships>,
    ) -> Result<SalesInvoice> {
        self.client
            .replace(&Self::member(invoice_id), invoice_id, attributes, relationships)
            .await
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, invoice_id: &str) -> Result<()> {
        entities::cancel(self.client, &Self::member(invoice_id)).await
    }

    #[instrument(skip(self))]
    pub async fn recover(&self, invoice_id: &str) -> Result<()> {
        entities::recover(self.client, &Self::member(invoice_id)).await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, invoice_id: &str) -> Result<()> {
        entities::archive(self.client, &Self::member(invoice_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unarchive(&self, invoice_id: &str) -> Result<()> {
        entities::unarchive(self.client, &Self::member(invoice_id)).await
    }

    /// Record a collection against the invoice.
    #[instrument(skip(self, attributes))]
    pub async fn create_payment(
        &self,
        invoice_id: &str,
        attributes: &PaymentAttributes,
    ) -> Result<Payment> {
        payment::create_payment(self.client, &Self::member(invoice_id), attributes).await
    }

    /// Turn an estimate into an invoice and return the converted record.
    #[instrument(skip(self))]
    pub async fn convert_to_invoice(&self, invoice_id: &str) -> Result<SalesInvoice> {
        self.client
            .action(
                &Self::member(invoice_id).join("convert_to_invoice"),
                &serde_json::Map::new(),
            )
            .await
    }

    /// Fetch the rendered PDF of the invoice.
    #[instrument(skip(self))]
    pub async fn pdf(&self, invoice_id: &str) -> Result<Vec<u8>> {
        self.client
            .get_pdf(&Self::member(invoice_id).join("pdf"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn decodes_invoice_with_relationships() {
        let invoice: SalesInvoice = serde_json::from_value(json!({
            "id": "100",
            "type": "sales_invoices",
            "attributes": {
                "item_type": "recurring_invoice",
                "issue_date": "2024-06-01",
                "net_total": 118.0,
                "invoice_id": 42
            },
            "relationships": {
                "contact": {"id": "5", "type": "contacts"},
                "tags": [{"id": "1", "type": "tags"}, {"id": "2", "type": "tags"}]
            }
        }))
        .expect("invoice should deserialize");

        assert_eq!(invoice.attributes.item_type, SalesInvoiceItemType::RecurringInvoice);
        assert_eq!(invoice.attributes.issue_date, Some(date!(2024 - 06 - 01)));
        assert_eq!(invoice.attributes.net_total, Some(dec!(118)));
        assert_eq!(invoice.attributes.invoice_id, Some(42));

        let relationships = invoice.relationships.expect("relationships present");
        assert_eq!(
            relationships.contact,
            Some(RelationshipData::new("5", "contacts"))
        );
        assert_eq!(relationships.tags.len(), 2);
        assert!(relationships.payments.is_empty());
    }

    #[test]
    fn relationships_only_serialize_what_is_set() {
        assert_eq!(
            serde_json::to_value(SalesInvoiceRelationships::for_contact("5")).expect("serialize"),
            json!({"contact": {"id": "5", "type": "contacts"}})
        );
    }

    #[test]
    fn invoice_round_trips() {
        let invoice = SalesInvoice {
            id: "1".to_string(),
            resource_type: "sales_invoices".to_string(),
            attributes: SalesInvoiceAttributes {
                description: Some("Danismanlik".to_string()),
                currency: Some(Currency::Eur),
                exchange_rate: Some(dec!(35.1)),
                ..SalesInvoiceAttributes::new(SalesInvoiceItemType::Estimate, date!(2024 - 01 - 15))
            },
            relationships: Some(SalesInvoiceRelationships::for_contact("9")),
        };
        let decoded: SalesInvoice =
            serde_json::from_str(&serde_json::to_string(&invoice).expect("serialize"))
                .expect("deserialize");
        assert_eq!(decoded, invoice);
    }
}
