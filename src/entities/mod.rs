use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::{Client, endpoints::ParasutEndpoint, error::Result};

pub mod account;
pub mod bank_fee;
pub mod contact;
pub mod e_document;
pub mod employee;
pub mod item_category;
pub mod me;
pub mod payment;
pub mod product;
pub mod purchase_bill;
pub mod salary;
pub mod sales_invoice;
pub mod sales_offer;
pub mod sharing;
pub mod shipment_document;
pub mod stock;
pub mod tag;
pub mod tax;
pub mod trackable_job;
pub mod transaction;
pub mod warehouse;
pub mod webhook;

/// Ties an attribute record to the type tag the API expects when it is written.
pub trait ResourceType {
    const TYPE: &'static str;
}

/// A JSON:API resource: `{id, type, attributes, relationships?}`.
///
/// `A` is the attribute record and `R` the relationship struct of the resource.
/// Resources without relationships use [`NoRelationships`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>, R: Deserialize<'de>"))]
pub struct Resource<A, R = NoRelationships> {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    pub attributes: A,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<R>,
}

/// Relationship struct for resources that expose none. Any relationships the server
/// sends anyway are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoRelationships {}

/// A reference to another resource by id and type. Never embeds the resource itself.
///
/// Written as the flat `{id, type}` form. Reads also accept the `{data: {id, type}}`
/// linkage; anything else, such as `{meta: {included: false}}`, reads as an empty
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationshipData {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl RelationshipData {
    #[must_use]
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
        }
    }

    /// Whether the reference points nowhere, e.g. because the server left the
    /// relationship unloaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

#[derive(Deserialize)]
struct Linkage {
    id: String,
    #[serde(rename = "type", default)]
    resource_type: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToOne {
    Flat(Linkage),
    Wrapped {
        #[serde(default)]
        data: Option<Linkage>,
    },
    Other(IgnoredAny),
}

impl ToOne {
    fn into_reference(self) -> Option<RelationshipData> {
        match self {
            Self::Flat(linkage) | Self::Wrapped { data: Some(linkage) } => {
                Some(RelationshipData {
                    id: linkage.id,
                    resource_type: linkage.resource_type,
                })
            }
            Self::Wrapped { data: None } | Self::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToMany {
    List(Vec<ToOne>),
    Wrapped {
        #[serde(default)]
        data: Vec<ToOne>,
    },
    Other(IgnoredAny),
}

impl ToMany {
    fn into_references(self) -> Vec<RelationshipData> {
        match self {
            Self::List(items) | Self::Wrapped { data: items } => {
                items.into_iter().filter_map(ToOne::into_reference).collect()
            }
            Self::Other(_) => Vec::new(),
        }
    }
}

impl<'de> Deserialize<'de> for RelationshipData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(ToOne::deserialize(deserializer)?
            .into_reference()
            .unwrap_or_default())
    }
}

/// Reads a to-one relationship in any linkage form; unloaded relationships read as `None`.
pub(crate) fn to_one<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<RelationshipData>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ToOne>::deserialize(deserializer)?
        .and_then(ToOne::into_reference)
        .filter(|reference| !reference.is_empty()))
}

/// Reads a to-many relationship given either as a bare array or wrapped in `data`.
pub(crate) fn to_many<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<RelationshipData>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ToMany>::deserialize(deserializer)?
        .map(ToMany::into_references)
        .unwrap_or_default())
}

/// A to-many relationship wrapped in its own `data` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, deserialize_with = "to_many", skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<RelationshipData>,
}

/// Page metadata of a list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
}

/// `{data: [...], meta?: {...}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// `{data: {...}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Request body for create, replace and status transitions.
#[derive(Debug, Serialize)]
pub(crate) struct WriteEnvelope<'a, A, R> {
    pub data: WriteData<'a, A, R>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WriteData<'a, A, R> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(rename = "type")]
    pub resource_type: &'a str,
    pub attributes: &'a A,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<&'a R>,
}

impl<'a, A, R> WriteEnvelope<'a, A, R> {
    pub(crate) fn new(
        id: Option<&'a str>,
        resource_type: &'a str,
        attributes: &'a A,
        relationships: Option<&'a R>,
    ) -> Self {
        Self {
            data: WriteData {
                id,
                resource_type,
                attributes,
                relationships,
            },
        }
    }
}

/// Parameters for listing a collection.
///
/// Zero page numbers and sizes and an empty sort are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParameters {
    pub page: u32,
    pub page_size: u32,
    /// Field to sort by, prefixed with `-` for descending order.
    pub sort: String,
    pub filter: BTreeMap<String, String>,
}

impl ListParameters {
    #[must_use]
    pub fn builder() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Adds a `filter[field]=value` entry.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// The query string pairs for these parameters.
    #[must_use]
    pub fn to_query(&self) -> BTreeMap<String, String> {
        let mut query = BTreeMap::new();
        if self.page > 0 {
            query.insert("page[number]".to_string(), self.page.to_string());
        }
        if self.page_size > 0 {
            query.insert("page[size]".to_string(), self.page_size.to_string());
        }
        if !self.sort.is_empty() {
            query.insert("sort".to_string(), self.sort.clone());
        }
        for (field, value) in &self.filter {
            query.insert(format!("filter[{field}]"), value.clone());
        }
        query
    }
}

/// Currencies accepted by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Trl,
    Usd,
    Eur,
    Gbp,
}

pub(crate) async fn archive(client: &Client, endpoint: &ParasutEndpoint) -> Result<()> {
    client.trigger_action(&endpoint.join("archive")).await
}

pub(crate) async fn unarchive(client: &Client, endpoint: &ParasutEndpoint) -> Result<()> {
    client.trigger_action(&endpoint.join("unarchive")).await
}

pub(crate) async fn cancel(client: &Client, endpoint: &ParasutEndpoint) -> Result<()> {
    client.trigger_action(&endpoint.join("cancel")).await
}

pub(crate) async fn recover(client: &Client, endpoint: &ParasutEndpoint) -> Result<()> {
    client.trigger_action(&endpoint.join("recover")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[derive(Debug, Default, Serialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn list_parameters_map_exactly() {
        let params = ListParameters::builder()
            .with_page(1)
            .with_page_size(10)
            .with_sort("name")
            .with_filter("status", "active");

        let expected: BTreeMap<String, String> = [
            ("page[number]", "1"),
            ("page[size]", "10"),
            ("sort", "name"),
            ("filter[status]", "active"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(params.to_query(), expected);
    }

    #[test]
    fn zero_and_empty_parameters_are_omitted() {
        assert!(ListParameters::default().to_query().is_empty());

        let query = ListParameters::builder().with_page_size(25).to_query();
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("page[size]").map(String::as_str), Some("25"));
        assert!(!query.contains_key("page[number]"));
        assert!(!query.contains_key("sort"));
    }

    #[test]
    fn write_envelope_omits_absent_relationships_and_id() {
        let attributes = Named {
            name: "New Account".to_string(),
        };
        let envelope = WriteEnvelope::<_, NoRelationships>::new(None, "accounts", &attributes, None);
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            json!({"data": {"type": "accounts", "attributes": {"name": "New Account"}}})
        );
        assert!(value["data"].get("relationships").is_none());
    }

    #[test]
    fn write_envelope_carries_id_and_relationships() {
        #[derive(Serialize)]
        struct Links {
            contact: RelationshipData,
        }
        let attributes = Named {
            name: "Invoice".to_string(),
        };
        let links = Links {
            contact: RelationshipData::new("9", "contacts"),
        };
        let envelope = WriteEnvelope::new(Some("5"), "sales_invoices", &attributes, Some(&links));
        let value: Value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(value["data"]["id"], "5");
        assert_eq!(value["data"]["type"], "sales_invoices");
        assert_eq!(
            value["data"]["relationships"]["contact"],
            json!({"id": "9", "type": "contacts"})
        );
    }

    #[test]
    fn list_response_meta_is_optional() {
        let response: ListResponse<Resource<Value>> =
            serde_json::from_str(r#"{"data":[]}"#).expect("deserialize");
        assert!(response.data.is_empty());
        assert!(response.meta.is_none());
    }

    #[test]
    fn unexpected_relationships_are_ignored() {
        let resource: Resource<Value> = serde_json::from_str(
            r#"{"id":"1","type":"tags","attributes":{},"relationships":{"anything":{"data":null}}}"#,
        )
        .expect("deserialize");
        assert_eq!(resource.relationships, Some(NoRelationships {}));
    }

    #[test]
    fn relationship_reads_every_linkage_form() {
        let flat: RelationshipData =
            serde_json::from_value(json!({"id": "7", "type": "contacts"})).expect("flat");
        assert_eq!(flat, RelationshipData::new("7", "contacts"));

        let wrapped: RelationshipData =
            serde_json::from_value(json!({"data": {"id": "7", "type": "contacts"}}))
                .expect("wrapped");
        assert_eq!(wrapped, flat);

        let unloaded: RelationshipData =
            serde_json::from_value(json!({"meta": {"included": false}})).expect("meta only");
        assert!(unloaded.is_empty());

        let many: Relationship = serde_json::from_value(json!({
            "data": [{"id": "1", "type": "tags"}, {"data": {"id": "2", "type": "tags"}}, null]
        }))
        .expect("to-many");
        assert_eq!(
            many.data,
            vec![RelationshipData::new("1", "tags"), RelationshipData::new("2", "tags")]
        );
    }

    #[test]
    fn unloaded_relationships_read_as_absent() {
        use sales_invoice::SalesInvoiceRelationships;

        let relationships: SalesInvoiceRelationships = serde_json::from_value(json!({
            "contact": {"data": {"id": "7", "type": "contacts"}},
            "details": {"data": [{"id": "11", "type": "sales_invoice_details"}]},
            "payments": {"meta": {"included": false}},
            "recurrence_plan": {"data": null},
            "active_e_document": {"meta": {"included": false}},
            "tags": null
        }))
        .expect("relationships should deserialize");

        assert_eq!(relationships.contact, Some(RelationshipData::new("7", "contacts")));
        assert_eq!(
            relationships.details,
            vec![RelationshipData::new("11", "sales_invoice_details")]
        );
        assert!(relationships.payments.is_empty());
        assert!(relationships.tags.is_empty());
        assert!(relationships.recurrence_plan.is_none());
        assert!(relationships.active_e_document.is_none());
    }

    macro_rules! assert_round_trip {
        ($alias:ty, $resource_type:literal, $attributes:expr) => {
            assert_round_trip!($alias, $resource_type, $attributes, None)
        };
        ($alias:ty, $resource_type:literal, $attributes:expr, $relationships:expr) => {{
            let resource: $alias = Resource {
                id: "42".to_string(),
                resource_type: $resource_type.to_string(),
                attributes: $attributes,
                relationships: $relationships,
            };
            let encoded = serde_json::to_string(&resource).expect("serialize");
            let decoded: $alias = serde_json::from_str(&encoded).expect("deserialize");
            assert_eq!(decoded, resource, "{} changed on the way back", $resource_type);
        }};
    }

    #[test]
    #[allow(clippy::too_many_lines)]
    fn every_resource_survives_a_round_trip() {
        use rust_decimal_macros::dec;
        use time::macros::{date, datetime};

        let stamp = Some(datetime!(2024-03-01 09:15:00 UTC));

        assert_round_trip!(
            account::Account,
            "accounts",
            account::AccountAttributes {
                iban: Some("TR330006100519786457841326".to_string()),
                balance: Some(dec!(1250.75)),
                last_adjustment_date: Some(date!(2024 - 02 - 29)),
                created_at: stamp,
                ..account::AccountAttributes::new(
                    "Main Bank",
                    Currency::Usd,
                    account::AccountType::Bank,
                )
            }
        );
        assert_round_trip!(
            account::AccountTransaction,
            "transactions",
            account::AccountTransactionAttributes {
                date: Some(date!(2024 - 03 - 01)),
                amount: dec!(-40.00),
                description: Some("Card fee".to_string()),
                ..Default::default()
            }
        );
        assert_round_trip!(
            bank_fee::BankFee,
            "bank_fees",
            bank_fee::BankFeeAttributes {
                description: "Wire fee".to_string(),
                currency: Currency::Eur,
                issue_date: Some(date!(2024 - 01 - 10)),
                net_total: dec!(12.50),
                ..Default::default()
            }
        );
        assert_round_trip!(
            contact::Contact,
            "contacts",
            contact::ContactAttributes {
                email: Some("billing@acme.example".to_string()),
                account_type: Some(contact::ContactAccountType::Customer),
                untrackable_balance: Some(dec!(0)),
                updated_at: stamp,
                ..contact::ContactAttributes::new("Acme", contact::ContactType::Company)
            }
        );
        assert_round_trip!(
            contact::ContactTransaction,
            "transactions",
            contact::ContactTransactionAttributes {
                date: Some(date!(2024 - 02 - 14)),
                amount: dec!(300),
                ..Default::default()
            }
        );
        assert_round_trip!(
            e_document::EArchive,
            "e_archives",
            e_document::EArchiveAttributes {
                note: Some("Thanks".to_string()),
                excise_duty_codes: vec!["0071".to_string()],
                internet_sale: Some(true),
                ..Default::default()
            }
        );
        assert_round_trip!(
            e_document::EInvoiceInbox,
            "e_invoice_inboxes",
            e_document::EInvoiceInboxAttributes {
                vkn: Some("1234567890".to_string()),
                created_at: stamp,
                ..Default::default()
            }
        );
        assert_round_trip!(
            e_document::EInvoice,
            "e_invoices",
            e_document::EInvoiceAttributes {
                vat_exemption_reason_code: Some("301".to_string()),
                shipment: Some(false),
                ..Default::default()
            }
        );
        assert_round_trip!(
            e_document::ESmm,
            "e_smms",
            e_document::ESmmAttributes {
                note: Some("Consulting".to_string()),
                ..Default::default()
            }
        );
        assert_round_trip!(
            employee::Employee,
            "employees",
            employee::EmployeeAttributes {
                email: Some("ayse@example.com".to_string()),
                archived: Some(false),
                ..employee::EmployeeAttributes::new("Ayse")
            }
        );
        assert_round_trip!(
            item_category::ItemCategory,
            "item_categories",
            item_category::ItemCategoryAttributes {
                bg_color: Some("#ffffff".to_string()),
                ..item_category::ItemCategoryAttributes::new("Hardware")
            }
        );
        assert_round_trip!(
            me::Me,
            "users",
            me::MeAttributes {
                name: "Deniz".to_string(),
                email: "deniz@example.com".to_string(),
                is_confirmed: true,
            },
            Some(me::MeRelationships {
                companies: Some(Relationship {
                    data: vec![RelationshipData::new("123", "companies")],
                }),
                profile: Some(RelationshipData::new("5", "profiles")),
                ..Default::default()
            })
        );
        assert_round_trip!(
            payment::Payment,
            "payments",
            payment::PaymentAttributes {
                currency: Some(Currency::Trl),
                ..payment::PaymentAttributes::new(date!(2024 - 03 - 02), dec!(99.90))
            }
        );
        assert_round_trip!(
            product::Product,
            "products",
            product::ProductAttributes {
                vat_rate: Some(dec!(20)),
                list_price: Some(dec!(149.99)),
                buying_currency: Some(Currency::Gbp),
                inventory_tracking: Some(true),
                ..product::ProductAttributes::new("SKU-1", "Widget")
            }
        );
        assert_round_trip!(
            product::InventoryLevel,
            "inventory_levels",
            product::InventoryLevelAttributes {
                stock_count: dec!(17),
                ..Default::default()
            }
        );
        assert_round_trip!(
            purchase_bill::PurchaseBill,
            "purchase_bills",
            purchase_bill::PurchaseBillAttributes {
                due_date: Some(date!(2024 - 04 - 01)),
                invoice_id: Some("A-77".to_string()),
                ..purchase_bill::PurchaseBillAttributes::new(date!(2024 - 03 - 01))
            },
            Some(purchase_bill::PurchaseBillRelationships {
                tags: vec![RelationshipData::new("3", "tags")],
                ..purchase_bill::PurchaseBillRelationships::for_supplier("9")
            })
        );
        assert_round_trip!(
            salary::Salary,
            "salaries",
            salary::SalaryAttributes {
                date: Some(date!(2024 - 01 - 31)),
                net_total: Some(dec!(25000)),
                ..Default::default()
            },
            Some(salary::SalaryRelationships::for_employee("4"))
        );
        assert_round_trip!(
            sales_invoice::SalesInvoice,
            "sales_invoices",
            sales_invoice::SalesInvoiceAttributes {
                invoice_id: Some(1001),
                currency: Some(Currency::Usd),
                exchange_rate: Some(dec!(32.1)),
                ..sales_invoice::SalesInvoiceAttributes::new(
                    sales_invoice::SalesInvoiceItemType::Invoice,
                    date!(2024 - 03 - 05),
                )
            },
            Some(sales_invoice::SalesInvoiceRelationships {
                details: vec![RelationshipData::new("11", "sales_invoice_details")],
                ..sales_invoice::SalesInvoiceRelationships::for_contact("7")
            })
        );
        assert_round_trip!(
            sales_offer::SalesOffer,
            "sales_offers",
            sales_offer::SalesOfferAttributes {
                issue_date: Some(date!(2024 - 02 - 20)),
                status: Some("pending".to_string()),
                gross_total: Some(dec!(1180)),
                ..Default::default()
            },
            Some(sales_offer::SalesOfferRelationships {
                contact: Some(RelationshipData::new("7", "contacts")),
                ..Default::default()
            })
        );
        assert_round_trip!(
            sharing::Sharing,
            "sharings",
            sharing::SharingAttributes {
                name: "Invoice link".to_string(),
                expires_at: stamp,
                ..Default::default()
            }
        );
        assert_round_trip!(
            shipment_document::ShipmentDocument,
            "shipment_documents",
            shipment_document::ShipmentDocumentAttributes {
                shipment_date: Some(date!(2024 - 03 - 03)),
                address: Some("Kadikoy, Istanbul".to_string()),
                ..Default::default()
            }
        );
        assert_round_trip!(
            stock::StockMovement,
            "stock_movements",
            stock::StockMovementAttributes {
                date: Some(date!(2024 - 03 - 04)),
                movement_type: stock::MovementType::Out,
                quantity: dec!(2.5),
                ..Default::default()
            }
        );
        assert_round_trip!(
            stock::StockUpdate,
            "stock_updates",
            stock::StockUpdateAttributes {
                unit_cost: Some(dec!(4.20)),
                ..stock::StockUpdateAttributes::new(date!(2024 - 03 - 04), dec!(40))
            }
        );
        assert_round_trip!(
            tag::Tag,
            "tags",
            tag::TagAttributes {
                color: Some("red".to_string()),
                ..tag::TagAttributes::new("urgent")
            }
        );
        assert_round_trip!(
            tax::Tax,
            "taxes",
            tax::TaxAttributes {
                date: Some(date!(2024 - 02 - 26)),
                gross_total: Some(dec!(5400)),
                ..Default::default()
            },
            Some(tax::TaxRelationships {
                payments: vec![RelationshipData::new("8", "payments")],
                ..Default::default()
            })
        );
        assert_round_trip!(
            trackable_job::TrackableJob,
            "trackable_jobs",
            trackable_job::TrackableJobAttributes {
                status: Some("error".to_string()),
                errors: vec!["VKN is invalid".to_string()],
                completed_at: stamp,
                ..Default::default()
            }
        );
        assert_round_trip!(
            transaction::Transaction,
            "transactions",
            transaction::TransactionAttributes {
                date: Some(date!(2024 - 03 - 06)),
                amount: dec!(75),
                ..Default::default()
            }
        );
        assert_round_trip!(
            warehouse::Warehouse,
            "warehouses",
            warehouse::WarehouseAttributes {
                city: Some("Izmir".to_string()),
                ..warehouse::WarehouseAttributes::new("Depot")
            }
        );
        assert_round_trip!(
            webhook::Webhook,
            "webhooks",
            webhook::WebhookAttributes {
                is_active: Some(true),
                ..webhook::WebhookAttributes::new("https://hooks.example.com/parasut", "sales_invoice")
            }
        );
    }
}
