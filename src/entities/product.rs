use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{Currency, ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type Product = Resource<ProductAttributes>;
pub type InventoryLevel = Resource<InventoryLevelAttributes>;

/// A product or service that can appear on invoice lines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_excise_duty_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_excise_duty_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communications_tax_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buying_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buying_currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_tracking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_stock_count: Option<Decimal>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ProductAttributes {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl ResourceType for ProductAttributes {
    const TYPE: &'static str = "products";
}

/// Stock held for a product in one warehouse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryLevelAttributes {
    #[serde(default)]
    pub stock_count: Decimal,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

/// API handler for product endpoints
#[derive(Debug)]
pub struct ProductsApi<'a> {
    pub(crate) client: &'a Client,
}

impl ProductsApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Product>> {
        self.client
            .list(&Collection::Products.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, product_id: &str) -> Result<Product> {
        self.client
            .get(&ParasutEndpoint::member(Collection::Products, product_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &ProductAttributes) -> Result<Product> {
        self.client
            .create(&Collection::Products.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(&self, product_id: &str, attributes: &ProductAttributes) -> Result<Product> {
        self.client
            .replace(
                &ParasutEndpoint::member(Collection::Products, product_id),
                product_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, product_id: &str) -> Result<()> {
        self.client
            .delete(&ParasutEndpoint::member(Collection::Products, product_id))
            .await
    }

    /// Per-warehouse stock counts of a product.
    #[instrument(skip(self))]
    pub async fn inventory_levels(&self, product_id: &str) -> Result<ListResponse<InventoryLevel>> {
        self.client
            .list(
                &ParasutEndpoint::member_action(Collection::Products, product_id, "inventory_levels"),
                &ListParameters::default(),
            )
            .await
    }
}
