use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::Collection,
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::{
        date_format::{date_option, datetime_option},
        serde_helpers::null_as_default,
    },
};

pub type StockMovement = Resource<StockMovementAttributes>;
pub type StockUpdate = Resource<StockUpdateAttributes>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    #[default]
    In,
    Out,
}

/// A stock entry or exit, as recorded by invoices, bills and manual updates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockMovementAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub movement_type: MovementType,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

/// A manual correction of the stock count.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockUpdateAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default)]
    pub stock_count: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl StockUpdateAttributes {
    #[must_use]
    pub fn new(date: Date, stock_count: Decimal) -> Self {
        Self {
            date: Some(date),
            stock_count,
            ..Default::default()
        }
    }
}

impl ResourceType for StockUpdateAttributes {
    const TYPE: &'static str = "stock_updates";
}

/// API handler for stock movement endpoints
#[derive(Debug)]
pub struct StockMovementsApi<'a> {
    pub(crate) client: &'a Client,
}

impl StockMovementsApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<StockMovement>> {
        self.client
            .list(&Collection::StockMovements.into(), parameters)
            .await
    }
}

/// API handler for stock update endpoints
#[derive(Debug)]
pub struct StockUpdatesApi<'a> {
    pub(crate) client: &'a Client,
}

impl StockUpdatesApi<'_> {
    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &StockUpdateAttributes) -> Result<StockUpdate> {
        self.client
            .create(&Collection::StockUpdates.into(), attributes, None::<&NoRelationships>)
            .await
    }
}
