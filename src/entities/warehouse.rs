use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type Warehouse = Resource<WarehouseAttributes>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseAttributes {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl WarehouseAttributes {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl ResourceType for WarehouseAttributes {
    const TYPE: &'static str = "warehouses";
}

/// API handler for warehouse endpoints
#[derive(Debug)]
pub struct WarehousesApi<'a> {
    pub(crate) client: &'a Client,
}

impl WarehousesApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Warehouse>> {
        self.client
            .list(&Collection::Warehouses.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, warehouse_id: &str) -> Result<Warehouse> {
        self.client
            .get(&ParasutEndpoint::member(Collection::Warehouses, warehouse_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &WarehouseAttributes) -> Result<Warehouse> {
        self.client
            .create(&Collection::Warehouses.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(&self, warehouse_id: &str, attributes: &WarehouseAttributes) -> Result<Warehouse> {
        self.client
            .replace(
                &ParasutEndpoint::member(Collection::Warehouses, warehouse_id),
                warehouse_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, warehouse_id: &str) -> Result<()> {
        self.client
            .delete(&ParasutEndpoint::member(Collection::Warehouses, warehouse_id))
            .await
    }
}
