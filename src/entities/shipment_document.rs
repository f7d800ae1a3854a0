use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::{date_option, datetime_option},
};

pub type ShipmentDocument = Resource<ShipmentDocumentAttributes>;

/// A waybill accompanying shipped goods.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDocumentAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_included: Option<bool>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for ShipmentDocumentAttributes {
    const TYPE: &'static str = "shipment_documents";
}

/// API handler for shipment document endpoints
#[derive(Debug)]
pub struct ShipmentDocumentsApi<'a> {
    pub(crate) client: &'a Client,
}

impl ShipmentDocumentsApi<'_> {
    fn member(document_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::ShipmentDocuments, document_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<ShipmentDocument>> {
        self.client
            .list(&Collection::ShipmentDocuments.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, document_id: &str) -> Result<ShipmentDocument> {
        self.client.get(&Self::member(document_id)).await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &ShipmentDocumentAttributes) -> Result<ShipmentDocument> {
        self.client
            .create(&Collection::ShipmentDocuments.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(
        &self,
        document_id: &str,
        attributes: &ShipmentDocumentAttributes,
    ) -> Result<ShipmentDocument> {
        self.client
            .replace(
                &Self::member(document_id),
                document_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, document_id: &str) -> Result<()> {
        self.client.delete(&Self::member(document_id)).await
    }
}
