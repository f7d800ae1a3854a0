use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::Collection,
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type Sharing = Resource<SharingAttributes>;

/// A public link to a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingAttributes {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for SharingAttributes {
    const TYPE: &'static str = "sharings";
}

/// API handler for sharing endpoints
#[derive(Debug)]
pub struct SharingsApi<'a> {
    pub(crate) client: &'a Client,
}

impl SharingsApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Sharing>> {
        self.client
            .list(&Collection::Sharings.into(), parameters)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &SharingAttributes) -> Result<Sharing> {
        self.client
            .create(&Collection::Sharings.into(), attributes, None::<&NoRelationships>)
            .await
    }
}
