use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type Tag = Resource<TagAttributes>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttributes {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl TagAttributes {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl ResourceType for TagAttributes {
    const TYPE: &'static str = "tags";
}

/// API handler for tag endpoints
#[derive(Debug)]
pub struct TagsApi<'a> {
    pub(crate) client: &'a Client,
}

impl TagsApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Tag>> {
        self.client.list(&Collection::Tags.into(), parameters).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, tag_id: &str) -> Result<Tag> {
        self.client
            .get(&ParasutEndpoint::member(Collection::Tags, tag_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &TagAttributes) -> Result<Tag> {
        self.client
            .create(&Collection::Tags.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(&self, tag_id: &str, attributes: &TagAttributes) -> Result<Tag> {
        self.client
            .replace(
                &ParasutEndpoint::member(Collection::Tags, tag_id),
                tag_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, tag_id: &str) -> Result<()> {
        self.client
            .delete(&ParasutEndpoint::member(Collection::Tags, tag_id))
            .await
    }
}
