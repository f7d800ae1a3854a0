use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type Webhook = Resource<WebhookAttributes>;

/// A subscription that makes the API call `url` when `event` happens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAttributes {
    pub url: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl WebhookAttributes {
    #[must_use]
    pub fn new(url: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            event: event.into(),
            ..Default::default()
        }
    }
}

impl ResourceType for WebhookAttributes {
    const TYPE: &'static str = "webhooks";
}

/// API handler for webhook endpoints
#[derive(Debug)]
pub struct WebhooksApi<'a> {
    pub(crate) client: &'a Client,
}

impl WebhooksApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Webhook>> {
        self.client
            .list(&Collection::Webhooks.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, webhook_id: &str) -> Result<Webhook> {
        self.client
            .get(&ParasutEndpoint::member(Collection::Webhooks, webhook_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &WebhookAttributes) -> Result<Webhook> {
        self.client
            .create(&Collection::Webhooks.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(&self, webhook_id: &str, attributes: &WebhookAttributes) -> Result<Webhook> {
        self.client
            .replace(
                &ParasutEndpoint::member(Collection::Webhooks, webhook_id),
                webhook_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, webhook_id: &str) -> Result<()> {
        self.client
            .delete(&ParasutEndpoint::member(Collection::Webhooks, webhook_id))
            .await
    }
}
