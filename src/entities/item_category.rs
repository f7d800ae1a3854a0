use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type ItemCategory = Resource<ItemCategoryAttributes>;

/// A category used to group products, contacts or expenses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCategoryAttributes {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ItemCategoryAttributes {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl ResourceType for ItemCategoryAttributes {
    const TYPE: &'static str = "item_categories";
}

/// API handler for item category endpoints
#[derive(Debug)]
pub struct ItemCategoriesApi<'a> {
    pub(crate) client: &'a Client,
}

impl ItemCategoriesApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<ItemCategory>> {
        self.client
            .list(&Collection::ItemCategories.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, category_id: &str) -> Result<ItemCategory> {
        self.client
            .get(&ParasutEndpoint::member(Collection::ItemCategories, category_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &ItemCategoryAttributes) -> Result<ItemCategory> {
        self.client
            .create(&Collection::ItemCategories.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(
        &self,
        category_id: &str,
        attributes: &ItemCategoryAttributes,
    ) -> Result<ItemCategory> {
        self.client
            .replace(
                &ParasutEndpoint::member(Collection::ItemCategories, category_id),
                category_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, category_id: &str) -> Result<()> {
        self.client
            .delete(&ParasutEndpoint::member(Collection::ItemCategories, category_id))
            .await
    }
}
