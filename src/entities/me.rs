use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Client,
    endpoints::ParasutEndpoint,
    entities::{Relationship, RelationshipData, Resource},
    error::Result,
};

/// The authenticated user.
pub type Me = Resource<MeAttributes, MeRelationships>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_confirmed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_roles: Option<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companies: Option<Relationship>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_one",
        skip_serializing_if = "Option::is_none",
    )]
    pub profile: Option<RelationshipData>,
}

/// API handler for the current user
#[derive(Debug)]
pub struct MeApi<'a> {
    pub(crate) client: &'a Client,
}

impl MeApi<'_> {
    /// Fetch the current user. `include` names relationships to expand, e.g.
    /// `"companies"`; an empty string sends no `include` parameter.
    #[instrument(skip(self))]
    pub async fn get(&self, include: &str) -> Result<Me> {
        let mut query = BTreeMap::new();
        if !include.is_empty() {
            query.insert("include".to_string(), include.to_string());
        }
        self.client
            .get_with_query(&ParasutEndpoint::Me, &query)
            .await
    }
}
