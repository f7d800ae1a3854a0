use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::Resource,
    error::Result,
    utils::date_format::datetime_option,
};

pub type TrackableJob = Resource<TrackableJobAttributes>;

/// A background job started by the API, e.g. issuing an e-invoice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackableJobAttributes {
    /// `running`, `done` or `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<OffsetDateTime>,
}

/// API handler for trackable job endpoints
#[derive(Debug)]
pub struct TrackableJobsApi<'a> {
    pub(crate) client: &'a Client,
}

impl TrackableJobsApi<'_> {
    #[instrument(skip(self))]
    pub async fn get(&self, job_id: &str) -> Result<TrackableJob> {
        self.client
            .get(&ParasutEndpoint::member(Collection::TrackableJobs, job_id))
            .await
    }
}
