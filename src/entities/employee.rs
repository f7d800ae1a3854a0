use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{self, ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type Employee = Resource<EmployeeAttributes>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAttributes {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl EmployeeAttributes {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl ResourceType for EmployeeAttributes {
    const TYPE: &'static str = "employees";
}

/// API handler for employee endpoints
#[derive(Debug)]
pub struct EmployeesApi<'a> {
    pub(crate) client: &'a Client,
}

impl EmployeesApi<'_> {
    fn member(employee_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::Employees, employee_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Employee>> {
        self.client
            .list(&Collection::Employees.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, employee_id: &str) -> Result<Employee> {
        self.client.get(&Self::member(employee_id)).await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &EmployeeAttributes) -> Result<Employee> {
        self.client
            .create(&Collection::Employees.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn update(&self, employee_id: &str, attributes: &EmployeeAttributes) -> Result<Employee> {
        self.client
            .replace(
                &Self::member(employee_id),
                employee_id,
                attributes,
                None::<&NoRelationships>,
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, employee_id: &str) -> Result<()> {
        entities::archive(self.client, &Self::member(employee_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unarchive(&self, employee_id: &str) -> Result<()> {
        entities::unarchive(self.client, &Self::member(employee_id)).await
    }
}
