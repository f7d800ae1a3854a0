use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{
        self, Currency, ListParameters, ListResponse, RelationshipData, Resource, ResourceType,
        payment::{self, Payment, PaymentAttributes},
    },
    error::Result,
    utils::date_format::{date_option, datetime_option},
};

pub type Salary = Resource<SalaryAttributes, SalaryRelationships>;

/// A salary accrued to an employee.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for SalaryAttributes {
    const TYPE: &'static str = "salaries";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRelationships {
    #[serde(
        default,
        deserialize_with = "crate::entities::to_one",
        skip_serializing_if = "Option::is_none",
    )]
    pub employee: Option<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_many",
        skip_serializing_if = "Vec::is_empty",
    )]
    pub payments: Vec<RelationshipData>,
    #[serde(
        default,
        deserialize_with = "crate::entities::to_many",
        skip_serializing_if = "Vec::is_empty",
    )]
    pub tags: Vec<RelationshipData>,
}

impl SalaryRelationships {
    #[must_use]
    pub fn for_employee(employee_id: impl Into<String>) -> Self {
        Self {
            employee: Some(RelationshipData::new(employee_id, "employees")),
            ..Default::default()
        }
    }
}

/// API handler for salary endpoints
#[derive(Debug)]
pub struct SalariesApi<'a> {
    pub(crate) client: &'a Client,
}

impl SalariesApi<'_> {
    fn member(salary_id: &str) -> ParasutEndpoint {
        ParasutEndpoint::member(Collection::Salaries, salary_id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<Salary>> {
        self.client
            .list(&Collection::Salaries.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, salary_id: &str) -> Result<Salary> {
        self.client.get(&Self::member(salary_id)).await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn create(
        &self,
        attributes: &SalaryAttributes,
        relationships: Option<&SalaryRelationships>,
    ) -> Result<Salary> {
        self.client
            .create(&Collection::Salaries.into(), attributes, relationships)
            .await
    }

    #[instrument(skip(self, attributes, relationships))]
    pub async fn update(
        &self,
        salary_id: &str,
        attributes: &SalaryAttributes,
        relationships: Option<&SalaryRelationships>,
    ) -> Result<Salary> {
        self.client
            .replace(&Self::member(salary_id), salary_id, attributes, relationships)
            .await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, salary_id: &str) -> Result<()> {
        entities::archive(self.client, &Self::member(salary_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unarchive(&self, salary_id: &str) -> Result<()> {
        entities::unarchive(self.client, &Self::member(salary_id)).await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create_payment(
        &self,
        salary_id: &str,
        attributes: &PaymentAttributes,
    ) -> Result<Payment> {
        payment::create_payment(self.client, &Self::member(salary_id), attributes).await
    }
}
