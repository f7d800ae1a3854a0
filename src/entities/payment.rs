use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Client,
    endpoints::ParasutEndpoint,
    entities::{Currency, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::{date_option, datetime_option},
};

pub type Payment = Resource<PaymentAttributes>;

/// A payment made against an invoice, bill, bank fee, salary or tax.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentAttributes {
    #[serde(default, with = "date_option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl PaymentAttributes {
    #[must_use]
    pub fn new(date: Date, amount: Decimal) -> Self {
        Self {
            date: Some(date),
            amount,
            ..Default::default()
        }
    }
}

impl ResourceType for PaymentAttributes {
    const TYPE: &'static str = "payments";
}

/// Posts a payment to the `payments` sub-resource of `member`.
pub(crate) async fn create_payment(
    client: &Client,
    member: &ParasutEndpoint,
    attributes: &PaymentAttributes,
) -> Result<Payment> {
    client
        .create(&member.join("payments"), attributes, None::<&NoRelationships>)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn payment_serializes_date_and_amount() {
        let attributes = PaymentAttributes {
            description: Some("Havale".to_string()),
            ..PaymentAttributes::new(date!(2024 - 05 - 10), dec!(150.75))
        };
        assert_eq!(
            serde_json::to_value(&attributes).expect("serialize"),
            json!({"date": "2024-05-10", "amount": "150.75", "description": "Havale"})
        );
    }
}
