use std::fmt;
use url::Url;

use crate::error::{Error, Result};

/// The REST collections exposed under a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Accounts,
    BankFees,
    Contacts,
    Products,
    SalesInvoices,
    PurchaseBills,
    Employees,
    Salaries,
    Taxes,
    Tags,
    Warehouses,
    StockMovements,
    StockUpdates,
    Webhooks,
    EArchives,
    EInvoiceInboxes,
    EInvoices,
    ESmms,
    ItemCategories,
    SalesOffers,
    Sharings,
    ShipmentDocuments,
    TrackableJobs,
    Transactions,
}

impl Collection {
    /// The path segment of the collection, which doubles as its resource type tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::BankFees => "bank_fees",
            Self::Contacts => "contacts",
            Self::Products => "products",
            Self::SalesInvoices => "sales_invoices",
            Self::PurchaseBills => "purchase_bills",
            Self::Employees => "employees",
            Self::Salaries => "salaries",
            Self::Taxes => "taxes",
            Self::Tags => "tags",
            Self::Warehouses => "warehouses",
            Self::StockMovements => "stock_movements",
            Self::StockUpdates => "stock_updates",
            Self::Webhooks => "webhooks",
            Self::EArchives => "e_archives",
            Self::EInvoiceInboxes => "e_invoice_inboxes",
            Self::EInvoices => "e_invoices",
            Self::ESmms => "e_smms",
            Self::ItemCategories => "item_categories",
            Self::SalesOffers => "sales_offers",
            Self::Sharings => "sharings",
            Self::ShipmentDocuments => "shipment_documents",
            Self::TrackableJobs => "trackable_jobs",
            Self::Transactions => "transactions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed representation of Parasut API endpoints.
///
/// Every endpoint except [`ParasutEndpoint::Me`] lives under the company scope, so it
/// resolves to `{base}/{company_id}/...`. The current user is addressed from the API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParasutEndpoint {
    /// `/{collection}`
    Collection(Collection),
    /// `/{collection}/{id}`
    Member(Collection, String),
    /// `/{collection}/{id}/{action}`, used for sub-resources and PATCH actions.
    MemberAction(Collection, String, &'static str),
    /// `/me`, outside the company scope.
    Me,
    // Company scoped path built from raw components
    Custom(Vec<String>),
}

impl ParasutEndpoint {
    #[must_use]
    pub fn member(collection: Collection, id: impl Into<String>) -> Self {
        Self::Member(collection, id.into())
    }

    #[must_use]
    pub fn member_action(collection: Collection, id: impl Into<String>, action: &'static str) -> Self {
        Self::MemberAction(collection, id.into(), action)
    }

    /// The same endpoint with `action` appended, e.g. `/sales_invoices/1` to
    /// `/sales_invoices/1/archive`. Endpoints that are not members become custom paths.
    #[must_use]
    pub fn join(&self, action: &'static str) -> Self {
        match self {
            Self::Member(collection, id) => Self::MemberAction(*collection, id.clone(), action),
            other => {
                let mut segments = other.segments();
                segments.push(action.to_string());
                Self::Custom(segments)
            }
        }
    }

    fn is_company_scoped(&self) -> bool {
        !matches!(self, Self::Me)
    }

    fn segments(&self) -> Vec<String> {
        match self {
            Self::Collection(collection) => vec![collection.as_str().to_string()],
            Self::Member(collection, id) => vec![collection.as_str().to_string(), id.clone()],
            Self::MemberAction(collection, id, action) => vec![
                collection.as_str().to_string(),
                id.clone(),
                (*action).to_string(),
            ],
            Self::Me => vec!["me".to_string()],
            Self::Custom(components) => components.clone(),
        }
    }

    /// The path below the company scope, e.g. `/accounts/1`.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments()
            .iter()
            .fold(String::new(), |path, segment| path + "/" + segment)
    }

    /// Resolves the endpoint against `base_url`. Path segments are percent-encoded.
    pub fn to_url(&self, base_url: &str, company_id: u64) -> Result<Url> {
        let invalid = || Error::InvalidEndpoint(format!("{base_url}{}", self.path()));
        let mut url = Url::parse(base_url).map_err(|_| invalid())?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| invalid())?;
            segments.pop_if_empty();
            if self.is_company_scoped() {
                segments.push(&company_id.to_string());
            }
            segments.extend(self.segments());
        }
        Ok(url)
    }
}

impl fmt::Display for ParasutEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<Collection> for ParasutEndpoint {
    fn from(collection: Collection) -> Self {
        Self::Collection(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.parasut.com/v4";

    #[test]
    fn collection_is_company_scoped() {
        let url = ParasutEndpoint::Collection(Collection::Accounts)
            .to_url(BASE, 123)
            .expect("valid url");
        assert_eq!(url.as_str(), "https://api.parasut.com/v4/123/accounts");
    }

    #[test]
    fn member_and_action_paths() {
        let member = ParasutEndpoint::member(Collection::SalesInvoices, "42");
        assert_eq!(
            member.to_url(BASE, 1).expect("valid url").as_str(),
            "https://api.parasut.com/v4/1/sales_invoices/42"
        );
        assert_eq!(
            member.join("convert_to_invoice").to_url(BASE, 1).expect("valid url").as_str(),
            "https://api.parasut.com/v4/1/sales_invoices/42/convert_to_invoice"
        );
    }

    #[test]
    fn me_skips_company_scope() {
        let url = ParasutEndpoint::Me.to_url(BASE, 123).expect("valid url");
        assert_eq!(url.as_str(), "https://api.parasut.com/v4/me");
    }

    #[test]
    fn custom_path_keeps_dotted_segment() {
        let endpoint = ParasutEndpoint::Custom(vec!["e_smms".to_string(), "7.pdf".to_string()]);
        assert_eq!(endpoint.path(), "/e_smms/7.pdf");
        assert_eq!(
            endpoint.to_url(BASE, 9).expect("valid url").as_str(),
            "https://api.parasut.com/v4/9/e_smms/7.pdf"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let url = ParasutEndpoint::Collection(Collection::Tags)
            .to_url("http://localhost:8080/v4/", 5)
            .expect("valid url");
        assert_eq!(url.as_str(), "http://localhost:8080/v4/5/tags");
    }

    #[test]
    fn ids_are_percent_encoded() {
        let url = ParasutEndpoint::member(Collection::Contacts, "a b/c")
            .to_url(BASE, 1)
            .expect("valid url");
        assert_eq!(url.as_str(), "https://api.parasut.com/v4/1/contacts/a%20b%2Fc");
    }

    #[test]
    fn unparsable_base_is_an_invalid_endpoint() {
        let result = ParasutEndpoint::Collection(Collection::Tags).to_url("not a url", 1);
        assert!(matches!(result, Err(Error::InvalidEndpoint(_))));
    }
}
