//! Electronic documents: e-archive and e-invoice records, the e-invoice inbox and
//! self-employment receipts (e-SMM).

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Client,
    endpoints::{Collection, ParasutEndpoint},
    entities::{ListParameters, ListResponse, NoRelationships, Resource, ResourceType},
    error::Result,
    utils::date_format::datetime_option,
};

pub type EArchive = Resource<EArchiveAttributes>;
pub type EInvoiceInbox = Resource<EInvoiceInboxAttributes>;
pub type EInvoice = Resource<EInvoiceAttributes>;
pub type ESmm = Resource<ESmmAttributes>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EArchiveAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_withholding_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_exemption_reason_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_exemption_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excise_duty_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_sale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment: Option<bool>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

/// An entry of the e-invoice inbox, identifying a registered e-invoice user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EInvoiceInboxAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vkn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_uuid: Option<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EInvoiceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_withholding_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_exemption_reason_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_exemption_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excise_duty_codes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_sale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment: Option<bool>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for EInvoiceAttributes {
    const TYPE: &'static str = "e_invoices";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ESmmAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_withholding_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_exemption_reason_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_exemption_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excise_duty_codes: Vec<String>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "datetime_option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<OffsetDateTime>,
}

impl ResourceType for ESmmAttributes {
    const TYPE: &'static str = "e_smms";
}

/// API handler for e-archive endpoints
#[derive(Debug)]
pub struct EArchivesApi<'a> {
    pub(crate) client: &'a Client,
}

impl EArchivesApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<EArchive>> {
        self.client
            .list(&Collection::EArchives.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, e_archive_id: &str) -> Result<EArchive> {
        self.client
            .get(&ParasutEndpoint::member(Collection::EArchives, e_archive_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn pdf(&self, e_archive_id: &str) -> Result<Vec<u8>> {
        self.client
            .get_pdf(&ParasutEndpoint::member_action(Collection::EArchives, e_archive_id, "pdf"))
            .await
    }
}

/// API handler for the e-invoice inbox
#[derive(Debug)]
pub struct EInvoiceInboxesApi<'a> {
    pub(crate) client: &'a Client,
}

impl EInvoiceInboxesApi<'_> {
    /// Look up e-invoice users, typically with a `vkn` filter.
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<EInvoiceInbox>> {
        self.client
            .list(&Collection::EInvoiceInboxes.into(), parameters)
            .await
    }
}

/// API handler for e-invoice endpoints
#[derive(Debug)]
pub struct EInvoicesApi<'a> {
    pub(crate) client: &'a Client,
}

impl EInvoicesApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<EInvoice>> {
        self.client
            .list(&Collection::EInvoices.into(), parameters)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, e_invoice_id: &str) -> Result<EInvoice> {
        self.client
            .get(&ParasutEndpoint::member(Collection::EInvoices, e_invoice_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &EInvoiceAttributes) -> Result<EInvoice> {
        self.client
            .create(&Collection::EInvoices.into(), attributes, None::<&NoRelationships>)
            .await
    }

    #[instrument(skip(self))]
    pub async fn pdf(&self, e_invoice_id: &str) -> Result<Vec<u8>> {
        self.client
            .get_pdf(&ParasutEndpoint::member_action(Collection::EInvoices, e_invoice_id, "pdf"))
            .await
    }
}

/// API handler for e-SMM endpoints
#[derive(Debug)]
pub struct ESmmsApi<'a> {
    pub(crate) client: &'a Client,
}

impl ESmmsApi<'_> {
    #[instrument(skip(self))]
    pub async fn list(&self, parameters: &ListParameters) -> Result<ListResponse<ESmm>> {
        self.client.list(&Collection::ESmms.into(), parameters).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, e_smm_id: &str) -> Result<ESmm> {
        self.client
            .get(&ParasutEndpoint::member(Collection::ESmms, e_smm_id))
            .await
    }

    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: &ESmmAttributes) -> Result<ESmm> {
        self.client
            .create(&Collection::ESmms.into(), attributes, None::<&NoRelationships>)
            .await
    }

    /// The e-SMM PDF lives at `/e_smms/{id}.pdf` rather than under a `pdf` sub-path.
    #[instrument(skip(self))]
    pub async fn pdf(&self, e_smm_id: &str) -> Result<Vec<u8>> {
        let endpoint = ParasutEndpoint::Custom(vec![
            Collection::ESmms.as_str().to_string(),
            format!("{e_smm_id}.pdf"),
        ]);
        self.client.get_pdf(&endpoint).await
    }
}
