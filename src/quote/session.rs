//! Quote form session
//!
//! [`QuoteSession`] drives one quote form from start to finish:
//! - [`hydrate`](QuoteSession::hydrate) loads the dropdown options
//! - region selections cascade into their commune lists
//! - the contact e-mail is checked against registered users
//! - [`submit`](QuoteSession::submit) composes the request and posts it only
//!   when the form is valid
//!
//! Directory failures never abort the session: an option list that cannot be
//! loaded stays empty and the failure is logged.

use crate::config::QuoteSection;
use crate::directory::{DirectoryClient, DirectoryEntry, DirectoryList};
use crate::error::QuoteResult;
use crate::quote::form::{FormErrors, QuoteForm};
use crate::quote::request::compose;
use crate::quote::submit::QuoteSubmitter;
use crate::submission_span;
use serde::Serialize;
use tracing::{info, warn, Instrument};

/// Dropdown options for the quote form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormOptions {
    pub regions: Vec<DirectoryEntry>,
    pub freight_types: Vec<DirectoryEntry>,
    pub container_types: Vec<DirectoryEntry>,
    pub truck_types: Vec<DirectoryEntry>,
    pub equipment: Vec<DirectoryEntry>,
    pub origin_communes: Vec<DirectoryEntry>,
    pub destination_communes: Vec<DirectoryEntry>,
}

impl FormOptions {
    pub fn get(&self, list: DirectoryList) -> &[DirectoryEntry] {
        match list {
            DirectoryList::Regions => &self.regions,
            DirectoryList::FreightTypes => &self.freight_types,
            DirectoryList::ContainerTypes => &self.container_types,
            DirectoryList::TruckTypes => &self.truck_types,
            DirectoryList::Equipment => &self.equipment,
        }
    }

    fn set(&mut self, list: DirectoryList, entries: Vec<DirectoryEntry>) {
        let slot = match list {
            DirectoryList::Regions => &mut self.regions,
            DirectoryList::FreightTypes => &mut self.freight_types,
            DirectoryList::ContainerTypes => &mut self.container_types,
            DirectoryList::TruckTypes => &mut self.truck_types,
            DirectoryList::Equipment => &mut self.equipment,
        };
        *slot = entries;
    }
}

/// Which lists loaded during hydration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationSummary {
    pub loaded: Vec<DirectoryList>,
    pub failed: Vec<DirectoryList>,
}

impl HydrationSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Whether the contact e-mail belongs to a registered user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Registered,
    Unregistered,
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The backend accepted the quote; navigate to `redirect`
    Accepted { redirect: String },
    /// The form is invalid and nothing was sent
    Invalid(FormErrors),
}

/// One quote form's lifetime
pub struct QuoteSession<D, S> {
    directory: D,
    submitter: S,
    quote: QuoteSection,
    options: FormOptions,
    contact_status: Option<ContactStatus>,
    submitted: bool,
}

impl<D, S> QuoteSession<D, S>
where
    D: DirectoryClient,
    S: QuoteSubmitter,
{
    pub fn new(directory: D, submitter: S, quote: QuoteSection) -> Self {
        Self {
            directory,
            submitter,
            quote,
            options: FormOptions::default(),
            contact_status: None,
            submitted: false,
        }
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Set once a submission was attempted with an invalid form, so the
    /// presentation layer can start showing field errors
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn contact_status(&self) -> Option<ContactStatus> {
        self.contact_status
    }

    /// True once the contact e-mail was checked and is not registered
    pub fn needs_contact_registration(&self) -> bool {
        self.contact_status == Some(ContactStatus::Unregistered)
    }

    /// Load every static option list, one request at a time
    pub async fn hydrate(&mut self) -> HydrationSummary {
        let mut summary = HydrationSummary::default();

        for list in DirectoryList::ALL {
            match self.directory.list(list).await {
                Ok(entries) => {
                    self.options.set(list, entries);
                    summary.loaded.push(list);
                }
                Err(e) => {
                    warn!(list = %list, error = %e, "Failed to load directory list");
                    self.options.set(list, Vec::new());
                    summary.failed.push(list);
                }
            }
        }

        info!(
            loaded = summary.loaded.len(),
            failed = summary.failed.len(),
            "Quote form options hydrated"
        );
        summary
    }

    /// Load the origin communes for `region_id`
    pub async fn select_origin_region(&mut self, region_id: &str) -> &[DirectoryEntry] {
        self.options.origin_communes = self.load_communes(region_id).await;
        &self.options.origin_communes
    }

    /// Load the destination communes for `region_id`
    pub async fn select_destination_region(&mut self, region_id: &str) -> &[DirectoryEntry] {
        self.options.destination_communes = self.load_communes(region_id).await;
        &self.options.destination_communes
    }

    async fn load_communes(&self, region_id: &str) -> Vec<DirectoryEntry> {
        match self.directory.communes(region_id).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(region_id = %region_id, error = %e, "Failed to load communes");
                Vec::new()
            }
        }
    }

    /// Check whether `email` belongs to a registered user.
    ///
    /// A failed lookup counts as unregistered so the form offers to add the
    /// contact instead of blocking.
    pub async fn check_contact_email(&mut self, email: &str) -> ContactStatus {
        let email = email.trim();
        let status = if email.is_empty() {
            ContactStatus::Unregistered
        } else {
            match self.directory.user_exists(email).await {
                Ok(true) => ContactStatus::Registered,
                Ok(false) => ContactStatus::Unregistered,
                Err(e) => {
                    warn!(error = %e, "Contact lookup failed, treating as unregistered");
                    ContactStatus::Unregistered
                }
            }
        };

        self.contact_status = Some(status);
        status
    }

    /// Compose and send the quote if the form is valid
    pub async fn submit(&mut self, form: &QuoteForm) -> QuoteResult<SubmissionOutcome> {
        let request = match compose(form, &self.quote.obj_type) {
            Ok(request) => request,
            Err(errors) => {
                info!(problems = errors.len(), "Quote form invalid, not submitting");
                self.submitted = true;
                return Ok(SubmissionOutcome::Invalid(errors));
            }
        };

        self.submitter
            .submit(&request)
            .instrument(submission_span!(obj_type = %request.obj_type))
            .await?;

        Ok(SubmissionOutcome::Accepted {
            redirect: self.quote.success_route.clone(),
        })
    }
}
