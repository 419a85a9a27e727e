//! The quote payload posted to the backend
//!
//! [`compose`] is the only way to build a [`QuoteRequest`]: it validates the
//! form and joins the composite inputs into the backend's field layout. Once
//! built, a request is never modified.

use crate::quote::form::{present, FormErrors, QuoteForm};
use crate::rut;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Timestamp layout for waypoint dates
const WAYPOINT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Prefix the backend expects on the storage field
const STORAGE_PREFIX: &str = "Si, ";

/// Composed quote request, serialized with the backend's field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub obj_type: String,

    pub freightwaypoint_origin_from_date: String,
    pub freightwaypoint_destination_from_date: String,
    pub freightwaypoint_origin_region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freightwaypoint_origin_commune: Option<String>,
    pub freightwaypoint_destination_region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freightwaypoint_destination_commune: Option<String>,

    pub freight_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_storage: Option<String>,
    pub other: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_conditions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userdirectory_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userdirectory_phone: Option<String>,

    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_business_number: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl QuoteRequest {
    /// Field names owned by the composed payload; extra form fields with
    /// these names are dropped
    pub const FIELDS: [&'static str; 19] = [
        "obj_type",
        "freightwaypoint_origin_from_date",
        "freightwaypoint_destination_from_date",
        "freightwaypoint_origin_region",
        "freightwaypoint_origin_commune",
        "freightwaypoint_destination_region",
        "freightwaypoint_destination_commune",
        "freight_type",
        "container_type",
        "truck_type",
        "equipment",
        "needs_storage",
        "other",
        "service_conditions",
        "company_phone",
        "userdirectory_mobile",
        "userdirectory_phone",
        "contact_email",
        "company_business_number",
    ];
}

/// Validate `form` and build the request for quote type `obj_type`
pub fn compose(form: &QuoteForm, obj_type: &str) -> Result<QuoteRequest, FormErrors> {
    form.validate()?;

    // validate() guarantees both dates parse and the required fields are set
    let origin = form.origin_date.parse().map_err(|problem| single("origin_date", problem))?;
    let destination = form
        .destination_date
        .parse()
        .map_err(|problem| single("destination_date", problem))?;

    let mut extra = form.extra.clone();
    extra.retain(|key, _| !QuoteRequest::FIELDS.contains(&key.as_str()));

    Ok(QuoteRequest {
        obj_type: obj_type.to_string(),
        freightwaypoint_origin_from_date: origin.format(WAYPOINT_DATE_FORMAT).to_string(),
        freightwaypoint_destination_from_date: destination
            .format(WAYPOINT_DATE_FORMAT)
            .to_string(),
        freightwaypoint_origin_region: required(&form.origin_region),
        freightwaypoint_origin_commune: optional(&form.origin_commune),
        freightwaypoint_destination_region: required(&form.destination_region),
        freightwaypoint_destination_commune: optional(&form.destination_commune),
        freight_type: required(&form.freight_type),
        container_type: optional(&form.container_type),
        truck_type: optional(&form.truck_type),
        equipment: optional(&form.equipment),
        needs_storage: present(&form.storage_note).map(|note| format!("{STORAGE_PREFIX}{note}")),
        other: join_other(&form.other),
        service_conditions: join_conditions(&form.payment_term, &form.payment_from),
        company_phone: form.company_phone.joined(),
        userdirectory_mobile: form.user_mobile.joined(),
        userdirectory_phone: form.user_phone.joined(),
        contact_email: required(&form.contact_email),
        company_business_number: present(&form.company_rut).map(|raw| rut::clean(raw)),
        extra,
    })
}

fn single(field: &'static str, problem: String) -> FormErrors {
    let mut errors = FormErrors::default();
    errors.push(field, problem);
    errors
}

fn required(value: &Option<String>) -> String {
    present(value).unwrap_or_default().to_string()
}

fn optional(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}

/// The three notes joined by commas, blanks kept as empty slots
fn join_other(notes: &[Option<String>; 3]) -> String {
    notes
        .iter()
        .map(|note| present(note).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

/// Payment term and start joined by ", ", or whichever one was given
fn join_conditions(term: &Option<String>, from: &Option<String>) -> Option<String> {
    match (present(term), present(from)) {
        (Some(term), Some(from)) => Some(format!("{term}, {from}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::form::{DateParts, PhoneParts};
    use serde_json::json;

    fn full_form() -> QuoteForm {
        let mut extra = BTreeMap::new();
        extra.insert("cargo_weight_kg".to_string(), json!(1200));
        extra.insert("obj_type".to_string(), json!("smuggled"));

        QuoteForm {
            origin_date: DateParts::new("2026-11-02", "08:30"),
            destination_date: DateParts::new("2026-11-03", "17:00:00"),
            origin_region: Some("13".to_string()),
            origin_commune: Some("131".to_string()),
            destination_region: Some("5".to_string()),
            destination_commune: Some(" 51 ".to_string()),
            freight_type: Some("2".to_string()),
            container_type: Some("40HC".to_string()),
            truck_type: None,
            equipment: Some("".to_string()),
            other: [
                Some("fragile".to_string()),
                None,
                Some("stackable".to_string()),
            ],
            payment_term: Some("30 dias".to_string()),
            payment_from: Some("factura".to_string()),
            storage_note: Some("refrigerado".to_string()),
            user_phone: PhoneParts::new("+562", "22223333"),
            user_mobile: PhoneParts::new("+569", "87654321"),
            company_phone: PhoneParts::default(),
            contact_email: Some("ana@transportes.cl".to_string()),
            company_rut: Some("76.086.428-5".to_string()),
            extra,
        }
    }

    #[test]
    fn test_compose_joins_composite_fields() {
        let request = compose(&full_form(), "expo").unwrap();

        assert_eq!(request.obj_type, "expo");
        assert_eq!(request.freightwaypoint_origin_from_date, "2026-11-02T08:30");
        assert_eq!(request.freightwaypoint_destination_from_date, "2026-11-03T17:00");
        assert_eq!(request.needs_storage.as_deref(), Some("Si, refrigerado"));
        assert_eq!(request.other, "fragile,,stackable");
        assert_eq!(request.service_conditions.as_deref(), Some("30 dias, factura"));
        assert_eq!(request.userdirectory_phone.as_deref(), Some("+56222223333"));
        assert_eq!(request.userdirectory_mobile.as_deref(), Some("+56987654321"));
        assert_eq!(request.company_phone, None);
        assert_eq!(request.company_business_number.as_deref(), Some("760864285"));
    }

    #[test]
    fn test_compose_copies_selections_trimmed() {
        let request = compose(&full_form(), "expo").unwrap();

        assert_eq!(request.freightwaypoint_origin_region, "13");
        assert_eq!(request.freightwaypoint_origin_commune.as_deref(), Some("131"));
        assert_eq!(request.freightwaypoint_destination_commune.as_deref(), Some("51"));
        assert_eq!(request.container_type.as_deref(), Some("40HC"));
        assert_eq!(request.truck_type, None);
        assert_eq!(request.equipment, None);
        assert_eq!(request.contact_email, "ana@transportes.cl");
    }

    #[test]
    fn test_composed_fields_win_over_extras() {
        let request = compose(&full_form(), "expo").unwrap();
        let payload = serde_json::to_value(&request).unwrap();

        assert_eq!(payload["obj_type"], "expo");
        assert_eq!(payload["cargo_weight_kg"], 1200);
        assert!(!request.extra.contains_key("obj_type"));
    }

    #[test]
    fn test_payload_omits_absent_optionals() {
        let request = compose(&full_form(), "impo").unwrap();
        let payload = serde_json::to_value(&request).unwrap();
        let object = payload.as_object().unwrap();

        assert!(!object.contains_key("company_phone"));
        assert!(!object.contains_key("truck_type"));
        assert_eq!(object["obj_type"], "impo");
    }

    #[test]
    fn test_compose_without_optional_notes() {
        let form = QuoteForm {
            other: [None, None, None],
            payment_term: None,
            payment_from: Some("despacho".to_string()),
            storage_note: None,
            ..full_form()
        };
        let request = compose(&form, "expo").unwrap();

        assert_eq!(request.other, ",,");
        assert_eq!(request.service_conditions.as_deref(), Some("despacho"));
        assert_eq!(request.needs_storage, None);
    }

    #[test]
    fn test_compose_rejects_invalid_form() {
        let form = QuoteForm {
            contact_email: None,
            company_rut: Some("11.111.111-2".to_string()),
            ..full_form()
        };
        let errors = compose(&form, "expo").unwrap_err();

        assert!(errors.has("contact_email"));
        assert!(errors.has("company_rut"));
    }

    #[test]
    fn test_compose_is_pure() {
        let form = full_form();
        let first = compose(&form, "expo").unwrap();
        let second = compose(&form, "expo").unwrap();
        assert_eq!(first, second);
        assert_eq!(form, full_form());
    }
}
