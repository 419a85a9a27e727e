//! Sample inputs shared by unit and integration tests

use crate::quote::{DateParts, PhoneParts, QuoteForm};

/// A complete, valid quote form matching [`MockDirectory::with_sample_data`]
///
/// [`MockDirectory::with_sample_data`]: crate::testing::MockDirectory::with_sample_data
pub fn sample_quote_form() -> QuoteForm {
    QuoteForm {
        origin_date: DateParts::new("2026-11-02", "08:30"),
        destination_date: DateParts::new("2026-11-03", "17:00"),
        origin_region: Some("13".to_string()),
        origin_commune: Some("131".to_string()),
        destination_region: Some("5".to_string()),
        destination_commune: Some("51".to_string()),
        freight_type: Some("2".to_string()),
        container_type: Some("40HC".to_string()),
        other: [Some("fragil".to_string()), None, None],
        payment_term: Some("30 dias".to_string()),
        payment_from: Some("factura".to_string()),
        user_phone: PhoneParts::new("+562", "22223333"),
        contact_email: Some("ana@transportes.cl".to_string()),
        company_rut: Some("76.086.428-5".to_string()),
        ..QuoteForm::default()
    }
}
