//! Test fixtures: statement PDF bodies and filenames.

/// A small PDF-looking body; the service never inspects content.
pub fn statement_pdf(label: &str) -> Vec<u8> {
    format!("%PDF-1.7\n% statement {}\n%%EOF\n", label).into_bytes()
}

/// Filename the upload endpoint expects for (customer, year, month).
pub fn statement_filename(customer_id: u64, year: i32, month: u32) -> String {
    format!("statement_{}_{}_{}.pdf", customer_id, year, month)
}
