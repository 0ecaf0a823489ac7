//! Record extraction from TXT record collections.

/// Extracts the SPF record from TXT records.
///
/// Returns the first record containing `v=spf1`, or `None` if no SPF record
/// exists.
pub fn extract_spf_record(txt_records: &[String]) -> Option<&str> {
    txt_records
        .iter()
        .find(|txt| txt.contains("v=spf1"))
        .map(|s| s.trim())
}

/// Extracts the DMARC policy from the TXT records of `_dmarc.<domain>`.
///
/// DMARC records start with "v=DMARC1".
pub fn extract_dmarc_record(txt_records: &[String]) -> Option<&str> {
    txt_records
        .iter()
        .find(|txt| txt.trim().starts_with("v=DMARC1"))
        .map(|s| s.trim())
}
