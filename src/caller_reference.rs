use std::time::SystemTime;

/// Fresh caller reference for a zone creation request.
///
/// Route53 rejects a create request whose caller reference was already used
/// in the account, so the token is the current wall-clock time at nanosecond
/// resolution.
pub fn caller_reference() -> String {
    caller_reference_at(SystemTime::now())
}

pub fn caller_reference_at(time: SystemTime) -> String {
    humantime::format_rfc3339_nanos(time).to_string()
}
