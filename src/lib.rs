//! Hosted zone smoke testing against Route53.
//!
//! [`zones::ZoneHelper`] creates, lists and deletes hosted zones through any
//! [`dns::ZoneApi`], spacing calls with a [`rate_limit::RateLimit`].
//! [`smoke::SmokeTest`] runs the full zone lifecycle once.

pub mod caller_reference;
pub mod dns;
pub mod rate_limit;
pub mod settings;
pub mod smoke;
pub mod zones;
