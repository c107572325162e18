pub mod route53;
#[cfg(test)]
pub mod memory;

/// Comment attached to zones created without explicit configuration.
pub const DEFAULT_COMMENT: &str = "integrationtest";

/// Capability set of a hosted zone provider.
#[async_trait::async_trait]
pub trait ZoneApi: Send + Sync {
    type Error: ApiError;

    async fn create_hosted_zone(&self, request: &CreateZoneRequest) -> Result<CreatedZone, Self::Error>;
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordPage, Self::Error>;
    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<ChangeInfo, Self::Error>;
}

pub trait ApiError: std::error::Error + Send + 'static {
    /// Whether the provider reported that the zone does not exist.
    fn is_not_found(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneConfig {
    pub comment: String,
    pub private_zone: bool,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_owned(),
            private_zone: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateZoneRequest {
    pub name: String,
    pub caller_reference: String,
    pub config: ZoneConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub caller_reference: String,
    pub comment: Option<String>,
    pub private_zone: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedZone {
    pub zone: Zone,
    pub name_servers: Vec<String>,
    pub change: ChangeInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeInfo {
    pub id: String,
    pub status: ChangeStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatus {
    Pending,
    InSync,
    Other(String),
}

impl From<&str> for ChangeStatus {
    fn from(s: &str) -> Self {
        match s {
            "PENDING" => ChangeStatus::Pending,
            "INSYNC" => ChangeStatus::InSync,
            other => ChangeStatus::Other(other.to_owned()),
        }
    }
}

/// A resource record set, flattened to its type, name and values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub record_type: String,
    pub name: String,
    pub value: Vec<String>,
    pub ttl: Option<i64>,
}

/// Position to resume a truncated record listing from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCursor {
    pub name: String,
    pub record_type: String,
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub next: Option<RecordCursor>,
}

/// Appends the root label if `name` doesn't already end with one.
pub fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_owned()
    } else {
        format!("{}.", name)
    }
}
