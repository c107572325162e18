use thiserror::Error;
use tracing::{error, info, warn};
use crate::{
    dns::{fqdn, ApiError, ChangeInfo, Record, ZoneApi},
    zones::ZoneHelper,
};

/// Record types Route53 creates with every hosted zone.
const DEFAULT_RECORD_TYPES: [&str; 2] = ["NS", "SOA"];

/// Runs the create, inspect, delete sequence against a provider.
#[derive(Debug)]
pub struct SmokeTest<A: ZoneApi> {
    helper: ZoneHelper<A>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeReport {
    pub zone_id: String,
    pub records: Vec<Record>,
    pub deletion: ChangeInfo,
}

impl<A: ZoneApi> SmokeTest<A> {
    pub fn new(helper: ZoneHelper<A>) -> Self {
        Self { helper }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self, domain: &str) -> Result<SmokeReport, SmokeError<A::Error>> {
        let created = self.helper.create_zone(domain).await?;
        let zone_id = created.zone.id;

        // The zone exists from here on, so deletion runs even when the checks fail.
        let checked = match self.helper.get_zone_records(&zone_id).await {
            Ok(records) => check_default_records(domain, &records).map(|_| records),
            Err(e) => Err(SmokeError::Api(e)),
        };

        let deletion = match self.helper.delete_zone(&zone_id).await {
            Ok(change) => change,
            Err(e) => {
                if let Err(check) = &checked {
                    error!(zone_id = %zone_id, "record check failed before deletion: {}", check);
                }
                return Err(SmokeError::Api(e));
            }
        };
        let records = checked?;

        match self.helper.get_zone_records(&zone_id).await {
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(SmokeError::Api(e)),
            Ok(records) => {
                warn!(zone_id = %zone_id, "zone still lists {} records after deletion", records.len());
                return Err(SmokeError::ZoneStillReadable(zone_id));
            }
        }

        info!(zone_id = %zone_id, "smoke test passed");
        Ok(SmokeReport { zone_id, records, deletion })
    }
}

/// Checks that the zone carries its NS and SOA records and that no record is empty.
fn check_default_records<E: ApiError>(domain: &str, records: &[Record]) -> Result<(), SmokeError<E>> {
    let name = fqdn(domain);

    for record_type in DEFAULT_RECORD_TYPES {
        if !records.iter().any(|r| r.record_type == record_type && r.name == name) {
            return Err(SmokeError::MissingRecord {
                name,
                record_type: record_type.to_owned(),
            });
        }
    }

    if let Some(record) = records.iter().find(|r| r.value.is_empty()) {
        return Err(SmokeError::EmptyValue {
            name: record.name.clone(),
            record_type: record.record_type.clone(),
        });
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum SmokeError<E: ApiError> {
    #[error(transparent)]
    Api(#[from] E),
    #[error("zone {name} has no {record_type} record")]
    MissingRecord { name: String, record_type: String },
    #[error("{record_type} record {name} has no values")]
    EmptyValue { name: String, record_type: String },
    #[error("zone {0} is still readable after deletion")]
    ZoneStillReadable(String),
}
