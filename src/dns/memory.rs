//! In-memory [`ZoneApi`] that behaves like Route53 for the default records of a zone.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use thiserror::Error;
use super::{
    fqdn, ApiError, ChangeInfo, ChangeStatus, CreateZoneRequest, CreatedZone, Record,
    RecordCursor, RecordPage, Zone, ZoneApi,
};

const NAME_SERVERS: [&str; 4] = [
    "ns-1.awsdns-01.org.",
    "ns-2.awsdns-02.co.uk.",
    "ns-3.awsdns-03.net.",
    "ns-4.awsdns-04.com.",
];

#[derive(Debug, Default)]
pub struct MemoryZones {
    page_size: Option<usize>,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    next_change: u64,
    zones: BTreeMap<String, (Zone, Vec<Record>)>,
    references: HashSet<String>,
}

impl MemoryZones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    pub fn caller_references(&self) -> HashSet<String> {
        self.state.lock().unwrap().references.clone()
    }

    pub fn add_record(&self, zone_id: &str, record: Record) {
        let mut state = self.state.lock().unwrap();
        let (_, records) = state.zones.get_mut(zone_id).expect("zone exists");
        records.push(record);
    }
}

impl State {
    fn change(&mut self) -> ChangeInfo {
        self.next_change += 1;
        ChangeInfo {
            id: format!("C{}", self.next_change),
            status: ChangeStatus::Pending,
        }
    }
}

#[async_trait::async_trait]
impl ZoneApi for MemoryZones {
    type Error = MemoryError;

    async fn create_hosted_zone(&self, request: &CreateZoneRequest) -> Result<CreatedZone, Self::Error> {
        let mut state = self.state.lock().unwrap();
        if !state.references.insert(request.caller_reference.clone()) {
            return Err(MemoryError::DuplicateCallerReference(request.caller_reference.clone()));
        }

        state.next_id += 1;
        let name = fqdn(&request.name);
        let zone = Zone {
            id: format!("Z{}", state.next_id),
            name: name.clone(),
            caller_reference: request.caller_reference.clone(),
            comment: Some(request.config.comment.clone()),
            private_zone: request.config.private_zone,
        };
        let records = vec![
            Record {
                record_type: "NS".into(),
                name: name.clone(),
                value: NAME_SERVERS.iter().map(|&ns| ns.to_owned()).collect(),
                ttl: Some(172800),
            },
            Record {
                record_type: "SOA".into(),
                name,
                value: vec![format!(
                    "{} awsdns-hostmaster.amazon.com. 1 7200 900 1209600 86400",
                    NAME_SERVERS[0]
                )],
                ttl: Some(900),
            },
        ];
        let change = state.change();
        state.zones.insert(zone.id.clone(), (zone.clone(), records));

        Ok(CreatedZone {
            zone,
            name_servers: NAME_SERVERS.iter().map(|&ns| ns.to_owned()).collect(),
            change,
        })
    }

    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordPage, Self::Error> {
        let state = self.state.lock().unwrap();
        let (_, records) = state.zones.get(zone_id)
            .ok_or_else(|| MemoryError::NoSuchHostedZone(zone_id.to_owned()))?;

        let offset = start
            .and_then(|c| records.iter().position(|r| r.name == c.name && r.record_type == c.record_type))
            .unwrap_or(0);
        let end = self.page_size
            .map_or(records.len(), |size| (offset + size).min(records.len()));

        let next = records.get(end).map(|r| RecordCursor {
            name: r.name.clone(),
            record_type: r.record_type.clone(),
            identifier: None,
        });

        Ok(RecordPage {
            records: records[offset..end].to_vec(),
            next,
        })
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<ChangeInfo, Self::Error> {
        let mut state = self.state.lock().unwrap();
        let (_, records) = state.zones.get(zone_id)
            .ok_or_else(|| MemoryError::NoSuchHostedZone(zone_id.to_owned()))?;

        if records.iter().any(|r| r.record_type != "NS" && r.record_type != "SOA") {
            return Err(MemoryError::HostedZoneNotEmpty(zone_id.to_owned()));
        }

        state.zones.remove(zone_id);
        Ok(state.change())
    }
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("no hosted zone found with id {0}")]
    NoSuchHostedZone(String),
    #[error("hosted zone {0} contains non-default records")]
    HostedZoneNotEmpty(String),
    #[error("caller reference {0} already used")]
    DuplicateCallerReference(String),
}

impl ApiError for MemoryError {
    fn is_not_found(&self) -> bool {
        matches!(self, MemoryError::NoSuchHostedZone(_))
    }
}
