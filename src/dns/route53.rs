use aws_config::SdkConfig;
use aws_sdk_route53::operation::create_hosted_zone::CreateHostedZoneError;
use aws_sdk_route53::operation::delete_hosted_zone::DeleteHostedZoneError;
use aws_sdk_route53::operation::list_resource_record_sets::ListResourceRecordSetsError;
use aws_sdk_route53::types::{HostedZoneConfig, ResourceRecordSet, RrType};
use aws_sdk_route53::Client;
use aws_smithy_http::result::SdkError;
use thiserror::Error;
use tracing::debug;
use super::{
    fqdn, ApiError, ChangeInfo, ChangeStatus, CreateZoneRequest, CreatedZone, Record,
    RecordCursor, RecordPage, Zone, ZoneApi,
};

const ZONE_ID_PREFIX: &str = "/hostedzone/";
const CHANGE_ID_PREFIX: &str = "/change/";

#[derive(Debug, Clone)]
pub struct Route53Api {
    client: Client,
}

impl Route53Api {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(Client::new(config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ZoneApi for Route53Api {
    type Error = Route53Error;

    #[tracing::instrument(skip(self), fields(name = %request.name))]
    async fn create_hosted_zone(&self, request: &CreateZoneRequest) -> Result<CreatedZone, Self::Error> {
        let output = self.client.create_hosted_zone()
            .name(request.name.clone())
            .caller_reference(request.caller_reference.clone())
            .hosted_zone_config(HostedZoneConfig::builder()
                .comment(request.config.comment.clone())
                .private_zone(request.config.private_zone)
                .build())
            .send()
            .await?;

        let hosted_zone = output.hosted_zone()
            .ok_or(Route53Error::MissingField("HostedZone"))?;
        let id = hosted_zone.id()
            .map(|id| strip_prefix(id, ZONE_ID_PREFIX))
            .ok_or(Route53Error::MissingField("HostedZone.Id"))?;

        let zone = Zone {
            id,
            name: hosted_zone.name()
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| fqdn(&request.name)),
            caller_reference: hosted_zone.caller_reference()
                .unwrap_or(request.caller_reference.as_str())
                .to_owned(),
            comment: hosted_zone.config()
                .and_then(|c| c.comment())
                .map(ToOwned::to_owned),
            private_zone: hosted_zone.config()
                .map_or(false, |c| c.private_zone()),
        };

        let name_servers = output.delegation_set()
            .and_then(|d| d.name_servers())
            .unwrap_or_default()
            .to_vec();

        let change = output.change_info()
            .ok_or(Route53Error::MissingField("ChangeInfo"))
            .and_then(change_info)?;

        Ok(CreatedZone { zone, name_servers, change })
    }

    #[tracing::instrument(skip(self))]
    async fn list_resource_record_sets(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordPage, Self::Error> {
        let mut request = self.client.list_resource_record_sets()
            .hosted_zone_id(zone_id);

        if let Some(start) = start {
            request = request
                .start_record_name(start.name)
                .start_record_type(RrType::from(start.record_type.as_str()));
            if let Some(identifier) = start.identifier {
                request = request.start_record_identifier(identifier);
            }
        }

        let output = request.send().await?;

        let records: Vec<_> = output.resource_record_sets()
            .unwrap_or_default()
            .iter()
            .map(to_record)
            .collect();

        // NextRecordName is only present on truncated responses
        let next = output.next_record_name().map(|name| RecordCursor {
            name: name.to_owned(),
            record_type: output.next_record_type()
                .map(|t| t.as_str().to_owned())
                .unwrap_or_default(),
            identifier: output.next_record_identifier().map(ToOwned::to_owned),
        });

        debug!(truncated = next.is_some(), "got {} record sets from Route53", records.len());

        Ok(RecordPage { records, next })
    }

    #[tracing::instrument(skip(self))]
    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<ChangeInfo, Self::Error> {
        let output = self.client.delete_hosted_zone()
            .id(zone_id)
            .send()
            .await?;

        output.change_info()
            .ok_or(Route53Error::MissingField("ChangeInfo"))
            .and_then(change_info)
    }
}

fn strip_prefix(id: &str, prefix: &str) -> String {
    id.strip_prefix(prefix).unwrap_or(id).to_owned()
}

fn change_info(info: &aws_sdk_route53::types::ChangeInfo) -> Result<ChangeInfo, Route53Error> {
    Ok(ChangeInfo {
        id: info.id()
            .map(|id| strip_prefix(id, CHANGE_ID_PREFIX))
            .ok_or(Route53Error::MissingField("ChangeInfo.Id"))?,
        status: info.status()
            .map(|s| ChangeStatus::from(s.as_str()))
            .ok_or(Route53Error::MissingField("ChangeInfo.Status"))?,
    })
}

fn to_record(set: &ResourceRecordSet) -> Record {
    let mut value: Vec<String> = set.resource_records()
        .unwrap_or_default()
        .iter()
        .filter_map(|r| r.value().map(ToOwned::to_owned))
        .collect();

    // Alias records have no resource records of their own
    if value.is_empty() {
        if let Some(target) = set.alias_target().and_then(|a| a.dns_name()) {
            value.push(target.to_owned());
        }
    }

    Record {
        record_type: set.r#type()
            .map(|t| t.as_str().to_owned())
            .unwrap_or_default(),
        name: set.name().unwrap_or_default().to_owned(),
        value,
        ttl: set.ttl(),
    }
}

#[derive(Debug, Error)]
pub enum Route53Error {
    #[error(transparent)]
    CreateZoneError(#[from] SdkError<CreateHostedZoneError>),
    #[error(transparent)]
    ListSetsError(#[from] SdkError<ListResourceRecordSetsError>),
    #[error(transparent)]
    DeleteZoneError(#[from] SdkError<DeleteHostedZoneError>),
    #[error("response missing {0}")]
    MissingField(&'static str),
}

impl ApiError for Route53Error {
    fn is_not_found(&self) -> bool {
        match self {
            Route53Error::ListSetsError(e) => matches!(
                e,
                SdkError::ServiceError(se) if se.err().is_no_such_hosted_zone()
            ),
            Route53Error::DeleteZoneError(e) => matches!(
                e,
                SdkError::ServiceError(se) if se.err().is_no_such_hosted_zone()
            ),
            _ => false,
        }
    }
}
