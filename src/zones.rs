use tracing::{debug, info};
use crate::{
    caller_reference::caller_reference,
    dns::{ChangeInfo, CreateZoneRequest, CreatedZone, Record, RecordCursor, RecordPage, ZoneApi, ZoneConfig},
    rate_limit::RateLimit,
};

/// Create, list and delete hosted zones through a [`ZoneApi`].
///
/// Every call waits on the rate limit before reaching the provider. Provider
/// errors are returned as is.
#[derive(Debug)]
pub struct ZoneHelper<A: ZoneApi> {
    api: A,
    limit: RateLimit,
    config: ZoneConfig,
}

impl<A: ZoneApi> ZoneHelper<A> {
    pub fn new(api: A, limit: RateLimit) -> Self {
        Self {
            api,
            limit,
            config: ZoneConfig::default(),
        }
    }

    pub fn with_zone_config(mut self, config: ZoneConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_zone(&self, domain: &str) -> Result<CreatedZone, A::Error> {
        self.limit.ready().await;

        let request = CreateZoneRequest {
            name: domain.to_owned(),
            caller_reference: caller_reference(),
            config: self.config.clone(),
        };
        let created = self.api.create_hosted_zone(&request).await?;

        info!(zone_id = %created.zone.id, caller_reference = %request.caller_reference, "created hosted zone");
        Ok(created)
    }

    /// First page of the zone's record sets.
    pub async fn get_zone_records(&self, zone_id: &str) -> Result<Vec<Record>, A::Error> {
        Ok(self.record_page(zone_id, None).await?.records)
    }

    #[tracing::instrument(skip(self))]
    pub async fn record_page(
        &self,
        zone_id: &str,
        start: Option<RecordCursor>,
    ) -> Result<RecordPage, A::Error> {
        self.limit.ready().await;
        self.api.list_resource_record_sets(zone_id, start).await
    }

    /// Every record set of the zone, following continuation cursors.
    pub async fn all_zone_records(&self, zone_id: &str) -> Result<Vec<Record>, A::Error> {
        let mut records = Vec::new();
        let mut cursor = None;

        loop {
            let page = self.record_page(zone_id, cursor.take()).await?;
            records.extend(page.records);

            match page.next {
                Some(next) => {
                    debug!(next = ?next, "record listing truncated");
                    cursor = Some(next);
                }
                None => break,
            }
        }

        Ok(records)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_zone(&self, zone_id: &str) -> Result<ChangeInfo, A::Error> {
        self.limit.ready().await;

        let change = self.api.delete_hosted_zone(zone_id).await?;

        info!(change_id = %change.id, "deleted hosted zone");
        Ok(change)
    }
}
