//! `DnsProvider` trait and its reg.ru implementation

use async_trait::async_trait;

use crate::client::RegruClient;
use crate::error::{RegruError, Result};
use crate::request::{
    build_create_request, build_delete_request, build_list_records_request,
    build_list_zones_request, build_nop_request,
};
use crate::response::{AddRecordAnswer, ResourceRecordsAnswer, ServiceListAnswer};
use crate::types::{
    CreateDnsRecordParams, DnsRecord, ListDnsRecordsParams, UpdateDnsRecordParams, Zone,
};

/// DNS operations against one registrar account.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Checks that the configured credentials are accepted.
    ///
    /// `Ok(false)` when the API rejects the call; transport failures are
    /// returned as errors.
    async fn validate_credentials(&self) -> Result<bool>;

    /// Creates a record in `zone`.
    ///
    /// The returned record echoes the caller's fields; `id` is set when the
    /// answer reports one for `zone`.
    async fn create_record(&self, zone: &str, params: &CreateDnsRecordParams)
    -> Result<DnsRecord>;

    /// Removes `record` from `zone`, matched by name, type and content.
    async fn delete_record(&self, zone: &str, record: &DnsRecord) -> Result<()>;

    /// Replaces the content and TTL of `record`.
    ///
    /// Implemented as a delete followed by a create. Not atomic: if the create
    /// fails, the old record is already gone and the error of the create is
    /// returned.
    async fn update_record(
        &self,
        zone: &str,
        record: &DnsRecord,
        params: &UpdateDnsRecordParams,
    ) -> Result<DnsRecord>;

    /// Records of the zone named in `params`, filtered by name and type, in
    /// listing order.
    async fn list_records(&self, params: &ListDnsRecordsParams) -> Result<Vec<DnsRecord>>;

    /// First record of `zone` whose name is exactly `name`.
    async fn find_record_by_name(&self, zone: &str, name: &str) -> Result<DnsRecord>;

    /// Domain zones of the account.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// Domain zones whose name is exactly `name`.
    async fn list_zones_by_name(&self, name: &str) -> Result<Vec<Zone>>;

    /// Records of the zone with registrar id `zone_id`.
    ///
    /// The id is resolved through [`list_zones`](Self::list_zones); the zone
    /// fields of `params` are replaced by the resolved name.
    async fn list_records_by_zone_id(
        &self,
        zone_id: &str,
        params: ListDnsRecordsParams,
    ) -> Result<Vec<DnsRecord>>;
}

#[async_trait]
impl DnsProvider for RegruClient {
    async fn validate_credentials(&self) -> Result<bool> {
        match self.send(&build_nop_request()).await {
            Ok(_) => Ok(true),
            Err(e @ RegruError::Api { .. }) => {
                log::warn!("[regru] Credential validation failed: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_record(
        &self,
        zone: &str,
        params: &CreateDnsRecordParams,
    ) -> Result<DnsRecord> {
        let shaped = build_create_request(zone, params)?;
        let answer: AddRecordAnswer = self.request(&shaped).await?;

        let mut record = DnsRecord {
            name: params.name.clone(),
            record_type: params.record_type,
            content: params.content.clone(),
            ttl: params.ttl,
            id: None,
            proxied: false,
        };

        if let Some(entry) = answer.for_zone(zone) {
            entry.status.check()?;
            if entry.status.is_success() {
                record.id = entry.record_id();
            }
        }

        log::debug!(
            "[regru] Created {} record '{}' in {zone}",
            record.record_type,
            record.name
        );
        Ok(record)
    }

    async fn delete_record(&self, zone: &str, record: &DnsRecord) -> Result<()> {
        let shaped = build_delete_request(zone, record)?;
        self.send(&shaped).await?;

        log::debug!(
            "[regru] Removed {} record '{}' from {zone}",
            record.record_type,
            record.name
        );
        Ok(())
    }

    async fn update_record(
        &self,
        zone: &str,
        record: &DnsRecord,
        params: &UpdateDnsRecordParams,
    ) -> Result<DnsRecord> {
        let replacement = CreateDnsRecordParams {
            name: record.name.clone(),
            record_type: record.record_type,
            content: params.content.clone(),
            ttl: params.ttl,
        };
        // Reject a bad replacement before anything is removed.
        build_create_request(zone, &replacement)?;

        self.delete_record(zone, record).await?;

        self.create_record(zone, &replacement).await.inspect_err(|e| {
            log::warn!(
                "[regru] Record '{}' in {zone} was removed but could not be recreated: {e}",
                record.name
            );
        })
    }

    async fn list_records(&self, params: &ListDnsRecordsParams) -> Result<Vec<DnsRecord>> {
        let zone = params.zone().ok_or_else(|| {
            RegruError::invalid_parameter("zone_name", "zone_name or zone_id is required")
        })?;

        let shaped = build_list_records_request(zone)?;
        let answer: ResourceRecordsAnswer = self.request(&shaped).await?;

        let records: Vec<DnsRecord> = answer
            .into_records(zone)?
            .into_iter()
            .filter(|r| params.accepts(r))
            .collect();

        log::debug!("[regru] {} records listed for {zone}", records.len());
        Ok(records)
    }

    async fn find_record_by_name(&self, zone: &str, name: &str) -> Result<DnsRecord> {
        self.list_records(&ListDnsRecordsParams::for_zone(zone))
            .await?
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RegruError::RecordNotFound {
                name: name.to_string(),
            })
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let answer: ServiceListAnswer = self.request(&build_list_zones_request()).await?;
        Ok(answer.into_zones())
    }

    async fn list_zones_by_name(&self, name: &str) -> Result<Vec<Zone>> {
        let mut zones = self.list_zones().await?;
        zones.retain(|z| z.name == name);
        Ok(zones)
    }

    async fn list_records_by_zone_id(
        &self,
        zone_id: &str,
        mut params: ListDnsRecordsParams,
    ) -> Result<Vec<DnsRecord>> {
        let not_found = || RegruError::ZoneNotFound {
            zone_id: zone_id.to_string(),
        };
        // Zones without a reported service id carry an empty id.
        if zone_id.trim().is_empty() {
            return Err(not_found());
        }

        let zone = self
            .list_zones()
            .await?
            .into_iter()
            .find(|z| z.id == zone_id)
            .ok_or_else(not_found)?;

        params.zone_name = Some(zone.name);
        params.zone_id = Some(zone.id);
        self.list_records(&params).await
    }
}
