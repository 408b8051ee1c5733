//! CSV-backed day-off request repository.
//!
//! `day_off_requests.csv` columns:
//! `id,worker_id,request_date,reason,status,created_at,reviewed_at,reviewed_by`.
//! `status` is one of `pending`, `approved`, `rejected`; anything else is a
//! [`MalformedRecord`], and so is a `request_date` that is not a fixed-width
//! `YYYY-MM-DD` key.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::DayOffStatus;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::jalali;
use crate::domain::models::day_off::DayOffRequest;
use crate::domain::models::MalformedRecord;
use crate::storage::traits::{DayOffReview, DayOffStorage};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DayOffRecord {
    id: String,
    worker_id: String,
    request_date: String,
    reason: String,
    status: String,
    created_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
    reviewed_by: Option<String>,
}

impl DayOffRecord {
    fn from_domain(request: &DayOffRequest) -> Self {
        Self {
            id: request.id.clone(),
            worker_id: request.worker_id.clone(),
            request_date: request.request_date.clone(),
            reason: request.reason.clone(),
            status: request.status.as_str().to_string(),
            created_at: request.created_at,
            reviewed_at: request.reviewed_at,
            reviewed_by: request.reviewed_by.clone(),
        }
    }

    fn check_date(&self) -> Result<(), MalformedRecord> {
        jalali::parse_storage_date(&self.request_date)
            .map(|_| ())
            .map_err(|e| MalformedRecord::new(&self.id, e.to_string()))
    }

    fn into_domain(self) -> Result<DayOffRequest, MalformedRecord> {
        let status = self
            .status
            .parse::<DayOffStatus>()
            .map_err(|e| MalformedRecord::new(&self.id, e.to_string()))?;
        Ok(DayOffRequest {
            id: self.id,
            worker_id: self.worker_id,
            request_date: self.request_date,
            reason: self.reason,
            status,
            created_at: self.created_at,
            reviewed_at: self.reviewed_at,
            reviewed_by: self.reviewed_by.filter(|r| !r.is_empty()),
        })
    }
}

/// CSV-based day-off request repository
#[derive(Clone)]
pub struct DayOffRepository {
    connection: CsvConnection,
}

impl DayOffRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<DayOffRecord>> {
        self.connection.read_csv(&self.connection.day_offs_path())
    }

    fn write_records(&self, records: &[DayOffRecord]) -> Result<()> {
        self.connection
            .write_csv(&self.connection.day_offs_path(), records)
    }
}

impl DayOffStorage for DayOffRepository {
    fn store_day_off(&self, request: &DayOffRequest) -> Result<bool> {
        let _guard = self.connection.lock()?;
        let mut records = self.read_records()?;
        for record in &records {
            if record.worker_id != request.worker_id
                || record.request_date != request.request_date
            {
                continue;
            }
            if record.clone().into_domain()?.status != DayOffStatus::Rejected {
                debug!(
                    "Worker {} already has open request {} on {}",
                    record.worker_id, record.id, record.request_date
                );
                return Ok(false);
            }
        }
        if records.iter().any(|r| r.id == request.id) {
            return Err(anyhow!("Day-off request {} already exists", request.id));
        }
        records.push(DayOffRecord::from_domain(request));
        self.write_records(&records)?;
        info!(
            "Stored day-off request {} for worker {} on {}",
            request.id, request.worker_id, request.request_date
        );
        Ok(true)
    }

    fn get_day_off(&self, request_id: &str) -> Result<Option<DayOffRequest>> {
        match self.read_records()?.into_iter().find(|r| r.id == request_id) {
            Some(record) => Ok(Some(record.into_domain()?)),
            None => Ok(None),
        }
    }

    fn review_day_off(
        &self,
        request_id: &str,
        status: DayOffStatus,
        reviewed_by: &str,
        reviewed_at: DateTime<Utc>,
    ) -> Result<DayOffReview> {
        let _guard = self.connection.lock()?;
        let mut records = self.read_records()?;
        let index = match records.iter().position(|r| r.id == request_id) {
            Some(index) => index,
            None => return Ok(DayOffReview::NotFound),
        };

        let mut request = records[index].clone().into_domain()?;
        if !request.is_pending() {
            return Ok(DayOffReview::AlreadyReviewed(request));
        }

        request.status = status;
        request.reviewed_at = Some(reviewed_at);
        request.reviewed_by = Some(reviewed_by.to_string());
        records[index] = DayOffRecord::from_domain(&request);
        self.write_records(&records)?;
        info!("Day-off request {} reviewed as {} by {}", request.id, status, reviewed_by);
        Ok(DayOffReview::Reviewed(request))
    }

    fn list_day_offs(
        &self,
        start_date: &str,
        end_date: &str,
        worker_id: Option<&str>,
        status: Option<DayOffStatus>,
    ) -> Result<Vec<DayOffRequest>> {
        let mut requests = Vec::new();
        for record in self.read_records()? {
            record.check_date()?;
            let date = record.request_date.as_str();
            if date < start_date || date > end_date {
                continue;
            }
            if worker_id.map_or(false, |id| record.worker_id != id) {
                continue;
            }
            let request = record.into_domain()?;
            if status.map_or(false, |s| request.status != s) {
                continue;
            }
            requests.push(request);
        }
        requests.sort_by(|a, b| {
            a.request_date
                .cmp(&b.request_date)
                .then_with(|| a.worker_id.cmp(&b.worker_id))
        });
        debug!(
            "Listed {} day-off requests between {} and {}",
            requests.len(),
            start_date,
            end_date
        );
        Ok(requests)
    }
}
