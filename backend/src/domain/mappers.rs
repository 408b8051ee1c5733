//! Conversions from domain models to the wire types in `shared`.

use shared::{DayOffRequestView, TimeLogView};

use crate::domain::jalali::{self, CalendarError};
use crate::domain::models::day_off::DayOffRequest;
use crate::domain::models::time_log::TimeLogEntry;

pub struct TimeLogMapper;

impl TimeLogMapper {
    pub fn to_dto(entry: &TimeLogEntry) -> Result<TimeLogView, CalendarError> {
        Ok(TimeLogView {
            id: entry.id.clone(),
            worker_id: entry.worker_id.clone(),
            date: entry.date.clone(),
            jalali_date: jalali::from_storage(&entry.date)?.to_string(),
            hours_worked: entry.hours_worked,
            description: entry.description.clone(),
        })
    }
}

pub struct DayOffMapper;

impl DayOffMapper {
    pub fn to_dto(request: &DayOffRequest) -> Result<DayOffRequestView, CalendarError> {
        Ok(DayOffRequestView {
            id: request.id.clone(),
            worker_id: request.worker_id.clone(),
            request_date: request.request_date.clone(),
            jalali_date: jalali::from_storage(&request.request_date)?.to_string(),
            reason: request.reason.clone(),
            status: request.status,
            reviewed_at: request.reviewed_at.map(|t| t.to_rfc3339()),
        })
    }

    pub fn to_dtos(requests: &[DayOffRequest]) -> Result<Vec<DayOffRequestView>, CalendarError> {
        requests.iter().map(Self::to_dto).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_log_view_carries_jalali_date() {
        let entry = TimeLogEntry::new("w1", "2024-03-20", 8.0, None);
        let view = TimeLogMapper::to_dto(&entry).unwrap();
        assert_eq!(view.jalali_date, "1403/01/01");
        assert_eq!(view.date, "2024-03-20");
    }

    #[test]
    fn test_day_off_view() {
        let request = DayOffRequest::new("w1", "2024-04-19", "family");
        let view = DayOffMapper::to_dto(&request).unwrap();
        assert_eq!(view.jalali_date, "1403/01/31");
        assert_eq!(view.reviewed_at, None);
    }
}
