//! Day-off requests and their review.
//!
//! A request is created `pending` and decided exactly once. There is at most
//! one open (pending or approved) request per worker and date.

use anyhow::Result;
use chrono::Utc;
use shared::DayOffStatus;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::authorization::{self, Capability, Session};
use crate::domain::commands::day_off::{RequestDayOffCommand, ReviewDayOffCommand};
use crate::domain::jalali::{self, JalaliMonth};
use crate::domain::models::day_off::DayOffRequest;
use crate::storage::{Connection, DayOffReview, DayOffStorage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayOffError {
    #[error("A reason is required for a day-off request")]
    EmptyReason,
    #[error("Worker {worker_id} already has an open request for {date}")]
    DuplicateRequest { worker_id: String, date: String },
    #[error("Day-off request not found: {0}")]
    NotFound(String),
    #[error("Day-off request {request_id} was already {status}")]
    AlreadyReviewed {
        request_id: String,
        status: DayOffStatus,
    },
}

pub struct DayOffService<C: Connection> {
    day_off_repository: C::DayOffRepository,
}

impl<C: Connection> DayOffService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            day_off_repository: connection.create_day_off_repository(),
        }
    }

    pub fn request_day_off(
        &self,
        session: &Session,
        command: RequestDayOffCommand,
    ) -> Result<DayOffRequest> {
        authorization::require_for_worker(session, &command.worker_id, Capability::RequestDayOff)?;
        if command.reason.trim().is_empty() {
            return Err(DayOffError::EmptyReason.into());
        }

        let date = jalali::format_for_storage(&command.date)?;
        let request = DayOffRequest::new(&command.worker_id, &date, command.reason.trim());
        if !self.day_off_repository.store_day_off(&request)? {
            return Err(DayOffError::DuplicateRequest {
                worker_id: command.worker_id,
                date,
            }
            .into());
        }

        info!(
            "Day-off request {} created for {} on {}",
            request.id, request.worker_id, command.date
        );
        Ok(request)
    }

    /// Approve or reject a pending request
    pub fn review(&self, session: &Session, command: ReviewDayOffCommand) -> Result<DayOffRequest> {
        authorization::require(session, Capability::ReviewDayOff)?;

        let review = self.day_off_repository.review_day_off(
            &command.request_id,
            command.decision.resulting_status(),
            &session.user_id,
            Utc::now(),
        )?;

        match review {
            DayOffReview::Reviewed(request) => {
                info!("{} marked {} as {}", session.user_id, request.id, request.status);
                Ok(request)
            }
            DayOffReview::AlreadyReviewed(request) => {
                warn!(
                    "{} tried to review {} which is already {}",
                    session.user_id, request.id, request.status
                );
                Err(DayOffError::AlreadyReviewed {
                    request_id: request.id,
                    status: request.status,
                }
                .into())
            }
            DayOffReview::NotFound => Err(DayOffError::NotFound(command.request_id).into()),
        }
    }

    /// Requests in a month. Reviewers see everyone's, workers only their own.
    pub fn list_month(
        &self,
        session: &Session,
        month: JalaliMonth,
        status: Option<DayOffStatus>,
    ) -> Result<Vec<DayOffRequest>> {
        let (start, end) = jalali::month_range(month)?;
        if authorization::has_capability(session, Capability::ReviewDayOff) {
            return self.day_off_repository.list_day_offs(&start, &end, None, status);
        }
        authorization::require(session, Capability::RequestDayOff)?;
        self.day_off_repository
            .list_day_offs(&start, &end, Some(&session.user_id), status)
    }
}
