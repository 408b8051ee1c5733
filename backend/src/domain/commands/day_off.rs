use shared::{DayOffDecision, DayOffRequestInput, ReviewDayOffRequest};

use crate::domain::authorization::Session;
use crate::domain::jalali::{CalendarError, JalaliDate};

#[derive(Debug, Clone, PartialEq)]
pub struct RequestDayOffCommand {
    pub worker_id: String,
    pub date: JalaliDate,
    pub reason: String,
}

impl RequestDayOffCommand {
    pub fn from_request(
        session: &Session,
        request: DayOffRequestInput,
    ) -> Result<Self, CalendarError> {
        Ok(Self {
            worker_id: request
                .worker_id
                .unwrap_or_else(|| session.user_id.clone()),
            date: request.date.parse()?,
            reason: request.reason.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDayOffCommand {
    pub request_id: String,
    pub decision: DayOffDecision,
}

impl From<ReviewDayOffRequest> for ReviewDayOffCommand {
    fn from(request: ReviewDayOffRequest) -> Self {
        Self {
            request_id: request.request_id,
            decision: request.decision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_command_from_request() {
        let command = ReviewDayOffCommand::from(ReviewDayOffRequest {
            request_id: "dayoff::1".to_string(),
            decision: DayOffDecision::Reject,
        });
        assert_eq!(command.request_id, "dayoff::1");
        assert_eq!(command.decision, DayOffDecision::Reject);
    }
}
