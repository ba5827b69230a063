use chrono::NaiveDate;
use url::Url;

use crate::types::{Meeting, MeetingType};

use super::common::{Query, RecordFilter};

/// Constraints over diplomatic meetings. Results keep input order.
#[derive(Clone, Debug, Default)]
pub struct MeetingQuery {
    /// Inclusive lower bound on the meeting date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the meeting date.
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the meeting topic.
    pub topic: Option<String>,
    pub meeting_type: Option<MeetingType>,
}

impl Query for MeetingQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(start_date) = self.start_date {
            url.query_pairs_mut()
                .append_pair("start_date", &start_date.format("%Y-%m-%d").to_string());
        }
        if let Some(end_date) = self.end_date {
            url.query_pairs_mut()
                .append_pair("end_date", &end_date.format("%Y-%m-%d").to_string());
        }
        if let Some(topic) = &self.topic {
            url.query_pairs_mut().append_pair("topic", topic.as_str());
        }
        if let Some(meeting_type) = self.meeting_type {
            url.query_pairs_mut()
                .append_pair("type", meeting_type.to_string().as_str());
        }
        url
    }
}

impl RecordFilter for MeetingQuery {
    type Record = Meeting;

    fn matches(&self, meeting: &Meeting) -> bool {
        if self.start_date.is_some_and(|start| meeting.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| meeting.date > end) {
            return false;
        }
        if let Some(topic) = &self.topic {
            if !meeting
                .topic
                .to_lowercase()
                .contains(topic.to_lowercase().as_str())
            {
                return false;
            }
        }
        self.meeting_type
            .map_or(true, |meeting_type| meeting.meeting_type == meeting_type)
    }
}

impl MeetingQuery {
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }

    pub fn with_meeting_type(mut self, meeting_type: MeetingType) -> Self {
        self.meeting_type = Some(meeting_type);
        self
    }
}
