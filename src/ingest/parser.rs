//! Historical log line decoding
//!
//! Lines look like `EVENT_TYPE|campaign_id|user_id|amount|extra...`.
//! Fields are taken verbatim, without trimming.

pub const FIELD_DELIMITER: char = '|';

/// A log line with at least the event type, campaign and user fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoricalEvent<'a> {
    Click {
        campaign_id: &'a str,
        user_id: &'a str,
    },
    /// The amount column is not read; historical conversions carry no revenue.
    Conversion {
        campaign_id: &'a str,
        user_id: &'a str,
    },
    /// Names a campaign but changes no counter: an unknown event type, or
    /// a CLICK/CONVERSION line missing trailing fields.
    Seen { campaign_id: &'a str },
}

impl<'a> HistoricalEvent<'a> {
    pub fn campaign_id(&self) -> &'a str {
        match self {
            HistoricalEvent::Click { campaign_id, .. }
            | HistoricalEvent::Conversion { campaign_id, .. }
            | HistoricalEvent::Seen { campaign_id } => *campaign_id,
        }
    }

    /// Whether applying the event changes any counter
    pub fn is_counted(&self) -> bool {
        !matches!(self, HistoricalEvent::Seen { .. })
    }
}

/// Decode one line, or `None` if it has fewer than 3 fields.
pub fn parse_line(line: &str) -> Option<HistoricalEvent<'_>> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < 3 {
        return None;
    }

    match fields[0] {
        "CLICK" if fields.len() >= 4 => Some(HistoricalEvent::Click {
            campaign_id: fields[1],
            user_id: fields[2],
        }),
        "CONVERSION" if fields.len() >= 5 => Some(HistoricalEvent::Conversion {
            campaign_id: fields[1],
            user_id: fields[2],
        }),
        _ => Some(HistoricalEvent::Seen {
            campaign_id: fields[1],
        }),
    }
}
