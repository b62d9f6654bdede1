// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Milliseconds since the Unix epoch. Serialized as a plain JSON number so
/// stored libraries stay readable by the browser host.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// The current time, from the system clock.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Month and day, e.g. `Oct 16`. Used in library listings.
    pub fn short_date(self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format("%b %-d").to_string(),
            None => "?".to_string(),
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-10-05T14:30:15.123Z
    const MILLIS: i64 = 1_696_516_215_123;

    #[test]
    fn test_timestamp_to_string() {
        let ts = Timestamp::from_millis(MILLIS);
        assert_eq!(ts.to_string(), "2023-10-05 14:30");
    }

    #[test]
    fn test_short_date() {
        let ts = Timestamp::from_millis(MILLIS);
        assert_eq!(ts.short_date(), "Oct 5");
    }

    #[test]
    fn test_serialize() {
        let ts = Timestamp::from_millis(MILLIS);
        let serialized = serde_json::to_string(&ts).unwrap();
        assert_eq!(serialized, "1696516215123");
    }

    #[test]
    fn test_deserialize() {
        let ts: Timestamp = serde_json::from_str("1696516215123").unwrap();
        assert_eq!(ts.as_millis(), MILLIS);
    }

    #[test]
    fn test_ordering() {
        assert!(Timestamp::from_millis(1) < Timestamp::from_millis(2));
    }
}
