use std::str::FromStr;

use crate::error::Error;

bitflags::bitflags! {
    /// Event categories a hook constructor should instrument.
    ///
    /// Single-bit flags select one event family; the composite flags
    /// (`DRIVER`, `TABLE`, `TOPIC`, ...) select a whole subsystem.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Details: u64 {
        const DRIVER_NET = 1 << 0;
        const DRIVER_CONN = 1 << 1;
        const DRIVER_DISCOVERY = 1 << 2;
        const DRIVER_BALANCER = 1 << 3;
        const DRIVER_CREDENTIALS = 1 << 4;

        const TABLE_EVENTS = 1 << 5;
        const TABLE_SESSION_LIFECYCLE = 1 << 6;
        const TABLE_SESSION_QUERY_INVOKE = 1 << 7;
        const TABLE_SESSION_QUERY_STREAM = 1 << 8;
        const TABLE_SESSION_TRANSACTION = 1 << 9;
        const TABLE_POOL_LIFECYCLE = 1 << 10;
        const TABLE_POOL_API = 1 << 11;

        const TOPIC_READER_STREAM_LIFECYCLE = 1 << 12;
        const TOPIC_READER_PARTITION = 1 << 13;
        const TOPIC_READER_STREAM = 1 << 14;
        const TOPIC_READER_MESSAGE = 1 << 15;
        const TOPIC_WRITER_STREAM_LIFECYCLE = 1 << 16;
        const TOPIC_WRITER_STREAM = 1 << 17;

        const SCRIPTING = 1 << 18;
        const DISCOVERY = 1 << 19;
        const RETRY = 1 << 20;

        const DATABASE_SQL_CONNECTOR = 1 << 21;
        const DATABASE_SQL_CONN = 1 << 22;
        const DATABASE_SQL_TX = 1 << 23;
        const DATABASE_SQL_STMT = 1 << 24;

        const DRIVER = Self::DRIVER_NET.bits()
            | Self::DRIVER_CONN.bits()
            | Self::DRIVER_DISCOVERY.bits()
            | Self::DRIVER_BALANCER.bits()
            | Self::DRIVER_CREDENTIALS.bits();

        const TABLE_SESSION_QUERY = Self::TABLE_SESSION_QUERY_INVOKE.bits()
            | Self::TABLE_SESSION_QUERY_STREAM.bits();
        const TABLE_SESSION = Self::TABLE_SESSION_LIFECYCLE.bits()
            | Self::TABLE_SESSION_QUERY.bits()
            | Self::TABLE_SESSION_TRANSACTION.bits();
        const TABLE_POOL = Self::TABLE_POOL_LIFECYCLE.bits() | Self::TABLE_POOL_API.bits();
        const TABLE = Self::TABLE_EVENTS.bits() | Self::TABLE_SESSION.bits() | Self::TABLE_POOL.bits();

        const TOPIC_READER = Self::TOPIC_READER_STREAM_LIFECYCLE.bits()
            | Self::TOPIC_READER_PARTITION.bits()
            | Self::TOPIC_READER_STREAM.bits()
            | Self::TOPIC_READER_MESSAGE.bits();
        const TOPIC_WRITER = Self::TOPIC_WRITER_STREAM_LIFECYCLE.bits() | Self::TOPIC_WRITER_STREAM.bits();
        const TOPIC = Self::TOPIC_READER.bits() | Self::TOPIC_WRITER.bits();

        const DATABASE_SQL = Self::DATABASE_SQL_CONNECTOR.bits()
            | Self::DATABASE_SQL_CONN.bits()
            | Self::DATABASE_SQL_TX.bits()
            | Self::DATABASE_SQL_STMT.bits();
    }
}

/// Source of the category selector handed to the hook constructors.
///
/// Constructors read it once; categories cannot be toggled on an already
/// built hook set.
pub trait Detailer {
    fn details(&self) -> Details;
}

impl Detailer for Details {
    fn details(&self) -> Details {
        *self
    }
}

impl FromStr for Details {
    type Err = Error;

    /// Parse a list of category names separated by `,` or `|`.
    ///
    /// Names are the flag names, case-insensitive, with `.` or `-` accepted
    /// for `_` (`table.pool`, `driver-net`). `all` selects everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut details = Details::empty();
        for token in s.split([',', '|']).map(str::trim).filter(|t| !t.is_empty()) {
            if token.eq_ignore_ascii_case("all") {
                details |= Details::all();
                continue;
            }
            let name = token.to_ascii_uppercase().replace(['.', '-'], "_");
            let flag = Details::from_name(&name).ok_or_else(|| Error::UnknownCategory(token.to_string()))?;
            details |= flag;
        }
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composites_cover_their_members() {
        assert!(Details::TABLE.contains(Details::TABLE_POOL_API));
        assert!(Details::TABLE_SESSION.contains(Details::TABLE_SESSION_QUERY_STREAM));
        assert!(!Details::TABLE.intersects(Details::DRIVER));
        assert_eq!(Details::all().bits().count_ones(), 25);
    }

    #[test]
    fn parses_names() {
        let d: Details = "discovery, table.pool | driver-net".parse().unwrap();
        assert_eq!(d, Details::DISCOVERY | Details::TABLE_POOL | Details::DRIVER_NET);
        assert_eq!("ALL".parse::<Details>().unwrap(), Details::all());
        assert_eq!("".parse::<Details>().unwrap(), Details::empty());
        assert!("table.everything".parse::<Details>().is_err());
    }
}
