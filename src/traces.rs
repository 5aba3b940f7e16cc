use crate::logger::Logger;
use crate::options::Options;
use crate::trace::{DatabaseSql, Detailer, Discovery, Driver, Retry, Scripting, Table, Topic};

/// Every hook set, built from one logger and one category selection.
#[derive(Default)]
pub struct Traces {
    pub driver: Driver,
    pub table: Table,
    pub topic: Topic,
    pub scripting: Scripting,
    pub discovery: Discovery,
    pub database_sql: DatabaseSql,
    pub retry: Retry,
}

/// Build all hook sets at once.
pub fn with_traces(log: &Logger, d: impl Detailer, opts: &Options) -> Traces {
    let details = d.details();
    Traces {
        driver: crate::driver::driver(log, details),
        table: crate::table::table(log, details, opts),
        topic: crate::topic::topic(log, details),
        scripting: crate::scripting::scripting(log, details, opts),
        discovery: crate::discovery::discovery(log, details),
        database_sql: crate::sql::database_sql(log, details, opts),
        retry: crate::retry::retry(log, details),
    }
}
