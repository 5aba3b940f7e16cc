use std::time::Instant;

use crate::field::{latency, version, Field};
use crate::logger::Logger;
use crate::trace::discovery::{DiscoverDoneInfo, DiscoverStartInfo};
use crate::trace::{Detailer, Details, Discovery, OnDone};

/// Discovery-client hooks, logged under `discovery`.
pub fn discovery(log: &Logger, d: impl Detailer) -> Discovery {
    let mut t = Discovery::default();
    if !d.details().contains(Details::DISCOVERY) {
        return t;
    }
    let log = log.named("discovery");
    t.on_discover = Some(Box::new(move |info: DiscoverStartInfo| -> OnDone<DiscoverDoneInfo> {
        log.debug(
            "try to discover",
            vec![
                Field::string("address", info.address.as_str()),
                Field::string("database", info.database.as_str()),
            ],
        );
        let log = log.clone();
        let start = Instant::now();
        Box::new(move |done: DiscoverDoneInfo| match &done.error {
            None => log.info(
                "discover finished",
                vec![
                    Field::string("address", info.address),
                    Field::string("database", info.database),
                    latency(start),
                    Field::strings("endpoints", done.endpoints.iter().map(ToString::to_string).collect()),
                ],
            ),
            Some(err) => log.error(
                "discover failed",
                vec![
                    version(),
                    Field::string("address", info.address),
                    Field::string("database", info.database),
                    latency(start),
                    Field::error(err),
                ],
            ),
        })
    }));
    t
}
