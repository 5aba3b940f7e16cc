//! Pooled record builder for hand-written structured entries.

mod array;
mod logger;
mod pool;
mod record;

pub use array::Array;
pub use logger::StructuralLogger;
pub use pool::{RecordPool, RecordPoolConfig};
pub use record::Record;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::field::{Field, Value};
    use crate::level::Level;
    use crate::logger::Logger;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, thiserror::Error)]
    #[error("session expired")]
    struct Expired;

    fn capture() -> (Arc<MemoryBackend>, StructuralLogger) {
        let backend = Arc::new(MemoryBackend::new());
        let log = StructuralLogger::new(Logger::new(backend.clone()), RecordPool::default());
        (backend, log)
    }

    #[test]
    fn message_emits_exactly_the_accumulated_fields() {
        let (backend, log) = capture();
        log.warn()
            .string("address", "n1:2135")
            .int8("small", -3)
            .uint32("node", 7)
            .duration("latency", Duration::from_millis(2))
            .float32("ratio", 0.5)
            .named_error("cause", &Expired)
            .message("pessimized");

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Warn);
        assert_eq!(records[0].message, "pessimized");
        assert_eq!(
            records[0].fields,
            vec![
                Field::string("address", "n1:2135"),
                Field::int("small", -3),
                Field::uint("node", 7),
                Field::duration("latency", Duration::from_millis(2)),
                Field::float("ratio", 0.5),
                Field::new("cause", Value::Error("session expired".into())),
            ]
        );
    }

    #[test]
    fn second_message_is_a_no_op() {
        let (backend, log) = capture();
        let mut record = log.info();
        record.bool("ok", true);
        record.message("first");
        record.bool("late", true).message("second");
        drop(record);

        assert_eq!(backend.len(), 1);
        assert_eq!(log.pool().count(), 1);
    }

    #[test]
    fn buffers_are_recycled() {
        let (backend, log) = capture();
        for i in 0..3 {
            log.debug().int64("i", i).message("tick");
            assert_eq!(log.pool().count(), 1);
        }
        {
            let mut unsent = log.error();
            unsent.string("unsent", "x");
        }
        assert_eq!(log.pool().count(), 1);
        assert_eq!(backend.len(), 3);
    }

    #[test]
    fn nests_objects_and_arrays() {
        let (backend, log) = capture();
        let mut endpoint = log.object();
        endpoint.string("address", "n1:2135").bool("local", true);
        let mut ids = log.array();
        ids.int64(1).int64(2);

        log.with_name("balancer").info().object("endpoint", endpoint).array("ids", ids).message("inserted");

        let records = backend.records();
        assert_eq!(records[0].logger, "balancer");
        assert_eq!(
            records[0].to_json()["fields"],
            serde_json::json!({"endpoint": {"address": "n1:2135", "local": true}, "ids": [1, 2]})
        );
    }

    #[test]
    fn object_record_never_emits() {
        let (backend, log) = capture();
        log.object().string("k", "v").message("ignored");
        assert!(backend.is_empty());
    }

    type RecordSetter = fn(&StructuralLogger, &mut Record);
    type ArraySetter = fn(&StructuralLogger, &mut Array);

    fn set_field(set: RecordSetter, want: Field) -> (RecordSetter, Field) {
        (set, want)
    }

    fn set_item(set: ArraySetter, want: Value) -> (ArraySetter, Value) {
        (set, want)
    }

    #[test]
    fn every_record_setter_writes_one_field() {
        let cases = [
            set_field(|_, r| { r.string("k", "v"); }, Field::string("k", "v")),
            set_field(|_, r| { r.strings("k", &["a", "b"]); }, Field::strings("k", vec!["a".into(), "b".into()])),
            set_field(|_, r| { r.stringer("k", &Expired); }, Field::string("k", "session expired")),
            set_field(|_, r| { r.duration("k", Duration::from_secs(1)); }, Field::duration("k", Duration::from_secs(1))),
            set_field(|_, r| { r.int("k", -1); }, Field::int("k", -1)),
            set_field(|_, r| { r.int8("k", -8); }, Field::int("k", -8)),
            set_field(|_, r| { r.int16("k", -16); }, Field::int("k", -16)),
            set_field(|_, r| { r.int32("k", -32); }, Field::int("k", -32)),
            set_field(|_, r| { r.int64("k", i64::MIN); }, Field::int("k", i64::MIN)),
            set_field(|_, r| { r.uint("k", 1); }, Field::uint("k", 1)),
            set_field(|_, r| { r.uint8("k", 8); }, Field::uint("k", 8)),
            set_field(|_, r| { r.uint16("k", 16); }, Field::uint("k", 16)),
            set_field(|_, r| { r.uint32("k", 32); }, Field::uint("k", 32)),
            set_field(|_, r| { r.uint64("k", u64::MAX); }, Field::uint("k", u64::MAX)),
            set_field(|_, r| { r.float32("k", 0.25); }, Field::float("k", 0.25)),
            set_field(|_, r| { r.float64("k", 1.5); }, Field::float("k", 1.5)),
            set_field(|_, r| { r.bool("k", false); }, Field::bool("k", false)),
            set_field(|_, r| { r.error(&Expired); }, Field::new("error", Value::Error("session expired".into()))),
            set_field(|_, r| { r.named_error("k", &Expired); }, Field::new("k", Value::Error("session expired".into()))),
            set_field(|_, r| { r.any("k", &[1, 2]); }, Field::new("k", Value::Json(serde_json::json!([1, 2])))),
            set_field(
                |log, r| {
                    let mut inner = log.object();
                    inner.bool("ok", true);
                    r.object("k", inner);
                },
                Field::new("k", Value::Object(vec![Field::bool("ok", true)])),
            ),
            set_field(
                |log, r| {
                    let mut items = log.array();
                    items.string("x");
                    r.array("k", items);
                },
                Field::new("k", Value::Array(vec![Value::Str("x".into())])),
            ),
        ];

        for (i, (set, want)) in cases.into_iter().enumerate() {
            let (backend, log) = capture();
            let mut record = log.info();
            set(&log, &mut record);
            record.message("set");
            assert_eq!(backend.records()[0].fields, vec![want], "case {}", i);
        }
    }

    #[test]
    fn every_array_setter_appends_one_item() {
        let cases = [
            set_item(|_, a| { a.string("v"); }, Value::Str("v".into())),
            set_item(|_, a| { a.strings(&["a", "b"]); }, Value::Strings(vec!["a".into(), "b".into()])),
            set_item(|_, a| { a.stringer(&Expired); }, Value::Str("session expired".into())),
            set_item(|_, a| { a.duration(Duration::from_millis(5)); }, Value::Duration(Duration::from_millis(5))),
            set_item(|_, a| { a.int(-1); }, Value::Int(-1)),
            set_item(|_, a| { a.int8(-8); }, Value::Int(-8)),
            set_item(|_, a| { a.int16(-16); }, Value::Int(-16)),
            set_item(|_, a| { a.int32(-32); }, Value::Int(-32)),
            set_item(|_, a| { a.int64(-64); }, Value::Int(-64)),
            set_item(|_, a| { a.uint(1); }, Value::Uint(1)),
            set_item(|_, a| { a.uint8(8); }, Value::Uint(8)),
            set_item(|_, a| { a.uint16(16); }, Value::Uint(16)),
            set_item(|_, a| { a.uint32(32); }, Value::Uint(32)),
            set_item(|_, a| { a.uint64(64); }, Value::Uint(64)),
            set_item(|_, a| { a.float32(0.25); }, Value::Float(0.25)),
            set_item(|_, a| { a.float64(1.5); }, Value::Float(1.5)),
            set_item(|_, a| { a.bool(true); }, Value::Bool(true)),
            set_item(|_, a| { a.error(&Expired); }, Value::Error("session expired".into())),
            set_item(|_, a| { a.any(&("n1", 3)); }, Value::Json(serde_json::json!(["n1", 3]))),
            set_item(
                |log, a| {
                    let mut inner = log.object();
                    inner.int64("id", 1);
                    a.object(inner);
                },
                Value::Object(vec![Field::int("id", 1)]),
            ),
            set_item(
                |log, a| {
                    let mut inner = log.array();
                    inner.bool(false);
                    a.array(inner);
                },
                Value::Array(vec![Value::Bool(false)]),
            ),
        ];

        for (i, (set, want)) in cases.into_iter().enumerate() {
            let (backend, log) = capture();
            let mut items = log.array();
            set(&log, &mut items);
            assert_eq!(items.len(), 1, "case {}", i);
            log.info().array("items", items).message("set");
            assert_eq!(backend.records()[0].fields, vec![Field::new("items", Value::Array(vec![want]))], "case {}", i);
        }
    }
}
