//! Backpressure-driven reader stage
//!
//! [`StageCore`] is the sans-IO pipeline. [`SpanReader`] drives it from a
//! blocking iterator of chunks and [`SpanStream`] from a `futures::Stream`.
//! Both pull exactly one upstream chunk each time the tokenizer runs dry and
//! never read ahead of downstream demand.

mod async_stream;
mod core;
mod reader;
mod state;

pub use self::core::{Progress, StageCore};
pub use async_stream::SpanStream;
pub use reader::SpanReader;
pub use state::StageState;

#[cfg(test)]
mod stage_tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::error::JsonReaderError;
    use crate::selector::Selector;

    fn stage(selector: &str, config: ReaderConfig) -> StageCore {
        let selector = Selector::parse(selector).expect("valid selector");
        StageCore::new(selector, config).expect("valid config")
    }

    #[test]
    fn test_stage_requests_input_then_emits() {
        let mut core = stage("$[*]", ReaderConfig::default());
        assert_eq!(core.state(), StageState::AwaitingDemand);
        assert_eq!(core.advance(), Ok(Progress::NeedInput));
        assert_eq!(core.state(), StageState::AwaitingInput);

        core.feed(b"[10, 2");
        match core.advance() {
            Ok(Progress::Emit(value)) => assert_eq!(&value.bytes[..], b"10"),
            other => panic!("expected a value, got {other:?}"),
        }
        assert_eq!(core.state(), StageState::AwaitingDemand);

        // "2" may continue in the next chunk
        assert_eq!(core.advance(), Ok(Progress::NeedInput));
        core.feed(b"0]");
        match core.advance() {
            Ok(Progress::Emit(value)) => assert_eq!(&value.bytes[..], b"20"),
            other => panic!("expected a value, got {other:?}"),
        }

        assert_eq!(core.advance(), Ok(Progress::NeedInput));
        core.finish();
        assert_eq!(core.advance(), Ok(Progress::Completed));
        assert_eq!(core.state(), StageState::Completed);
        assert_eq!(core.stats().values_emitted, 2);
        assert_eq!(core.stats().chunks_received, 2);
    }

    #[test]
    fn test_unmatched_bytes_are_released() {
        let mut core = stage("$.b", ReaderConfig::default());
        core.feed(br#"{"a": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "#);
        assert_eq!(core.advance(), Ok(Progress::NeedInput));
        assert_eq!(core.buffer_stats().retained, 0);
    }

    #[test]
    fn test_open_match_is_retained_until_closed() {
        let mut core = stage("$.b", ReaderConfig::default());
        core.feed(br#"{"a": 1, "b": [1, 2, "#);
        assert_eq!(core.advance(), Ok(Progress::NeedInput));
        assert_eq!(core.buffer_stats().retained, 7);

        core.feed(b"3]}");
        match core.advance() {
            Ok(Progress::Emit(value)) => {
                assert_eq!(&value.bytes[..], b"[1, 2, 3]");
                assert_eq!(value.offset(), 14);
            }
            other => panic!("expected a value, got {other:?}"),
        }
    }

    #[test]
    fn test_buffer_limit_applies_to_in_flight_value() {
        let config = ReaderConfig::default()
            .with_initial_buffer_capacity(16)
            .with_max_buffer_size(32);
        let mut core = stage("$.big", config);
        core.feed(br#"{"skip": "an unmatched string that is much longer than the limit", "#);
        assert_eq!(core.advance(), Ok(Progress::NeedInput));

        core.feed(br#""big": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14"#);
        let err = core.advance().expect_err("value exceeds the limit");
        assert!(matches!(err, JsonReaderError::BufferLimitExceeded { limit: 32, .. }));
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mut core = stage("$", ReaderConfig::default());
        core.feed(b"[1, 2");
        assert_eq!(core.advance(), Ok(Progress::NeedInput));
        core.cancel();
        assert_eq!(core.state(), StageState::Cancelled);
        assert_eq!(core.buffer_stats().retained, 0);

        core.fail(&"late failure");
        assert_eq!(core.state(), StageState::Cancelled);
    }

    #[test]
    fn test_terminal_stage_ignores_further_input() {
        let mut core = stage("$[*]", ReaderConfig::default());
        core.feed(b"[1, 2");
        match core.advance() {
            Ok(Progress::Emit(value)) => assert_eq!(&value.bytes[..], b"1"),
            other => panic!("expected a value, got {other:?}"),
        }
        core.cancel();

        assert_eq!(core.advance(), Ok(Progress::Completed));
        core.feed(b"]");
        core.finish();
        assert_eq!(core.advance(), Ok(Progress::Completed));
        assert_eq!(core.state(), StageState::Cancelled);
        assert_eq!(core.buffer_stats().retained, 0);
        assert_eq!(core.stats().chunks_received, 1);
    }

    #[test]
    fn test_failed_stage_stays_failed() {
        let mut core = stage("$", ReaderConfig::default());
        core.feed(b"[1,]");
        let err = core.advance().expect_err("trailing comma");
        core.fail(&err);
        assert_eq!(core.state(), StageState::Failed);

        core.feed(b"[2]");
        assert_eq!(core.advance(), Ok(Progress::Completed));
        assert_eq!(core.state(), StageState::Failed);
    }

    #[test]
    fn test_keys_in_skipped_subtree_are_not_retained() {
        let config = ReaderConfig::default()
            .with_initial_buffer_capacity(16)
            .with_max_buffer_size(32);
        let mut core = stage("$.b", config);
        let long_key = "k".repeat(100);

        core.feed(format!(r#"{{"a": {{"{long_key}"#).as_bytes());
        assert_eq!(core.advance(), Ok(Progress::NeedInput));
        assert_eq!(core.buffer_stats().retained, 0);

        core.feed(br#"": 1}, "b": 2}"#);
        match core.advance() {
            Ok(Progress::Emit(value)) => assert_eq!(&value.bytes[..], b"2"),
            other => panic!("expected a value, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let selector = Selector::root();
        let config = ReaderConfig::default().with_max_depth(0);
        assert!(matches!(
            StageCore::new(selector, config),
            Err(JsonReaderError::Config(_))
        ));
    }
}
