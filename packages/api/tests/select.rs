//! Public API tests for `JsonReader::select`

use std::io;

use futures::stream::{self, StreamExt};
use jsonreader::{JsonReader, JsonReaderError, ReaderConfig, StageState};
use serde::Deserialize;

const BODY: &[u8] = br#"{"size":3,"rows":[{"id":1,"doc":{"name":"test1"}},{"id":2,"doc":{"name":"test2"}},{"id":3,"doc":{"name":"test3"}}]}"#;

#[derive(Debug, Deserialize, PartialEq)]
struct Doc {
    name: String,
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_select_docs_from_io_chunks() {
    init_logging();
    let chunks = BODY.chunks(3).map(|chunk| Ok::<_, io::Error>(chunk.to_vec()));
    let docs = JsonReader::select("$.rows[*].doc")
        .expect("valid selector")
        .config(ReaderConfig::low_memory())
        .read_chunks(chunks)
        .expect("valid config")
        .collect::<io::Result<Vec<_>>>()
        .expect("valid document");

    assert_eq!(docs.len(), 3);
    assert_eq!(&docs[2][..], br#"{"name":"test3"}"#);
}

#[test]
fn test_deserialize_docs() {
    init_logging();
    let docs: Vec<Doc> = jsonreader::select("$.rows[*].doc")
        .expect("valid selector")
        .deserialize(BODY.chunks(11).map(Ok::<_, JsonReaderError>))
        .expect("valid config")
        .collect::<Result<_, _>>()
        .expect("every doc fits");

    let names: Vec<&str> = docs.iter().map(|doc| doc.name.as_str()).collect();
    assert_eq!(names, ["test1", "test2", "test3"]);
}

#[test]
fn test_typed_reader_cancel() {
    let mut ids = JsonReader::select("$.rows[*].id")
        .expect("valid selector")
        .deserialize::<u32, _, _, _>(BODY.chunks(4).map(Ok::<_, JsonReaderError>))
        .expect("valid config");

    assert_eq!(ids.next(), Some(Ok(1)));
    ids.cancel();
    assert_eq!(ids.state(), StageState::Cancelled);
    assert_eq!(ids.next(), None);
}

#[test]
fn test_selector_errors_surface_before_reading() {
    for (path, position) in [("rows", 0), ("$.rows[0]", 7), ("$.rows[?(@.id)]", 7), ("$.*", 2)] {
        match JsonReader::select(path) {
            Err(JsonReaderError::InvalidSelector { position: at, .. }) => {
                assert_eq!(at, position, "{path}");
            }
            other => panic!("{path}: expected InvalidSelector, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_deserialize_stream() {
    init_logging();
    let source = stream::iter(BODY.chunks(9).map(Ok::<_, JsonReaderError>));
    let docs: Vec<Result<Doc, JsonReaderError>> = JsonReader::select("$.rows[*].doc")
        .expect("valid selector")
        .deserialize_stream(source)
        .expect("valid config")
        .collect()
        .await;

    assert_eq!(
        docs,
        vec![
            Ok(Doc { name: "test1".into() }),
            Ok(Doc { name: "test2".into() }),
            Ok(Doc { name: "test3".into() }),
        ]
    );
}

#[tokio::test]
async fn test_read_stream_stats() {
    let source = stream::iter(BODY.chunks(16).map(Ok::<_, JsonReaderError>));
    let mut reader = Box::pin(
        JsonReader::select("$.rows[*].id")
            .expect("valid selector")
            .read_stream(source)
            .expect("valid config"),
    );

    let mut count = 0;
    while let Some(value) = reader.next().await {
        value.expect("valid document");
        count += 1;
    }

    let stats = reader.stats();
    assert_eq!(count, 3);
    assert_eq!(stats.values_emitted, 3);
    assert_eq!(stats.bytes_received, BODY.len() as u64);
    assert_eq!(stats.max_depth, 4);
    assert_eq!(reader.state(), StageState::Completed);
}
