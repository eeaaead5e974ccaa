//! Behavior of the SSE dispatch loop against synthetic chunk streams.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures::stream;
use scrutiny_client::{dispatch_sse_stream, StreamCallbacks, StreamEnvelope};
use serde_json::{json, Value};

/// One recorded callback invocation, in dispatch order.
#[derive(Debug, Clone, PartialEq)]
enum Dispatched {
    Progress(StreamEnvelope),
    Complete(Value),
    Error(String),
    Warning(String),
}

type Log = Arc<Mutex<Vec<Dispatched>>>;

fn recording_callbacks(log: &Log) -> StreamCallbacks {
    let progress = Arc::clone(log);
    let complete = Arc::clone(log);
    let errors = Arc::clone(log);
    let warnings = Arc::clone(log);

    StreamCallbacks::new()
        .on_progress(move |envelope| {
            progress.lock().unwrap().push(Dispatched::Progress(envelope));
        })
        .on_complete(move |data| {
            complete.lock().unwrap().push(Dispatched::Complete(data));
        })
        .on_error(move |error| {
            errors.lock().unwrap().push(Dispatched::Error(error.to_string()));
        })
        .on_parse_warning(move |warning| {
            warnings.lock().unwrap().push(Dispatched::Warning(warning.payload));
        })
}

/// Deliver the given chunks and return the recorded dispatch sequence.
async fn dispatch_all(chunks: Vec<Vec<u8>>) -> Vec<Dispatched> {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut callbacks = recording_callbacks(&log);

    let chunks = stream::iter(
        chunks
            .into_iter()
            .map(|chunk| Ok::<Bytes, Infallible>(Bytes::from(chunk))),
    );
    dispatch_sse_stream(chunks, &mut callbacks).await.unwrap();

    let recorded = log.lock().unwrap().clone();
    recorded
}

/// Canonical stream: multi-byte UTF-8 in the first message, an
/// `agent_output` event, then a terminal `complete`.
const STREAM: &str = concat!(
    "data: {\"event_type\":\"progress\",\"progress\":0,\"message\":\"Gereksinimler çıkarılıyor\"}\n\n",
    "data: {\"event_type\":\"agent_output\",\"step\":\"requirements\",\"progress\":30}\n\n",
    "data: {\"event_type\":\"complete\",\"progress\":100,\"data\":{\"num_screens\":2}}\n\n",
);

#[tokio::test]
async fn test_chunk_boundary_independence() {
    let bytes = STREAM.as_bytes();

    let baseline = dispatch_all(vec![bytes.to_vec()]).await;
    assert_eq!(baseline.len(), 3);
    assert!(matches!(baseline[0], Dispatched::Progress(_)));
    assert!(matches!(baseline[1], Dispatched::Progress(_)));
    assert!(matches!(baseline[2], Dispatched::Complete(_)));

    // Every two-chunk split, which covers mid-UTF-8, mid-prefix and
    // mid-separator boundaries.
    for split in 1..bytes.len() {
        let halves = vec![bytes[..split].to_vec(), bytes[split..].to_vec()];
        let dispatched = dispatch_all(halves).await;
        assert_eq!(dispatched, baseline, "split at byte {}", split);
    }

    // Worst case: one byte per chunk.
    let single_bytes: Vec<Vec<u8>> = bytes.iter().map(|b| vec![*b]).collect();
    assert_eq!(dispatch_all(single_bytes).await, baseline);
}

#[tokio::test]
async fn test_separator_split_across_chunks() {
    let dispatched = dispatch_all(vec![
        b"data: {\"progress\":10}\n".to_vec(),
        b"\ndata: {\"progress\":20}\n\n".to_vec(),
    ])
    .await;

    assert_eq!(dispatched.len(), 2);
    assert!(dispatched
        .iter()
        .all(|d| matches!(d, Dispatched::Progress(_))));
}

#[tokio::test]
async fn test_malformed_line_is_skipped() {
    let stream = concat!(
        "data: {\"progress\":10}\n\n",
        "data: {not json\n\n",
        "data: {\"progress\":20}\n\n",
    );
    let dispatched = dispatch_all(vec![stream.as_bytes().to_vec()]).await;

    let events: Vec<_> = dispatched
        .iter()
        .filter(|d| matches!(d, Dispatched::Progress(_)))
        .collect();
    assert_eq!(events.len(), 2);

    let warnings: Vec<_> = dispatched
        .iter()
        .filter_map(|d| match d {
            Dispatched::Warning(payload) => Some(payload.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(warnings, vec!["{not json"]);
}

#[tokio::test]
async fn test_missing_discriminator_defaults_to_progress() {
    let dispatched = dispatch_all(vec![b"data: {\"progress\": 42}\n\n".to_vec()]).await;

    match &dispatched[..] {
        [Dispatched::Progress(envelope)] => {
            assert_eq!(envelope.event_type, None);
            assert_eq!(envelope.progress, Some(42));
        }
        other => panic!("expected one progress dispatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_discriminator_defaults_to_progress() {
    let dispatched =
        dispatch_all(vec![b"data: {\"event_type\":\"agent_output\"}\n\n".to_vec()]).await;

    assert!(matches!(dispatched[..], [Dispatched::Progress(_)]));
}

#[tokio::test]
async fn test_final_flush_dispatches_unterminated_message() {
    // Stream ends right after the payload, no trailing separator.
    let dispatched = dispatch_all(vec![
        b"data: {\"event_type\":\"complete\",\"data\":{}}".to_vec(),
    ])
    .await;

    assert_eq!(dispatched, vec![Dispatched::Complete(json!({}))]);
}

#[tokio::test]
async fn test_whitespace_tail_is_not_flushed() {
    let dispatched = dispatch_all(vec![b"data: {\"progress\":1}\n\n\n  ".to_vec()]).await;

    assert_eq!(dispatched.len(), 1);
}

#[tokio::test]
async fn test_independent_invocations_yield_identical_sequences() {
    let first = dispatch_all(vec![STREAM.as_bytes().to_vec()]).await;
    let second = dispatch_all(vec![STREAM.as_bytes().to_vec()]).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_events_after_complete_are_still_dispatched() {
    let stream = concat!(
        "data: {\"event_type\":\"complete\",\"data\":{\"num_screens\":1}}\n\n",
        "data: {\"progress\":99}\n\n",
        "data: {\"event_type\":\"complete\",\"data\":{\"num_screens\":2}}\n\n",
    );
    let dispatched = dispatch_all(vec![stream.as_bytes().to_vec()]).await;

    assert_eq!(
        dispatched,
        vec![
            Dispatched::Complete(json!({"num_screens": 1})),
            Dispatched::Progress(StreamEnvelope {
                progress: Some(99),
                ..Default::default()
            }),
            Dispatched::Complete(json!({"num_screens": 2})),
        ]
    );
}

#[tokio::test]
async fn test_server_error_event_does_not_stop_the_stream() {
    let stream = concat!(
        "data: {\"event_type\":\"error\",\"message\":\"vision model unavailable\"}\n\n",
        "data: {\"progress\":50}\n\n",
    );
    let dispatched = dispatch_all(vec![stream.as_bytes().to_vec()]).await;

    assert_eq!(dispatched.len(), 2);
    match &dispatched[0] {
        Dispatched::Error(message) => assert!(message.contains("vision model unavailable")),
        other => panic!("expected error dispatch, got {:?}", other),
    }
    assert!(matches!(dispatched[1], Dispatched::Progress(_)));
}

#[tokio::test]
async fn test_absent_callbacks_drop_events() {
    // No callbacks at all: the loop still drains the stream cleanly.
    let chunks = stream::iter(vec![Ok::<Bytes, Infallible>(Bytes::from_static(
        STREAM.as_bytes(),
    ))]);
    let mut callbacks = StreamCallbacks::new();

    dispatch_sse_stream(chunks, &mut callbacks).await.unwrap();
}

#[derive(Debug)]
struct BrokenPipe;

impl std::fmt::Display for BrokenPipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "broken pipe")
    }
}

impl std::error::Error for BrokenPipe {}

#[tokio::test]
async fn test_transport_error_ends_the_loop() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut callbacks = recording_callbacks(&log);

    // A complete event arrives, then the connection dies with half a
    // message buffered. The error is returned and the tail is dropped.
    let chunks = stream::iter(vec![
        Ok(Bytes::from_static(
            b"data: {\"progress\":1}\n\ndata: {\"pro",
        )),
        Err(BrokenPipe),
    ]);

    let result = dispatch_sse_stream(chunks, &mut callbacks).await;
    assert!(result.is_err());

    let recorded = log.lock().unwrap().clone();
    assert!(matches!(recorded[..], [Dispatched::Progress(_)]));
}
