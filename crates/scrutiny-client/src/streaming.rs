use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use scrutiny_types::{AnalysisEvent, StreamEnvelope};
use serde_json::Value;

use crate::buffer_utils::MessageBuffer;
use crate::error::ClientError;

/// Payload line prefix inside an SSE message. Exactly six characters; the
/// remainder of the line is taken verbatim.
const DATA_PREFIX: &str = "data: ";

/// Diagnostic for a `data:` line whose payload did not parse as JSON.
///
/// Malformed lines never abort the stream; they surface here (and in the
/// trace log) so the condition is observable without killing the analysis.
#[derive(Debug, Clone)]
pub struct ParseWarning {
    /// The offending payload, prefix stripped. Lossily decoded when the
    /// enclosing message was not valid UTF-8.
    pub payload: String,
    pub reason: String,
}

/// Item yielded by the low-level stream parsers.
#[derive(Debug)]
pub enum StreamItem {
    Event(AnalysisEvent),
    Warning(ParseWarning),
}

type ProgressFn = Box<dyn FnMut(StreamEnvelope) + Send>;
type CompleteFn = Box<dyn FnMut(Value) + Send>;
type ErrorFn = Box<dyn FnMut(ClientError) + Send>;
type WarningFn = Box<dyn FnMut(ParseWarning) + Send>;

/// Consumer callbacks for one streaming analysis.
///
/// Each callback is optional and bound once per call; events whose callback
/// is absent are dropped silently. A fresh set is handed to every
/// [`DesignClient::analyze_stream`](crate::DesignClient::analyze_stream)
/// invocation; there is no shared dispatch table between streams.
#[derive(Default)]
pub struct StreamCallbacks {
    on_progress: Option<ProgressFn>,
    on_complete: Option<CompleteFn>,
    on_error: Option<ErrorFn>,
    on_parse_warning: Option<WarningFn>,
}

impl StreamCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every progress and `agent_output` envelope.
    pub fn on_progress(mut self, f: impl FnMut(StreamEnvelope) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called with the `data` field of a `complete` envelope. The stream
    /// keeps being read afterwards; a server that emits further events gets
    /// them dispatched too.
    pub fn on_complete(mut self, f: impl FnMut(Value) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Called for transport failures, non-success responses and
    /// server-signaled `error` envelopes. A server-signaled error does not
    /// stop the stream.
    pub fn on_error(mut self, f: impl FnMut(ClientError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Diagnostic sink for malformed `data:` lines.
    pub fn on_parse_warning(mut self, f: impl FnMut(ParseWarning) + Send + 'static) -> Self {
        self.on_parse_warning = Some(Box::new(f));
        self
    }

    pub(crate) fn dispatch(&mut self, event: AnalysisEvent) {
        match event {
            AnalysisEvent::Progress(envelope) => {
                if let Some(f) = &mut self.on_progress {
                    f(envelope);
                }
            }
            AnalysisEvent::Complete { data } => {
                if let Some(f) = &mut self.on_complete {
                    f(data);
                }
            }
            AnalysisEvent::Error { message } => self.error(ClientError::Analysis(message)),
        }
    }

    pub(crate) fn error(&mut self, error: ClientError) {
        if let Some(f) = &mut self.on_error {
            f(error);
        }
    }

    pub(crate) fn parse_warning(&mut self, warning: ParseWarning) {
        if let Some(f) = &mut self.on_parse_warning {
            f(warning);
        }
    }
}

/// Parse a chunked byte stream into classified analysis events.
///
/// Chunks are appended to a [`MessageBuffer`]; every complete
/// `"\n\n"`-terminated message is scanned for `data: ` lines, each parsed
/// as a [`StreamEnvelope`] and classified. Chunk boundaries carry no
/// meaning: the same bytes yield the same events no matter how the
/// transport sliced them. After the source ends, an unterminated trailing
/// message is flushed through the same path once.
///
/// A transport error ends the stream with the error as its final item; the
/// buffered tail is discarded in that case.
pub fn parse_sse_chunks<S, E>(chunks: S) -> impl Stream<Item = Result<StreamItem, E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    async_stream::stream! {
        let mut chunks = Box::pin(chunks);
        let mut buffer = MessageBuffer::default();

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    buffer.push(&bytes);

                    while let Some(message) = buffer.next_message() {
                        match message {
                            Ok(message) => {
                                for item in parse_message(&message) {
                                    yield Ok(item);
                                }
                            }
                            Err(e) => {
                                tracing::debug!("skipping non-UTF-8 SSE message: {}", e);
                                let payload =
                                    String::from_utf8_lossy(&e.into_bytes()).into_owned();
                                yield Ok(StreamItem::Warning(ParseWarning {
                                    payload,
                                    reason: "message is not valid UTF-8".to_string(),
                                }));
                            }
                        }
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        if let Some(rest) = buffer.take_remainder() {
            for item in parse_message(&rest) {
                yield Ok(item);
            }
        }
    }
}

/// [`parse_sse_chunks`] over a live HTTP response body.
pub fn parse_analysis_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<StreamItem, ClientError>> + Send>> {
    Box::pin(
        parse_sse_chunks(response.bytes_stream()).map(|item| item.map_err(ClientError::Transport)),
    )
}

/// Drive a chunked byte stream into a callback set.
///
/// Server-signaled `error` envelopes go to `on_error` and the loop keeps
/// running; `complete` likewise does not end the loop. Only transport
/// failures end it early, and those are returned to the caller instead of
/// being dispatched, so the caller decides how to surface them.
pub async fn dispatch_sse_stream<S, E>(
    chunks: S,
    callbacks: &mut StreamCallbacks,
) -> Result<(), E>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let items = parse_sse_chunks(chunks);
    futures::pin_mut!(items);

    while let Some(item) = items.next().await {
        match item? {
            StreamItem::Event(event) => callbacks.dispatch(event),
            StreamItem::Warning(warning) => callbacks.parse_warning(warning),
        }
    }

    Ok(())
}

/// Extract and classify every `data: ` line of one message.
fn parse_message(message: &str) -> Vec<StreamItem> {
    let mut items = Vec::new();

    for line in message.split('\n') {
        if let Some(payload) = line.strip_prefix(DATA_PREFIX) {
            match serde_json::from_str::<StreamEnvelope>(payload) {
                Ok(envelope) => items.push(StreamItem::Event(envelope.classify())),
                Err(e) => {
                    tracing::debug!("failed to parse SSE event: {}", e);
                    items.push(StreamItem::Warning(ParseWarning {
                        payload: payload.to_string(),
                        reason: e.to_string(),
                    }));
                }
            }
        }
    }

    items
}
