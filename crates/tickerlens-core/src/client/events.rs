//! Response body to classified events

use crate::analysis::{ClassifiedEvent, interpret};
use crate::error::{TickerError, TickerResult};
use crate::stream::{Frame, SseDecoder};
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

/// Ordered stream of classified events from one analysis response
pub type EventStream = Pin<Box<dyn Stream<Item = TickerResult<ClassifiedEvent>> + Send>>;

struct EventStreamState<S> {
    body: Pin<Box<S>>,
    decoder: SseDecoder,
    ready: VecDeque<ClassifiedEvent>,
    inactivity: Option<Duration>,
    finished: bool,
}

impl<S> EventStreamState<S> {
    fn enqueue(&mut self, frames: Vec<Frame>) {
        for frame in frames {
            tracing::debug!(
                event = %frame.event_name,
                payload_len = frame.payload_text.len(),
                "Frame received"
            );
            if let Some(event) = interpret(&frame) {
                self.ready.push_back(event);
            }
        }
    }
}

/// Decode a response body into classified events, in arrival order.
///
/// At end of body the decoder is flushed, so a final frame without a
/// trailing blank line is still delivered. A read error or a silence longer
/// than `inactivity` yields one error item and ends the stream.
pub fn event_stream<S, B, E>(body: S, inactivity: Option<Duration>) -> EventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<TickerError> + Send + 'static,
{
    let state = EventStreamState {
        body: Box::pin(body),
        decoder: SseDecoder::new(),
        ready: VecDeque::new(),
        inactivity,
        finished: false,
    };

    let stream = futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                return Some((Ok(event), state));
            }
            if state.finished {
                return None;
            }

            let next = match state.inactivity {
                Some(limit) => match tokio::time::timeout(limit, state.body.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        state.finished = true;
                        tracing::error!(seconds = limit.as_secs(), "Analysis stream went silent");
                        return Some((Err(TickerError::timeout(limit.as_secs())), state));
                    }
                },
                None => state.body.next().await,
            };

            match next {
                Some(Ok(chunk)) => {
                    let frames = state.decoder.feed(chunk.as_ref());
                    state.enqueue(frames);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    let err: TickerError = e.into();
                    tracing::error!(error = %err, "Analysis stream broke off");
                    return Some((Err(err), state));
                }
                None => {
                    state.finished = true;
                    let frames = state.decoder.finish();
                    state.enqueue(frames);
                }
            }
        }
    });

    Box::pin(stream)
}
