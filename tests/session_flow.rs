//! End-to-end: raw backend bytes through decoding, interpretation and
//! state reduction.

use futures::StreamExt;
use serde_json::json;
use tickerlens::{
    ClassifiedEvent, SessionState, SseDecoder, StepStatus, TickerError, event_stream, interpret,
    reduce,
};

fn backend_body() -> String {
    let report = json!({
        "ticker": "AAPL",
        "company_name": "Apple Inc.",
        "timestamp": "2024-05-01T10:00:05",
        "query": "Give me analysis for $AAPL",
        "price_info": {"current_price": 189.84, "change": 2.31, "change_percent": 1.23},
        "analysis": "<think>hmm</think>Strong services growth.",
        "fundamentals": {"pe_ratio": 29.4, "beta": null},
        "reddit_sentiment": null,
        "news": []
    });
    let completed = json!({
        "step": "report_generation",
        "status": "completed",
        "message": "Report ready",
        "progress": 1.0,
        "data": {"report": report}
    });
    format!(
        "event: analysis_start\ndata: {{\"query\": \"Give me analysis for $AAPL\", \"timestamp\": \"2024-05-01T10:00:00\"}}\n\n\
         event: status_update\ndata: {{\"step\": \"ticker_extraction\", \"status\": \"processing\", \"message\": \"Extracting ticker\", \"progress\": 0.05, \"data\": null}}\n\n\
         event: status_update\ndata: {completed}\n\n\
         event: analysis_complete\ndata: {{}}\n\n"
    )
}

fn fold(events: impl IntoIterator<Item = ClassifiedEvent>) -> SessionState {
    events
        .into_iter()
        .fold(SessionState::begin("Give me analysis for $AAPL"), reduce)
}

fn assert_finished_with_report(state: &SessionState) {
    assert!(!state.is_analyzing);
    assert!(state.failure.is_none());
    assert_eq!(state.progress_log.len(), 2);
    assert_eq!(state.progress_log[0].status, StepStatus::Processing);

    let report = state.report.as_ref().expect("report");
    assert_eq!(report.ticker, "AAPL");
    assert_eq!(report.analysis_body(), "Strong services growth.");
    assert!(report.fundamentals["beta"].is_null());
}

#[test]
fn test_chunked_bytes_to_state() {
    let body = backend_body();
    let bytes = body.as_bytes();

    for chunk_size in [1, 3, 7, 64, bytes.len()] {
        let mut decoder = SseDecoder::new();
        let mut frames = Vec::new();
        for chunk in bytes.chunks(chunk_size) {
            frames.extend(decoder.feed(chunk));
        }
        frames.extend(decoder.finish());

        let state = fold(frames.iter().filter_map(interpret));
        assert_finished_with_report(&state);
    }
}

#[tokio::test]
async fn test_event_stream_to_state() {
    let body = backend_body().into_bytes();
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
        body.chunks(11).map(|c| Ok(c.to_vec())).collect();

    let events: Vec<_> = event_stream(futures::stream::iter(chunks), None)
        .collect()
        .await;
    let events = events.into_iter().collect::<Result<Vec<_>, TickerError>>().unwrap();

    assert!(matches!(events[0], ClassifiedEvent::AnalysisStarted { .. }));
    assert_finished_with_report(&fold(events));
}

#[tokio::test]
async fn test_read_error_ends_stream() {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
        Ok(b"event: status_update\ndata: {\"step\": \"ticker_extraction\", \"status\": \"processing\", \"progress\": 0.1}\n\n".to_vec()),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        Ok(b"event: analysis_complete\ndata: {}\n\n".to_vec()),
    ];

    let items: Vec<_> = event_stream(futures::stream::iter(chunks), None)
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Ok(ClassifiedEvent::StatusUpdate(_))));
    assert!(items[1].is_err());
}
