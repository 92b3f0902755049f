use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
};
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};

use crate::state::AppState;

/// Live feed of store notifications as Server-Sent Events.
pub async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = state.events.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|message| {
        // A lagged subscriber just misses frames; this is a live feed, not
        // a durable log.
        let message = message.ok()?;
        let data = serde_json::to_string(&message.data).ok()?;
        Some(Ok::<_, Infallible>(
            SseEvent::default().event(message.event).data(data),
        ))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
