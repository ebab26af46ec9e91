use std::time::Instant;

use tracing::{info, info_span, Instrument};

use super::Next;
use crate::request::Request;
use crate::response::Response;

/// Opens a `request` span carrying the method and path, then logs the
/// response status and latency inside it.
pub async fn trace(req: Request, next: Next) -> Response {
    let span = info_span!("request", method = %req.method(), path = %req.path());

    async move {
        let started = Instant::now();
        let res = next.run(req).await;
        info!(
            status = res.status_code().as_u16(),
            latency_us = started.elapsed().as_micros() as u64,
            "request handled"
        );
        res
    }
    .instrument(span)
    .await
}
