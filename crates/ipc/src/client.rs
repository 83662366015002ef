use crate::events::parse_event;
use powerbar_core::Event;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Spawn a background task that reads host events line by line from
/// `reader` and forwards typed [`Event`]s on the returned channel.
///
/// Blank lines are skipped.  The task ends at end of input, on a read error,
/// or once the receiver is dropped; the channel then closes.
pub fn spawn_listener<R>(reader: R) -> mpsc::Receiver<Event>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    if tx.send(parse_event(&line)).await.is_err() {
                        return; // all receivers dropped
                    }
                }
                Ok(None) => {
                    debug!("host event stream closed");
                    return;
                }
                Err(e) => {
                    warn!("reading host events failed: {e}");
                    return;
                }
            }
        }
    });

    rx
}

/// Read every event from an already-buffered source until end of input.
pub async fn read_all<R>(reader: R) -> std::io::Result<Vec<Event>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut events = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if !line.trim().is_empty() {
            events.push(parse_event(&line));
        }
    }
    Ok(events)
}
