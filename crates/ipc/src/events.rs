use powerbar_core::Event;

/// Decode one line of the host protocol into an [`Event`].
///
/// Each line is a JSON object tagged by its `event` name, e.g.
/// `{"event":"resize","columns":120}`.  Lines that do not decode (bad JSON,
/// unknown names, wrong payload shapes) become [`Event::Unknown`] carrying
/// the raw text.
pub fn parse_event(line: &str) -> Event {
    let line = line.trim();
    match serde_json::from_str::<Event>(line) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("ignoring undecodable event line ({e}): {line}");
            Event::Unknown(line.to_string())
        }
    }
}
