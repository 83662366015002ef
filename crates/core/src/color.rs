/// Tag used when a segment does not carry its own color.
pub const DEFAULT_TAG: &str = "muted";

/// Tag used for the separator between segments.
pub const SEPARATOR_TAG: &str = "dim";

/// Resolves a symbolic color tag to styled text.
///
/// Tags are opaque to the layout engine; whatever the resolver returns is
/// embedded verbatim in the rendered line.  Closures of the shape
/// `Fn(&str, &str) -> String` are resolvers too.
pub trait ColorResolver {
    fn fg(&self, tag: &str, text: &str) -> String;
}

impl<F> ColorResolver for F
where
    F: Fn(&str, &str) -> String,
{
    fn fg(&self, tag: &str, text: &str) -> String {
        self(tag, text)
    }
}

/// Resolver that ignores tags and returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl ColorResolver for Plain {
    fn fg(&self, _tag: &str, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_resolvers() {
        let brackets = |tag: &str, text: &str| format!("[{tag}:{text}]");
        assert_eq!(brackets.fg("warning", "80%"), "[warning:80%]");
    }

    #[test]
    fn plain_passes_text_through() {
        assert_eq!(Plain.fg("error", "boom"), "boom");
    }
}
