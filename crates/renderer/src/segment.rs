use crate::progress::render_progress_bar;
use powerbar_core::{ColorResolver, Segment};

/// Compose one segment: `[icon] [text] [bar] [suffix]`, single-space
/// separated, every part in the segment's color.
///
/// Callers skip empty segments (see [`Segment::is_empty`]).
pub fn render_segment<C>(segment: &Segment, bar_width: usize, colors: &C) -> String
where
    C: ColorResolver + ?Sized,
{
    let tag = segment.color_tag();
    let mut parts = Vec::with_capacity(4);

    if let Some(icon) = segment.icon.as_deref().filter(|s| !s.is_empty()) {
        parts.push(colors.fg(tag, icon));
    }
    if !segment.text.is_empty() {
        parts.push(colors.fg(tag, &segment.text));
    }
    if let Some(value) = segment.bar {
        parts.push(render_progress_bar(value, bar_width, tag, colors));
    }
    if let Some(suffix) = segment.suffix.as_deref().filter(|s| !s.is_empty()) {
        parts.push(colors.fg(tag, suffix));
    }

    parts.join(" ")
}
