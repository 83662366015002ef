use crate::segment::render_segment;
use crate::width::{pad_to_width, truncate_to_width, visible_width, ELLIPSIS};
use crate::BarLayout;
use powerbar_core::{color::SEPARATOR_TAG, ColorResolver, SegmentStore};

/// Columns always left blank between the left and right sides.
pub const MIN_PADDING: usize = 1;

/// A segment after composition, with its measured width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSegment {
    pub text:  String,
    pub width: usize,
}

impl RenderedSegment {
    pub fn new(text: String) -> Self {
        let width = visible_width(&text);
        Self { text, width }
    }
}

/// Render the segments listed in `ids`, in that order.
///
/// Ids missing from the store and empty segments are skipped.
pub fn render_side<C>(
    ids: &[String],
    store: &SegmentStore,
    bar_width: usize,
    colors: &C,
) -> Vec<RenderedSegment>
where
    C: ColorResolver + ?Sized,
{
    ids.iter()
        .filter_map(|id| store.get(id))
        .filter(|seg| !seg.is_empty())
        .map(|seg| RenderedSegment::new(render_segment(seg, bar_width, colors)))
        .collect()
}

/// Join segments with `separator`.  The width is the sum of the segment
/// widths plus one separator between each pair.
pub fn join_segments(
    segments: &[RenderedSegment],
    separator: &str,
    separator_width: usize,
) -> RenderedSegment {
    if segments.is_empty() {
        return RenderedSegment {
            text:  String::new(),
            width: 0,
        };
    }

    let text = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(separator);
    let width = segments.iter().map(|s| s.width).sum::<usize>()
        + separator_width * (segments.len() - 1);

    RenderedSegment { text, width }
}

/// Index of the widest segment; the first one wins ties.
fn widest_index(segments: &[RenderedSegment]) -> Option<usize> {
    let mut widest: Option<usize> = None;
    for (i, seg) in segments.iter().enumerate() {
        if widest.map_or(true, |w| seg.width > segments[w].width) {
            widest = Some(i);
        }
    }
    widest
}

/// Truncate the widest segment by `overflow` columns, never below one.
pub fn shrink_widest(segments: &mut [RenderedSegment], overflow: usize) {
    let Some(index) = widest_index(segments) else {
        return;
    };

    let seg = &mut segments[index];
    let target = seg.width.saturating_sub(overflow).max(1);
    if target >= seg.width {
        return;
    }

    let text = truncate_to_width(&seg.text, target, ELLIPSIS);
    seg.width = visible_width(&text);
    seg.text = text;
}

/// Shrink segments, widest first, until they plus `fixed` columns fit into
/// `width`.  Gives up after one pass per segment.  Returns the passes made.
pub fn fit_segments(segments: &mut [RenderedSegment], fixed: usize, width: usize) -> usize {
    let overflow = |segments: &[RenderedSegment]| {
        (segments.iter().map(|s| s.width).sum::<usize>() + fixed).saturating_sub(width)
    };

    let mut passes = 0;
    let mut excess = overflow(segments);
    while excess > 0 && passes < segments.len() {
        shrink_widest(segments, excess);
        passes += 1;
        excess = overflow(segments);
    }
    passes
}

/// Render the whole bar into exactly `width` columns.
///
/// Left segments are flush left, right segments flush right, with at least
/// [`MIN_PADDING`] blank columns between them.  When space runs out the
/// widest segments are truncated first; whatever still overflows is cut at
/// the end of the line.
pub fn render_bar<C>(store: &SegmentStore, layout: &BarLayout, colors: &C, width: usize) -> String
where
    C: ColorResolver + ?Sized,
{
    let separator = colors.fg(SEPARATOR_TAG, &layout.separator);
    let separator_width = visible_width(&separator);

    let mut segments = render_side(&layout.left, store, layout.bar_width, colors);
    let left_count = segments.len();
    segments.extend(render_side(&layout.right, store, layout.bar_width, colors));
    let right_count = segments.len() - left_count;

    let separators =
        separator_width * (left_count.saturating_sub(1) + right_count.saturating_sub(1));
    let passes = fit_segments(&mut segments, separators + MIN_PADDING, width);
    if passes > 0 {
        tracing::trace!("shrunk segments in {passes} pass(es) to fit {width} columns");
    }

    let (left, right) = segments.split_at(left_count);
    let left = join_segments(left, &separator, separator_width);
    let right = join_segments(right, &separator, separator_width);

    let padding = width
        .saturating_sub(left.width + right.width)
        .max(MIN_PADDING);
    let line = format!("{}{}{}", left.text, " ".repeat(padding), right.text);

    // A line that still overflows (or a wide glyph at the cut) is settled here.
    pad_to_width(truncate_to_width(&line, width, ELLIPSIS), width)
}
