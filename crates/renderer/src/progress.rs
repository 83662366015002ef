use powerbar_core::ColorResolver;

/// Glyph for a completely filled column.
pub const FULL_BLOCK: char = '█';

/// Partial fills from 1/8 to 7/8 of a column.
pub const PARTIAL_BLOCKS: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Smallest remainder that still earns a partial glyph: half of an eighth.
const MIN_PARTIAL: f64 = 1.0 / 16.0;

/// Render `percent` as a bar exactly `width` columns wide.
///
/// Full blocks, then at most one partial block, then uncolored spaces.
/// Values outside `[0, 100]` are clamped; NaN counts as empty.
pub fn render_progress_bar<C>(percent: f64, width: usize, tag: &str, colors: &C) -> String
where
    C: ColorResolver + ?Sized,
{
    if width == 0 {
        return String::new();
    }

    let clamped = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    let filled = (clamped / 100.0) * width as f64;
    let full = (filled.floor() as usize).min(width);
    let remainder = filled - full as f64;

    let mut glyphs: String = std::iter::repeat(FULL_BLOCK).take(full).collect();
    let mut empty = width - full;

    if remainder >= MIN_PARTIAL && full < width {
        let level = ((remainder * 8.0).round() as i64 - 1).clamp(0, PARTIAL_BLOCKS.len() as i64 - 1);
        glyphs.push(PARTIAL_BLOCKS[level as usize]);
        empty -= 1;
    }

    let mut out = if glyphs.is_empty() {
        String::new()
    } else {
        colors.fg(tag, &glyphs)
    };
    out.extend(std::iter::repeat(' ').take(empty));
    out
}
