use sg_core::ImageView;

/// Top-left corner of a luma grid, values right-aligned to width 3.
pub fn render_luma_preview(src: &ImageView<'_, u8>, max_rows: usize, max_cols: usize) -> String {
    render(src, max_rows, max_cols, " ", |v| format!("{v:3}"))
}

/// Top-left corner of a mask, `█` for foreground and `.` for background.
pub fn render_mask_preview(src: &ImageView<'_, u8>, max_rows: usize, max_cols: usize) -> String {
    render(src, max_rows, max_cols, "", |v| {
        let glyph = if v == 255 { "█" } else { "." };
        glyph.to_string()
    })
}

fn render(
    src: &ImageView<'_, u8>,
    max_rows: usize,
    max_cols: usize,
    sep: &str,
    cell: impl Fn(u8) -> String,
) -> String {
    let rows = max_rows.min(src.height());
    let cols = max_cols.min(src.width());

    let mut out = String::new();
    for y in 0..rows {
        let line = src.row(y)[..cols]
            .iter()
            .map(|&v| cell(v))
            .collect::<Vec<_>>()
            .join(sep);
        out.push_str(&line);
        if src.width() > max_cols {
            out.push_str(" ...");
        }
        out.push('\n');
    }
    if src.height() > max_rows {
        out.push_str("...\n");
    }
    out
}
