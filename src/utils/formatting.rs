const MAX_LABEL_LEN: usize = 48;

/// Shortens long file names for list rows.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_LEN {
        let mut truncated = label.chars().take(MAX_LABEL_LEN).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        label.to_string()
    }
}

pub fn format_dimensions((width, height): (u32, u32)) -> String {
    format!("{width} × {height} px")
}

/// Segment area as pixel count and share of the image.
pub fn format_area(pixels: usize, total: usize) -> String {
    let suffix = if pixels == 1 { "" } else { "s" };
    if total == 0 {
        return format!("{pixels} pixel{suffix}");
    }
    let percent = pixels as f64 * 100.0 / total as f64;
    format!("{pixels} pixel{suffix} ({percent:.1}%)")
}
