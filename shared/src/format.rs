const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size with at most two decimals, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[exponent])
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}", confidence)
}

pub fn format_processing_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) if seconds > 0.0 => format!("{:.2}s", seconds),
        _ => "-".to_string(),
    }
}

/// Width style for a percentage bar, clamped to the bar.
pub fn bar_width(percent: f64) -> String {
    format!("width: {}%", percent.clamp(0.0, 100.0))
}

/// Shortens long file names for buttons and cards.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let kept: String = name.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(1_290_000), "1.23 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn huge_sizes_stay_in_gigabytes() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn confidence_and_time() {
        assert_eq!(format_confidence(87.5), "87.50");
        assert_eq!(format_processing_time(Some(1.234)), "1.23s");
        assert_eq!(format_processing_time(None), "-");
        assert_eq!(format_processing_time(Some(0.0)), "-");
    }

    #[test]
    fn bar_width_is_clamped() {
        assert_eq!(bar_width(42.5), "width: 42.5%");
        assert_eq!(bar_width(120.0), "width: 100%");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_name("short.png", 20), "short.png");
        assert_eq!(truncate_name("a_really_long_file_name.png", 20), "a_really_long_fil...");
        assert_eq!(truncate_name("ééééééééééééééééééééééé", 10), "ééééééé...");
    }
}
