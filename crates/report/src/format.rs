//! Value formatting shared by every report section.

/// Placeholder for values the input did not provide.
pub const NA: &str = "N/A";

/// Fixed-precision number or `N/A`.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => NA.to_string(),
    }
}

/// Signed percentage such as `+1.23%` or `N/A`.
pub fn fmt_signed_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:+.2}%", v),
        _ => NA.to_string(),
    }
}

/// Integer count or `N/A`.
pub fn fmt_count(value: Option<u32>) -> String {
    value.map_or_else(|| NA.to_string(), |v| v.to_string())
}

/// Fraction in [0, 1] as a whole percentage, e.g. `0.62` -> `62%`.
pub fn fmt_rate(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

/// Comma-joined labels, `无` when there are none.
pub fn join_labels<S: AsRef<str>>(labels: &[S]) -> String {
    if labels.is_empty() {
        return "无".to_string();
    }
    labels.iter().map(|l| l.as_ref()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_render_na() {
        assert_eq!(fmt_opt(None, 2), "N/A");
        assert_eq!(fmt_opt(Some(f64::NAN), 2), "N/A");
        assert_eq!(fmt_signed_pct(None), "N/A");
        assert_eq!(fmt_count(None), "N/A");
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(fmt_opt(Some(4082.07), 2), "4082.07");
        assert_eq!(fmt_signed_pct(Some(-1.26)), "-1.26%");
        assert_eq!(fmt_signed_pct(Some(2.35)), "+2.35%");
        assert_eq!(fmt_count(Some(1428)), "1428");
        assert_eq!(fmt_rate(0.62), "62%");
    }

    #[test]
    fn test_join_labels() {
        assert_eq!(join_labels::<String>(&[]), "无");
        assert_eq!(join_labels(&["人工智能", "大数据"]), "人工智能, 大数据");
    }
}
