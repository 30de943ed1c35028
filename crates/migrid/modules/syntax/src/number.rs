/// Format a number the way constraint strings spell them: integers without a fraction,
/// everything else with at most two decimals and no trailing zeros.
pub fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract().abs() < f32::EPSILON {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_owned()
    }
}
