/// 1-based number of the first line containing `needle`, or `None` when no line
/// matches. Line 0 is never returned; callers use it for "header absent".
pub fn locate_line<S: AsRef<str>>(lines: &[S], needle: &str) -> Option<u32> {
    lines
        .iter()
        .position(|line| line.as_ref().contains(needle))
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

/// 1-based number of the first line opening a `name:` header. The name must start
/// the line and compares ASCII case-insensitively, as manifest header names do.
pub fn locate_header_line<S: AsRef<str>>(lines: &[S], name: &str) -> Option<u32> {
    lines
        .iter()
        .position(|line| {
            let line = line.as_ref();
            line.get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name))
                && line[name.len()..].starts_with(':')
        })
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

/// Split manifest text into lines, tolerating `\r\n` endings.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
