//! Locale-independent thousands grouping.

/// Insert `,` every three digits from the right of each run of digits.
///
/// Grouping happens at positions that are not word boundaries, so a run that
/// directly follows a letter or underscore is grouped from that letter too
/// (`"a123"` becomes `"a,123"`), while a run after punctuation is not. Text
/// that is already grouped comes back unchanged.
pub fn format_thousands(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + input.len() / 3);

    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }

        for pos in start..end {
            let remaining = end - pos;
            let joins_word = pos > start || (pos > 0 && is_word_char(chars[pos - 1]));
            if joins_word && remaining >= 3 && remaining % 3 == 0 {
                out.push(',');
            }
            out.push(chars[pos]);
        }
        i = end;
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
