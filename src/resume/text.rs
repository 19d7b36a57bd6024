/// Uppercase the first letter of the text and of every sentence after `.`, `?` or `!` plus
/// whitespace. Nothing is ever lowercased.
pub fn to_sentence_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // True at the start, and after a terminator followed by at least one whitespace.
    let mut at_start = true;
    let mut after_terminator = false;
    let mut saw_space = false;

    for c in s.chars() {
        let capitalize = at_start || (after_terminator && saw_space);
        if capitalize && c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
            at_start = false;
            after_terminator = false;
            saw_space = false;
            continue;
        }

        out.push(c);
        if c.is_whitespace() {
            if after_terminator {
                saw_space = true;
            }
            continue;
        }

        at_start = false;
        after_terminator = matches!(c, '.' | '?' | '!');
        saw_space = false;
    }
    out
}
