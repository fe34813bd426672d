//! Small text helpers shared by the header, narrator and tables.

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap a comma-separated list without ever splitting a name.
pub fn wrap_list<S: AsRef<str>>(items: &[S], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for item in items {
        let item = item.as_ref();
        if current.is_empty() {
            current.push_str(item);
        } else if current.len() + 2 + item.len() <= width {
            current.push_str(", ");
            current.push_str(item);
        } else {
            current.push(',');
            lines.push(std::mem::take(&mut current));
            current.push_str(item);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// `1 run`, `2 runs`, `0 wickets`.
pub fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Upper-case the first character: `international` → `International`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `concussion_substitute` → `concussion substitute`.
pub fn humanize(code: &str) -> String {
    code.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_words_respects_width() {
        let lines = wrap_words("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(lines, vec!["the quick brown", "fox jumps over", "the lazy dog"]);
        assert!(lines.iter().all(|l| l.len() <= 15));
    }

    #[test]
    fn wrap_words_long_word_and_empty() {
        assert_eq!(wrap_words("supercalifragilistic ok", 5), vec!["supercalifragilistic", "ok"]);
        assert_eq!(wrap_words("", 10), vec![String::new()]);
    }

    #[test]
    fn wrap_list_keeps_names_whole() {
        let names = ["SPD Smith", "DA Warner", "TM Head", "M Labuschagne"];
        let lines = wrap_list(&names, 22);
        assert_eq!(lines, vec!["SPD Smith, DA Warner,", "TM Head, M Labuschagne"]);
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "run"), "1 run");
        assert_eq!(plural(0, "run"), "0 runs");
        assert_eq!(plural(3, "wicket"), "3 wickets");
    }

    #[test]
    fn capitalize_and_humanize() {
        assert_eq!(capitalize("international"), "International");
        assert_eq!(capitalize(""), "");
        assert_eq!(humanize("concussion_substitute"), "concussion substitute");
    }
}
