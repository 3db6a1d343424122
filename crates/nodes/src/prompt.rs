//! Prompt templates and the line-scanning helpers the stages share.
//!
//! Templates live as markdown files under `prompts/` and are compiled in.
//! Placeholders are `{name}`; [`render`] fills them in one pass so values that
//! happen to contain braces are never expanded a second time.

pub(crate) const ROUTING: &str = include_str!("../prompts/routing.md");
pub(crate) const PLANNING: &str = include_str!("../prompts/planning.md");
pub(crate) const WRITING: &str = include_str!("../prompts/writing.md");
pub(crate) const QUALITY: &str = include_str!("../prompts/quality.md");

/// Substitutes `{name}` placeholders from `vars`. Unknown placeholders are
/// left as they are.
pub(crate) fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Splits a `Key Name: value` line at the first colon.
///
/// The key comes back lower-cased with spaces replaced by underscores; the
/// value is trimmed.
pub(crate) fn split_field(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim().to_lowercase().replace(' ', "_");
    Some((key, value.trim()))
}

/// Returns the trimmed text after `label:` when `line` starts with it,
/// ignoring ASCII case.
pub(crate) fn labelled<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    line[label.len()..].strip_prefix(':').map(str::trim)
}

/// Returns the text after a leading `N.` list marker.
pub(crate) fn numbered_item(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix('.').map(str::trim)
}

/// Splits a comma-separated value, dropping blank items and any square
/// brackets the model copied from the answer template.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Concatenates every ASCII digit in `value` and parses the result.
///
/// Returns `None` when there are no digits or the number does not fit.
pub(crate) fn digits(value: &str) -> Option<u32> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_known_placeholders_once() {
        let text = render("Title: {title} / {missing}", &[("title", "{title}")]);
        assert_eq!(text, "Title: {title} / {missing}");

        let text = render("{a}-{b}", &[("a", "1"), ("b", "2")]);
        assert_eq!(text, "1-2");
    }

    #[test]
    fn render_keeps_unterminated_brace() {
        assert_eq!(render("x {open", &[("open", "no")]), "x {open");
    }

    #[test]
    fn templates_carry_their_placeholders() {
        assert!(ROUTING.contains("{request_text}"));
        assert!(PLANNING.contains("{seo_keywords}"));
        assert!(WRITING.contains("{brand_guidelines}"));
        assert!(QUALITY.contains("{seo_score}"));
    }

    #[test]
    fn split_field_normalises_key() {
        let (key, value) = split_field("Tools Needed :  search, outline ").unwrap();
        assert_eq!(key, "tools_needed");
        assert_eq!(value, "search, outline");
        assert!(split_field("no colon here").is_none());
    }

    #[test]
    fn split_field_only_splits_once() {
        let (key, value) = split_field("REASONING: ratio 2:1 favours depth").unwrap();
        assert_eq!(key, "reasoning");
        assert_eq!(value, "ratio 2:1 favours depth");
    }

    #[test]
    fn labelled_matches_prefix_case_insensitively() {
        assert_eq!(labelled("TITLE: Hello", "TITLE"), Some("Hello"));
        assert_eq!(labelled("Title:Hello ", "TITLE"), Some("Hello"));
        assert_eq!(labelled("TITLES: x", "TITLE"), None);
        assert_eq!(labelled("TIT", "TITLE"), None);
        assert_eq!(labelled("Readability: 80", "Readability Score"), None);
    }

    #[test]
    fn numbered_item_needs_digits_and_dot() {
        assert_eq!(numbered_item("3. Why it matters"), Some("Why it matters"));
        assert_eq!(numbered_item("12.Closing"), Some("Closing"));
        assert_eq!(numbered_item("- bullet"), None);
        assert_eq!(numbered_item("2) paren"), None);
    }

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(split_list("[a, b ,, c]"), vec!["a", "b", "c"]);
        assert!(split_list("  ").is_empty());
    }

    #[test]
    fn digits_concatenates_runs() {
        assert_eq!(digits("about 45 minutes"), Some(45));
        assert_eq!(digits("1 to 2"), Some(12));
        assert_eq!(digits("soon"), None);
        assert_eq!(digits("99999999999999"), None);
    }
}
