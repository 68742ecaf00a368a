use std::ops::Range;

/// Attribute carried by every span emitted by `annotate`
pub(crate) const MARKER_ATTRIBUTE: &str = "data-dicemark";
const MARKER_CLOSE: &str = "</span>";

/// Byte range of the input, either markup or text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Markup(Range<usize>),
    Text(Range<usize>),
}

fn opens_tag(rest: &str) -> bool {
    matches!(rest.chars().next(), Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!')
}

/// Split the input into markup and text content.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!` and closed by a
/// later `>`; otherwise it stays text. A span already emitted by `annotate` is
/// markup up to its closing tag, content included.
pub(crate) fn split(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find('<') {
        let open = cursor + offset;
        if !opens_tag(&text[open + 1..]) {
            cursor = open + 1;
            continue;
        }
        let close = match text[open..].find('>') {
            Some(index) => open + index + 1,
            None => break,
        };
        let tag = &text[open..close];
        let end = if !tag.starts_with("</") && tag.contains(MARKER_ATTRIBUTE) {
            text[close..]
                .find(MARKER_CLOSE)
                .map_or(text.len(), |index| close + index + MARKER_CLOSE.len())
        } else {
            close
        };
        if text_start < open {
            segments.push(Segment::Text(text_start..open));
        }
        segments.push(Segment::Markup(open..end));
        text_start = end;
        cursor = end;
    }
    if text_start < text.len() {
        segments.push(Segment::Text(text_start..text.len()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text() {
        assert_eq!(vec![Segment::Text(0..5)], split("hello"));
        assert!(split("").is_empty());
    }

    #[test]
    fn tags_and_text() {
        let text = "<p>Hit <b>7</b></p>";
        assert_eq!(
            vec![
                Segment::Markup(0..3),
                Segment::Text(3..7),
                Segment::Markup(7..10),
                Segment::Text(10..11),
                Segment::Markup(11..15),
                Segment::Markup(15..19),
            ],
            split(text)
        );
    }

    #[test]
    fn stray_angle_brackets_are_text() {
        assert_eq!(vec![Segment::Text(0..9)], split("3 < 4 > 2"));
        assert_eq!(vec![Segment::Text(0..6)], split("a <b c"));
    }

    #[test]
    fn annotated_span_is_markup() {
        let text = r#"x <span data-dicemark="plain-dice">1d6</span> y"#;
        assert_eq!(
            vec![
                Segment::Text(0..2),
                Segment::Markup(2..45),
                Segment::Text(45..47),
            ],
            split(text)
        );
    }
}
