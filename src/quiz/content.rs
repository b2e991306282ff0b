/// Prompts, answers and explanations may mix plain text, line breaks and
/// inline `img:<path>` markers. Content is tokenized into fragments here and
/// turned into display spans by the UI layer; it is never interpreted as
/// markup, so untrusted spreadsheet text stays data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Image(String),
    LineBreak,
}

/// Tokenize a content string.
///
/// Lines are split on any newline variant (`\n`, `\r\n`, `\r`), with a
/// `LineBreak` between consecutive lines and none after the last. Within a
/// line, `img:` followed by non-whitespace forms an image token; every
/// segment is trimmed, and segments that start with `img:` (case-insensitive)
/// become `Image` fragments carrying the remainder after the marker.
pub fn parse_fragments(content: &str) -> Vec<Fragment> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut fragments = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        for segment in split_image_tokens(line) {
            let segment = segment.trim();
            let is_image = segment
                .get(..4)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("img:"));
            if is_image {
                fragments.push(Fragment::Image(segment[4..].to_string()));
            } else if !segment.is_empty() {
                fragments.push(Fragment::Text(segment.to_string()));
            }
        }
        if i + 1 < lines.len() {
            fragments.push(Fragment::LineBreak);
        }
    }
    fragments
}

/// Split a line into segments around `img:<non-whitespace>` tokens, keeping
/// each token as its own segment.
fn split_image_tokens(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut pending = 0; // start of the plain-text run not yet emitted
    let mut scan = 0;

    while let Some(found) = line[scan..].find("img:") {
        let start = scan + found;
        let body = &line[start + 4..];
        let body_len = body.find(char::is_whitespace).unwrap_or(body.len());
        if body_len == 0 {
            // Bare "img:" with nothing attached is not a token.
            scan = start + 4;
            continue;
        }
        let end = start + 4 + body_len;
        if start > pending {
            segments.push(&line[pending..start]);
        }
        segments.push(&line[start..end]);
        pending = end;
        scan = end;
    }

    if pending < line.len() || segments.is_empty() {
        segments.push(&line[pending..]);
    }
    segments
}
