//! Case segmentation for default secret names.
//!
//! Identifiers are cut into words at ASCII case boundaries. Each word keeps
//! its original casing and words are joined with `_`. A run of capitals
//! directly followed by a capitalised word is read as an acronym and split
//! off, so `HTTPServer` becomes `HTTP_Server`.

/// Split a `PascalCase` or `camelCase` identifier into `_`-joined words.
///
/// # Examples
///
/// ```
/// use secretly::split_words;
///
/// assert_eq!(split_words("ServiceIntegrationToken"), "Service_Integration_Token");
/// assert_eq!(split_words("HTTPServer"), "HTTP_Server");
/// assert_eq!(split_words("apiKey"), "api_Key");
/// ```
#[must_use]
pub fn split_words(identifier: &str) -> String {
    let words: Vec<&str> = chunks(identifier)
        .into_iter()
        .flat_map(split_acronym)
        .collect();
    if words.is_empty() {
        return identifier.to_owned();
    }
    words.join("_")
}

/// Gather maximal chunks: a run of non-capitals, or a run of capitals with
/// the non-capitals that follow it.
fn chunks(identifier: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = identifier;
    while let Some(first) = rest.chars().next() {
        let end = if first.is_ascii_uppercase() {
            let upper = leading_len(rest, |c| c.is_ascii_uppercase());
            upper + leading_len(rest.get(upper..).unwrap_or_default(), |c| !c.is_ascii_uppercase())
        } else {
            leading_len(rest, |c| !c.is_ascii_uppercase())
        };
        let (chunk, tail) = rest.split_at(end);
        out.push(chunk);
        rest = tail;
    }
    out
}

/// Split `HTTPServer` style chunks into the acronym and the trailing word.
///
/// A chunk qualifies when at least two capitals are followed by at least
/// one non-capital; the last capital starts the trailing word.
fn split_acronym(chunk: &str) -> Vec<&str> {
    let upper = leading_len(chunk, |c| c.is_ascii_uppercase());
    if upper < 2 || upper == chunk.len() {
        return vec![chunk];
    }
    let (acronym, word) = chunk.split_at(upper - 1);
    vec![acronym, word]
}

/// Byte length of the longest prefix whose characters satisfy `pred`.
fn leading_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(idx, _)| idx)
}
