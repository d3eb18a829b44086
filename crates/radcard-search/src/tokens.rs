/// Shortest token (in characters) that participates in matching.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Split a query into lowercase search tokens.
///
/// Everything that is not a letter, digit or whitespace is stripped before
/// splitting. Tokens shorter than [`MIN_TOKEN_CHARS`] are dropped and repeats
/// collapse onto their first occurrence.
pub fn tokenize(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut tokens: Vec<String> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < MIN_TOKEN_CHARS {
            continue;
        }
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// True iff every token occurs somewhere in the lowercased text.
///
/// Containment is plain substring search: "karaciğer" matches inside
/// "karaciğerde". An empty token list never matches.
pub fn matches(text: &str, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    tokens.iter().all(|t| haystack.contains(t.as_str()))
}
