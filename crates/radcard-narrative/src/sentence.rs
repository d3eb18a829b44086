/// Join the present clauses with single spaces, collapsing inner whitespace.
pub fn join_clauses<I, S>(clauses: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut words: Vec<String> = Vec::new();
    for clause in clauses.into_iter().flatten() {
        words.extend(clause.as_ref().split_whitespace().map(str::to_string));
    }
    words.join(" ")
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Assemble clauses into a capitalized sentence ending with a period.
/// Returns `None` if no clause is present.
pub fn sentence<I, S>(clauses: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let joined = join_clauses(clauses);
    if joined.is_empty() {
        return None;
    }
    let mut out = capitalize(&joined);
    if !out.ends_with('.') {
        out.push('.');
    }
    Some(out)
}

/// `a`, `a and b`, `a, b and c`.
pub fn list_phrase<S: AsRef<str>>(items: &[S]) -> Option<String> {
    match items {
        [] => None,
        [only] => Some(only.as_ref().to_string()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            Some(format!("{} and {}", head.join(", "), last.as_ref()))
        }
    }
}
