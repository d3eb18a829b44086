/// Evaluate an ordered list of `(condition, outcome)` pairs top to bottom.
/// The first true condition wins; later ones are not consulted.
pub fn first_match<T: Copy>(cascade: &[(bool, T)], otherwise: T) -> T {
    cascade
        .iter()
        .find(|(condition, _)| *condition)
        .map(|(_, outcome)| *outcome)
        .unwrap_or(otherwise)
}
