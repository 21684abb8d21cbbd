/// Joins rendered fragments into a spoken list: "a", "a and b",
/// "a, b and c". No comma ever precedes the final "and".
pub fn join<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<_>>()
                .join(", ");

            format!("{} and {}", head, last.as_ref())
        }
    }
}
