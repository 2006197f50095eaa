use minijinja::value::{Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind};

/// Register the string helpers callable from template bodies.
pub(super) fn register(env: &mut Environment<'static>) {
    env.add_function("lower", |value: &str| -> String { value.to_lowercase() });
    env.add_function("upper", |value: &str| -> String { value.to_uppercase() });
    env.add_function("title", |value: &str| -> String { title_case(value) });
    env.add_function("join", join);
    env.add_function("contains", |value: &str, needle: &str| -> bool { value.contains(needle) });
    env.add_function("replace", |value: &str, from: &str, to: &str| -> String {
        value.replace(from, to)
    });
}

/// Capitalize the first letter of every word.
///
/// A word starts after whitespace or ASCII punctuation. Letters that are not
/// at a word start are left as they are.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous = ' ';
    for c in value.chars() {
        if is_separator(previous) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        previous = c;
    }
    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() { !(c.is_ascii_alphanumeric() || c == '_') } else { c.is_whitespace() }
}

fn join(items: &Value, separator: &str) -> Result<String, Error> {
    if items.kind() != ValueKind::Seq {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("join expects a list, got {}", items.kind()),
        ));
    }
    let parts: Vec<String> = items.try_iter()?.map(|item| item.to_string()).collect();
    Ok(parts.join(separator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn title_case_capitalizes_word_starts() {
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case("api-first design"), "Api-First Design");
        assert_eq!(title_case("snake_case name"), "Snake_case Name");
        assert_eq!(title_case("2nd v2beta"), "2nd V2beta");
    }

    #[test]
    fn title_case_leaves_inner_letters_alone() {
        assert_eq!(title_case("mIXED caSE"), "MIXED CaSE");
    }

    #[test]
    fn join_rejects_non_lists() {
        assert!(join(&Value::from("abc"), ",").is_err());
    }

    #[test]
    fn join_concatenates_items() {
        let items = Value::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(join(&items, ", ").unwrap(), "a, b");
    }

    proptest! {
        #[test]
        fn title_case_preserves_character_count(input in "[a-z _.-]{0,40}") {
            prop_assert_eq!(title_case(&input).chars().count(), input.chars().count());
        }

        #[test]
        fn title_case_is_idempotent(input in "[a-zA-Z ,;-]{0,40}") {
            let once = title_case(&input);
            prop_assert_eq!(title_case(&once), once.clone());
        }
    }
}
