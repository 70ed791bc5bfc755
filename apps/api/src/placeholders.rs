/// Fills `{key}` slots in a single left-to-right pass over the template.
///
/// Inserted values are never re-scanned, so a value that itself looks like
/// `{other_key}` is kept literally. Braces that do not enclose a known key
/// (JSON examples in prompts, CSS) are copied through unchanged.
pub fn fill<V: AsRef<str>>(template: &str, values: &[(&str, V)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let slot = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (value.as_ref(), end))
        });

        match slot {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_every_occurrence() {
        let out = fill("{a}-{b}-{a}", &[("a", "1"), ("b", "2")]);
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        let out = fill("{a}|{b}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(out, "{b}|x");
    }

    #[test]
    fn test_unknown_and_unclosed_braces_are_kept() {
        let out = fill(r#"{ "nom": "" } {{a}} {unknown} {a"#, &[("a", "v")]);
        assert_eq!(out, r#"{ "nom": "" } {v} {unknown} {a"#);
    }

    #[test]
    fn test_owned_values() {
        let out = fill("<{name}>", &[("name", String::from("Nora"))]);
        assert_eq!(out, "<Nora>");
    }
}
