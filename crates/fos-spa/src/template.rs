//! Templates
//!
//! `{{ dotted.key }}` interpolation over JSON data.

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{\{\s*([a-zA-Z0-9_.]+)\s*\}\}").ok());

/// Replace every placeholder with the value at its key path. Missing keys
/// render as an empty string, strings render without quotes and any other
/// value renders as its JSON text.
pub fn render_template(template: &str, data: &Value) -> String {
    let Some(re) = PLACEHOLDER.as_ref() else {
        return template.to_string();
    };
    re.replace_all(template, |caps: &Captures<'_>| lookup(data, &caps[1]).map(display).unwrap_or_default())
        .into_owned()
}

fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |value, key| match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_and_nested() {
        let data = json!({"nome": "Ana", "endereco": {"cidade": "Recife"}});
        assert_eq!(render_template("Olá, {{nome}}!", &data), "Olá, Ana!");
        assert_eq!(render_template("{{ endereco.cidade }}", &data), "Recife");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let data = json!({"a": {"b": 1}});
        assert_eq!(render_template("[{{ a.c }}][{{x}}][{{a.b.c}}]", &data), "[][][]");
    }

    #[test]
    fn test_non_string_values() {
        let data = json!({"n": 3, "ok": true, "lista": ["x", "y"], "nada": null});
        assert_eq!(render_template("{{n}} {{ok}} {{lista.1}} {{nada}}", &data), "3 true y null");
    }

    #[test]
    fn test_unmatched_syntax_left_alone() {
        let data = json!({"a": 1});
        assert_eq!(render_template("{{ a-b }} {a} {{}}", &data), "{{ a-b }} {a} {{}}");
    }
}
