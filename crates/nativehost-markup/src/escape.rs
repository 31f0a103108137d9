use nativehost_core::{PropValue, Props, StyleMap};

/// Escapes the five markup-significant characters.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Flattens a style map to `name:value;` pairs. Absent values are skipped.
pub fn print_style(style: &StyleMap) -> String {
    style
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|value| format!("{name}:{value};")))
        .collect()
}

/// Renders attributes in insertion order, each prefixed with a space.
///
/// `true` renders as a bare name and `false` is omitted. Object values have
/// no markup form and are skipped.
pub fn print_attrs(props: &Props) -> String {
    let mut attrs = String::new();
    for (name, value) in props.iter() {
        let name = escape_text(name);
        match value {
            PropValue::Str(value) => {
                attrs.push_str(&format!(" {name}=\"{}\"", escape_text(value)));
            }
            PropValue::Number(value) => {
                attrs.push_str(&format!(" {name}=\"{}\"", print_number(*value)));
            }
            PropValue::Bool(true) => {
                attrs.push(' ');
                attrs.push_str(&name);
            }
            PropValue::Bool(false) => {}
            PropValue::Style(style) => {
                attrs.push_str(&format!(" {name}=\"{}\"", escape_text(&print_style(style))));
            }
            PropValue::Object(_) => {
                log::debug!("[markup] skipping object-valued attribute {name}");
            }
        }
    }
    attrs
}

/// Number spelling used by script hosts: `Infinity`, `-Infinity`, `NaN`,
/// and `0` for negative zero.
fn print_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "Infinity".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "tests/escape_tests.rs"]
mod tests;
