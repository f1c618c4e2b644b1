use erdkit_core::{DefaultValue, Value};

/// Format one line of a model's `Attributes:` block.
///
/// `name (type_name): description`, always closed with a period. A concrete
/// default adds `Default is <value>.`; string defaults are single-quoted
/// and everything else uses its repr. Missing defaults and default
/// factories add nothing.
pub fn format_attribute_line(
    name: &str,
    type_name: &str,
    description: &str,
    default: &DefaultValue,
) -> String {
    let mut line = format!("{} ({}): {}", name, type_name, description.trim_end());
    if !line.ends_with('.') {
        line.push('.');
    }

    if let DefaultValue::Value(value) = default {
        let rendered = match value {
            Value::Str(s) => format!("'{}'", s),
            other => other.repr(),
        };
        line.push_str(&format!(" Default is {}.", rendered));
    }

    line.trim().to_string()
}
