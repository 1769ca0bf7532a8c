//! Placeholder substitution for URL pattern templates.

/// Expands `{name}` placeholders in a template.
///
/// Each variable replaces only the first occurrence of its placeholder.
/// Placeholders without a matching variable are left in the output
/// untouched. Values are inserted verbatim, no escaping is applied.
///
/// Variables are applied in iteration order, so a value that itself
/// contains a placeholder may be expanded by a later variable.
///
/// # Arguments
///
/// * `template`: Template string containing `{name}` placeholders
/// * `variables`: Name and value pairs to substitute
///
/// # Returns
///
/// Expanded template string
pub fn expand_template<'a, I>(template: &str, variables: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut expanded = template.to_string();

    for (name, value) in variables {
        let placeholder = format!("{{{}}}", name);
        if let Some(start) = expanded.find(&placeholder) {
            expanded.replace_range(start..start + placeholder.len(), value);
        }
    }

    expanded
}
