pub const ANALYZE: &str = include_str!("../data/prompts/analyze.txt");
pub const SIMILAR: &str = include_str!("../data/prompts/similar.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the "find similar products" prompt with the caller's details appended verbatim.
pub fn similar(product_details: &str) -> String {
    render(SIMILAR, &[("product_details", product_details)])
}
