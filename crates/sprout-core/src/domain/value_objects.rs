use std::collections::HashMap;

/// Context for placeholder substitution in replacement files.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | "my-app" |
/// | `PROJECT_NAME_SNAKE` | "my_app" |
/// | `PROJECT_NAME_KEBAB` | "my-app" |
/// | `PROJECT_NAME_PASCAL` | "MyApp" |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut vars = HashMap::new();

        vars.insert("PROJECT_NAME".to_string(), name.clone());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(&name));
        vars.insert("PROJECT_NAME_KEBAB".to_string(), to_kebab_case(&name));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(&name));

        Self { variables: vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace every `{{VARIABLE}}` with its value.
    ///
    /// Unknown placeholders are left as they are.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            result = result.replace(&format!("{{{{{key}}}}}"), value);
        }
        result
    }
}

/// Split on anything that is not alphanumeric, and on lower→upper boundaries.
fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in input.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn to_snake_case(input: &str) -> String {
    words(input).join("_")
}

fn to_kebab_case(input: &str) -> String {
    words(input).join("-")
}

fn to_pascal_case(input: &str) -> String {
    words(input)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}
