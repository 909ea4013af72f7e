//! `{{placeholder}}` substitution for notification templates.
//!
//! Names are matched exactly (case-sensitive, no trimming). Placeholders with
//! no entry in the variable mapping are kept verbatim, and substituted values
//! are never scanned again. There is no escape syntax: an unterminated `{{`
//! or a `{{` inside an open placeholder is a [`ClinicError::MalformedTemplate`].

use crate::{
    errors::{ClinicError, ClinicResult},
    models::notification::{NotificationTemplate, RenderedMessage, VariableMapping},
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder { name: &'a str, raw: &'a str },
}

fn parse(text: &str) -> ClinicResult<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(OPEN) {
        let open = cursor + offset;
        if open > cursor {
            segments.push(Segment::Literal(&text[cursor..open]));
        }

        let name_start = open + OPEN.len();
        let close = text[name_start..]
            .find(CLOSE)
            .map(|offset| name_start + offset)
            .ok_or_else(|| ClinicError::MalformedTemplate {
                position: open,
                reason: "unterminated placeholder".to_string(),
            })?;

        let name = &text[name_start..close];
        if let Some(nested) = name.find(OPEN) {
            return Err(ClinicError::MalformedTemplate {
                position: name_start + nested,
                reason: "nested placeholder".to_string(),
            });
        }

        let end = close + CLOSE.len();
        segments.push(Segment::Placeholder {
            name,
            raw: &text[open..end],
        });
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(Segment::Literal(&text[cursor..]));
    }

    Ok(segments)
}

/// Substitutes every `{{name}}` in `template` with its value from `variables`.
///
/// # Errors
///
/// * `ClinicError::MalformedTemplate` - unterminated or nested placeholder
///
/// # Example
///
/// ```
/// use clinic_core::models::notification::VariableMapping;
/// use clinic_core::template::render;
///
/// let mut variables = VariableMapping::new();
/// variables.insert("patientName".to_string(), "Jane".to_string());
///
/// assert_eq!(render("Hello {{patientName}}", &variables).unwrap(), "Hello Jane");
/// assert_eq!(render("Hi {{doctor}}", &variables).unwrap(), "Hi {{doctor}}");
/// ```
pub fn render(template: &str, variables: &VariableMapping) -> ClinicResult<String> {
    let segments = parse(template)?;
    let mut rendered = String::with_capacity(template.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => rendered.push_str(text),
            Segment::Placeholder { name, raw } => match variables.get(name) {
                Some(value) => rendered.push_str(value),
                None => rendered.push_str(raw),
            },
        }
    }

    Ok(rendered)
}

/// Renders subject and body of a stored template independently.
pub fn render_message(
    template: &NotificationTemplate,
    variables: &VariableMapping,
) -> ClinicResult<RenderedMessage> {
    Ok(RenderedMessage {
        subject: render(&template.subject, variables)?,
        body: render(&template.body, variables)?,
    })
}

/// Placeholder names in order of first appearance, without duplicates.
///
/// Doubles as a well-formedness check for template text before it is stored.
pub fn placeholders(template: &str) -> ClinicResult<Vec<&str>> {
    let mut names: Vec<&str> = Vec::new();
    for segment in parse(template)? {
        if let Segment::Placeholder { name, .. } = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    Ok(names)
}
