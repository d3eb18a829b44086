use tera::{Context, Tera};

use crate::document::ExportDocument;
use crate::error::ExportError;

const TEMPLATE_NAME: &str = "export.txt";

/// Title, then per section: blank line, heading, one line per entry.
const EXPORT_TEMPLATE: &str = "{{ title }}\n\
{% for section in sections %}\n\
{{ section.heading }}\n\
{% for line in section.lines %}{% if section.bulleted %}- {% endif %}{{ line }}\n\
{% endfor %}{% endfor %}";

/// Render the clipboard export block.
///
/// The `.txt` template name keeps Tera's HTML autoescaping off, so clinical
/// symbols such as `≥` and `<` pass through untouched.
pub fn render_export(document: &ExportDocument) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, EXPORT_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(document)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(TEMPLATE_NAME, &context)?;
    tracing::debug!(sections = document.sections.len(), bytes = rendered.len(), "export rendered");
    Ok(rendered)
}
