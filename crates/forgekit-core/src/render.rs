//! Strict variable substitution for template text and path fragments.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled.
//! The contract is literal `{{ identifier }}` substitution only: whatever
//! else the underlying syntax happens to accept is not guaranteed and
//! callers must not rely on it.
//!
//! A placeholder whose identifier is absent from the context aborts the
//! render with [`ForgeError::MissingVariable`] naming the variable, before
//! any output is produced. Partial output is never returned. Context
//! entries the template does not reference are silently ignored, so one
//! broad context can serve many small templates.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use handlebars::Handlebars;
use regex::Regex;

use crate::error::{ForgeError, Result};

/// Variable name → substitution value, supplied per render call.
pub type RenderContext = BTreeMap<String, String>;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // `{{ identifier }}`, whitespace around the identifier insignificant
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex")
    })
}

/// Template renderer with strict-presence semantics.
///
/// Strict mode matters because rendered output becomes file names, file
/// bodies, and prompts: a silently empty substitution would surface as a
/// confusing failure far from its cause.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled.
    ///
    /// HTML escaping is turned off: substituted values land in file names,
    /// source code, and prompts, never in markup.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render template text against a context.
    ///
    /// Referentially transparent: identical `(text, context)` always yields
    /// identical output, and no global state is consulted.
    ///
    /// # Errors
    ///
    /// [`ForgeError::MissingVariable`] when `text` references an identifier
    /// absent from `context`; [`ForgeError::Render`] when the engine
    /// rejects the template itself.
    pub fn render(&self, text: &str, context: &RenderContext) -> Result<String> {
        // Resolve missing variables up front so the error names the
        // offending placeholder instead of surfacing an engine message.
        for capture in placeholder_re().captures_iter(text) {
            let variable = &capture[1];
            if !context.contains_key(variable) {
                return Err(ForgeError::MissingVariable {
                    variable: variable.to_string(),
                });
            }
        }

        self.hbs
            .render_template(text, context)
            .map_err(|e| ForgeError::Render(e.to_string()))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
