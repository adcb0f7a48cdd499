//! CLI subcommand implementations.

pub mod init;
pub mod list;
pub mod new;
pub mod render;
pub mod save;
pub mod show;

use forgekit_core::RenderContext;

/// Parse a `name=value` argument into a key/value pair.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got '{s}'")),
    }
}

/// Collect parsed `--var` pairs into a render context.
pub fn build_context(vars: Vec<(String, String)>) -> RenderContext {
    vars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("name=Widget").unwrap(),
            ("name".to_string(), "Widget".to_string())
        );
        // Values may contain '='
        assert_eq!(
            parse_key_val("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=empty").is_err());
    }

    #[test]
    fn test_build_context() {
        let ctx = build_context(vec![("a".into(), "1".into()), ("b".into(), "2".into())]);
        assert_eq!(ctx.get("a").map(String::as_str), Some("1"));
        assert_eq!(ctx.len(), 2);
    }
}
