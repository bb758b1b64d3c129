//! JWT client-credentials pre-request script.

use include_dir::{Dir, include_dir};
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::{AppError, ScriptConfig};

static SCRIPT_TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scripts");

const JWT_TEMPLATE: &str = "jwt_prerequest.js";

/// Environment variable caching the access token.
pub const TOKEN_VARIABLE: &str = "jwt_token";
/// Environment variable caching the token expiry (epoch milliseconds).
pub const EXPIRY_VARIABLE: &str = "token_expiry";

/// Render the JWT pre-request script as source lines.
pub fn jwt_prerequest_lines(config: &ScriptConfig) -> Result<Vec<String>, AppError> {
    let file = SCRIPT_TEMPLATES_DIR
        .get_file(JWT_TEMPLATE)
        .ok_or_else(|| AppError::config_error(format!("Script template missing: {JWT_TEMPLATE}")))?;
    let content = file.contents_utf8().ok_or_else(|| {
        AppError::config_error(format!("Script template is not UTF-8: {JWT_TEMPLATE}"))
    })?;

    let context = context! {
        token_var => TOKEN_VARIABLE,
        expiry_var => EXPIRY_VARIABLE,
        margin_ms => config.token_expiry_margin_ms,
    };
    let rendered = render_template(content, &context)?;

    Ok(rendered.trim().lines().map(str::to_string).collect())
}

// JavaScript braces clash with the default delimiters.
fn render_template(content: &str, context: &minijinja::Value) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    let syntax = SyntaxConfig::builder()
        .block_delimiters("[%", "%]")
        .variable_delimiters("[[[", "]]]")
        .comment_delimiters("[#", "#]")
        .build()
        .map_err(|err| {
            AppError::config_error(format!("Failed to configure script template syntax: {}", err))
        })?;
    env.set_syntax(syntax);

    env.add_template(JWT_TEMPLATE, content).map_err(|err| {
        AppError::config_error(format!("Failed to load script template: {}", err))
    })?;
    env.get_template(JWT_TEMPLATE)
        .map_err(|err| {
            AppError::config_error(format!("Failed to access script template: {}", err))
        })?
        .render(context)
        .map_err(|err| AppError::config_error(format!("Failed to render script template: {}", err)))
}
