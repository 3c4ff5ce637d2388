//! HTML snippet that loads the interaction layer into a page.
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the HTML this
//! project emits. The snippet is two elements, meant to go at the end of
//! `<body>`:
//!
//! ```html
//! <script type="application/json" id="folio-config">{"navigation":{...}}</script>
//! <script type="module">import init from "./pkg/folio_ui.js";
//! init();</script>
//! ```
//!
//! Both script bodies are raw text to the HTML parser, so the only thing that
//! can break out of them is a literal `</script`. Every `<` in the embedded
//! JSON and the module path is written as `\u003c`, which JSON and JavaScript
//! string literals both read back as `<`.

use maud::{Markup, PreEscaped, html};

use crate::config::{ConfigError, PAGE_CONFIG_ID, UiConfig};

/// Default location of the wasm-bindgen JS glue, relative to the page.
pub const DEFAULT_MODULE: &str = "./pkg/folio_ui.js";

fn escape_lt(text: &str) -> String {
    text.replace('<', "\\u003c")
}

/// Config JSON safe to place inside a `<script>` element.
pub fn embedded_config_json(config: &UiConfig) -> Result<String, ConfigError> {
    Ok(escape_lt(&config.to_json()?))
}

/// Module script that imports the glue and runs its default export.
fn loader(module: &str) -> Result<String, ConfigError> {
    let path = escape_lt(&serde_json::to_string(module)?);
    Ok(format!("import init from {path};\ninit();"))
}

/// Render the page snippet for `config`, loading the glue from `module`.
pub fn render_snippet(config: &UiConfig, module: &str) -> Result<Markup, ConfigError> {
    let json = embedded_config_json(config)?;
    let loader = loader(module)?;
    Ok(html! {
        script type="application/json" id=(PAGE_CONFIG_ID) { (PreEscaped(json)) }
        "\n"
        script type="module" { (PreEscaped(loader)) }
    })
}
