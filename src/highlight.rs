use std::sync::OnceLock;

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, css_for_theme_with_class_style};

/// Theme used for code blocks. Must be one of syntect's bundled themes.
pub const THEME: &str = "InspiredGitHub";

static THEME_CSS: OnceLock<Result<String, String>> = OnceLock::new();

/// Stylesheet for [`THEME`], generated once per process.
///
/// Code blocks carry inline styles already; the stylesheet covers class-based
/// markup (`.code`, `.keyword`, ...) embedded as raw HTML in the source.
pub fn theme_css() -> Result<&'static str, String> {
    THEME_CSS
        .get_or_init(|| {
            let themes = ThemeSet::load_defaults();
            let theme = themes
                .themes
                .get(THEME)
                .ok_or_else(|| format!("theme '{THEME}' is not bundled"))?;
            css_for_theme_with_class_style(theme, ClassStyle::Spaced).map_err(|e| e.to_string())
        })
        .as_deref()
        .map_err(Clone::clone)
}
