//! Composite markup files (vue/svelte/astro).
//!
//! HTML comments are removed globally first, then `<script>` bodies run
//! through the c-style scanner and `<style>` bodies through css or scss,
//! depending on the element's declared style language. Markup outside
//! those regions is untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use super::generic::strip_with;
use super::rules::LanguageRule;

static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("regex"));

static SCRIPT_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(<script[^>]*>)(.*?)(</script>)").expect("regex"));

static STYLE_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)(<style[^>]*>)(.*?)(</style>)").expect("regex"));

pub fn strip_markup(text: &str) -> String {
    let text = HTML_COMMENT.replace_all(text, "");

    let text = SCRIPT_REGION.replace_all(&text, |caps: &regex::Captures<'_>| {
        let body = strip_with(&caps[2], LanguageRule::CStyle.syntax());
        format!("{}{}{}", &caps[1], body, &caps[3])
    });

    let text = STYLE_REGION.replace_all(&text, |caps: &regex::Captures<'_>| {
        let rule = if caps[0].contains("lang=\"scss\"") {
            LanguageRule::Scss
        } else {
            LanguageRule::Css
        };
        let body = strip_with(&caps[2], rule.syntax());
        format!("{}{}{}", &caps[1], body, &caps[3])
    });

    text.into_owned()
}
