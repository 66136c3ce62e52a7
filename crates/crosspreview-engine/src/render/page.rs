//! A standalone HTML document around a rendered tree.

use super::{RenderOptions, Theme, render_error_banner, render_with};
use crate::parsing::ParseResult;

const CHROME: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; padding: 24px; font-family: -apple-system, BlinkMacSystemFont, 'Helvetica Neue', sans-serif; background: var(--page); color: var(--ink); }
.sv-device { max-width: 430px; min-height: 640px; margin: 0 auto; padding: 16px; display: flex; flex-direction: column; gap: 8px; border-radius: 32px; background: var(--surface); box-shadow: 0 8px 32px rgba(0, 0, 0, 0.15); overflow: hidden; }
.sv-error-banner { padding: 12px 16px; border-radius: 10px; background: var(--error-bg); color: var(--error-ink); font-size: 13px; }
.sv-error-banner ul { margin: 6px 0 0; padding-left: 18px; }
.sv-placeholder { padding: 12px; border: 1px dashed var(--muted); border-radius: 8px; color: var(--muted); font-family: ui-monospace, Menlo, monospace; font-size: 13px; text-align: center; }
.sv-button { border: none; background: none; color: var(--accent); font: inherit; padding: 0; cursor: pointer; }
.sv-button-bordered { background: var(--fill); padding: 6px 12px; border-radius: 8px; }
.sv-button-borderedprominent { background: var(--accent); color: #ffffff; padding: 6px 12px; border-radius: 8px; }
.sv-button-plain { color: inherit; }
.sv-textfield, .sv-securefield { border: none; background: transparent; font: inherit; padding: 6px 0; color: inherit; }
.sv-field-roundedborder { border: 1px solid var(--separator); border-radius: 6px; padding: 6px 8px; }
.sv-texteditor { min-height: 80px; font: inherit; border: 1px solid var(--separator); border-radius: 6px; }
.sv-toggle, .sv-stepper, .sv-datepicker, .sv-colorpicker, .sv-picker { display: flex; align-items: center; justify-content: space-between; gap: 12px; }
.sv-stepper-buttons button { border: none; background: var(--fill); padding: 4px 12px; font: inherit; }
.sv-divider { border: none; border-top: 1px solid var(--separator); width: 100%; margin: 0; }
.sv-list, .sv-form { display: flex; flex-direction: column; background: var(--grouped); border-radius: 10px; overflow: hidden; }
.sv-list-plain { background: transparent; border-radius: 0; }
.sv-row { padding: 11px 16px; background: var(--surface); border-bottom: 1px solid var(--separator); }
.sv-section { display: flex; flex-direction: column; margin: 8px 0; }
.sv-section-header, .sv-section-footer { padding: 6px 16px; font-size: 13px; color: var(--muted); text-transform: uppercase; }
.sv-section-footer { text-transform: none; }
.sv-navigationview, .sv-navigationstack { display: flex; flex-direction: column; gap: 8px; }
.sv-navbar { padding: 8px 0; }
.sv-navtitle { margin: 0; font-size: 34px; font-weight: 700; }
.sv-navbar-inline .sv-navtitle { font-size: 17px; font-weight: 600; text-align: center; }
.sv-navigationlink { display: flex; justify-content: space-between; color: inherit; text-decoration: none; }
.sv-chevron { color: var(--muted); }
.sv-tabview { display: flex; flex-direction: column; min-height: 100%; }
.sv-tab-content { flex: 1 1 auto; }
.sv-tabbar { display: flex; justify-content: space-around; border-top: 1px solid var(--separator); padding-top: 6px; }
.sv-tab { border: none; background: none; font-size: 10px; color: var(--muted); position: relative; }
.sv-tab-active { color: var(--accent); }
.sv-badged { position: relative; display: inline-flex; }
.sv-badge { position: absolute; top: -6px; right: -10px; min-width: 18px; padding: 1px 5px; border-radius: 9px; background: #ff3b30; color: #ffffff; font-size: 11px; text-align: center; }
.sv-searchable { display: flex; flex-direction: column; gap: 8px; }
.sv-search { padding: 7px 10px; border: none; border-radius: 10px; background: var(--fill); font: inherit; }
.sv-segmented { display: flex; background: var(--fill); border-radius: 8px; padding: 2px; }
.sv-segment { flex: 1; border: none; background: none; padding: 4px 8px; border-radius: 6px; font: inherit; }
.sv-segment-active { background: var(--surface); }
.sv-disclosuregroup summary, .sv-menu summary { cursor: pointer; color: var(--accent); }
.sv-label { display: inline-flex; align-items: center; gap: 6px; }
.sv-symbol { display: inline-block; text-align: center; }
.sv-image-asset { display: flex; align-items: center; justify-content: center; min-width: 60px; min-height: 60px; background: var(--fill); color: var(--muted); font-size: 12px; }
.sv-progress-spinner { display: flex; flex-direction: column; align-items: center; gap: 6px; }
.sv-spinner { width: 20px; height: 20px; border: 2px solid var(--separator); border-top-color: var(--muted); border-radius: 50%; }
.sv-link { color: var(--accent); text-decoration: none; }
"#;

const LIGHT: &str = ":root { --page: #f2f2f7; --surface: #ffffff; --grouped: #f2f2f7; --ink: #000000; --muted: #8e8e93; --accent: #007aff; --fill: #e5e5ea; --separator: #c6c6c8; --error-bg: #fff2f0; --error-ink: #c0271c; }";

const DARK: &str = ":root { --page: #000000; --surface: #1c1c1e; --grouped: #000000; --ink: #ffffff; --muted: #8e8e93; --accent: #0a84ff; --fill: #2c2c2e; --separator: #38383a; --error-bg: #3a1512; --error-ink: #ff6961; }";

/// A complete HTML document showing the banner for any errors and the
/// rendered tree when there is one. Partial results show both.
pub fn render_page(result: &ParseResult, options: &RenderOptions) -> String {
    let palette = match options.theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    };
    let banner = render_error_banner(result.errors());
    let tree = result
        .root()
        .map(|root| render_with(root, options))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\" data-theme=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>CrossPreview</title>\n<style>{palette}{CHROME}</style>\n</head>\n<body>\n<main class=\"sv-device\">{banner}{tree}</main>\n</body>\n</html>\n",
        options.theme.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::models::ViewNode;

    #[test]
    fn partial_result_shows_banner_and_tree() {
        let result = ParseResult::success(ViewNode::text("Hi"), vec!["Skipped x".into()]);
        let page = render_page(&result, &RenderOptions::default());
        let banner = page.find("<div class=\"sv-error-banner\"");
        let tree = page.find(">Hi<");
        assert!(banner.is_some() && tree.is_some());
        assert!(banner < tree);
    }

    #[test]
    fn failure_shows_only_banner() {
        let result = ParseResult::failure(ExtractError::NoViewDeclaration);
        let page = render_page(&result, &RenderOptions::default());
        assert!(page.contains("No struct conforming to View found"));
        assert!(!page.contains("<span class=\"sv-text\""));
    }

    #[test]
    fn dark_theme_switches_palette() {
        let options = RenderOptions {
            theme: Theme::Dark,
            ..RenderOptions::default()
        };
        let page = render_page(&ParseResult::success(ViewNode::text("x"), vec![]), &options);
        assert!(page.contains("data-theme=\"dark\""));
        assert!(page.contains("--surface: #1c1c1e"));
    }
}
