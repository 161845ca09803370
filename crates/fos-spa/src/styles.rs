//! Stylesheet for error annotations and alerts

use fos_dom::{Document, DomResult, NodeId, Selector};

/// Marker attribute on the injected `<style>`
pub const STYLES_MARKER: &str = "data-spa-styles";

pub const STYLESHEET: &str = "
  .input-error { outline: 2px solid rgba(220,50,50,0.25); }
  .field-error-message { color: #b22222; font-size: 0.9rem; margin-top: 4px; display:block; }
  .spa-global-alert { position: fixed; left: 50%; transform: translateX(-50%) translateY(-20px); top: 10px; padding: 12px 18px; border-radius: 8px; z-index: 9999; opacity: 0; transition: all 300ms ease; box-shadow: 0 6px 18px rgba(0,0,0,0.12); }
  .spa-global-alert.visible { opacity: 1; transform: translateX(-50%) translateY(0); }
  .spa-alert-info { background: #f0f4ff; color: #0b3a8c; }
  .spa-alert-success { background: #ecf9f0; color: #116633; }
  .spa-alert-error { background: #fff2f2; color: #8b0000; }
";

/// Append the stylesheet to `head` unless it is already there. Returns the
/// `<style>` element, or `None` when the document has no head.
pub fn inject_styles(doc: &mut Document) -> DomResult<Option<NodeId>> {
    let head = doc.head();
    if !head.is_valid() {
        return Ok(None);
    }
    if let Some(existing) = doc.query_selector(head, &Selector::tag("style").with_attr(STYLES_MARKER)) {
        return Ok(Some(existing));
    }

    let style = doc.tree.create_element_with_attrs("style", &[(STYLES_MARKER, "")]);
    doc.tree.set_text_content(style, STYLESHEET)?;
    doc.tree.append_child(head, style)?;
    Ok(Some(style))
}
