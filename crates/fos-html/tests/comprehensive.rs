//! Comprehensive tests for fos-html
//!
//! Parsed documents must expose the structure page scripts query.

use fos_dom::{Selector, SelectorList};
use fos_html::HtmlParser;

const CONTACT_PAGE: &str = r#"
    <!DOCTYPE html>
    <html lang="pt-BR">
        <head><title>Contato</title></head>
        <body>
            <nav><a href="/index.html">Início</a> <a href="https://example.org">Fora</a></nav>
            <main id="conteudo">
                <form>
                    <input type="text" name="nome" required>
                    <input type="email" name="email" value="a@b.co">
                    <input name="telefone">
                    <input type="checkbox" name="aceite" required checked>
                    <textarea name="mensagem" required>Olá</textarea>
                    <button type="button" class="button-enviar">Enviar</button>
                </form>
            </main>
        </body>
    </html>
"#;

#[test]
fn test_parse_locates_skeleton() {
    let doc = HtmlParser::new().parse(CONTACT_PAGE).unwrap();
    assert!(doc.document_element().is_valid());
    assert!(doc.head().is_valid());
    assert!(doc.body().is_valid());
    assert_eq!(doc.title(), "Contato");
}

#[test]
fn test_parse_main_container() {
    let doc = HtmlParser::new().parse(CONTACT_PAGE).unwrap();
    let main = doc.query_selector(doc.tree().root(), &Selector::tag("main")).unwrap();
    assert_eq!(doc.get_element_by_id("conteudo"), Some(main));
}

#[test]
fn test_parse_form_controls() {
    let doc = HtmlParser::new().parse(CONTACT_PAGE).unwrap();
    let form = doc.query_selector(doc.tree().root(), &Selector::tag("form")).unwrap();

    let required = SelectorList::parse("[required]").unwrap();
    assert_eq!(doc.query_selector_all(form, &required).len(), 3);

    let email = doc
        .query_selector(form, &Selector::tag("input").with_attr_eq("type", "email"))
        .unwrap();
    assert_eq!(doc.tree().control_value(email), "a@b.co");

    let checkbox = doc
        .query_selector(form, &Selector::tag("input").with_attr_eq("name", "aceite"))
        .unwrap();
    assert!(doc.tree().is_checked(checkbox));

    let textarea = doc.query_selector(form, &Selector::tag("textarea")).unwrap();
    assert_eq!(doc.tree().control_value(textarea), "Olá");
}

#[test]
fn test_parse_links_keep_raw_href() {
    let doc = HtmlParser::new().parse(CONTACT_PAGE).unwrap();
    let hrefs: Vec<&str> = doc
        .query_selector_all(doc.tree().root(), &Selector::tag("a"))
        .into_iter()
        .filter_map(|a| doc.tree().element(a).and_then(|e| e.get_attr("href")))
        .collect();
    assert_eq!(hrefs, vec!["/index.html", "https://example.org"]);
}

#[test]
fn test_parse_entities() {
    let doc = HtmlParser::new().parse("<p>&lt;tag&gt; &amp; caf&eacute;</p>").unwrap();
    let p = doc.query_selector(doc.tree().root(), &Selector::tag("p")).unwrap();
    assert_eq!(doc.tree().text_content(p), "<tag> & café");
}

#[test]
fn test_parse_large_document() {
    let mut html = String::from("<html><body><main>");
    for i in 0..1000 {
        html.push_str(&format!(r#"<div id="div-{}" class="item"><p>Paragraph {}</p></div>"#, i, i));
    }
    html.push_str("</main></body></html>");

    let doc = HtmlParser::new().parse(&html).unwrap();
    assert_eq!(doc.query_selector_all(doc.tree().root(), &Selector::class("item")).len(), 1000);
    assert!(doc.get_element_by_id("div-999").is_some());
}
