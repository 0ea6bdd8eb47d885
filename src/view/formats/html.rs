//! HTML serialization of render models
//!
//! Builds an html5ever DOM from the model and serializes it:
//!
//! | Model              | HTML                                        |
//! |--------------------|---------------------------------------------|
//! | paragraph          | `<p>`                                       |
//! | parsed sentence    | `<span class="sent parsed">`                |
//! | rejected sentence  | `<span class="sent err">`                   |
//! | interactive token  | `<i id="N" class="C">` (class may be absent) |
//! | punctuation        | `<i class="p">`                             |
//! | error token        | wrapped in `<span class="errtok">`          |
//! | space              | a single space text node                    |
//!
//! Every sentence and paragraph is followed by a newline so the source stays
//! readable. The identifiers are positions in the model's token index.

use crate::view::config::HtmlConfig;
use crate::view::error::ViewError;
use crate::view::formats::registry::Formatter;
use crate::view::names::NameRegistry;
use crate::view::render::{Fragment, RenderModel, RenderedParagraph, RenderedToken};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

const PARSED_SENTENCE_CLASS: &str = "sent parsed";
const ERROR_SENTENCE_CLASS: &str = "sent err";
const ERROR_TOKEN_CLASS: &str = "errtok";

/// The interactive markup as an HTML fragment
pub fn render_fragment(model: &RenderModel) -> Result<String, ViewError> {
    let container = create_element("div", vec![]);
    for paragraph in &model.paragraphs {
        append(&container, build_paragraph(paragraph));
        append(&container, create_text("\n"));
    }
    serialize_children(&container)
}

/// The displayable name register as an HTML list
pub fn render_register(names: &NameRegistry, locale: &str) -> Result<String, ViewError> {
    let container = create_element("div", vec![]);
    let list = create_element("ul", vec![("class", "namelist")]);
    for entry in names.list_displayable_in(locale) {
        let item = create_element("li", vec![]);
        let name = create_element("span", vec![("class", "name")]);
        append(&name, create_text(&entry.name));
        let title = create_element("span", vec![("class", "title")]);
        append(&title, create_text(entry.title));
        append(&item, name);
        append(&item, create_text(" "));
        append(&item, title);
        append(&list, item);
    }
    append(&container, list);
    serialize_children(&container)
}

fn build_paragraph(paragraph: &RenderedParagraph) -> Handle {
    let p = create_element("p", vec![]);
    append(&p, create_text("\n"));
    for sentence in &paragraph.sentences {
        let class = if sentence.parsed {
            PARSED_SENTENCE_CLASS
        } else {
            ERROR_SENTENCE_CLASS
        };
        let span = create_element("span", vec![("class", class)]);
        for fragment in &sentence.fragments {
            match fragment {
                Fragment::Space => append(&span, create_text(" ")),
                Fragment::Token(token) => append(&span, build_token(token)),
            }
        }
        append(&p, span);
        append(&p, create_text("\n"));
    }
    p
}

fn build_token(token: &RenderedToken) -> Handle {
    let id = token.id.map(|id| id.to_string());
    let mut attrs = Vec::with_capacity(2);
    if let Some(ref id) = id {
        attrs.push(("id", id.as_str()));
    }
    if let Some(ref class) = token.class {
        attrs.push(("class", class.as_str()));
    }
    let element = create_element("i", attrs);
    append(&element, create_text(&token.text));

    if token.error {
        let marker = create_element("span", vec![("class", ERROR_TOKEN_CLASS)]);
        append(&marker, element);
        marker
    } else {
        element
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of a container node to an HTML string
fn serialize_children(container: &Handle) -> Result<String, ViewError> {
    let mut output = Vec::new();

    // IncludeNode serializes each element and its children
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            ViewError::Serialization(format!("HTML serialization failed: {}", e))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| ViewError::Serialization(format!("UTF-8 conversion failed: {}", e)))
}

/// Wrap the fragment (and optionally the register) in a complete document
fn wrap_in_document(body_html: &str, register_html: Option<&str>, config: &HtmlConfig) -> String {
    let css = include_str!("../../../css/reynir-view.css");
    let register = register_html
        .map(|html| format!("<div id=\"register\">\n{}\n</div>\n", html))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="reynir-view">
  <title>{title}</title>
  <style>
{css}
  </style>
</head>
<body>
<div id="result">
{body}</div>
{register}</body>
</html>
"#,
        lang = escape_attribute(&config.lang),
        title = escape_text(&config.title),
        css = css,
        body = body_html,
        register = register,
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

/// The markup fragment alone
pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn description(&self) -> &'static str {
        "Interactive markup fragment"
    }

    fn serialize(&self, model: &RenderModel, _names: &NameRegistry) -> Result<String, ViewError> {
        render_fragment(model)
    }
}

/// A standalone HTML page
pub struct PageFormatter {
    config: HtmlConfig,
}

impl PageFormatter {
    pub fn new(config: HtmlConfig) -> Self {
        PageFormatter { config }
    }
}

impl Formatter for PageFormatter {
    fn name(&self) -> &'static str {
        "page"
    }

    fn description(&self) -> &'static str {
        "Standalone HTML page with embedded CSS"
    }

    fn serialize(&self, model: &RenderModel, names: &NameRegistry) -> Result<String, ViewError> {
        let body = render_fragment(model)?;
        let register = if self.config.include_register && !names.is_empty() {
            Some(render_register(names, &self.config.lang)?)
        } else {
            None
        };
        Ok(wrap_in_document(&body, register.as_deref(), &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render::render;
    use crate::view::tokens::{Document, Meaning, Paragraph, Sentence, Token, TokenKind};

    fn one_sentence(tokens: Vec<Token>) -> RenderModel {
        let doc = Document::new(vec![Paragraph::new(vec![Sentence::new(tokens)])]);
        render(Some(&doc), &NameRegistry::new())
    }

    #[test]
    fn test_scenario_markup() {
        let model = one_sentence(vec![
            Token::word("Ég").with_meaning(Meaning::new("ég", "pfn", "alm", "NFET")),
            Token::word("sá").with_meaning(Meaning::new("sjá", "so", "alm", "GM-FH-ÞT-1P-ET")),
            Token::word("Jón").with_terminal("sérnafn_þf"),
            Token::punctuation("."),
        ]);
        let html = render_fragment(&model).unwrap();
        insta::assert_snapshot!(html, @r#"
        <p>
        <span class="sent parsed"><i id="0" class="pfn">Ég</i> <i id="1" class="so">sá</i> <i id="2" class="entity">Jón</i><i class="p">.</i></span>
        </p>
        "#);
    }

    #[test]
    fn test_error_markup() {
        let model = one_sentence(vec![
            Token::word("hestur").with_meaning(Meaning::new("hestur", "kk", "alm", "NFET")),
            Token::word("blebb").with_error(),
        ]);
        let html = render_fragment(&model).unwrap();
        assert!(html.contains(r#"<span class="sent err">"#));
        assert!(html.contains(r#"<i id="0">hestur</i>"#));
        assert!(html.contains(r#"<span class="errtok"><i id="1">blebb</i></span>"#));
    }

    #[test]
    fn test_em_dash_markup() {
        let model = one_sentence(vec![
            Token::word("Já"),
            Token::punctuation("—"),
            Token::word("nei"),
        ]);
        let html = render_fragment(&model).unwrap();
        assert!(html.contains(r#"<i id="0" class="nf">Já</i><i class="p"> — </i><i id="1" class="nf">nei</i>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let model = one_sentence(vec![Token::new(TokenKind::Url, "a<b>&c")]);
        let html = render_fragment(&model).unwrap();
        assert!(html.contains(r#"<i id="0" class="url">a&lt;b&gt;&amp;c</i>"#));
    }

    #[test]
    fn test_empty_model() {
        let html = render_fragment(&RenderModel::default()).unwrap();
        assert_eq!(html, "");
    }

    #[test]
    fn test_register_markup() {
        let mut names = NameRegistry::new();
        names.add_person("Jón Jónsson", "forstjóri");
        names.add_entity("Alþingi", "löggjafarþing");
        let html = render_register(&names, "is").unwrap();
        assert_eq!(
            html,
            "<ul class=\"namelist\">\
             <li><span class=\"name\">Alþingi</span> <span class=\"title\">löggjafarþing</span></li>\
             <li><span class=\"name\">Jón Jónsson</span> <span class=\"title\">forstjóri</span></li>\
             </ul>"
        );
    }

    #[test]
    fn test_page_includes_register() {
        let mut names = NameRegistry::new();
        names.add_person("Jón Jónsson", "forstjóri");
        let model = one_sentence(vec![Token::word("Jónsson").with_terminal("sérnafn_nf")]);
        let page = PageFormatter::new(HtmlConfig::default())
            .serialize(&model, &names)
            .unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<html lang=\"is\">"));
        assert!(page.contains("<style>"));
        assert!(page.contains("<div id=\"register\">"));
        assert!(page.contains("<i id=\"0\" class=\"entity\">Jónsson</i>"));
    }

    #[test]
    fn test_page_without_register() {
        let config = HtmlConfig {
            include_register: false,
            ..HtmlConfig::default()
        };
        let mut names = NameRegistry::new();
        names.add_person("Jón Jónsson", "forstjóri");
        let page = PageFormatter::new(config)
            .serialize(&RenderModel::default(), &names)
            .unwrap();
        // The embedded stylesheet mentions `namelist`, so check the markup itself
        assert!(!page.contains("<div id=\"register\">"));
        assert!(!page.contains("<ul class=\"namelist\">"));
        assert!(page.contains("ul.namelist"));
    }
}
