//! HTML serialization
//!
//! Pipeline: Document → blocks (see `export::layout`) → RcDom → HTML string

use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};

use crate::element::{Document, ElementPointer};
use crate::error::ExportError;
use crate::export::classes::FormatClasses;
use crate::export::css::stylesheet;
use crate::export::html::HtmlStyle;
use crate::export::layout::{self, Block, List, ListKind};
use crate::format::character::{CharacterFormat, Position};
use crate::format::justified_block::Justification;
use crate::format::ordered_list::OrderedListParagraphFormat;
use crate::format::parenthesis::ParenthesisFormat;
use crate::format::unordered_list::{UnorderedListParagraphFormat, NO_BULLET_CLASS_SUFFIX};
use crate::format::FormatPointer;

/// Options for HTML serialization
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub style: HtmlStyle,
    pub title: String,
}

/// Serialize a document to a complete HTML page.
pub fn serialize_document(document: &Document, options: &HtmlOptions) -> Result<String, ExportError> {
    let mut builder = DomBuilder {
        style: options.style,
        classes: FormatClasses::from_document(document),
    };

    let container = create_element("div", Vec::new());
    for block in layout::blocks(document) {
        match &block {
            Block::Paragraph(element) => builder.paragraph(&container, element),
            Block::List(list) => builder.list(&container, list),
        }
    }

    let body = serialize_children(&container)?;
    Ok(match options.style {
        HtmlStyle::Html5WithCss => wrap_html5(&body, &options.title, &stylesheet(&builder.classes)),
        HtmlStyle::Html4WithoutCss => wrap_html4(&body, &options.title),
    })
}

struct DomBuilder {
    style: HtmlStyle,
    classes: FormatClasses,
}

impl DomBuilder {
    fn uses_css(&self) -> bool {
        self.style == HtmlStyle::Html5WithCss
    }

    fn paragraph(&mut self, parent: &Handle, element: &ElementPointer) {
        let attributes = match element.format() {
            Some(format) if self.uses_css() => vec![("class", self.classes.class_name(&format))],
            Some(format) => align_attribute(&format).into_iter().collect(),
            None => Vec::new(),
        };
        let paragraph = create_element("p", attributes);
        self.runs(&paragraph, element);
        append(parent, paragraph);
    }

    fn list(&mut self, parent: &Handle, list: &List) {
        let starting_number = list
            .format()
            .and_then(|format| {
                let format = format.borrow();
                format
                    .downcast_ref::<OrderedListParagraphFormat>()
                    .map(|ordered| (ordered.starting_number(), ordered.style().html_type()))
            });

        let mut list_attributes: Vec<(&str, String)> = Vec::new();
        let tag = match list.kind {
            ListKind::Ordered => {
                if let Some((start, html_type)) = starting_number {
                    if self.uses_css() && start != 1 {
                        list_attributes.push(("start", start.to_string()));
                    }
                    if !self.uses_css() && html_type != "1" {
                        list_attributes.push(("type", html_type.to_string()));
                    }
                }
                "ol"
            }
            ListKind::Unordered => {
                if !self.uses_css() {
                    if let Some(format) = list.format() {
                        let format = format.borrow();
                        if let Some(unordered) = format.downcast_ref::<UnorderedListParagraphFormat>() {
                            list_attributes.push(("type", unordered.html_category().keyword().to_string()));
                        }
                    }
                }
                "ul"
            }
        };
        let list_node = create_element(tag, list_attributes);

        for (index, item) in list.items.iter().enumerate() {
            let mut item_attributes: Vec<(&str, String)> = Vec::new();
            let class = self.classes.class_name(&item.format);
            if self.uses_css() {
                item_attributes.push(("class", class.clone()));
            } else if index == 0 {
                if let Some((start, _)) = starting_number.filter(|(start, _)| *start != 1) {
                    item_attributes.push(("value", start.to_string()));
                }
            }
            let item_node = create_element("li", item_attributes);
            self.runs(&item_node, &item.element);

            let bullet_rows = self.uses_css() && list.kind == ListKind::Unordered;
            let mut rows = Vec::new();
            for continuation in &item.continuations {
                if bullet_rows {
                    let row = create_element(
                        "li",
                        vec![("class", format!("{class}{NO_BULLET_CLASS_SUFFIX}"))],
                    );
                    self.runs(&row, continuation);
                    rows.push(row);
                } else {
                    self.paragraph(&item_node, continuation);
                }
            }

            append(&list_node, item_node);
            for row in rows {
                append(&list_node, row);
            }
        }

        append(parent, list_node);
    }

    fn runs(&mut self, parent: &Handle, element: &ElementPointer) {
        for run in layout::runs(element) {
            let Some(format) = run.format else {
                append(parent, create_text(&run.text));
                continue;
            };
            let text = delimited(&format, &run.text);

            if self.uses_css() {
                let span = create_element("span", vec![("class", self.classes.class_name(&format))]);
                append(&span, create_text(&text));
                append(parent, span);
                continue;
            }

            let mut current = parent.clone();
            for tag in inline_tags(&format) {
                let node = create_element(tag, Vec::new());
                append(&current, node.clone());
                current = node;
            }
            append(&current, create_text(&text));
        }
    }
}

fn align_attribute(format: &FormatPointer) -> Option<(&'static str, String)> {
    let format = format.borrow();
    let justification = format.as_justified_block()?.justification();
    match justification {
        Justification::Left | Justification::None => None,
        other => other.css_value().map(|value| ("align", value.to_string())),
    }
}

/// Presentational tags standing in for CSS, outermost first.
fn inline_tags(format: &FormatPointer) -> Vec<&'static str> {
    let format = format.borrow();
    let mut tags = Vec::new();
    if let Some(font) = format.as_font() {
        if font.font_weight().is_bold() {
            tags.push("b");
        }
        if font.italic() {
            tags.push("i");
        }
        if font.underline() {
            tags.push("u");
        }
        if font.strikeout() {
            tags.push("s");
        }
    }
    if let Some(character) = format.downcast_ref::<CharacterFormat>() {
        match character.position() {
            Position::Normal => {}
            Position::Subscript => tags.push("sub"),
            Position::Superscript => tags.push("sup"),
        }
    }
    tags
}

fn delimited(format: &FormatPointer, text: &str) -> String {
    let format = format.borrow();
    match format
        .downcast_ref::<ParenthesisFormat>()
        .and_then(|parenthesis| parenthesis.style().delimiters())
    {
        Some((open, close)) => format!("{open}{text}{close}"),
        None => text.to_string(),
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element node
fn create_element(tag: &str, attrs: Vec<(&str, String)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
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

/// Serialize each child of `container`, one per line
fn serialize_children(container: &Handle) -> Result<String, ExportError> {
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let mut output = Vec::new();
    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            ExportError::Serialization(format!("HTML serialization failed: {e}"))
        })?;
        output.push(b'\n');
    }

    String::from_utf8(output)
        .map_err(|e| ExportError::Serialization(format!("UTF-8 conversion failed: {e}")))
}

fn wrap_html5(body: &str, title: &str, css: &str) -> String {
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="generator" content="quire">
  <title>{title}</title>
  <style>
{css}  </style>
</head>
<body>
{body}</body>
</html>
"#
    )
}

fn wrap_html4(body: &str, title: &str) -> String {
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">
<html>
<head>
  <meta http-equiv="Content-Type" content="text/html; charset=UTF-8">
  <title>{title}</title>
</head>
<body>
{body}</body>
</html>
"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
