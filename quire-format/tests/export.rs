//! End-to-end export through the registry

use std::collections::HashMap;

use regex::Regex;

use quire_format::element::{Element, ElementKind};
use quire_format::export::ExporterRegistry;
use quire_format::format::character::{CharacterFormat, Position};
use quire_format::format::list_additional::ListAdditionalParagraphFormat;
use quire_format::format::ordered_list::{OrderedListParagraphFormat, Style};
use quire_format::format::paragraph::ParagraphFormat;
use quire_format::format::unordered_list::UnorderedListParagraphFormat;
use quire_format::format::Format;
use quire_format::{Document, ExportError};

fn list_document() -> Document {
    let document = Document::new();
    let ordered = OrderedListParagraphFormat::new().into_pointer();
    document.add_paragraph("Intro", None);
    document.add_paragraph("one", Some(ordered.clone()));
    document.add_paragraph("two", Some(ordered));
    document
}

#[test]
fn latex_document_with_an_ordered_list() {
    let registry = ExporterRegistry::default();
    let latex = registry.export(&list_document(), "latex").expect("latex export");
    insta::assert_snapshot!(latex, @r"
    \documentclass{article}
    \usepackage[T1]{fontenc}
    \usepackage[utf8]{inputenc}
    \usepackage{enumitem}
    \usepackage{ragged2e}
    \usepackage[normalem]{ulem}

    \begin{document}

    Intro

    \begin{enumerate}[label={\arabic*.}]
      \item one
      \item two
    \end{enumerate}

    \end{document}
    ");
}

#[test]
fn html5_and_stylesheet_agree_on_class_names() {
    let registry = ExporterRegistry::default();
    let document = Document::new();
    document.add_paragraph("Body", Some(ParagraphFormat::new().into_pointer()));
    document.add_paragraph("item", Some(UnorderedListParagraphFormat::new().into_pointer()));
    document.add_paragraph(
        "more",
        Some(ListAdditionalParagraphFormat::new().into_pointer()),
    );

    let html = registry.export(&document, "html").expect("html export");
    let css = registry.export(&document, "css").expect("css export");

    assert!(html.contains("<p class=\"paragraphformat_1\">Body</p>"));
    assert!(html.contains("<li class=\"unorderedlistparagraphformat_1\">item</li>"));
    assert!(html.contains("<li class=\"unorderedlistparagraphformat_1_no_bullet\">more</li>"));
    for line in css.lines() {
        assert!(html.contains(line), "stylesheet line missing from page: {line}");
    }
}

#[test]
fn every_html_class_has_a_stylesheet_rule() {
    let registry = ExporterRegistry::default();
    let document = list_document();
    document.add_paragraph("bullet", Some(UnorderedListParagraphFormat::new().into_pointer()));
    document.add_paragraph(
        "continued",
        Some(ListAdditionalParagraphFormat::new().into_pointer()),
    );

    let html = registry.export(&document, "html").expect("html export");
    let css = registry.export(&document, "css").expect("css export");

    let class_attribute = Regex::new(r#"<(\w+) class="([^"]+)""#).expect("valid regex");
    let mut seen = 0;
    for capture in class_attribute.captures_iter(&html) {
        let selector = format!("{}.{} {{", &capture[1], &capture[2]);
        assert!(css.contains(&selector), "no rule for {selector}");
        seen += 1;
    }
    assert!(seen >= 4, "expected classed elements in {html}");
}

#[test]
fn html4_marks_list_type_and_start() {
    let registry = ExporterRegistry::default();
    let document = Document::new();
    let mut roman = OrderedListParagraphFormat::new();
    roman.set_style(Style::RomanLowerCase);
    roman.set_starting_number(3);
    let roman = roman.into_pointer();
    document.add_paragraph("iii", Some(roman.clone()));
    document.add_paragraph("iv", Some(roman));

    let options: HashMap<String, String> = [
        ("style".to_string(), "html4".to_string()),
        ("title".to_string(), "Lists".to_string()),
    ]
    .into();
    let html = registry
        .export_with_options(&document, "html", &options)
        .expect("html export");

    assert!(html.starts_with("<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\""));
    assert!(html.contains("<title>Lists</title>"));
    assert!(html.contains("<ol type=\"i\"><li value=\"3\">iii</li><li>iv</li></ol>"));
}

#[test]
fn inline_runs_keep_their_formats() {
    let registry = ExporterRegistry::default();
    let document = Document::new();
    let paragraph = document.add_paragraph("x", None);

    let mut superscript = CharacterFormat::new();
    superscript.set_position(Position::Superscript);
    let run = Element::new(ElementKind::Text);
    run.set_text("2");
    run.set_format(Some(superscript.into_pointer()));
    paragraph.append_child(run);

    let latex = registry.export(&document, "latex").expect("latex export");
    assert!(latex.contains("x\\textsuperscript{2}\n"));

    let html = registry.export(&document, "html").expect("html export");
    assert!(html.contains("<p>x<span class=\"characterformat_1\">2</span></p>"));
    assert!(html.contains("span.characterformat_1 {"));
    assert!(html.contains("vertical-align: super;"));
}

#[test]
fn ordered_labels() {
    let mut format = OrderedListParagraphFormat::new();
    format.set_style(Style::RomanUpperCase);
    format.set_prefix("(");
    format.set_suffix(")");
    let labels: Vec<String> = (1..=4).map(|number| format.label(number)).collect();
    insta::assert_snapshot!(labels.join(" "), @"(I) (II) (III) (IV)");
}

#[test]
fn unknown_exporter_is_reported() {
    let registry = ExporterRegistry::default();
    let error = registry
        .export(&Document::new(), "docx")
        .expect_err("docx is not registered");
    assert_eq!(error, ExportError::ExporterNotFound("docx".to_string()));
    assert_eq!(error.to_string(), "Exporter 'docx' not found");
}
