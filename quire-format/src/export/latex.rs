//! LaTeX export
//!
//! Paragraph justification maps to the `ragged2e` commands, lists to
//! `enumerate`/`itemize` environments with `enumitem` labels:
//!
//! | Format                         | LaTeX                                                        |
//! |--------------------------------|--------------------------------------------------------------|
//! | left / right / centered / filled | `\RaggedRight` / `\RaggedLeft` / `\Centering` / `\justifying` |
//! | ordered list                   | `\begin{enumerate}[label={prefix\arabic*suffix}]`            |
//! | starting number N ≠ 1          | `\setcounter{enumi}{N-1}`                                    |
//! | unordered list                 | `\begin{itemize}[label={\textbullet}]`                       |
//!
//! Options: `document_class` (default `article`). Bullets without a LaTeX
//! rendering fall back to `*` with a warning.

use std::collections::HashMap;

use crate::element::{Document, ElementPointer};
use crate::error::ExportError;
use crate::export::diagnostic::{Diagnostic, Diagnostics};
use crate::export::layout::{self, Block, List, ListKind};
use crate::export::Exporter;
use crate::format::character::{CharacterFormat, Position};
use crate::format::justified_block::Justification;
use crate::format::ordered_list::OrderedListParagraphFormat;
use crate::format::parenthesis::ParenthesisFormat;
use crate::format::unordered_list::{UnorderedListParagraphFormat, FALLBACK_BULLET};
use crate::format::FormatPointer;

pub const DEFAULT_DOCUMENT_CLASS: &str = "article";

#[derive(Debug, Clone, Default)]
pub struct LatexExporter {
    document_class: Option<String>,
}

impl LatexExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document_class(mut self, document_class: &str) -> Self {
        self.document_class = Some(document_class.to_string());
        self
    }
}

impl Exporter for LatexExporter {
    fn name(&self) -> &str {
        "latex"
    }

    fn description(&self) -> &str {
        "LaTeX source using enumitem and ragged2e"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tex", "latex"]
    }

    fn export_with_options(
        &self,
        document: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, ExportError> {
        let document_class = options
            .get("document_class")
            .cloned()
            .or_else(|| self.document_class.clone())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_CLASS.to_string());

        let mut writer = LatexWriter::default();
        for block in layout::blocks(document) {
            match &block {
                Block::Paragraph(element) => writer.paragraph(element),
                Block::List(list) => writer.list(list)?,
            }
        }

        Ok(format!(
            "\\documentclass{{{document_class}}}\n\
             \\usepackage[T1]{{fontenc}}\n\
             \\usepackage[utf8]{{inputenc}}\n\
             \\usepackage{{enumitem}}\n\
             \\usepackage{{ragged2e}}\n\
             \\usepackage[normalem]{{ulem}}\n\
             \n\
             \\begin{{document}}\n\
             \n\
             {}\
             \\end{{document}}\n",
            writer.output
        ))
    }
}

#[derive(Debug, Default)]
struct LatexWriter {
    output: String,
    diagnostics: Diagnostics,
}

impl LatexWriter {
    fn paragraph(&mut self, element: &ElementPointer) {
        let command = element
            .format()
            .and_then(|format| justification(&format))
            .and_then(justification_command);
        let content = runs(element);
        match command {
            Some(command) => self.output.push_str(&format!("{{{command}\n{content}\\par}}\n\n")),
            None => self.output.push_str(&format!("{content}\n\n")),
        }
    }

    fn list(&mut self, list: &List) -> Result<(), ExportError> {
        let Some(first) = list.format() else {
            return Ok(());
        };
        let (environment, label, start) = match list.kind {
            ListKind::Ordered => {
                let format = first.borrow();
                let (label, start) = format
                    .downcast_ref::<OrderedListParagraphFormat>()
                    .map(|ordered| (ordered.latex_label(), ordered.starting_number()))
                    .unwrap_or_else(|| ("\\arabic*.".to_string(), 1));
                ("enumerate", label, start)
            }
            ListKind::Unordered => {
                let label = self.bullet_label(first)?;
                ("itemize", label, 1)
            }
        };

        self.output
            .push_str(&format!("\\begin{{{environment}}}[label={{{label}}}]\n"));
        if start != 1 {
            self.output
                .push_str(&format!("\\setcounter{{enumi}}{{{}}}\n", start.saturating_sub(1)));
        }
        for item in &list.items {
            self.output.push_str(&format!("  \\item {}\n", runs(&item.element)));
            for continuation in &item.continuations {
                self.output.push_str(&format!("\n  {}\n", runs(continuation)));
            }
        }
        self.output.push_str(&format!("\\end{{{environment}}}\n\n"));
        Ok(())
    }

    fn bullet_label(&mut self, format: &FormatPointer) -> Result<String, ExportError> {
        let format = format.borrow();
        let Some(unordered) = format.downcast_ref::<UnorderedListParagraphFormat>() else {
            return Ok("\\textbullet".to_string());
        };
        let label = unordered.latex_label();
        if label == FALLBACK_BULLET && unordered.bullet() != FALLBACK_BULLET {
            self.diagnostics.report(Diagnostic::warning(format!(
                "bullet U+{:04X} has no LaTeX rendering, using \"{FALLBACK_BULLET}\"",
                unordered.bullet().chars().next().map_or(0, u32::from)
            )))?;
        }
        Ok(label)
    }
}

fn justification(format: &FormatPointer) -> Option<Justification> {
    let format = format.borrow();
    format
        .as_justified_block()
        .map(|justified| justified.justification())
}

fn justification_command(justification: Justification) -> Option<&'static str> {
    match justification {
        Justification::None => None,
        Justification::Left => Some("\\RaggedRight"),
        Justification::Right => Some("\\RaggedLeft"),
        Justification::Center => Some("\\Centering"),
        Justification::Justify => Some("\\justifying"),
    }
}

fn runs(element: &ElementPointer) -> String {
    layout::runs(element)
        .into_iter()
        .map(|run| match run.format {
            Some(format) => styled_run(&format, &run.text),
            None => escape(&run.text),
        })
        .collect()
}

fn styled_run(format: &FormatPointer, text: &str) -> String {
    let format = format.borrow();
    let mut content = escape(text);

    if let Some((open, close)) = format
        .downcast_ref::<ParenthesisFormat>()
        .and_then(|parenthesis| parenthesis.style().delimiters())
    {
        content = format!("{}{content}{}", escape(open), escape(close));
    }
    if let Some(character) = format.downcast_ref::<CharacterFormat>() {
        match character.position() {
            Position::Normal => {}
            Position::Subscript => content = format!("\\textsubscript{{{content}}}"),
            Position::Superscript => content = format!("\\textsuperscript{{{content}}}"),
        }
    }
    if let Some(font) = format.as_font() {
        if font.strikeout() {
            content = format!("\\sout{{{content}}}");
        }
        if font.underline() {
            content = format!("\\uline{{{content}}}");
        }
        if font.italic() {
            content = format!("\\textit{{{content}}}");
        }
        if font.font_weight().is_bold() {
            content = format!("\\textbf{{{content}}}");
        }
    }
    content
}

/// Escape LaTeX special characters in running text.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}
