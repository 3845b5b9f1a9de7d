//! Serialization of a finished report tree.
//!
//! Rendering is a separate pass over an immutable [`TestModule`]. The tree is
//! first projected into generic [`Element`]s, then written out with a fixed
//! indentation scheme:
//!
//! - an element with children starts its content on a new line, indented two
//!   spaces deeper than itself, unless it carries real text of its own;
//! - every child is followed by a newline and the indentation of the next
//!   sibling, the last child by the indentation of its parent's closing tag;
//! - the document ends with a single newline after the root.
//!
//! The same tree always renders to the same bytes.

use crate::clock::{format_calendar, format_timestamp};
use crate::error::{ReportError, Result};
use crate::model::{
    FailureDetailTable, FlatChild, GroupContent, SkippedTest, TestCase, TestGroup, TestModule,
    TestStep, VERDICT_SCHEME,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Declaration written before the root element.
pub const XML_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>\n";

const INDENT: &str = "  ";

/// A markup element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Shorthand for an element holding only text.
    fn with_text(name: &'static str, text: impl Into<String>) -> Self {
        Self::new(name).text(text)
    }
}

impl From<&TestModule> for Element {
    fn from(module: &TestModule) -> Self {
        let setup = Element::new("testsetup").child(
            Element::new("xinfo")
                .attr("name", module.setup.name.as_str())
                .child(Element::with_text(
                    "description",
                    module.setup.description.as_str(),
                )),
        );

        Element::new("testmodule")
            .attr("starttime", format_calendar(module.start_time))
            .attr("timestamp", "0.0")
            .attr("verdicts", VERDICT_SCHEME)
            .attr("measurementid", module.measurement_id.as_str())
            .child(setup)
            .children(module.groups.iter().map(Element::from))
    }
}

impl From<&TestGroup> for Element {
    fn from(group: &TestGroup) -> Self {
        let title = Element::with_text("title", group.title.as_str());
        let children: Vec<Element> = match &group.content {
            GroupContent::Nested(groups) => groups.iter().map(Element::from).collect(),
            GroupContent::Flat(children) => children
                .iter()
                .map(|child| match child {
                    FlatChild::Case(case) => Element::from(case),
                    FlatChild::Skipped(skipped) => Element::from(skipped),
                })
                .collect(),
        };
        Element::new("testgroup").child(title).children(children)
    }
}

impl From<&TestCase> for Element {
    fn from(case: &TestCase) -> Self {
        let verdict = Element::new("verdict")
            .attr("timestamp", format_timestamp(case.verdict.timestamp))
            .attr("result", case.verdict.result.as_str());

        Element::new("testcase")
            .attr("timestamp", format_timestamp(case.timestamp))
            .attr("starttime", format_calendar(case.start_time))
            .child(Element::with_text("title", case.title.as_str()))
            .children(case.steps.iter().map(Element::from))
            .child(verdict)
    }
}

impl From<&TestStep> for Element {
    fn from(step: &TestStep) -> Self {
        let element = Element::new("teststep")
            .attr("timestamp", format_timestamp(step.timestamp))
            .attr("level", step.level.to_string())
            .attr("type", step.kind.as_str())
            .attr("ident", step.ident.as_str())
            .attr("result", step.result.as_str())
            .text(step.description.as_str());
        match &step.failure_detail {
            Some(table) => element.child(Element::from(table)),
            None => element,
        }
    }
}

impl From<&FailureDetailTable> for Element {
    fn from(table: &FailureDetailTable) -> Self {
        Element::new("tabularinfo").children(table.rows().iter().map(|row| {
            Element::new("row").children(
                row.iter()
                    .map(|cell| Element::with_text("cell", cell.as_str())),
            )
        }))
    }
}

impl From<&SkippedTest> for Element {
    fn from(skipped: &SkippedTest) -> Self {
        Element::new("skipped").child(Element::with_text("title", skipped.title.as_str()))
    }
}

/// Renders a module to a complete document, declaration included.
pub fn render_document(module: &TestModule) -> String {
    render_element(&Element::from(module))
}

/// Renders `root` as a complete document, declaration included.
pub fn render_element(root: &Element) -> String {
    let mut out = String::from(XML_DECLARATION);
    write_element(root, 0, &mut out);
    out.push('\n');
    out
}

/// Renders `module` and writes it to `path`, returning the number of bytes written.
///
/// The file handle is scoped to this call and closed on every exit path.
pub fn write_document(module: &TestModule, path: &Path) -> Result<u64> {
    let document = render_document(module);
    let write_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(document.as_bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    Ok(document.len() as u64)
}

fn push_break(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_element(element: &Element, depth: usize, out: &mut String) {
    out.push('<');
    out.push_str(element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    let text = element.text.as_deref().filter(|text| !text.is_empty());
    if text.is_none() && element.children.is_empty() {
        out.push_str(" />");
        return;
    }
    out.push('>');

    if element.children.is_empty() {
        out.push_str(&escape_text(text.unwrap_or_default()));
    } else {
        match text {
            Some(text) if !text.trim().is_empty() => out.push_str(&escape_text(text)),
            _ => push_break(out, depth + 1),
        }
        let last = element.children.len() - 1;
        for (index, child) in element.children.iter().enumerate() {
            write_element(child, depth + 1, out);
            push_break(out, if index == last { depth } else { depth + 1 });
        }
    }

    out.push_str("</");
    out.push_str(element.name);
    out.push('>');
}

/// Escapes character data.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes an attribute value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\r' => out.push_str("&#13;"),
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#09;"),
            _ => out.push(c),
        }
    }
    out
}
