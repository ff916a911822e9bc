//! Markup parsing and serialization for render trees
//!
//! Parsing goes through html5ever so that entities, implied end tags and
//! mis-nested inline markup behave the way a browser would treat them.
//! Markup is parsed as the inner HTML of a `<div>`, so leading whitespace and
//! head-only elements such as `<title>` stay where they were written.

use std::fmt::Write as _;

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{local_name, ns, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Error, Result};
use crate::node::{ElementUnit, RenderNode};

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `tag` is a void element
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse a markup fragment into a render forest
pub fn parse(markup: &str) -> Result<Vec<RenderNode>> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };

    let context = QualName::new(None, ns!(html), local_name!("div"));
    let dom = parse_fragment(RcDom::default(), opts, context, Vec::new(), false)
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .map_err(|e| Error::markup(format!("failed to read markup: {e}")))?;

    // The fragment lands under a synthetic <html> root
    let root = dom.document.children.borrow().first().cloned();
    Ok(root.map(|root| convert_children(&root)).unwrap_or_default())
}

/// Parse a markup fragment, treating `None` as empty content
pub fn parse_optional(markup: Option<&str>) -> Result<Vec<RenderNode>> {
    match markup {
        Some(markup) => parse(markup),
        None => Ok(Vec::new()),
    }
}

fn convert_children(handle: &Handle) -> Vec<RenderNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<RenderNode> {
    match &handle.data {
        NodeData::Text { contents } => Some(RenderNode::text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(RenderNode::comment(contents.to_string())),
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            Some(RenderNode::Element(ElementUnit {
                tag: name.local.to_string(),
                attributes,
                children: convert_children(handle),
            }))
        }
        // Doctypes and processing instructions carry no content
        _ => None,
    }
}

/// Serialize a render forest back to markup
pub fn serialize(nodes: &[RenderNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Text(unit) => escape_text(out, &unit.data),
        RenderNode::Comment { data } => {
            let _ = write!(out, "<!--{data}-->");
        }
        RenderNode::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attributes {
                let _ = write!(out, " {name}=\"");
                escape_attribute(out, value);
                out.push('"');
            }
            out.push('>');
            if element.is_void() {
                return;
            }
            for child in &element.children {
                write_node(out, child);
            }
            let _ = write!(out, "</{}>", element.tag);
        }
    }
}

fn escape_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}
