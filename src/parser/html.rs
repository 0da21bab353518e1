//! Minimal HTML document tree
//!
//! Parses a page into a `Document` that always has exactly one `<head>` and
//! one `<body>`, and serializes it back in a normalized, indented form. This
//! is not a conforming HTML5 parser: it handles the markup found in app start
//! pages (nested elements, void elements, comments, doctype, raw `<script>`
//! and `<style>` bodies) and recovers from stray end tags by ignoring them.

use std::fmt::Write as _;

/// Elements that never have children or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is not markup
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Raw text elements serialized verbatim rather than re-indented
const VERBATIM_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose whitespace is significant when serializing
const PREFORMATTED_ELEMENTS: &[&str] = &["pre", "textarea"];

/// Elements that belong in `<head>` when they appear before any body content
const HEAD_ELEMENTS: &[&str] = &[
    "base", "link", "meta", "noscript", "script", "style", "template", "title",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    Doctype(String),
}

impl Node {
    fn is_element(&self, name: &str) -> bool {
        matches!(self, Node::Element(el) if el.name == name)
    }

    fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.name.as_str())
    }

    /// Direct child elements, in order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First descendant element with the given name, depth-first in document order
    pub fn find(&self, name: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendant elements with the given name, in document order
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_named(name, found);
        }
    }

    pub fn append(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub fn prepend(&mut self, element: Element) {
        self.children.insert(0, Node::Element(element));
    }

    /// Insert `elements` directly before the first descendant named `name`.
    ///
    /// Gives the elements back if there is no such descendant.
    pub fn insert_before_first(
        &mut self,
        name: &str,
        elements: Vec<Element>,
    ) -> Result<(), Vec<Element>> {
        let mut elements = elements;
        for index in 0..self.children.len() {
            if self.children[index].is_element(name) {
                let nodes = elements.into_iter().map(Node::Element);
                self.children.splice(index..index, nodes);
                return Ok(());
            }
            if let Node::Element(child) = &mut self.children[index] {
                match child.insert_before_first(name, elements) {
                    Ok(()) => return Ok(()),
                    Err(returned) => elements = returned,
                }
            }
        }
        Err(elements)
    }
}

/// An HTML page with a guaranteed `<head>` and `<body>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub doctype: Option<String>,
    /// Comments preceding `<html>`
    pub prolog: Vec<Node>,
    pub html_attrs: Vec<(String, String)>,
    pub head: Element,
    pub body: Element,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        let forest = build_tree(tokenize(source));
        normalize(forest)
    }

    /// Serialize with one element or text run per line, indented one space per level
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            let _ = writeln!(out, "<!DOCTYPE {doctype}>");
        }
        for node in &self.prolog {
            write_pretty(&mut out, node, 0);
        }
        out.push_str("<html");
        write_attrs(&mut out, &self.html_attrs);
        out.push_str(">\n");
        write_element(&mut out, &self.head, 1);
        write_element(&mut out, &self.body, 1);
        out.push_str("</html>\n");
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Doctype(String),
    Comment(String),
    Text(String),
    StartTag {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume up to (not including) the first char matching `stop`
    fn take_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(stop).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Consume up to and including `delimiter`, returning what preceded it
    fn take_through(&mut self, delimiter: &str) -> &'a str {
        let rest = self.rest();
        match rest.find(delimiter) {
            Some(end) => {
                self.pos += end + delimiter.len();
                &rest[..end]
            }
            None => {
                self.pos = self.src.len();
                rest
            }
        }
    }
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn tokenize(source: &str) -> Vec<Token> {
    let mut cursor = Cursor { src: source, pos: 0 };
    let mut tokens = Vec::new();
    let mut text = String::new();

    while !cursor.at_end() {
        let rest = cursor.rest();
        let next_is = |offset: usize, pred: fn(&char) -> bool| {
            rest[offset..].chars().next().as_ref().is_some_and(pred)
        };

        if rest.starts_with("<!--") {
            flush_text(&mut text, &mut tokens);
            cursor.eat("<!--");
            tokens.push(Token::Comment(cursor.take_through("-->").to_string()));
        } else if starts_with_ignore_case(rest, "<!doctype") {
            flush_text(&mut text, &mut tokens);
            cursor.eat("<!");
            let inner = cursor.take_through(">");
            let value = inner.get("doctype".len()..).unwrap_or("").trim();
            tokens.push(Token::Doctype(value.to_string()));
        } else if rest.starts_with("</") && next_is(2, char::is_ascii_alphabetic) {
            flush_text(&mut text, &mut tokens);
            cursor.eat("</");
            let name = cursor.take_until(|c| c.is_whitespace() || c == '>' || c == '/');
            cursor.take_through(">");
            tokens.push(Token::EndTag(name.to_ascii_lowercase()));
        } else if rest.starts_with('<') && next_is(1, char::is_ascii_alphabetic) {
            flush_text(&mut text, &mut tokens);
            cursor.eat("<");
            let (name, attrs, self_closing) = read_tag(&mut cursor);
            let raw = RAW_TEXT_ELEMENTS.contains(&name.as_str()) && !self_closing;
            tokens.push(Token::StartTag {
                name: name.clone(),
                attrs,
                self_closing,
            });
            if raw {
                let content = read_raw_text(&mut cursor, &name);
                if !content.is_empty() {
                    tokens.push(Token::Text(content.to_string()));
                }
                tokens.push(Token::EndTag(name));
            }
        } else if let Some(c) = cursor.bump() {
            text.push(c);
            let run = cursor.take_until(|c| c == '<');
            text.push_str(run);
        }
    }
    flush_text(&mut text, &mut tokens);
    tokens
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::Text(std::mem::take(text)));
    }
}

/// Read a start tag after its `<`, through the closing `>`
fn read_tag(cursor: &mut Cursor<'_>) -> (String, Vec<(String, String)>, bool) {
    let name = cursor
        .take_until(|c| c.is_whitespace() || c == '>' || c == '/')
        .to_ascii_lowercase();
    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut self_closing = false;

    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => break,
            Some('>') => {
                cursor.bump();
                break;
            }
            Some('/') => {
                cursor.bump();
                self_closing = cursor.peek() == Some('>');
                continue;
            }
            Some(_) => {}
        }

        let attr_name = cursor
            .take_until(|c| c.is_whitespace() || c == '=' || c == '>' || c == '/')
            .to_ascii_lowercase();
        if attr_name.is_empty() {
            // Lone `=` or similar junk
            cursor.bump();
            continue;
        }
        cursor.skip_whitespace();
        let value = if cursor.eat("=") {
            cursor.skip_whitespace();
            read_attr_value(cursor)
        } else {
            String::new()
        };
        if !attrs.iter().any(|(n, _)| *n == attr_name) {
            attrs.push((attr_name, value));
        }
    }

    (name, attrs, self_closing)
}

fn read_attr_value(cursor: &mut Cursor<'_>) -> String {
    let raw = match cursor.peek() {
        Some(quote @ ('"' | '\'')) => {
            cursor.bump();
            let mut delimiter = [0u8; 4];
            cursor.take_through(quote.encode_utf8(&mut delimiter))
        }
        _ => cursor.take_until(|c| c.is_whitespace() || c == '>'),
    };
    decode_entities(raw)
}

/// Content of a raw text element up to its end tag, which is consumed
fn read_raw_text<'a>(cursor: &mut Cursor<'a>, name: &str) -> &'a str {
    let rest = cursor.rest();
    let closing = format!("</{name}");
    let end = rest
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| starts_with_ignore_case(&rest[i..], &closing))
        .unwrap_or(rest.len());
    cursor.pos += end;
    if !cursor.at_end() {
        cursor.take_through(">");
    }
    &rest[..end]
}

/// Named character references decoded in attribute values
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("trade", '\u{2122}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("laquo", '\u{ab}'),
    ("raquo", '\u{bb}'),
    ("middot", '\u{b7}'),
    ("bull", '\u{2022}'),
    ("times", '\u{d7}'),
    ("deg", '\u{b0}'),
    ("euro", '\u{20ac}'),
    ("pound", '\u{a3}'),
    ("yen", '\u{a5}'),
    ("cent", '\u{a2}'),
    ("sect", '\u{a7}'),
];

/// The character a reference body (between `&` and `;`) stands for
fn decode_reference(reference: &str) -> Option<char> {
    if let Some(number) = reference.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return match char::from_u32(code) {
            Some('\0') | None => Some('\u{fffd}'),
            Some(c) => Some(c),
        };
    }
    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == reference)
        .map(|(_, c)| *c)
}

/// Decode character references; unknown ones are kept as written
fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .get(1..)
            .and_then(|tail| tail.find(';').filter(|&end| end > 0 && end <= 32))
            .and_then(|end| decode_reference(&rest[1..=end]).map(|c| (c, end + 2)));
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Start tags that end an open `<p>`
const P_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "menu", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// Open elements an implied end tag never reaches past
const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

fn attach(node: Node, open: &mut [Element], roots: &mut Vec<Node>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Close the innermost open element named in `targets`, unless a boundary comes first
fn close_in_scope(
    targets: &[&str],
    boundaries: &[&str],
    open: &mut Vec<Element>,
    roots: &mut Vec<Node>,
) {
    let mut found = None;
    for (index, element) in open.iter().enumerate().rev() {
        let name = element.name.as_str();
        if targets.contains(&name) {
            found = Some(index);
            break;
        }
        if SCOPE_BOUNDARIES.contains(&name) || boundaries.contains(&name) {
            break;
        }
    }
    if let Some(index) = found {
        while open.len() > index {
            if let Some(element) = open.pop() {
                attach(Node::Element(element), open, roots);
            }
        }
    }
}

/// Close elements whose end tag is implied by a `name` start tag
fn close_implied(name: &str, open: &mut Vec<Element>, roots: &mut Vec<Node>) {
    match name {
        "option" | "optgroup" => {
            let closes: &[&str] = if name == "option" { &["option"] } else { &["option", "optgroup"] };
            while open.last().is_some_and(|el| closes.contains(&el.name.as_str())) {
                if let Some(element) = open.pop() {
                    attach(Node::Element(element), open, roots);
                }
            }
            return;
        }
        "li" => close_in_scope(&["li"], &["ol", "ul"], open, roots),
        "dt" | "dd" => close_in_scope(&["dt", "dd"], &["dl"], open, roots),
        _ => {}
    }
    if P_CLOSERS.contains(&name) {
        close_in_scope(&["p"], &[], open, roots);
    }
}

/// Build a forest from tokens, closing unclosed elements at end of input
fn build_tree(tokens: Vec<Token>) -> Vec<Node> {
    let mut roots: Vec<Node> = Vec::new();
    let mut open: Vec<Element> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(value) => attach(Node::Doctype(value), &mut open, &mut roots),
            Token::Comment(value) => attach(Node::Comment(value), &mut open, &mut roots),
            Token::Text(value) => attach(Node::Text(value), &mut open, &mut roots),
            Token::StartTag {
                name,
                attrs,
                self_closing,
            } => {
                close_implied(&name, &mut open, &mut roots);
                let element = Element {
                    name,
                    attrs,
                    children: Vec::new(),
                };
                if self_closing || element.is_void() {
                    attach(Node::Element(element), &mut open, &mut roots);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                // Stray end tags are dropped
                if open.iter().any(|el| el.name == name) {
                    while let Some(element) = open.pop() {
                        let done = element.name == name;
                        attach(Node::Element(element), &mut open, &mut roots);
                        if done {
                            break;
                        }
                    }
                }
            }
        }
    }
    while let Some(element) = open.pop() {
        attach(Node::Element(element), &mut open, &mut roots);
    }
    roots
}

/// Reshape a parsed forest into doctype, prolog, head and body
fn normalize(forest: Vec<Node>) -> Document {
    let mut doc = Document {
        doctype: None,
        prolog: Vec::new(),
        html_attrs: Vec::new(),
        head: Element::new("head"),
        body: Element::new("body"),
    };
    let mut content = Vec::new();
    let mut seen_html = false;

    for node in forest {
        match node {
            Node::Doctype(value) => {
                if doc.doctype.is_none() {
                    doc.doctype = Some(value);
                }
            }
            Node::Comment(_) if !seen_html && content.is_empty() => doc.prolog.push(node),
            Node::Element(html) if html.name == "html" => {
                seen_html = true;
                for (name, value) in html.attrs {
                    if !doc.html_attrs.iter().any(|(n, _)| *n == name) {
                        doc.html_attrs.push((name, value));
                    }
                }
                content.extend(html.children);
            }
            other => content.push(other),
        }
    }

    let mut in_body = false;
    for node in content {
        match node {
            Node::Element(head) if head.name == "head" && !in_body => {
                doc.head.attrs.extend(head.attrs);
                doc.head.children.extend(head.children);
            }
            Node::Element(body) if body.name == "body" => {
                in_body = true;
                for (name, value) in body.attrs {
                    if doc.body.attr(&name).is_none() {
                        doc.body.attrs.push((name, value));
                    }
                }
                doc.body.children.extend(body.children);
            }
            Node::Element(el)
                if !in_body && HEAD_ELEMENTS.contains(&el.name.as_str()) =>
            {
                doc.head.append(el)
            }
            node if !in_body && node.is_blank_text() => {}
            Node::Comment(_) if !in_body => doc.head.children.push(node),
            node => {
                in_body = true;
                doc.body.children.push(node);
            }
        }
    }
    doc
}

fn write_attrs(out: &mut String, attrs: &[(String, String)]) {
    for (name, value) in attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
}

fn write_open_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    write_attrs(out, &element.attrs);
    if element.is_void() {
        out.push('/');
    }
    out.push('>');
}

fn indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat(' ').take(depth));
}

fn write_pretty(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Doctype(value) => {
            let _ = writeln!(out, "<!DOCTYPE {value}>");
        }
        Node::Comment(value) => {
            indent(out, depth);
            let _ = writeln!(out, "<!--{value}-->");
        }
        Node::Text(value) => {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                indent(out, depth);
                out.push_str(trimmed);
                out.push('\n');
            }
        }
        Node::Element(element) => write_element(out, element, depth),
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    indent(out, depth);
    write_open_tag(out, element);
    if element.is_void() {
        out.push('\n');
        return;
    }
    if PREFORMATTED_ELEMENTS.contains(&element.name.as_str()) {
        for child in &element.children {
            write_inline(out, child);
        }
    } else if VERBATIM_ELEMENTS.contains(&element.name.as_str()) {
        let content: String = element
            .children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let content = content.trim_matches(|c| c == '\n' || c == '\r');
        out.push('\n');
        if !content.trim().is_empty() {
            out.push_str(content);
            out.push('\n');
        }
        indent(out, depth);
    } else {
        out.push('\n');
        for child in &element.children {
            write_pretty(out, child, depth + 1);
        }
        indent(out, depth);
    }
    let _ = writeln!(out, "</{}>", element.name);
}

/// Serialize without reformatting, for whitespace-sensitive content
fn write_inline(out: &mut String, node: &Node) {
    match node {
        Node::Doctype(value) => {
            let _ = write!(out, "<!DOCTYPE {value}>");
        }
        Node::Comment(value) => {
            let _ = write!(out, "<!--{value}-->");
        }
        Node::Text(value) => out.push_str(value),
        Node::Element(element) => {
            write_open_tag(out, element);
            if element.is_void() {
                return;
            }
            for child in &element.children {
                write_inline(out, child);
            }
            let _ = write!(out, "</{}>", element.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_well_formed_page() {
        let doc = Document::parse(
            r#"<!DOCTYPE html>
<html lang="en">
  <head><title>Demo</title></head>
  <body class="app"><div id="main"><p>Hello</p></div><script src="main.js"></script></body>
</html>"#,
        );
        assert_eq!(doc.doctype.as_deref(), Some("html"));
        assert_eq!(doc.html_attrs, vec![("lang".to_string(), "en".to_string())]);
        assert_eq!(doc.head.find("title").map(|t| t.children.len()), Some(1));
        assert_eq!(doc.body.attr("class"), Some("app"));
        assert_eq!(doc.body.find("script").and_then(|s| s.attr("src")), Some("main.js"));
        assert!(doc.body.find("p").is_some());
    }

    #[test]
    fn test_missing_head_and_body_are_synthesized() {
        let doc = Document::parse("<title>T</title><meta charset=utf-8><p>text</p>");
        assert!(doc.head.find("title").is_some());
        assert_eq!(doc.head.find("meta").and_then(|m| m.attr("charset")), Some("utf-8"));
        assert!(doc.body.find("p").is_some());
    }

    #[test]
    fn test_script_body_is_raw_text() {
        let doc = Document::parse(
            "<html><head></head><body><script>if (a < b && c > d) { x('</div>'); }</script></body></html>",
        );
        let script = doc.body.find("script").unwrap();
        assert_eq!(
            script.children,
            vec![Node::Text("if (a < b && c > d) { x('</div>'); }".to_string())]
        );
        assert!(doc.body.find("div").is_none());
    }

    #[test]
    fn test_stray_end_tags_are_ignored() {
        let doc = Document::parse("<body><div>a</span>b</div></p></body>");
        let div = doc.body.find("div").unwrap();
        assert_eq!(div.children.len(), 2);
    }

    #[test]
    fn test_attribute_forms() {
        let doc = Document::parse(
            r#"<body><input type=checkbox checked data-x='a "b"' title="x &amp; y"></body>"#,
        );
        let input = doc.body.find("input").unwrap();
        assert_eq!(input.attr("type"), Some("checkbox"));
        assert_eq!(input.attr("checked"), Some(""));
        assert_eq!(input.attr("data-x"), Some(r#"a "b""#));
        assert_eq!(input.attr("title"), Some("x & y"));
    }

    #[test]
    fn test_insert_before_first_nested() {
        let mut doc =
            Document::parse("<body><div><script src=\"a.js\"></script></div><script src=\"b.js\"></script></body>");
        let inserted = doc
            .body
            .insert_before_first("script", vec![Element::new("script").with_attr("src", "p.js")]);
        assert!(inserted.is_ok());
        let srcs: Vec<_> = doc
            .body
            .find_all("script")
            .iter()
            .filter_map(|s| s.attr("src"))
            .collect();
        assert_eq!(srcs, vec!["p.js", "a.js", "b.js"]);
    }

    #[test]
    fn test_insert_before_first_without_match_returns_elements() {
        let mut doc = Document::parse("<body><p>x</p></body>");
        let returned = doc
            .body
            .insert_before_first("script", vec![Element::new("script")])
            .unwrap_err();
        assert_eq!(returned.len(), 1);
    }

    #[test]
    fn test_pretty_output() {
        let doc = Document::parse(
            "<!doctype html><html><head><meta charset=\"utf-8\"><title>Demo</title></head><body><p>Hi <b>there</b></p><pre>  keep\n  this</pre></body></html>",
        );
        let expected = "<!DOCTYPE html>
<html>
 <head>
  <meta charset=\"utf-8\"/>
  <title>
   Demo
  </title>
 </head>
 <body>
  <p>
   Hi
   <b>
    there
   </b>
  </p>
  <pre>  keep
  this</pre>
 </body>
</html>
";
        assert_eq!(doc.to_pretty_string(), expected);
    }

    #[test]
    fn test_pretty_output_reparses_to_same_tree() {
        let doc = Document::parse(
            "<html><head><link rel=stylesheet href=\"a.css\"></head><body><div><span>x</span></div></body></html>",
        );
        let reparsed = Document::parse(&doc.to_pretty_string());
        assert_eq!(reparsed.head.find("link").and_then(|l| l.attr("href")), Some("a.css"));
        assert_eq!(reparsed.body.find("span").map(|s| s.children.len()), Some(1));
    }

    #[test]
    fn test_escapes_attribute_values() {
        let mut doc = Document::parse("<body></body>");
        doc.body
            .append(Element::new("a").with_attr("title", "Tom & \"Jerry\""));
        let text = doc.to_pretty_string();
        assert!(text.contains(r#"<a title="Tom &amp; &quot;Jerry&quot;">"#));
    }

    #[test]
    fn test_attribute_entities_round_trip() {
        let doc = Document::parse(
            "<body><a title=\"a&nbsp;b&#169;&#x27;&copy;&amp;lt;\" href=\"?x=1&y=2&bogus;\">x</a></body>",
        );
        let link = doc.body.find("a").unwrap();
        assert_eq!(link.attr("title"), Some("a\u{a0}b\u{a9}'\u{a9}&lt;"));
        assert_eq!(link.attr("href"), Some("?x=1&y=2&bogus;"));

        let text = doc.to_pretty_string();
        assert!(text.contains("title=\"a\u{a0}b\u{a9}'\u{a9}&amp;lt;\""));
        assert!(!text.contains("&amp;nbsp;"));
        assert!(!text.contains("&amp;#169;"));

        let reparsed = Document::parse(&text);
        assert_eq!(reparsed.body.find("a").and_then(|a| a.attr("title")), link.attr("title"));
        assert_eq!(reparsed.body.find("a").and_then(|a| a.attr("href")), link.attr("href"));
    }

    #[test]
    fn test_paragraphs_close_implicitly() {
        let doc = Document::parse("<body><p>a<p>b<div>c</div></body>");
        let children: Vec<&str> = doc.body.child_elements().map(|el| el.name.as_str()).collect();
        assert_eq!(children, vec!["p", "p", "div"]);
        assert!(doc.body.child_elements().all(|el| el.find("p").is_none()));
        assert!(!doc.to_pretty_string().contains("</p>\n  </p>"));
    }

    #[test]
    fn test_list_items_and_options_close_implicitly() {
        let doc = Document::parse(
            "<body><ul><li>a<li>b<ul><li>c</ul></ul><select><option>x<option>y</select></body>",
        );
        let outer = doc.body.find("ul").unwrap();
        let items: Vec<&Element> = outer.child_elements().collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|el| el.name == "li"));
        assert_eq!(items[1].find_all("li").len(), 1);

        let select = doc.body.find("select").unwrap();
        assert_eq!(select.child_elements().count(), 2);
    }

    #[test]
    fn test_paragraph_inside_button_is_not_closed() {
        let doc = Document::parse("<body><p>a<button><p>b</p></button></p></body>");
        let outer = doc.body.find("p").unwrap();
        assert!(outer.find("button").and_then(|b| b.find("p")).is_some());
    }
}
