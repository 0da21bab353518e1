//! Start page tag injection
//!
//! Injection is split into building a plan (which tags go where, in which
//! order) and applying it to a parsed `Document`.

use crate::models::{ConverterSettings, LegacyManifest};
use crate::parser::html::{Document, Element};

/// Manifest keys copied into `<meta name=...>` tags
pub const META_KEYS: &[&str] = &["description", "author", "name"];

/// One planned change to the start page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    AppendToHead(Element),
    PrependToHead(Element),
    /// Insert before the first `<script>` in the body, or append to the body
    BeforeFirstBodyScript(Vec<Element>),
    AppendToBody(Element),
}

pub struct HtmlInjector<'a> {
    settings: &'a ConverterSettings,
}

impl<'a> HtmlInjector<'a> {
    pub fn new(settings: &'a ConverterSettings) -> Self {
        Self { settings }
    }

    fn script(&self, filename: &str) -> Element {
        Element::new("script").with_attr("src", self.settings.relative_boilerplate_path(filename))
    }

    /// Tags to inject, in application order
    pub fn plan(&self, manifest: &LegacyManifest, polyfills: &[String]) -> Vec<Injection> {
        let mut plan = Vec::new();

        plan.push(Injection::AppendToHead(
            Element::new("link")
                .with_attr("rel", "manifest")
                .with_attr("href", &self.settings.target_manifest_filename),
        ));

        // Polyfills must run before any app script
        if !polyfills.is_empty() {
            let scripts = polyfills
                .iter()
                .map(|api| self.script(&self.settings.polyfill_filename(api)))
                .collect();
            plan.push(Injection::BeforeFirstBodyScript(scripts));
        }

        plan.push(Injection::AppendToBody(
            self.script(&self.settings.register_script_name),
        ));

        for key in META_KEYS {
            if let Some(content) = manifest.get_text(key) {
                plan.push(Injection::AppendToHead(
                    Element::new("meta")
                        .with_attr("name", *key)
                        .with_attr("content", content),
                ));
            }
        }

        // Chrome Apps are implicitly UTF-8
        plan.push(Injection::PrependToHead(
            Element::new("meta").with_attr("charset", "utf-8"),
        ));

        plan
    }

    /// Rewrite a start page with the conversion tags
    pub fn inject(
        &self,
        html: &str,
        manifest: &LegacyManifest,
        polyfills: &[String],
        html_filename: &str,
    ) -> String {
        let mut document = Document::parse(html);
        apply(&mut document, self.plan(manifest, polyfills), html_filename);
        document.to_pretty_string()
    }
}

/// Apply a plan to a document, in order
pub fn apply(document: &mut Document, plan: Vec<Injection>, html_filename: &str) {
    for injection in plan {
        log::debug!("Injecting {} into `{}`.", describe(&injection), html_filename);
        match injection {
            Injection::AppendToHead(element) => document.head.append(element),
            Injection::PrependToHead(element) => document.head.prepend(element),
            Injection::BeforeFirstBodyScript(elements) => {
                if let Err(elements) = document.body.insert_before_first("script", elements) {
                    for element in elements {
                        document.body.append(element);
                    }
                }
            }
            Injection::AppendToBody(element) => document.body.append(element),
        }
    }
}

fn describe(injection: &Injection) -> String {
    fn tag(element: &Element) -> String {
        let attrs: Vec<String> = element
            .attrs
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect();
        format!("<{} {}>", element.name, attrs.join(" "))
    }

    match injection {
        Injection::AppendToHead(el) | Injection::PrependToHead(el) | Injection::AppendToBody(el) => {
            tag(el)
        }
        Injection::BeforeFirstBodyScript(els) => {
            els.iter().map(tag).collect::<Vec<_>>().join(", ")
        }
    }
}
