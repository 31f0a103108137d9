use nativehost_core::collections::map::HashSet;
use nativehost_core::Props;

use crate::escape::{escape_text, print_attrs};

/// Environment for the string backend. Every hook returns markup.
#[derive(Debug, Clone, Default)]
pub struct MarkupEnvironment {
    void_tags: HashSet<String>,
}

impl MarkupEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags that never emit a closing tag.
    pub fn with_void_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.void_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn is_void(&self, tag: &str) -> bool {
        self.void_tags.contains(tag)
    }

    /// Renders one element around its already-serialized children.
    pub fn serialize<C: AsRef<str>>(&self, tag: &str, props: &Props, children: &[C]) -> String {
        let attrs = print_attrs(props);
        if self.is_void(tag) {
            if !children.is_empty() {
                log::debug!("[markup] void <{tag}> dropped {} children", children.len());
            }
            return format!("<{tag}{attrs}>");
        }
        let mut output = format!("<{tag}{attrs}>");
        for child in children {
            output.push_str(child.as_ref());
        }
        output.push_str(&format!("</{tag}>"));
        output
    }

    pub fn text(&self, text: &str) -> String {
        escape_text(text)
    }

    /// Portals have no element of their own; children are concatenated.
    pub fn portal<C: AsRef<str>>(&self, children: &[C]) -> String {
        children.iter().map(AsRef::as_ref).collect()
    }

    /// Raw markup passes through unescaped.
    pub fn raw(&self, markup: &str) -> String {
        markup.to_owned()
    }
}

#[cfg(test)]
#[path = "tests/serializer_tests.rs"]
mod tests;
