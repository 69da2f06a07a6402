//! XML element tree
//!
//! The in-memory representation produced by the parser. Elements keep
//! their children in document order; text content is interleaved with
//! child elements exactly as it appeared in the source.

/// A node in the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A child element
    Element(Element),
    /// A run of character data (entity-decoded)
    Text(String),
}

/// An attribute with its local name and optional prefix
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Prefix as written in the source (e.g. `xlink`), if any
    pub prefix: Option<String>,
    /// Local name
    pub name: String,
    /// Entity-decoded value
    pub value: String,
}

/// An XML element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Local name (prefix stripped)
    pub name: String,
    /// Resolved namespace URI, if the element is in a namespace
    pub namespace: Option<String>,
    /// Attributes in document order, xmlns declarations excluded
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Look up an attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// True if an attribute with this local name is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// The `xlink:href` value, if present.
    pub fn xlink_href(&self) -> Option<&str> {
        self.attribute("href")
    }

    /// Iterate over child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// All child elements with the given local name.
    pub fn children_named(&self, name: &str) -> Vec<&Element> {
        self.child_elements().filter(|el| el.name == name).collect()
    }

    /// The first child element with the given local name.
    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// All descendant elements in document order (self excluded).
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut pending: Vec<&Element> = self.child_elements().collect();
        pending.reverse();
        while let Some(el) = pending.pop() {
            found.push(el);
            let mut kids: Vec<&Element> = el.child_elements().collect();
            kids.reverse();
            pending.extend(kids);
        }
        found
    }

    /// All descendant elements with the given local name, in document order.
    pub fn descendants_named(&self, name: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.name == name)
            .collect()
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Trimmed text content, or None when blank.
    pub fn value(&self) -> Option<String> {
        let text = self.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
