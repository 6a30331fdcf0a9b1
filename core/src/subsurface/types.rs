/// Content of an [`Element`], in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(String, Element),
    Text(String),
}

impl Node {
    fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

/// An XML element that is carried through without interpretation
///
/// Used for parts of the dive log the toolbox does not understand but has to
/// write back, like the `<settings>` block. Attributes, child elements and
/// text keep their document order. Whitespace that only indents child
/// elements is not kept, the writer produces its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub attributes: Vec<(String, String)>,
    pub nodes: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(name, element) => Some((name.as_str(), element)),
            Node::Text(_) => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children()
            .find(|(key, _)| *key == name)
            .map(|(_, element)| element)
    }

    /// All direct text content, joined
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(..) => None,
            })
            .collect()
    }

    pub(super) fn push_text(&mut self, text: &str) {
        match self.nodes.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => self.nodes.push(Node::Text(text.to_owned())),
        }
    }

    /// Drop whitespace-only text between child elements
    pub(super) fn strip_indentation(&mut self) {
        if self.children().next().is_some() {
            self.nodes.retain(|node| !node.is_blank_text());
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Element, Node};

    fn element(nodes: Vec<Node>) -> Element {
        Element {
            attributes: vec![("model".to_string(), "Suunto Vyper".to_string())],
            nodes,
        }
    }

    #[test]
    fn test_accessors() {
        let settings = element(vec![
            Node::Text("before ".to_string()),
            Node::Element("fingerprint".to_string(), Element::default()),
            Node::Text("after".to_string()),
        ]);

        assert_eq!(Some("Suunto Vyper"), settings.attribute("model"));
        assert_eq!(None, settings.attribute("serial"));
        assert_eq!(Some(&Element::default()), settings.child("fingerprint"));
        assert_eq!(None, settings.child("divecomputerid"));
        assert_eq!("before after", settings.text());
        assert_eq!(1, settings.children().count());
    }

    #[test]
    fn test_push_text_merges() {
        let mut note = Element::default();
        note.push_text("one");
        note.push_text(" two");

        assert_eq!(vec![Node::Text("one two".to_string())], note.nodes);
    }

    #[test]
    fn test_strip_indentation() {
        let mut settings = element(vec![
            Node::Text("\n   ".to_string()),
            Node::Element("a".to_string(), Element::default()),
            Node::Text("between".to_string()),
            Node::Element("b".to_string(), Element::default()),
            Node::Text("\n".to_string()),
        ]);
        settings.strip_indentation();

        assert_eq!(3, settings.nodes.len());
        assert_eq!("between", settings.text());

        // Whitespace is the content of an element without children
        let mut blank = element(vec![Node::Text("  ".to_string())]);
        blank.strip_indentation();
        assert_eq!("  ", blank.text());
    }
}
