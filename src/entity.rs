//! Entity Marshaling Contract - Entity <-> Document Node
//!
//! The attribute helpers run their preconditions through the assertion
//! library before touching the node. Absence is the skip signal: a `None`
//! value is never written, and reading a missing attribute returns `None`
//! without running any validation.

use serde_json::Value;

use crate::assert;
use crate::document::{Document, Element};
use crate::error::{AssertError, EntityError};

const ATTR_NAME_MSG: &str = "Attribute 'name' cannot be NULL or empty.";

/// Set `name` on `node` unless `value` is absent.
///
/// `Some("")` is a real write; only `None` skips. Node presence and
/// element-ness are carried by the type system, so the attribute name is
/// the one remaining runtime precondition.
pub fn set_attr(node: &mut Element, name: &str, value: Option<&str>) -> Result<(), AssertError> {
    assert::validate_is_not_empty(&Value::from(name), ATTR_NAME_MSG)?;
    if let Some(value) = value {
        node.set_attribute(name, value);
    }
    Ok(())
}

/// Read `name` from `node`, or `None` if the attribute has not been set.
///
/// The not-found path returns before any validation runs; preconditions
/// apply only when the attribute exists.
pub fn get_attr(node: &Element, name: &str) -> Result<Option<String>, AssertError> {
    if !node.has_attribute(name) {
        return Ok(None);
    }
    assert::validate_is_not_empty(&Value::from(name), ATTR_NAME_MSG)?;
    Ok(node.get_attribute(name).map(str::to_owned))
}

/// Require `node` to carry the expected node name.
pub fn expect_node(node: &Element, expected: &str, msg: &str) -> Result<(), AssertError> {
    assert::validate_is_not_empty(&Value::from(expected), "Name cannot be empty.")?;
    if node.node_name() != expected {
        return Err(AssertError::Validation(msg.to_string()));
    }
    Ok(())
}

/// Input accepted by [`DocumentEntity::from_serialized`]: an already-parsed
/// document is used directly, text is parsed first.
#[derive(Debug)]
pub enum DocumentSource<'a> {
    Parsed(Document),
    Text(&'a str),
}

impl From<Document> for DocumentSource<'static> {
    fn from(doc: Document) -> Self {
        Self::Parsed(doc)
    }
}

impl<'a> From<&'a str> for DocumentSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl DocumentSource<'_> {
    fn into_document(self) -> Result<Document, EntityError> {
        match self {
            Self::Parsed(doc) => Ok(doc),
            Self::Text(text) => Ok(Document::from_text(text)?),
        }
    }
}

/// Bidirectional mapping between an entity and a document node.
///
/// Both directions are required: every implementer supplies `populate` for
/// writing and `from_node` for reconstruction, so a type that can be
/// serialized can always be read back.
pub trait DocumentEntity: Sized {
    /// Node name every instance of this entity marshals under.
    const NODE_NAME: &'static str;

    /// Write this entity's attributes and children into `node`.
    fn populate(&self, node: &mut Element) -> Result<(), EntityError>;

    /// Rebuild the entity from a node previously produced by
    /// [`populate`](DocumentEntity::populate).
    fn from_node(node: &Element) -> Result<Self, EntityError>;

    /// Produce this entity's node, writing into `target` when supplied
    /// instead of creating a fresh one.
    fn to_node(&self, target: Option<Element>) -> Result<Element, EntityError> {
        let mut node = target.unwrap_or_else(|| Element::new(Self::NODE_NAME));
        self.populate(&mut node)?;
        Ok(node)
    }

    /// Produce a complete standalone serialized document.
    fn to_serialized(&self) -> Result<String, EntityError> {
        let node = self.to_node(None)?;
        Ok(Document::new(node).to_text()?)
    }

    /// Reconstruct an entity from a parsed document or serialized text.
    /// The root node name must match [`NODE_NAME`](DocumentEntity::NODE_NAME).
    fn from_serialized<'a>(input: impl Into<DocumentSource<'a>>) -> Result<Self, EntityError> {
        let doc = input.into().into_document()?;
        let root = doc.root();
        if root.node_name() != Self::NODE_NAME {
            return Err(EntityError::UnexpectedNode {
                expected: Self::NODE_NAME.to_string(),
                actual: root.node_name().to_string(),
            });
        }
        Self::from_node(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct GalleryImage {
        path: String,
        name: String,
        description: Option<String>,
    }

    impl DocumentEntity for GalleryImage {
        const NODE_NAME: &'static str = "image";

        fn populate(&self, node: &mut Element) -> Result<(), EntityError> {
            set_attr(node, "path", Some(&self.path))?;
            set_attr(node, "name", Some(&self.name))?;
            set_attr(node, "description", self.description.as_deref())?;
            Ok(())
        }

        fn from_node(node: &Element) -> Result<Self, EntityError> {
            let path = get_attr(node, "path")?
                .ok_or_else(|| EntityError::MissingAttribute("path".to_string()))?;
            let name = get_attr(node, "name")?
                .ok_or_else(|| EntityError::MissingAttribute("name".to_string()))?;
            let description = get_attr(node, "description")?;
            Ok(Self {
                path,
                name,
                description,
            })
        }
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let mut node = Element::new("image");
        set_attr(&mut node, "name", Some("foo")).unwrap();
        assert_eq!(get_attr(&node, "name").unwrap(), Some("foo".to_string()));
    }

    #[test]
    fn test_absent_value_is_not_written() {
        let mut node = Element::new("image");
        set_attr(&mut node, "name", None).unwrap();
        assert!(!node.has_attribute("name"));
    }

    #[test]
    fn test_empty_string_is_written() {
        let mut node = Element::new("image");
        set_attr(&mut node, "name", Some("")).unwrap();
        assert_eq!(get_attr(&node, "name").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_get_missing_returns_absent_without_failing() {
        let node = Element::new("image");
        assert_eq!(get_attr(&node, "name").unwrap(), None);
        // Even a name that would fail validation short-circuits to absent.
        assert_eq!(get_attr(&node, "").unwrap(), None);
    }

    #[test]
    fn test_set_rejects_empty_name() {
        let mut node = Element::new("image");
        let err = set_attr(&mut node, "", Some("v")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_expect_node() {
        let node = Element::new("image");
        assert!(expect_node(&node, "image", "wrong node").is_ok());
        let err = expect_node(&node, "category", "wrong node").unwrap_err();
        assert_eq!(err.message(), "wrong node");
    }

    #[test]
    fn test_entity_round_trip() {
        let image = GalleryImage {
            path: "/img/1.png".to_string(),
            name: "sunset".to_string(),
            description: Some("over the bay".to_string()),
        };

        let text = image.to_serialized().unwrap();
        let back = GalleryImage::from_serialized(text.as_str()).unwrap();
        assert_eq!(image, back);
    }

    #[test]
    fn test_absent_field_stays_absent() {
        let image = GalleryImage {
            path: "/img/2.png".to_string(),
            name: "dunes".to_string(),
            description: None,
        };

        let node = image.to_node(None).unwrap();
        assert!(!node.has_attribute("description"));

        let back = GalleryImage::from_node(&node).unwrap();
        assert_eq!(back.description, None);
    }

    #[test]
    fn test_to_node_writes_into_supplied_target() {
        let image = GalleryImage {
            path: "/img/3.png".to_string(),
            name: "cliffs".to_string(),
            description: None,
        };

        let mut target = Element::new("image");
        target.set_attribute("id", "42");
        let node = image.to_node(Some(target)).unwrap();

        assert_eq!(node.get_attribute("id"), Some("42"));
        assert_eq!(node.get_attribute("name"), Some("cliffs"));
    }

    #[test]
    fn test_from_serialized_accepts_parsed_document() {
        let image = GalleryImage {
            path: "/img/4.png".to_string(),
            name: "ridge".to_string(),
            description: None,
        };

        let doc = Document::new(image.to_node(None).unwrap());
        let back = GalleryImage::from_serialized(doc).unwrap();
        assert_eq!(back.name, "ridge");
    }

    #[test]
    fn test_from_serialized_checks_root_name() {
        let doc = Document::new(Element::new("category"));
        let err = GalleryImage::from_serialized(doc).unwrap_err();
        match err {
            EntityError::UnexpectedNode { expected, actual } => {
                assert_eq!(expected, "image");
                assert_eq!(actual, "category");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_serialized_rejects_malformed_text() {
        let err = GalleryImage::from_serialized("not a document").unwrap_err();
        assert!(matches!(err, EntityError::Parse(_)));
    }
}
