//! The tag tree.
//!
//! A [`Tag`] is a named node holding an ordered list of anonymous
//! [`Value`]s, a set of uniquely keyed (optionally namespaced) attributes and
//! an ordered list of child tags. A parsed document is a root tag whose
//! children are the top-level statements.
//!
//! ## Building Trees
//!
//! ```rust
//! use sdlang::{Tag, Value};
//!
//! let mut person = Tag::with_namespace("person", "son").unwrap();
//! person.add_value("Akiko");
//! person.set_attribute("age", 12).unwrap();
//! person.set_attribute_ns("private", "nickname", "Aki").unwrap();
//!
//! let mut family = Tag::new("family").unwrap();
//! family.add_child(person);
//!
//! assert_eq!(family.children().len(), 1);
//! assert_eq!(
//!     family.child("son").and_then(|t| t.attribute("age")),
//!     Some(&Value::Int32(12))
//! );
//! ```
//!
//! ## Navigation
//!
//! Tags own their children outright. Parent links are not stored; instead
//! [`Tag::walk`] yields every node together with a borrowed reference to its
//! parent, and [`Tag::parent_of`] finds the parent of a node inside a tree.
//! Because these are borrows, a parent can never be reached after its
//! subtree has been detached or dropped.

use crate::lexer::is_identifier;
use crate::map::{AttributeKey, AttributeMap};
use crate::ser::Serializer;
use crate::{Error, Result, Value, WriteOptions};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer as SerdeSerializer};
use std::collections::BTreeMap;
use std::fmt;

/// Name given to tags that are written without a name, e.g. a line that
/// starts with a literal.
pub const ANONYMOUS_TAG_NAME: &str = "content";

/// Default name of the synthetic root tag holding a parsed document.
pub const ROOT_TAG_NAME: &str = "root";

/// A node in an SDL document.
///
/// Equality is structural and deep: names, namespaces, values (in order),
/// attributes (in any order) and children (in order) must all match.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    namespace: String,
    name: String,
    values: Vec<Value>,
    attributes: AttributeMap,
    children: Vec<Tag>,
}

/// What [`Tag::children_values`] reports for one child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChildValue<'a> {
    /// The child has no values.
    Empty,
    /// The child has exactly one value.
    Single(&'a Value),
    /// The child has several values; they are kept together, not flattened.
    List(&'a [Value]),
}

/// A tag visited by [`Tag::walk`], with its parent and depth.
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    pub tag: &'a Tag,
    /// `None` for the tag the walk started from.
    pub parent: Option<&'a Tag>,
    /// 0 for the starting tag, 1 for its children, and so on.
    pub depth: usize,
}

/// Depth-first pre-order traversal. See [`Tag::walk`].
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    stack: Vec<Node<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.tag.children.iter().rev().map(|child| Node {
                tag: child,
                parent: Some(node.tag),
                depth: node.depth + 1,
            }));
        Some(node)
    }
}

fn check_identifier(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(Error::invalid_identifier(name))
    }
}

fn check_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        Ok(())
    } else {
        check_identifier(namespace)
    }
}

impl Tag {
    /// Creates an empty tag in the default namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if `name` is not a legal SDL
    /// identifier (for example empty, starting with a digit, or a keyword
    /// such as `true`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::Tag;
    ///
    /// assert!(Tag::new("light-on").is_ok());
    /// assert!(Tag::new("").is_err());
    /// assert!(Tag::new("9lives").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Tag::with_namespace("", name)
    }

    /// Creates an empty tag in `namespace` (empty for the default namespace).
    pub fn with_namespace(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let name = name.into();
        check_namespace(&namespace)?;
        check_identifier(&name)?;
        Ok(Tag::unchecked(namespace, name))
    }

    /// Creates the synthetic root tag that holds a document's top-level tags.
    #[must_use]
    pub fn root() -> Self {
        Tag::unchecked(String::new(), ROOT_TAG_NAME.to_string())
    }

    /// The parser has already validated both parts.
    pub(crate) fn unchecked(namespace: String, name: String) -> Self {
        Tag {
            namespace,
            name,
            values: Vec::new(),
            attributes: AttributeMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace, or `""` for the default namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `name` or `namespace:name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.namespace, self.name)
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        check_identifier(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) -> Result<()> {
        let namespace = namespace.into();
        check_namespace(&namespace)?;
        self.namespace = namespace;
        Ok(())
    }

    // ---- values ----

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    /// The first value, which for most tags is the only one.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.values.first()
    }

    /// Replaces the first value, or adds one if the tag has none.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        let value = value.into();
        match self.values.first_mut() {
            Some(first) => *first = value,
            None => self.values.push(value),
        }
    }

    /// Appends a value. Duplicates are kept.
    pub fn add_value(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Removes the first value equal to `value`. Returns whether one was found.
    pub fn remove_value(&mut self, value: &Value) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set_values(&mut self, values: Vec<Value>) {
        self.values = values;
    }

    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    // ---- attributes ----

    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }

    /// Looks up an attribute in the default namespace.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get("", name)
    }

    #[must_use]
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&Value> {
        self.attributes.get(namespace, name)
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains("", name)
    }

    /// Sets an attribute in the default namespace, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if `name` is not a legal identifier.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        self.set_attribute_ns("", name, value)
    }

    /// Sets a namespaced attribute, returning the value it replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::{Tag, Value};
    ///
    /// let mut tag = Tag::new("person").unwrap();
    /// tag.set_attribute_ns("private", "smoker", true).unwrap();
    /// let old = tag.set_attribute_ns("private", "smoker", false).unwrap();
    /// assert_eq!(old, Some(Value::Bool(true)));
    /// assert_eq!(tag.attributes().len(), 1);
    /// ```
    pub fn set_attribute_ns(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let namespace = namespace.into();
        let name = name.into();
        check_namespace(&namespace)?;
        check_identifier(&name)?;
        Ok(self.attributes.insert(namespace, name, value.into()))
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove("", name)
    }

    pub fn remove_attribute_ns(&mut self, namespace: &str, name: &str) -> Option<Value> {
        self.attributes.remove(namespace, name)
    }

    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    /// The attributes in `namespace`, keyed by name, in canonical order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::{Tag, Value};
    ///
    /// let mut tag = Tag::new("test").unwrap();
    /// tag.set_attribute("name", "bill").unwrap();
    /// tag.set_attribute_ns("private", "smoker", true).unwrap();
    /// tag.set_attribute_ns("public", "hobby", "hiking").unwrap();
    /// tag.set_attribute_ns("private", "nickname", "tubby").unwrap();
    ///
    /// let private = tag.attributes_for_namespace("private");
    /// assert_eq!(private.len(), 2);
    /// assert_eq!(private["smoker"], &Value::Bool(true));
    /// assert_eq!(private["nickname"], &Value::from("tubby"));
    /// ```
    #[must_use]
    pub fn attributes_for_namespace(&self, namespace: &str) -> BTreeMap<&str, &Value> {
        self.attributes
            .in_namespace(namespace)
            .into_iter()
            .map(|(key, value)| (key.name.as_str(), value))
            .collect()
    }

    // ---- children ----

    #[must_use]
    pub fn children(&self) -> &[Tag] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Tag> {
        &mut self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Appends a child and returns a reference to it in its new place.
    pub fn add_child(&mut self, child: Tag) -> &mut Tag {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Detaches the first child structurally equal to `child`.
    pub fn remove_child(&mut self, child: &Tag) -> Option<Tag> {
        let index = self.children.iter().position(|c| c == child)?;
        Some(self.children.remove(index))
    }

    /// Detaches the child at `index`, if there is one.
    pub fn remove_child_at(&mut self, index: usize) -> Option<Tag> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// The first direct child named `name`, in any namespace.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Tag> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// The first descendant named `name`, searching depth-first in pre-order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let doc = sdlang::from_str("family {\n  kids {\n    daughter \"Akiko\"\n  }\n}").unwrap();
    /// let family = doc.child("family").unwrap();
    /// assert!(family.child("daughter").is_none());
    /// assert!(family.descendant("daughter").is_some());
    /// ```
    #[must_use]
    pub fn descendant(&self, name: &str) -> Option<&Tag> {
        self.descendants().find(|t| t.name == name)
    }

    /// Direct children named `name`, in order.
    #[must_use]
    pub fn children_named(&self, name: &str) -> Vec<&Tag> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// All descendants named `name`, depth-first in pre-order.
    #[must_use]
    pub fn descendants_named(&self, name: &str) -> Vec<&Tag> {
        self.descendants().filter(|t| t.name == name).collect()
    }

    /// Every tag below this one, depth-first in pre-order, excluding `self`.
    pub fn descendants(&self) -> impl Iterator<Item = &Tag> {
        self.walk().skip(1).map(|node| node.tag)
    }

    /// Direct children whose namespace is `namespace`.
    #[must_use]
    pub fn children_in_namespace(&self, namespace: &str) -> Vec<&Tag> {
        self.children
            .iter()
            .filter(|c| c.namespace == namespace)
            .collect()
    }

    /// All descendants whose namespace is `namespace`, depth-first in pre-order.
    #[must_use]
    pub fn descendants_in_namespace(&self, namespace: &str) -> Vec<&Tag> {
        self.descendants()
            .filter(|t| t.namespace == namespace)
            .collect()
    }

    /// Collects the values of every direct child named `name`, in child order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sdlang::{ChildValue, Value};
    ///
    /// let doc = sdlang::from_str("matrix {\n  1 2 3\n  4\n}").unwrap();
    /// let matrix = doc.child("matrix").unwrap();
    /// let rows = matrix.children_values("content");
    /// assert_eq!(rows[1], ChildValue::Single(&Value::Int32(4)));
    /// assert!(matches!(rows[0], ChildValue::List(values) if values.len() == 3));
    /// ```
    #[must_use]
    pub fn children_values(&self, name: &str) -> Vec<ChildValue<'_>> {
        self.children
            .iter()
            .filter(|c| c.name == name)
            .map(|c| match c.values.as_slice() {
                [] => ChildValue::Empty,
                [single] => ChildValue::Single(single),
                many => ChildValue::List(many),
            })
            .collect()
    }

    /// Visits this tag and all its descendants depth-first in pre-order,
    /// pairing each with its parent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let doc = sdlang::from_str("a {\n  b\n  c {\n    d\n  }\n}").unwrap();
    /// let order: Vec<(&str, usize)> = doc
    ///     .walk()
    ///     .map(|node| (node.tag.name(), node.depth))
    ///     .collect();
    /// assert_eq!(order, vec![("root", 0), ("a", 1), ("b", 2), ("c", 2), ("d", 3)]);
    /// ```
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![Node {
                tag: self,
                parent: None,
                depth: 0,
            }],
        }
    }

    /// Finds the parent of `target` within this tree, by identity.
    ///
    /// Returns `None` if `target` is this tag itself or not part of the tree.
    #[must_use]
    pub fn parent_of(&self, target: &Tag) -> Option<&Tag> {
        self.walk()
            .find(|node| std::ptr::eq(node.tag, target))
            .and_then(|node| node.parent)
    }
}

impl fmt::Display for Tag {
    /// Renders this tag (not just its children) with default options.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = Serializer::new(WriteOptions::default());
        serializer.write_tag(self);
        f.write_str(&serializer.into_inner())
    }
}

/// Serializes attributes as a map keyed by `name` / `namespace:name`.
struct CanonicalAttributes<'a>(&'a AttributeMap);

impl Serialize for CanonicalAttributes<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: SerdeSerializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0.iter() {
            map.serialize_entry(&AttributeKey::to_string(key), value)?;
        }
        map.end()
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: SerdeSerializer,
    {
        let mut state = serializer.serialize_struct("Tag", 5)?;
        state.serialize_field("namespace", &self.namespace)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("values", &self.values)?;
        state.serialize_field("attributes", &CanonicalAttributes(&self.attributes))?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}
