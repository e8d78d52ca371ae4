use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::geometry::bbox::BoundingBox;
use crate::geometry::coordinate::Coordinate;
use crate::scene::element::{ElementId, ElementRef, ElementRenderer};

/// Entry of a [`Group`]: a leaf element or a nested group.
#[derive(Clone, Debug)]
pub enum Node {
    Element(ElementRef),
    Group(Group),
}

impl Node {
    pub fn id(&self) -> ElementId {
        match self {
            Self::Element(e) => e.id(),
            Self::Group(g) => g.id(),
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            Self::Element(e) => Some(e.bbox()),
            Self::Group(g) => g.bbox(),
        }
    }

    /// Move a leaf so its bounding box starts at `anchor`. Groups are not placeable.
    pub fn place(&self, anchor: Coordinate) -> DynfigureResult<()> {
        match self {
            Self::Element(e) => e.place(anchor),
            Self::Group(g) => Err(DynfigureError::validation(format!(
                "groups cannot be placed (group {})",
                g.id()
            ))),
        }
    }

    pub fn as_element(&self) -> Option<&ElementRef> {
        match self {
            Self::Element(e) => Some(e),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Element(_) => None,
        }
    }

    fn draw(&self, renderer: &mut dyn ElementRenderer) -> DynfigureResult<()> {
        match self {
            Self::Element(e) => renderer.draw(&e.borrow()),
            Self::Group(g) => g.draw(renderer),
        }
    }
}

impl From<ElementRef> for Node {
    fn from(e: ElementRef) -> Self {
        Self::Element(e)
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Self::Group(g)
    }
}

#[derive(Debug)]
struct GroupInner {
    id: ElementId,
    children: Vec<Node>,
}

/// Ordered composite of scene nodes.
///
/// Insertion order is draw order: later children paint over earlier ones. `Group` is a
/// cheap shared handle; clones refer to the same children.
#[derive(Clone, Debug)]
pub struct Group(Rc<RefCell<GroupInner>>);

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Group {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(GroupInner {
            id: ElementId::next(),
            children: Vec::new(),
        })))
    }

    pub fn id(&self) -> ElementId {
        self.0.borrow().id
    }

    pub fn len(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().children.is_empty()
    }

    /// Append one node. A group may not contain itself, directly or through a descendant.
    pub fn put(&self, node: impl Into<Node>) -> DynfigureResult<()> {
        let node = node.into();
        if let Node::Group(g) = &node
            && (g.id() == self.id() || g.contains_group(self.id()))
        {
            return Err(DynfigureError::validation(format!(
                "putting group {} into group {} would create a cycle",
                g.id(),
                self.id()
            )));
        }
        self.0.borrow_mut().children.push(node);
        Ok(())
    }

    /// Append several nodes in order. Stops at the first rejected node.
    pub fn put_all<I>(&self, nodes: I) -> DynfigureResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        for node in nodes {
            self.put(node)?;
        }
        Ok(())
    }

    /// Remove the first direct child with `id`.
    pub fn remove(&self, id: ElementId) -> Option<Node> {
        let mut inner = self.0.borrow_mut();
        let idx = inner.children.iter().position(|n| n.id() == id)?;
        Some(inner.children.remove(idx))
    }

    /// Direct child with `id`.
    pub fn find(&self, id: ElementId) -> Option<Node> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|n| n.id() == id)
            .cloned()
    }

    /// Snapshot of the direct children in draw order.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn iter(&self) -> std::vec::IntoIter<Node> {
        self.children().into_iter()
    }

    /// Union of every child's bounding box; `None` for an empty tree.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.0
            .borrow()
            .children
            .iter()
            .filter_map(Node::bbox)
            .reduce(|acc, bb| acc.merge(Some(bb)))
    }

    /// Dispatch every leaf to `renderer`, depth first, in insertion order.
    pub fn draw(&self, renderer: &mut dyn ElementRenderer) -> DynfigureResult<()> {
        let inner = self.0.borrow();
        for child in &inner.children {
            child.draw(renderer)?;
        }
        Ok(())
    }

    fn contains_group(&self, id: ElementId) -> bool {
        self.0.borrow().children.iter().any(|n| match n {
            Node::Group(g) => g.id() == id || g.contains_group(id),
            Node::Element(_) => false,
        })
    }

    pub fn ptr_eq(&self, other: &Group) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl IntoIterator for &Group {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/group.rs"]
mod tests;
