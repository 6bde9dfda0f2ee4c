#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::item::Item;

/// A named class member: method, field initializer or the constructor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassTrait {
    pub name: Item,
    pub value: Item,
}

/// A property declared through `addProperty(name, getter, setter)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassProperty {
    pub name: String,
    /// `false` when the getter slot was an empty placeholder function.
    pub has_getter: bool,
    pub has_setter: bool,
    pub is_static: bool,
}

/// A recognised `class` declaration.
///
/// `traits` and `traits_static` are index-aligned. The constructor is always
/// trait 0 and is never static.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassItem {
    /// Class name as a read expression, without the root namespace.
    pub name: Box<Item>,
    pub path: Vec<String>,
    pub extends: Option<Box<Item>>,
    pub implements: Vec<Item>,
    pub traits: Vec<ClassTrait>,
    pub traits_static: Vec<bool>,
    pub properties: Vec<ClassProperty>,
}

impl ClassItem {
    /// Dotted name, e.g. `a.b.C`.
    pub fn qualified_name(&self) -> String {
        self.path.join(".")
    }

    pub fn constructor(&self) -> Option<&ClassTrait> {
        self.traits.first()
    }

    pub fn instance_traits(&self) -> impl Iterator<Item = &ClassTrait> {
        self.traits
            .iter()
            .zip(&self.traits_static)
            .skip(1)
            .filter(|(_, is_static)| !**is_static)
            .map(|(t, _)| t)
    }

    pub fn static_traits(&self) -> impl Iterator<Item = &ClassTrait> {
        self.traits
            .iter()
            .zip(&self.traits_static)
            .filter(|(_, is_static)| **is_static)
            .map(|(t, _)| t)
    }
}

/// A recognised `interface` declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterfaceItem {
    pub name: Box<Item>,
    pub path: Vec<String>,
    pub superclasses: Vec<Item>,
}

impl InterfaceItem {
    pub fn qualified_name(&self) -> String {
        self.path.join(".")
    }
}

/// Output of a successful detection attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    Class(ClassItem),
    Interface(InterfaceItem),
}

impl Declaration {
    pub fn qualified_name(&self) -> String {
        match self {
            Declaration::Class(c) => c.qualified_name(),
            Declaration::Interface(i) => i.qualified_name(),
        }
    }

    pub fn into_item(self) -> Item {
        match self {
            Declaration::Class(c) => Item::Class(c),
            Declaration::Interface(i) => Item::Interface(i),
        }
    }
}
