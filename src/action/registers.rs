//! Tracks which temporary registers hold the class object and its prototype.
//!
//! The compiler aliases both objects through registers whose numbers vary
//! between classes, so the roles are learnt from assignment shapes as the
//! class body is parsed.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::MatchError;
use super::item::{DirectValue, Item};
use super::path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegisterRole {
    /// Holds the class (constructor function) object.
    Class,
    /// Holds the prototype object shared by instances.
    Instance,
}

impl fmt::Display for RegisterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterRole::Class => write!(f, "class"),
            RegisterRole::Instance => write!(f, "instance"),
        }
    }
}

/// Slot id of a register operand, whether written as a `register<N>` literal
/// or as a temporary register carrying its value.
pub fn register_number(item: &Item, what: &'static str) -> Result<u32, MatchError> {
    match item {
        Item::Direct(DirectValue::Register { number, .. }) => Ok(*number),
        Item::TemporaryRegister { register, .. } => Ok(*register),
        _ => Err(MatchError::NotARegister(what)),
    }
}

/// Slot id and the value known to be in it, for register operands.
pub fn register_binding(item: &Item) -> Option<(u32, Option<&Item>)> {
    match item {
        Item::Direct(DirectValue::Register { number, computed }) => {
            Some((*number, computed.as_deref()))
        }
        Item::TemporaryRegister { register, value } => Some((*register, Some(value.as_ref()))),
        _ => None,
    }
}

/// What a register's carried binding revealed about the class.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// `C = (rN = function ...)`: the register holds the class object.
    Constructor { class_name: Item, constructor: Item },
    /// `C.prototype = (rN = new Super())`: the register holds the prototype.
    Prototype { class_name: Item, superclass: Item },
}

/// Slot id => role table, filled in as roles are discovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterRoles {
    slots: BTreeMap<u32, RegisterRole>,
}

impl RegisterRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role_of(&self, register: u32) -> Option<RegisterRole> {
        self.slots.get(&register).copied()
    }

    pub fn register_for(&self, role: RegisterRole) -> Option<u32> {
        self.slots
            .iter()
            .find(|(_, r)| **r == role)
            .map(|(number, _)| *number)
    }

    /// Bind `register` to `role`. The role moves off any register that held
    /// it before; a register cannot hold both roles.
    pub fn assign(&mut self, register: u32, role: RegisterRole) -> Result<(), MatchError> {
        match self.role_of(register) {
            Some(held) if held != role => {
                return Err(MatchError::RoleConflict { register, held });
            }
            Some(_) => return Ok(()),
            None => {}
        }
        self.slots.retain(|_, r| *r != role);
        self.slots.insert(register, role);
        Ok(())
    }

    /// Re-derive a role from the value a not-yet-known register carries.
    ///
    /// The idiom sometimes defers the prototype/constructor binding to the
    /// first member write through the register:
    ///
    /// ```text
    /// (r1 = _global.a.C.prototype = (r1 = new Super())).foo = ...
    /// (r2 = _global.a.C = (r2 = function () {...})).bar = ...
    /// ```
    pub fn derive(
        &mut self,
        register: u32,
        carried: Option<&Item>,
        class_path: &[String],
        prototype_member: &str,
        root: &str,
    ) -> Result<Binding, MatchError> {
        let (object, member, value) = match carried {
            Some(Item::SetMember { object, member, value }) => (object, member, value),
            _ => return Err(MatchError::assertion("temp register does not contain setmember")),
        };
        let member_name = member
            .as_str_literal()
            .ok_or_else(|| MatchError::assertion("register binding member not string"))?;
        let is_prototype = member_name == prototype_member;
        let path_source = if is_prototype {
            object.as_ref().clone()
        } else {
            Item::GetMember {
                object: object.clone(),
                member: member.clone(),
            }
        };
        let member_path = path::path_of(&path_source)
            .map(|p| path::strip_root(p, root))
            .ok_or_else(|| MatchError::assertion("invalid path source"))?;
        if member_path != class_path {
            return Err(MatchError::assertion(format!(
                "invalid path of setmember: {}",
                member_path.join(".")
            )));
        }
        let class_name = path::without_root(&path_source, root);

        let stored = match value.as_ref() {
            Item::StoreRegister { register: stored_to, value } if *stored_to == register => value,
            Item::StoreRegister { .. } => return Err(MatchError::assertion("invalid storeregister")),
            _ => return Err(MatchError::assertion("not storeregister")),
        };

        match stored.as_ref() {
            Item::NewObject { .. } | Item::NewMethod { .. } if is_prototype => {
                self.assign(register, RegisterRole::Instance)?;
                Ok(Binding::Prototype {
                    class_name,
                    superclass: path::without_root(&constructed_type(stored)?, root),
                })
            }
            Item::Function(_) if !is_prototype => {
                self.assign(register, RegisterRole::Class)?;
                Ok(Binding::Constructor {
                    class_name,
                    constructor: stored.as_ref().clone(),
                })
            }
            other => Err(MatchError::assertion(format!(
                "invalid storeregister value: {}",
                other.kind_name()
            ))),
        }
    }
}

/// Type read named by a construction: `new a.B()` => `a.B`, `new B()` => `B`.
pub fn constructed_type(item: &Item) -> Result<Item, MatchError> {
    match item {
        Item::NewMethod { object, method, .. } => Ok(Item::GetMember {
            object: object.clone(),
            member: method.clone(),
        }),
        Item::NewObject { name, .. } => Ok(Item::GetVariable { name: name.clone() }),
        _ => Err(MatchError::assertion("NewMethod or NewObject expected")),
    }
}
