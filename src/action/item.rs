#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::clauses::{ClassItem, InterfaceItem};

/// Literal operand pushed by the bytecode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DirectValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Null,
    Undefined,
    /// `register<N>` operand. `computed` is the value last stored to the slot,
    /// when the AST builder could track it.
    Register {
        number: u32,
        computed: Option<Box<Item>>,
    },
}

/// A function literal (`function name(params) { body }`).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionItem {
    /// Declared name, empty for anonymous functions.
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Item>,
    /// Name inferred from the member the function was assigned to.
    pub calculated_name: Option<Box<Item>>,
}

impl FunctionItem {
    pub fn anonymous(params: Vec<String>, body: Vec<Item>) -> Self {
        Self {
            name: String::new(),
            params,
            body,
            calculated_name: None,
        }
    }

    /// `function() {}` with no name, parameters or statements.
    pub fn is_empty_placeholder(&self) -> bool {
        self.name.is_empty() && self.params.is_empty() && self.body.is_empty()
    }
}

/// Statement and expression node of a decompiled AVM1 script.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Item {
    // --- Control flow ---
    If {
        condition: Box<Item>,
        on_true: Vec<Item>,
        on_false: Vec<Item>,
    },
    Not(Box<Item>),

    // --- Member and variable access ---
    GetMember {
        object: Box<Item>,
        member: Box<Item>,
    },
    SetMember {
        object: Box<Item>,
        member: Box<Item>,
        value: Box<Item>,
    },
    GetVariable {
        name: Box<Item>,
    },
    SetVariable {
        name: Box<Item>,
        value: Box<Item>,
    },

    // --- Values ---
    Direct(DirectValue),
    /// `new Name(args)`
    NewObject {
        name: Box<Item>,
        args: Vec<Item>,
    },
    /// `new object.method(args)`
    NewMethod {
        object: Box<Item>,
        method: Box<Item>,
        args: Vec<Item>,
    },
    Function(FunctionItem),

    // --- Registers ---
    StoreRegister {
        register: u32,
        value: Box<Item>,
    },
    /// Read of a temporary register whose stored value is still known.
    TemporaryRegister {
        register: u32,
        value: Box<Item>,
    },

    // --- Calls ---
    CallMethod {
        object: Box<Item>,
        method: Box<Item>,
        args: Vec<Item>,
    },
    CallFunction {
        name: Box<Item>,
        args: Vec<Item>,
    },

    // --- Stack bookkeeping ---
    /// `§§pop()`: discards the value left on the stack.
    Pop,
    /// `§§push(value)`: value left on the stack at the end of a block.
    Push(Box<Item>),

    // --- Class idiom operations ---
    Extends {
        subclass: Box<Item>,
        superclass: Box<Item>,
    },
    ImplementsOp {
        subclass: Box<Item>,
        superclasses: Vec<Item>,
    },

    // --- Synthesized declarations ---
    Class(ClassItem),
    Interface(InterfaceItem),

    // --- Fallback ---
    Unresolved(String),
}

impl Item {
    pub fn string(s: impl Into<String>) -> Item {
        Item::Direct(DirectValue::String(s.into()))
    }

    pub fn integer(n: i64) -> Item {
        Item::Direct(DirectValue::Integer(n))
    }

    pub fn null() -> Item {
        Item::Direct(DirectValue::Null)
    }

    /// `register<N>` literal without a tracked value.
    pub fn register(number: u32) -> Item {
        Item::Direct(DirectValue::Register { number, computed: None })
    }

    pub fn var(name: impl Into<String>) -> Item {
        Item::GetVariable { name: Box::new(Item::string(name)) }
    }

    pub fn set_var(name: impl Into<String>, value: Item) -> Item {
        Item::SetVariable {
            name: Box::new(Item::string(name)),
            value: Box::new(value),
        }
    }

    pub fn member(object: Item, member: impl Into<String>) -> Item {
        Item::GetMember {
            object: Box::new(object),
            member: Box::new(Item::string(member)),
        }
    }

    pub fn set_member(object: Item, member: impl Into<String>, value: Item) -> Item {
        Item::SetMember {
            object: Box::new(object),
            member: Box::new(Item::string(member)),
            value: Box::new(value),
        }
    }

    pub fn store_register(register: u32, value: Item) -> Item {
        Item::StoreRegister { register, value: Box::new(value) }
    }

    pub fn temp_register(register: u32, value: Item) -> Item {
        Item::TemporaryRegister { register, value: Box::new(value) }
    }

    pub fn new_object(name: impl Into<String>, args: Vec<Item>) -> Item {
        Item::NewObject { name: Box::new(Item::string(name)), args }
    }

    pub fn call_function(name: impl Into<String>, args: Vec<Item>) -> Item {
        Item::CallFunction { name: Box::new(Item::string(name)), args }
    }

    pub fn call_method(object: Item, method: impl Into<String>, args: Vec<Item>) -> Item {
        Item::CallMethod {
            object: Box::new(object),
            method: Box::new(Item::string(method)),
            args,
        }
    }

    pub fn not(value: Item) -> Item {
        Item::Not(Box::new(value))
    }

    pub fn if_then(condition: Item, on_true: Vec<Item>, on_false: Vec<Item>) -> Item {
        Item::If {
            condition: Box::new(condition),
            on_true,
            on_false,
        }
    }

    pub fn push(value: Item) -> Item {
        Item::Push(Box::new(value))
    }

    /// The string payload of a string literal.
    pub fn as_str_literal(&self) -> Option<&str> {
        match self {
            Item::Direct(DirectValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The value being written by a member or variable write.
    pub fn written_value(&self) -> Option<&Item> {
        match self {
            Item::SetMember { value, .. } | Item::SetVariable { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Item::SetMember { .. } | Item::SetVariable { .. })
    }

    /// Short node-kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Item::If { .. } => "If",
            Item::Not(_) => "Not",
            Item::GetMember { .. } => "GetMember",
            Item::SetMember { .. } => "SetMember",
            Item::GetVariable { .. } => "GetVariable",
            Item::SetVariable { .. } => "SetVariable",
            Item::Direct(_) => "DirectValue",
            Item::NewObject { .. } => "NewObject",
            Item::NewMethod { .. } => "NewMethod",
            Item::Function(_) => "Function",
            Item::StoreRegister { .. } => "StoreRegister",
            Item::TemporaryRegister { .. } => "TemporaryRegister",
            Item::CallMethod { .. } => "CallMethod",
            Item::CallFunction { .. } => "CallFunction",
            Item::Pop => "Pop",
            Item::Push(_) => "Push",
            Item::Extends { .. } => "Extends",
            Item::ImplementsOp { .. } => "ImplementsOp",
            Item::Class(_) => "Class",
            Item::Interface(_) => "Interface",
            Item::Unresolved(_) => "Unresolved",
        }
    }
}
