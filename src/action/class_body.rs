//! Parser for the block guarded by the innermost `if (!_global.a.b.C)` test.
//!
//! For `class a.b.C extends S { function foo() {} }` the compiler emits:
//!
//! ```text
//! _global.a.b.C extends S;                                        (optional)
//! r1 = (r2 = _global.a.b.C = (r2 = function () {...})).prototype;
//! r1.foo = function () {...};                                     (traits)
//! r2.bar = 5;
//! _global.a.b.C implements I;                                     (optional)
//! r1.addProperty("x", r1.__get__x, r1.__set__x);                  (trailing calls)
//! ASSetPropFlags(_global.a.b.C.prototype, null, 1);
//! ```
//!
//! An interface is the same guard around `_global.a.b.I = function () {};`
//! followed only by implements clauses.

use super::class_detector::DetectorOptions;
use super::clauses::{ClassItem, ClassProperty, ClassTrait, Declaration, InterfaceItem};
use super::error::MatchError;
use super::item::{DirectValue, Item};
use super::path;
use super::registers::{self, Binding, RegisterRole, RegisterRoles};
use crate::types::PropFlags;

/// Parse a guarded class body. `class_path` is the root-stripped path the
/// scanner accumulated from the enclosing guards.
pub fn parse_class_body(
    parts: &[Item],
    class_path: &[String],
    options: &DetectorOptions,
) -> Result<Declaration, MatchError> {
    if parts.is_empty() {
        return Err(MatchError::assertion("empty class body"));
    }
    if class_path.is_empty() {
        return Err(MatchError::assertion("empty class path"));
    }
    let parser = ClassBodyParser {
        parts,
        pos: 0,
        class_path,
        options,
        roles: RegisterRoles::new(),
        class_name: None,
        extends: None,
        implements: Vec::new(),
        constructor: None,
        traits: Vec::new(),
        traits_static: Vec::new(),
        properties: Vec::new(),
    };
    parser.parse()
}

struct ClassBodyParser<'a> {
    parts: &'a [Item],
    pos: usize,
    class_path: &'a [String],
    options: &'a DetectorOptions,
    roles: RegisterRoles,
    class_name: Option<Item>,
    extends: Option<Item>,
    implements: Vec<Item>,
    constructor: Option<Item>,
    traits: Vec<ClassTrait>,
    traits_static: Vec<bool>,
    properties: Vec<ClassProperty>,
}

impl<'a> ClassBodyParser<'a> {
    fn peek(&self) -> Option<&'a Item> {
        self.parts.get(self.pos)
    }

    fn root(&self) -> &'a str {
        &self.options.root_namespace
    }

    fn parse(mut self) -> Result<Declaration, MatchError> {
        self.parse_extends();
        self.parse_prototype_binding()?;
        if let Some(interface) = self.parse_traits()? {
            return Ok(Declaration::Interface(interface));
        }
        self.parse_trailing_calls()?;
        self.finish().map(Declaration::Class)
    }

    fn parse_extends(&mut self) {
        if let Some(Item::Extends { superclass, .. }) = self.peek() {
            self.extends = Some(path::without_root(superclass, self.root()));
            self.pos += 1;
        }
    }

    /// `r1 = (r2 = _global.a.C = (r2 = function () {...})).prototype;`
    fn parse_prototype_binding(&mut self) -> Result<(), MatchError> {
        let (instance_reg, value) = match self.peek() {
            Some(Item::StoreRegister { register, value }) => (*register, value),
            _ => return Ok(()),
        };
        let (object, member) = match value.as_ref() {
            Item::GetMember { object, member } => (object, member),
            _ => return Err(MatchError::assertion("Not Getmember in StoreRegister")),
        };
        let (class_reg, carried) = match object.as_ref() {
            Item::TemporaryRegister { register, value } => (*register, value.as_ref()),
            _ => {
                return Err(MatchError::assertion(
                    "Getmember does not have TemporaryRegister as object",
                ))
            }
        };
        if expect_string(member, "memberName")? != self.options.prototype_member {
            return Err(MatchError::assertion("memberName not \"prototype\""));
        }
        if !carried.is_write() {
            return Err(MatchError::assertion(
                "temporaryreg value not setmember/setvariable",
            ));
        }
        let carried_path = path::write_path_of(carried)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| MatchError::unexpected("class path write", carried))?;
        if path::strip_root(carried_path, self.root()) != self.class_path {
            return Err(MatchError::assertion(
                "temporaryreg value does not match class path",
            ));
        }
        let constructor = match carried.written_value() {
            Some(Item::StoreRegister { value, .. }) => value.as_ref(),
            _ => {
                return Err(MatchError::assertion(
                    "Constructor expected to be in storeregister",
                ))
            }
        };
        if !matches!(constructor, Item::Function(_)) {
            return Err(MatchError::assertion("Constructor expected as function"));
        }

        self.roles.assign(class_reg, RegisterRole::Class)?;
        self.roles.assign(instance_reg, RegisterRole::Instance)?;
        self.class_name = path::as_read(carried).map(|read| path::without_root(&read, self.root()));
        self.constructor = Some(constructor.clone());
        self.pos += 1;
        Ok(())
    }

    /// Member writes through the class and prototype registers. Returns the
    /// interface declaration when the body turns out to declare one.
    fn parse_traits(&mut self) -> Result<Option<InterfaceItem>, MatchError> {
        while let Some(item) = self.peek() {
            match item {
                Item::SetMember { object, member, value } => {
                    match registers::register_binding(object) {
                        Some((register, carried)) => {
                            self.add_trait(register, carried, member, value)?;
                            self.pos += 1;
                        }
                        None => return self.parse_interface(item).map(Some),
                    }
                }
                Item::SetVariable { .. } => return self.parse_interface(item).map(Some),
                Item::ImplementsOp { superclasses, .. } => {
                    self.implements.extend(superclasses.iter().cloned());
                    self.pos += 1;
                }
                _ => break,
            }
        }
        Ok(None)
    }

    fn add_trait(
        &mut self,
        register: u32,
        carried: Option<&Item>,
        member: &Item,
        value: &Item,
    ) -> Result<(), MatchError> {
        let role = match self.roles.role_of(register) {
            Some(role) => role,
            None => self.derive_role(register, carried)?,
        };

        let mut value = value.clone();
        if let Item::Function(f) = &mut value {
            f.calculated_name = Some(Box::new(member.clone()));
        }
        self.traits.push(ClassTrait {
            name: member.clone(),
            value,
        });
        self.traits_static.push(role == RegisterRole::Class);
        Ok(())
    }

    fn derive_role(
        &mut self,
        register: u32,
        carried: Option<&Item>,
    ) -> Result<RegisterRole, MatchError> {
        let binding = self.roles.derive(
            register,
            carried,
            self.class_path,
            &self.options.prototype_member,
            &self.options.root_namespace,
        )?;
        match binding {
            Binding::Constructor { class_name, constructor } => {
                self.class_name = Some(class_name);
                self.constructor = Some(constructor);
                Ok(RegisterRole::Class)
            }
            Binding::Prototype { class_name, superclass } => {
                self.class_name = Some(class_name);
                self.extends = Some(superclass);
                Ok(RegisterRole::Instance)
            }
        }
    }

    /// `_global.a.I = function () {};` followed by implements clauses only.
    fn parse_interface(&mut self, item: &Item) -> Result<InterfaceItem, MatchError> {
        let target = path::write_path_of(item)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| MatchError::assertion("invalid setmember"))?;
        if path::strip_root(target, self.root()) != self.class_path {
            return Err(MatchError::assertion("wrong path in setmember"));
        }
        let name = path::as_read(item)
            .map(|read| path::without_root(&read, self.root()))
            .ok_or_else(|| MatchError::assertion("invalid setmember"))?;

        match item.written_value() {
            Some(Item::Function(f)) => {
                if !f.name.is_empty() {
                    return Err(MatchError::assertion("not unnamed func in setmember"));
                }
                if !f.body.is_empty() {
                    return Err(MatchError::assertion("not empty function in setmember"));
                }
                if !f.params.is_empty() {
                    return Err(MatchError::assertion(
                        "not empty params for function in setmember",
                    ));
                }
            }
            Some(other) => return Err(MatchError::unexpected("interface function", other)),
            None => return Err(MatchError::assertion("invalid setmember")),
        }
        self.pos += 1;

        let mut superclasses = std::mem::take(&mut self.implements);
        for item in &self.parts[self.pos..] {
            match item {
                Item::ImplementsOp { superclasses: more, .. } => {
                    superclasses.extend(more.iter().cloned())
                }
                other => {
                    return Err(MatchError::assertion(format!(
                        "unknown iface item: {}",
                        other.kind_name()
                    )))
                }
            }
        }

        Ok(InterfaceItem {
            name: Box::new(name),
            path: self.class_path.to_vec(),
            superclasses,
        })
    }

    fn parse_trailing_calls(&mut self) -> Result<(), MatchError> {
        while let Some(item) = self.peek() {
            let call = match item {
                Item::Push(value) => value.as_ref(),
                other => other,
            };
            match call {
                Item::CallMethod { object, method, args } => {
                    let method_name = expect_string(method, "push methodName")?;
                    if method_name != self.options.add_property_method {
                        return Err(MatchError::assertion(format!(
                            "unknown push method name: {}",
                            method_name
                        )));
                    }
                    self.add_property(object, args)?;
                }
                Item::CallFunction { name, args } => {
                    let function_name = expect_string(name, "pushitem function name")?;
                    if function_name != self.options.prop_flags_function {
                        return Err(MatchError::assertion(format!(
                            "unknown pushitem function call {}",
                            function_name
                        )));
                    }
                    self.check_prop_flags(args)?;
                }
                other => return Err(MatchError::unexpected("trailing call", other)),
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// `rN.addProperty("x", rN.__get__x, rN.__set__x)`; either accessor may
    /// be an empty placeholder function.
    fn add_property(&mut self, object: &Item, args: &[Item]) -> Result<(), MatchError> {
        let register = registers::register_number(object, "addProperty not on register")?;
        let role = self.roles.role_of(register).ok_or_else(|| {
            MatchError::assertion(format!("unexpected addProperty object register {}", register))
        })?;
        if args.len() != 3 {
            return Err(MatchError::assertion(format!(
                "invalid number of arguments to addProperty: {}",
                args.len()
            )));
        }
        let name = expect_string(&args[0], "propertyName")?;
        let getter = format!("{}{}", self.options.getter_prefix, name);
        let setter = format!("{}{}", self.options.setter_prefix, name);
        let has_getter = check_accessor(&args[1], register, &getter, "getter", name)?;
        let has_setter = check_accessor(&args[2], register, &setter, "setter", name)?;

        self.properties.push(ClassProperty {
            name: name.to_string(),
            has_getter,
            has_setter,
            is_static: role == RegisterRole::Class,
        });
        Ok(())
    }

    /// `ASSetPropFlags(a.b.C.prototype, null, 1)` hides the prototype members.
    fn check_prop_flags(&self, args: &[Item]) -> Result<(), MatchError> {
        if args.len() != 3 {
            return Err(MatchError::assertion(format!(
                "Invalid number of arguments to ASSetPropFlags: {}, 3 expected",
                args.len()
            )));
        }
        let target = path::path_of(&args[0]).map(|p| path::strip_root(p, self.root()));
        let on_prototype = target.as_deref().and_then(|p| p.split_last()).map_or(
            false,
            |(last, rest)| *last == self.options.prototype_member && rest == self.class_path,
        );
        if !on_prototype {
            return Err(MatchError::assertion("ASSetPropFlags not on prototype"));
        }
        if !matches!(args[1], Item::Direct(DirectValue::Null)) {
            return Err(MatchError::assertion("ASSetPropFlags properties param not null"));
        }
        let flags = match &args[2] {
            Item::Direct(DirectValue::Integer(n)) => PropFlags::from_literal(*n),
            _ => None,
        };
        if flags != Some(PropFlags::DONT_ENUM) {
            return Err(MatchError::assertion("ASSetPropFlags flags not set to 1"));
        }
        Ok(())
    }

    fn finish(self) -> Result<ClassItem, MatchError> {
        let mut constructor = self.constructor.ok_or(MatchError::MissingConstructor)?;
        let base_name = match self.class_path.last() {
            Some(last) => Item::string(last.clone()),
            None => return Err(MatchError::assertion("empty class path")),
        };
        if let Item::Function(f) = &mut constructor {
            f.calculated_name = Some(Box::new(base_name.clone()));
        }

        let mut traits = self.traits;
        let mut traits_static = self.traits_static;
        traits.insert(
            0,
            ClassTrait {
                name: base_name,
                value: constructor,
            },
        );
        traits_static.insert(0, false);

        let name = match self.class_name {
            Some(name) => name,
            None => path::read_of_path(self.class_path)
                .ok_or_else(|| MatchError::assertion("empty class path"))?,
        };

        Ok(ClassItem {
            name: Box::new(name),
            path: self.class_path.to_vec(),
            extends: self.extends.map(Box::new),
            implements: self.implements,
            traits,
            traits_static,
            properties: self.properties,
        })
    }
}

fn expect_string<'i>(item: &'i Item, what: &str) -> Result<&'i str, MatchError> {
    match item {
        Item::Direct(DirectValue::String(s)) => Ok(s),
        Item::Direct(_) => Err(MatchError::assertion(format!("{} not string", what))),
        _ => Err(MatchError::assertion(format!("{} not DirectValue", what))),
    }
}

/// Returns whether a real accessor is bound (`false` for a placeholder).
fn check_accessor(
    accessor: &Item,
    register: u32,
    expected_member: &str,
    what: &'static str,
    property: &str,
) -> Result<bool, MatchError> {
    match accessor {
        Item::GetMember { object, member } => {
            let accessor_register = registers::register_number(object, what)?;
            if accessor_register != register {
                return Err(MatchError::assertion(format!(
                    "{} register does not match property register {} <=> {}",
                    what, accessor_register, register
                )));
            }
            if expect_string(member, what)? != expected_member {
                return Err(MatchError::assertion(format!(
                    "{} does not match property name",
                    what
                )));
            }
            Ok(true)
        }
        Item::Function(f) if f.is_empty_placeholder() => Ok(false),
        Item::Function(_) => Err(MatchError::assertion(format!(
            "unexpected {} value for property {}",
            what, property
        ))),
        other => Err(MatchError::unexpected("property accessor", other)),
    }
}
