//! Run-time values and the callable/class model.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use lox_ir::{format_number, FunctionDecl};
use rustc_hash::FxHashMap;

use crate::environment::Environment;
use crate::release::Release;

#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Function(Rc<LoxFunction>),
    Native(Rc<NativeFunction>),
    Class(Rc<LoxClass>),
    Instance(Rc<LoxInstance>),
}

impl Value {
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// `nil` and `false` are falsey; everything else, `0` and `""`
    /// included, is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) | Value::Native(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

/// Value equality for primitives, identity for everything with a heap
/// identity. `nil` only equals `nil`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// What `print` shows.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => fmt::Display::fmt(func, f),
            Value::Native(_) => f.write_str("<native fn>"),
            Value::Class(class) => f.write_str(&class.name),
            Value::Instance(instance) => write!(f, "{} instance", instance.class.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({s:?})"),
            other => write!(f, "{}({other})", other.type_name()),
        }
    }
}

/// How a user function was declared; decides its printed form and whether a
/// call yields `this`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Lambda,
    Method,
    Initializer,
    Getter,
}

/// A closure: declaration plus the environment it was created in.
pub struct LoxFunction {
    pub decl: Rc<FunctionDecl>,
    pub closure: Environment,
    pub kind: FunctionKind,
}

impl LoxFunction {
    pub fn new(decl: Rc<FunctionDecl>, closure: Environment, kind: FunctionKind) -> Self {
        LoxFunction {
            decl,
            closure,
            kind,
        }
    }

    pub fn arity(&self) -> usize {
        self.decl.params.len()
    }

    /// A copy whose closure has one extra frame binding `this`.
    pub fn bind(&self, this: Value) -> LoxFunction {
        let env = self.closure.child();
        env.define_value("this", this);
        LoxFunction {
            decl: Rc::clone(&self.decl),
            closure: env,
            kind: self.kind,
        }
    }

    pub fn is_initializer(&self) -> bool {
        self.kind == FunctionKind::Initializer
    }
}

impl fmt::Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decl.name_str() {
            Some(name) if self.kind != FunctionKind::Lambda => write!(f, "<fn {name}>"),
            _ => write!(f, "<lambda fn [at line {}]>", self.decl.line),
        }
    }
}

/// A host function.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[Value]) -> Value,
}

type MethodTable = FxHashMap<String, Rc<LoxFunction>>;

pub struct LoxClass {
    pub name: String,
    pub superclass: Option<Rc<LoxClass>>,
    methods: MethodTable,
    getters: MethodTable,
    /// Looked up only on this class, never inherited.
    statics: MethodTable,
    /// Fields set on the class value itself.
    fields: RefCell<FxHashMap<String, Value>>,
}

impl LoxClass {
    pub fn new(
        name: String,
        superclass: Option<Rc<LoxClass>>,
        methods: MethodTable,
        getters: MethodTable,
        statics: MethodTable,
    ) -> Self {
        LoxClass {
            name,
            superclass,
            methods,
            getters,
            statics,
            fields: RefCell::default(),
        }
    }

    /// Instance method on this class or the nearest ancestor defining it.
    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        match self.methods.get(name) {
            Some(method) => Some(Rc::clone(method)),
            None => self.superclass.as_ref()?.find_method(name),
        }
    }

    pub fn find_getter(&self, name: &str) -> Option<Rc<LoxFunction>> {
        match self.getters.get(name) {
            Some(getter) => Some(Rc::clone(getter)),
            None => self.superclass.as_ref()?.find_getter(name),
        }
    }

    pub fn find_static(&self, name: &str) -> Option<Rc<LoxFunction>> {
        self.statics.get(name).cloned()
    }

    /// Calling the class takes as many arguments as its `init`.
    pub fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }

    pub(crate) fn release_into(&mut self, release: &mut Release) {
        if let Some(superclass) = self.superclass.take() {
            release.value(Value::Class(superclass));
        }
        for table in [&mut self.methods, &mut self.getters, &mut self.statics] {
            for (_, method) in table.drain() {
                release.value(Value::Function(method));
            }
        }
        for (_, value) in self.fields.get_mut().drain() {
            release.value(value);
        }
    }
}

impl Drop for LoxClass {
    fn drop(&mut self) {
        let mut release = Release::default();
        self.release_into(&mut release);
        release.run();
    }
}

pub struct LoxInstance {
    pub class: Rc<LoxClass>,
    fields: RefCell<FxHashMap<String, Value>>,
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        LoxInstance {
            class,
            fields: RefCell::default(),
        }
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }

    /// The class is queued as well, so a subclass chain is also freed
    /// without recursion once its last instance goes.
    pub(crate) fn release_into(&mut self, release: &mut Release) {
        for (_, value) in self.fields.get_mut().drain() {
            release.value(value);
        }
        release.value(Value::Class(Rc::clone(&self.class)));
    }
}

impl Drop for LoxInstance {
    fn drop(&mut self) {
        let mut release = Release::default();
        self.release_into(&mut release);
        release.run();
    }
}
