//! Lexical environments.
//!
//! A chain of frames, innermost first. Frames are shared by `Rc` between the
//! running code and every closure created in them, and mutated through
//! `RefCell`. The chain only ever points outward, so there are no cycles
//! among frames themselves.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::release::Release;
use crate::Value;

/// Contents of one binding.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    /// Declared by `var x;`, never assigned.
    Uninitialized,
    Value(Value),
}

#[derive(Default)]
struct Frame {
    values: FxHashMap<String, Slot>,
    enclosing: Option<Environment>,
}

impl Frame {
    fn release_into(&mut self, release: &mut Release) {
        for (_, slot) in self.values.drain() {
            if let Slot::Value(value) = slot {
                release.value(value);
            }
        }
        if let Some(enclosing) = self.enclosing.take() {
            release.frame(enclosing);
        }
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        let mut release = Release::default();
        self.release_into(&mut release);
        release.run();
    }
}

/// Handle to one frame of the chain. Cloning shares the frame.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// A root frame, used for globals.
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Frame::default())))
    }

    /// A fresh frame enclosed by `self`.
    pub fn child(&self) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            values: FxHashMap::default(),
            enclosing: Some(self.clone()),
        })))
    }

    pub fn enclosing(&self) -> Option<Environment> {
        self.0.borrow().enclosing.clone()
    }

    /// Bind `name` in this frame, replacing any earlier binding.
    pub fn define(&self, name: &str, slot: Slot) {
        self.0.borrow_mut().values.insert(name.to_string(), slot);
    }

    pub fn define_value(&self, name: &str, value: Value) {
        self.define(name, Slot::Value(value));
    }

    /// The frame `depth` hops out, or `None` past the end of the chain.
    pub fn ancestor(&self, depth: usize) -> Option<Environment> {
        let mut env = self.clone();
        for _ in 0..depth {
            env = env.enclosing()?;
        }
        Some(env)
    }

    /// Look `name` up in this frame only.
    pub fn get_here(&self, name: &str) -> Option<Slot> {
        self.0.borrow().values.get(name).cloned()
    }

    /// Overwrite an existing binding in this frame. Returns `false` when the
    /// frame has no such name.
    pub fn assign_here(&self, name: &str, value: Value) -> bool {
        match self.0.borrow_mut().values.get_mut(name) {
            Some(slot) => {
                *slot = Slot::Value(value);
                true
            }
            None => false,
        }
    }

    /// Innermost frame on the chain that binds `name`.
    pub fn find_frame(&self, name: &str) -> Option<Environment> {
        let mut env = self.clone();
        loop {
            if env.0.borrow().values.contains_key(name) {
                return Some(env);
            }
            env = env.enclosing()?;
        }
    }

    /// Number of frames from here to the root, inclusive.
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut env = self.clone();
        while let Some(next) = env.enclosing() {
            len += 1;
            env = next;
        }
        len
    }

    /// Give up this handle. If it was the last one, the frame's bindings and
    /// its enclosing handle move to `release` instead of dropping in place.
    pub(crate) fn release_into(self, release: &mut Release) {
        if let Ok(cell) = Rc::try_unwrap(self.0) {
            cell.into_inner().release_into(release);
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0.borrow();
        let mut names: Vec<&str> = frame.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_enclosing", &frame.enclosing.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
