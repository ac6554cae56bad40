//! Teardown of runtime object graphs.
//!
//! Instances, classes, closures and frames own each other through `Rc`. A
//! linked list built in Lox is a chain of instances, and a long-running
//! recursion can leave a chain of frames; letting the compiler-generated
//! drop glue free either one recurses once per link. The `Drop` impls for
//! those types instead hand their children to a [`Release`] worklist, which
//! unwraps every uniquely owned node in a loop.

use std::rc::Rc;

use crate::environment::Environment;
use crate::Value;

#[derive(Default)]
pub(crate) struct Release {
    values: Vec<Value>,
    frames: Vec<Environment>,
}

impl Release {
    /// Queue a value. Scalars and strings own nothing and drop in place.
    pub(crate) fn value(&mut self, value: Value) {
        if matches!(
            value,
            Value::Instance(_) | Value::Function(_) | Value::Class(_)
        ) {
            self.values.push(value);
        }
    }

    pub(crate) fn frame(&mut self, env: Environment) {
        self.frames.push(env);
    }

    /// Drain the queue. A node still shared elsewhere only loses one strong
    /// count here; its last owner releases it later.
    pub(crate) fn run(mut self) {
        loop {
            if let Some(value) = self.values.pop() {
                self.unwrap_value(value);
            } else if let Some(env) = self.frames.pop() {
                env.release_into(&mut self);
            } else {
                break;
            }
        }
    }

    fn unwrap_value(&mut self, value: Value) {
        match value {
            Value::Instance(rc) => {
                if let Ok(mut instance) = Rc::try_unwrap(rc) {
                    instance.release_into(self);
                }
            }
            Value::Function(rc) => {
                if let Ok(function) = Rc::try_unwrap(rc) {
                    self.frames.push(function.closure);
                }
            }
            Value::Class(rc) => {
                if let Ok(mut class) = Rc::try_unwrap(rc) {
                    class.release_into(self);
                }
            }
            _ => {}
        }
    }
}
