use pretty_assertions::assert_eq;

use super::{Environment, Slot};
use crate::Value;

#[test]
fn define_and_get_in_same_frame() {
    let env = Environment::new();
    env.define_value("a", Value::Number(1.0));
    assert_eq!(env.get_here("a"), Some(Slot::Value(Value::Number(1.0))));
    assert_eq!(env.get_here("b"), None);
}

#[test]
fn get_here_does_not_search_outward() {
    let outer = Environment::new();
    outer.define_value("a", Value::Bool(true));
    let inner = outer.child();
    assert_eq!(inner.get_here("a"), None);
    assert!(inner.find_frame("a").is_some_and(|f| f.ptr_eq(&outer)));
}

#[test]
fn ancestor_walks_exact_hops() {
    let root = Environment::new();
    let mid = root.child();
    let leaf = mid.child();
    assert!(leaf.ancestor(0).is_some_and(|e| e.ptr_eq(&leaf)));
    assert!(leaf.ancestor(1).is_some_and(|e| e.ptr_eq(&mid)));
    assert!(leaf.ancestor(2).is_some_and(|e| e.ptr_eq(&root)));
    assert!(leaf.ancestor(3).is_none());
    assert_eq!(leaf.chain_len(), 3);
}

#[test]
fn shadowing_finds_innermost() {
    let root = Environment::new();
    root.define_value("x", Value::Number(1.0));
    let inner = root.child();
    inner.define_value("x", Value::Number(2.0));
    assert!(inner.find_frame("x").is_some_and(|f| f.ptr_eq(&inner)));
}

#[test]
fn assign_here_requires_existing_binding() {
    let env = Environment::new();
    assert!(!env.assign_here("x", Value::Nil));
    env.define("x", Slot::Uninitialized);
    assert!(env.assign_here("x", Value::Number(3.0)));
    assert_eq!(env.get_here("x"), Some(Slot::Value(Value::Number(3.0))));
}

#[test]
fn clones_share_the_frame() {
    let env = Environment::new();
    let alias = env.clone();
    alias.define_value("shared", Value::Nil);
    assert!(env.get_here("shared").is_some());
    assert!(env.ptr_eq(&alias));
}

#[test]
fn long_frame_chain_releases_without_recursing() {
    let root = Environment::new();
    root.define_value("kept", Value::Bool(true));
    let mut env = root.clone();
    for _ in 0..1_000_000 {
        env = env.child();
    }
    assert_eq!(env.chain_len(), 1_000_001);
    drop(env);
    assert_eq!(root.get_here("kept"), Some(Slot::Value(Value::Bool(true))));
}
