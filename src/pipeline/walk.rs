// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Activity tree traversal
//!
//! The one place that knows how to descend into nested activity lists.
//! Checkers implement [`ActivityVisitor`] (or pass a closure to
//! [`for_each_activity`]) instead of re-implementing the descent.

use super::Activity;

/// Context handed to a visitor for each activity
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub activity: &'a Activity,
    /// Containing control-flow activity, `None` at the pipeline top level
    pub parent: Option<&'a Activity>,
    /// 0 at the top level
    pub depth: usize,
}

impl<'a> Visit<'a> {
    pub fn parent_type(&self) -> Option<&'a str> {
        self.parent.map(|p| p.activity_type.as_str())
    }

    pub fn parent_name(&self) -> Option<&'a str> {
        self.parent.map(|p| p.name.as_str())
    }
}

/// Per-node callbacks for [`walk`]
pub trait ActivityVisitor<'a> {
    /// Called for every activity, parents before children
    fn visit(&mut self, visit: Visit<'a>);

    /// Called once per sibling list before its activities are visited
    fn enter_list(&mut self, _list: &'a [Activity], _parent: Option<&'a Activity>) {}
}

/// Depth-first, pre-order walk preserving sibling order
pub fn walk<'a, V>(activities: &'a [Activity], visitor: &mut V)
where
    V: ActivityVisitor<'a> + ?Sized,
{
    walk_list(activities, None, 0, visitor);
}

fn walk_list<'a, V>(
    list: &'a [Activity],
    parent: Option<&'a Activity>,
    depth: usize,
    visitor: &mut V,
) where
    V: ActivityVisitor<'a> + ?Sized,
{
    visitor.enter_list(list, parent);

    for activity in list {
        visitor.visit(Visit {
            activity,
            parent,
            depth,
        });

        for nested in activity.nested() {
            walk_list(nested, Some(activity), depth + 1, visitor);
        }
    }
}

struct ClosureVisitor<F>(F);

impl<'a, F> ActivityVisitor<'a> for ClosureVisitor<F>
where
    F: FnMut(Visit<'a>),
{
    fn visit(&mut self, visit: Visit<'a>) {
        (self.0)(visit)
    }
}

/// Walk with a closure as the visitor
pub fn for_each_activity<'a, F>(activities: &'a [Activity], f: F)
where
    F: FnMut(Visit<'a>),
{
    walk(activities, &mut ClosureVisitor(f));
}
