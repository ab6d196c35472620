// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor hook tables and hook resolution.
//!
//! A [`VisitorOpts`] is the active hook table for a traversal: optional
//! global enter/exit hooks, per-kind enter/exit hooks, and a blacklist of
//! kinds for which no hooks fire at all.
//!
//! # Hook resolution
//!
//! Lookup is two-level and explicit ([`resolve_hook`]): a kind-scoped
//! registration always takes precedence over a global one. There is no
//! merging: if `Identifier` registers an enter hook, the global enter hook
//! is not called for identifiers.
//!
//! # Hook shape
//!
//! A hook receives the position being visited and the traversal's opaque
//! plugin state, and returns a [`HookAction`]. Returning a replacement
//! routes through the position's mutation protocol exactly as if the hook
//! had called `replace` itself; most plugins instead capture their own state
//! and return [`HookAction::Continue`].

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use graft_ast::{NodeKind, NodeRef};

use crate::error::TraverseError;
use crate::path::Path;

/// Opaque plugin state carried by a traversal and handed to every hook.
pub type PluginState = Rc<dyn Any>;

/// What a hook asks the traversal to do with the visited position.
#[derive(Clone)]
pub enum HookAction {
    /// Leave the node as it is.
    Continue,
    /// Replace the visited node with a single node.
    Replace(NodeRef),
    /// Replace the visited node with an ordered sequence of nodes.
    ReplaceMany(Vec<NodeRef>),
}

impl std::fmt::Debug for HookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookAction::Continue => write!(f, "Continue"),
            HookAction::Replace(node) => write!(f, "Replace({})", node.kind()),
            HookAction::ReplaceMany(nodes) => write!(f, "ReplaceMany(len={})", nodes.len()),
        }
    }
}

/// A visitor hook.
pub type Hook = Rc<dyn Fn(&Path, Option<&PluginState>) -> Result<HookAction, TraverseError>>;

/// Wrap a closure into a [`Hook`].
pub fn hook<F>(f: F) -> Hook
where
    F: Fn(&Path, Option<&PluginState>) -> Result<HookAction, TraverseError> + 'static,
{
    Rc::new(f)
}

/// Which side of a visit a hook fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Before descending into children.
    Enter,
    /// After all children have been visited.
    Exit,
}

impl HookKind {
    /// Returns the hook name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::Enter => "enter",
            HookKind::Exit => "exit",
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The enter/exit pair registered for one node kind.
#[derive(Clone, Default)]
pub struct HookSet {
    pub enter: Option<Hook>,
    pub exit: Option<Hook>,
}

/// The active hook table for a traversal.
#[derive(Clone, Default)]
pub struct VisitorOpts {
    /// Global enter hook, used when the visited kind has no kind-scoped one.
    pub enter: Option<Hook>,
    /// Global exit hook, used when the visited kind has no kind-scoped one.
    pub exit: Option<Hook>,
    /// Kind-scoped hooks; these shadow the global hooks entirely.
    pub kinds: HashMap<NodeKind, HookSet>,
    /// Kinds visited with no hook invocations at all.
    pub blacklist: Vec<NodeKind>,
}

impl VisitorOpts {
    pub fn new() -> VisitorOpts {
        VisitorOpts::default()
    }

    /// Register the global enter hook.
    pub fn on_enter(mut self, hook: Hook) -> VisitorOpts {
        self.enter = Some(hook);
        self
    }

    /// Register the global exit hook.
    pub fn on_exit(mut self, hook: Hook) -> VisitorOpts {
        self.exit = Some(hook);
        self
    }

    /// Register a kind-scoped enter hook.
    pub fn on_kind_enter(mut self, kind: NodeKind, hook: Hook) -> VisitorOpts {
        self.kinds.entry(kind).or_default().enter = Some(hook);
        self
    }

    /// Register a kind-scoped exit hook.
    pub fn on_kind_exit(mut self, kind: NodeKind, hook: Hook) -> VisitorOpts {
        self.kinds.entry(kind).or_default().exit = Some(hook);
        self
    }

    /// Blacklist node kinds.
    pub fn with_blacklist(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> VisitorOpts {
        self.blacklist.extend(kinds);
        self
    }

    /// Whether hooks are suppressed for the given kind.
    pub fn is_blacklisted(&self, kind: NodeKind) -> bool {
        self.blacklist.contains(&kind)
    }
}

/// Two-level hook lookup: the kind-scoped registration wins over the global
/// one; absence of both yields `None`.
pub fn resolve_hook(opts: &VisitorOpts, kind: NodeKind, which: HookKind) -> Option<Hook> {
    let scoped = opts.kinds.get(&kind);
    let (scoped_hook, global_hook) = match which {
        HookKind::Enter => (scoped.and_then(|s| s.enter.clone()), opts.enter.clone()),
        HookKind::Exit => (scoped.and_then(|s| s.exit.clone()), opts.exit.clone()),
    };
    scoped_hook.or(global_hook)
}
