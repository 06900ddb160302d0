// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-shortcut commands aimed at the view under the pointer.

use understory_quasimode::catalog::{BIND, NEW, RUN};
use understory_quasimode::{Action, EventMap};

use crate::manager::{ActionManager, one_shot};
use crate::receiver::Capability;
use crate::view::ViewTree;

macro_rules! command_manager {
    ($(#[$meta:meta])* $name:ident, $action:ident, $capability:ident, $cast:ident, $call:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $name;

        impl<T: ViewTree> ActionManager<T> for $name {
            fn actions(&self) -> &'static [Action] {
                const ACTIONS: &[Action] = &[$action];
                ACTIONS
            }

            fn send(&mut self, events: &EventMap, tree: &mut T) {
                one_shot(events, &$action, tree, Capability::$capability, |r, p| {
                    if let Some(target) = r.$cast() {
                        target.$call(p);
                    }
                });
            }
        }
    };
}

command_manager!(
    /// Binds the object under the pointer.
    BindableActionManager, BIND, Bindable, as_bindable, bind
);
command_manager!(
    /// Creates a new object at the pointer.
    NewableActionManager, NEW, Newable, as_newable, new_object
);
command_manager!(
    /// Runs the object under the pointer.
    RunnableActionManager, RUN, Runnable, as_runnable, run
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeTree, Harness};
    use alloc::vec;
    use kurbo::{Point, Rect};
    use understory_quasimode::Phase;
    use understory_quasimode::types::{CLICK, COMMAND, D, SUB_CLICK};

    fn node(capability: Capability) -> FakeTree {
        let mut tree = FakeTree::new();
        tree.add("node", Rect::new(10.0, 10.0, 90.0, 90.0), &[capability]);
        tree
    }

    #[test]
    fn each_command_reaches_its_capability() {
        let at = Point::new(30.0, 40.0);
        let local = Point::new(20.0, 30.0);

        let mut h = Harness::new(BindableActionManager, node(Capability::Bindable));
        h.tap(SUB_CLICK, at);
        assert_eq!(h.calls(), vec![("node", Call::Bind(local))]);

        let mut h = Harness::new(NewableActionManager, node(Capability::Newable));
        h.key(COMMAND, Phase::Began, at);
        h.tap(D, at);
        assert_eq!(h.calls(), vec![("node", Call::New(local))]);

        let mut h = Harness::new(RunnableActionManager, node(Capability::Runnable));
        h.tap(CLICK, at);
        assert_eq!(h.calls(), vec![("node", Call::Run(local))]);
    }

    #[test]
    fn commands_need_their_modifier() {
        let mut h = Harness::new(NewableActionManager, node(Capability::Newable));
        let at = Point::new(30.0, 40.0);
        h.tap(D, at);
        assert!(h.calls().is_empty());
    }

    #[test]
    fn missing_capability_is_a_miss() {
        let mut h = Harness::new(BindableActionManager, node(Capability::Runnable));
        h.tap(SUB_CLICK, Point::new(30.0, 40.0));
        assert!(h.calls().is_empty());
    }
}
