// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_quasimode::catalog::INDICATE;
use understory_quasimode::{Action, EventMap, Phase};

use crate::manager::{ActionManager, deliver, frame};
use crate::receiver::Capability;
use crate::view::ViewTree;

const ACTIONS: &[Action] = &[INDICATE];

/// Highlights whatever is under the pointer.
///
/// Unlike gesture managers this hit-tests on every frame, so the highlight
/// follows the pointer from view to view.
#[derive(Copy, Clone, Debug, Default)]
pub struct IndicatableActionManager;

impl<T: ViewTree> ActionManager<T> for IndicatableActionManager {
    fn actions(&self) -> &'static [Action] {
        ACTIONS
    }

    fn send(&mut self, events: &EventMap, tree: &mut T) {
        let Some(frame) = frame(events, &INDICATE) else {
            return;
        };
        if frame.phase == Phase::Ended {
            return;
        }
        let at = frame.at();
        let Some(key) = tree.locate(at, Capability::Indicatable) else {
            return;
        };
        deliver(tree, key, at, |r, p| {
            if let Some(i) = r.as_indicatable() {
                i.indicate(p);
            }
        });
    }
}
