// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording host and counting cells for unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell as Counter, RefCell};

use kurbo::{Point, Rect, Size};

use crate::{Cell, Host};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeState {
    pub(crate) frame: Rect,
    pub(crate) hidden: bool,
    pub(crate) item: Option<usize>,
    pub(crate) removed: bool,
}

pub(crate) type Node = Rc<RefCell<NodeState>>;

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) nodes: Vec<Node>,
    pub(crate) view_size: Size,
    pub(crate) content_size: Size,
    pub(crate) scrolls: Vec<(f64, bool)>,
    pub(crate) overlay: Option<Size>,
    pub(crate) overlay_nodes: Vec<u32>,
}

impl RecordingHost {
    /// Containers not yet removed.
    pub(crate) fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.borrow().removed).count()
    }

    /// `(item, origin)` of every shown container, sorted by item.
    pub(crate) fn shown(&self) -> Vec<(usize, Point)> {
        let mut shown: Vec<_> = self
            .nodes
            .iter()
            .map(|n| n.borrow())
            .filter(|n| !n.removed && !n.hidden)
            .filter_map(|n| n.item.map(|item| (item, n.frame.origin())))
            .collect();
        shown.sort_by_key(|&(item, _)| item);
        shown
    }

    pub(crate) fn shown_items(&self) -> Vec<usize> {
        self.shown().into_iter().map(|(item, _)| item).collect()
    }
}

impl Host for RecordingHost {
    type Container = Node;
    type OverlayNode = u32;

    fn create_container(&mut self, frame: Rect) -> Node {
        let node = Rc::new(RefCell::new(NodeState {
            frame,
            hidden: true,
            item: None,
            removed: false,
        }));
        self.nodes.push(node.clone());
        node
    }

    fn move_container(&mut self, container: &mut Node, origin: Point) {
        let mut node = container.borrow_mut();
        node.frame = Rect::from_origin_size(origin, node.frame.size());
    }

    fn set_container_hidden(&mut self, container: &mut Node, hidden: bool) {
        container.borrow_mut().hidden = hidden;
    }

    fn remove_container(&mut self, container: Node) {
        let mut node = container.borrow_mut();
        assert!(!node.removed, "container removed twice");
        node.removed = true;
    }

    fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    fn scroll_to(&mut self, offset: f64, animated: bool) {
        self.scrolls.push((offset, animated));
    }

    fn create_overlay(&mut self, size: Size) {
        assert!(self.overlay.is_none(), "overlay created twice");
        self.overlay = Some(size);
    }

    fn resize_overlay(&mut self, size: Size) {
        self.overlay = Some(size);
    }

    fn prepend_overlay_node(&mut self, node: &u32) {
        self.overlay_nodes.insert(0, *node);
    }
}

/// Lifecycle counts shared by every cell of one grid.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    mounts: Counter<u32>,
    updates: Counter<u32>,
    reuses: Counter<u32>,
    unmounts: Counter<u32>,
}

impl Counters {
    pub(crate) fn new() -> Rc<Self> {
        Rc::default()
    }

    pub(crate) fn mounts(&self) -> u32 {
        self.mounts.get()
    }

    pub(crate) fn updates(&self) -> u32 {
        self.updates.get()
    }

    pub(crate) fn reuses(&self) -> u32 {
        self.reuses.get()
    }

    pub(crate) fn unmounts(&self) -> u32 {
        self.unmounts.get()
    }
}

fn bump(counter: &Counter<u32>) {
    counter.set(counter.get() + 1);
}

#[derive(Debug, Default)]
pub(crate) struct TestCell {
    counters: Option<Rc<Counters>>,
    pub(crate) item: Option<usize>,
}

impl TestCell {
    pub(crate) fn counted(counters: &Rc<Counters>) -> Self {
        Self {
            counters: Some(counters.clone()),
            item: None,
        }
    }

    fn count(&self, pick: impl FnOnce(&Counters) -> &Counter<u32>) {
        if let Some(counters) = &self.counters {
            bump(pick(counters));
        }
    }
}

impl Cell<Node> for TestCell {
    fn mount(&mut self, _container: &mut Node) {
        self.count(|c| &c.mounts);
    }

    fn update(&mut self, item: usize, container: &mut Node) {
        self.count(|c| &c.updates);
        self.item = Some(item);
        container.borrow_mut().item = Some(item);
    }

    fn will_reuse(&mut self) {
        self.count(|c| &c.reuses);
    }

    fn unmount(&mut self, _container: &mut Node) {
        self.count(|c| &c.unmounts);
    }
}
