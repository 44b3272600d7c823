//! Node handles and per-node storage.

use slotmap::new_key_type;
use trellis_style::{AvailableSpace, Size, Style};

use crate::cache::Cache;
use crate::layout::Layout;

new_key_type! {
    /// Opaque, copyable handle to a node in a [`crate::NodeArena`].
    ///
    /// Removing a node invalidates its handle only; reusing the slot yields a new
    /// generation, so stale handles are reported instead of aliasing.
    pub struct NodeId;
}

/// Measurement callback for leaves sized by external content (text, images).
///
/// Receives the known content-box dimensions (either may be unresolved)
/// and the available space, and returns the content size. It must be a pure function
/// of its inputs and must not touch the owning tree.
pub type MeasureFunc =
    Box<dyn Fn(Size<Option<f32>>, Size<AvailableSpace>) -> Size<f32> + Send + Sync>;

/// Everything the arena stores for one node apart from its edges.
#[derive(Debug)]
pub(crate) struct NodeData {
    /// Layout-affecting style.
    pub(crate) style: Style,
    /// Layout as computed by the algorithms, before rounding.
    pub(crate) unrounded_layout: Layout,
    /// Layout handed out to callers (rounded when rounding is enabled).
    pub(crate) final_layout: Layout,
    /// Sizing results of earlier layout calls.
    pub(crate) cache: Cache,
    /// Set by a layout pass, cleared by [`crate::NodeArena::acknowledge_layout`].
    pub(crate) has_new_layout: bool,
    /// Set on ancestors of a dirtied node, cleared by [`crate::NodeArena::acknowledge_subtree`].
    pub(crate) has_dirty_descendant: bool,
    /// The node's inputs changed since its last layout.
    pub(crate) is_dirty: bool,
}

impl NodeData {
    /// Fresh, dirty node data.
    pub(crate) fn new(style: Style) -> Self {
        Self {
            style,
            unrounded_layout: Layout::new(),
            final_layout: Layout::new(),
            cache: Cache::new(),
            has_new_layout: false,
            has_dirty_descendant: false,
            is_dirty: true,
        }
    }

    /// Drop cached results and flag the node for relayout.
    pub(crate) fn mark_dirty(&mut self) {
        self.cache.clear();
        self.is_dirty = true;
        self.has_new_layout = false;
    }
}
