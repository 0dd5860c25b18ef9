//! Undo history - capped stack of canvas snapshots
//!
//! Each snapshot is an independent [`PixelBuffer`] copy. The stack holds a
//! fixed number of snapshots; pushing past capacity drops the oldest.
//! Undoing then drawing again truncates the redo tail, like any linear
//! undo history.

use crate::pixbuf::PixelBuffer;

/// Fixed-capacity snapshot history.
#[derive(Debug, Clone)]
pub struct UndoStack {
    snapshots: Vec<PixelBuffer>,
    index: usize,
    capacity: usize,
}

impl UndoStack {
    /// Create an empty history holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Record a snapshot of the canvas. Any redo tail beyond the current
    /// position is discarded; the oldest snapshot is dropped at capacity.
    pub fn save(&mut self, canvas: &PixelBuffer) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots.push(canvas.clone());
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot and restore it into `canvas`.
    /// Returns false when already at the oldest snapshot.
    pub fn undo(&mut self, canvas: &mut PixelBuffer) -> bool {
        if self.index == 0 || self.snapshots.is_empty() {
            return false;
        }
        self.index -= 1;
        *canvas = self.snapshots[self.index].clone();
        true
    }

    /// Step forward one snapshot and restore it into `canvas`.
    /// Returns false when already at the newest snapshot.
    pub fn redo(&mut self, canvas: &mut PixelBuffer) -> bool {
        if self.snapshots.is_empty() || self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        *canvas = self.snapshots[self.index].clone();
        true
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = 0;
    }
}
