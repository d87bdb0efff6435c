use crate::constants::DRAG_THRESHOLD;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Direction {
    Previous, // Toward index 0
    Next,     // Toward the end of the catalog
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Previous => -1.0,
            Direction::Next => 1.0,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DragState {
    Idle,
    Dragging { start_x: f32 },
}

/// Everything the carousel remembers between events.
#[derive(Debug, Clone)]
pub struct CarouselState {
    pub current_index: usize,
    pub drag: DragState,
    pub current_translate_x: f32,
    pub prev_translate_x: f32,
}

impl CarouselState {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            drag: DragState::Idle,
            current_translate_x: 0.0,
            prev_translate_x: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Card after the current one, wrapping past the end.
    pub fn next_index(&self, len: usize) -> usize {
        (self.current_index + 1) % len
    }

    /// Button navigation backwards. Clamps at 0.
    pub fn step_back(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Button navigation forwards. Clamps at the last index.
    pub fn step_forward(&mut self, len: usize) -> bool {
        if self.current_index + 1 < len {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    pub fn begin_drag(&mut self, x: f32) {
        self.drag = DragState::Dragging { start_x: x };
    }

    /// Updates the translation for a pointer at `x`. Returns `None` when idle.
    pub fn drag_to(&mut self, x: f32) -> Option<f32> {
        let DragState::Dragging { start_x } = self.drag else {
            return None;
        };
        self.current_translate_x = self.prev_translate_x + (x - start_x);
        Some(self.current_translate_x)
    }

    /// Ends the drag, snapping to a neighbour when the release passed the
    /// threshold. Unlike the buttons, this wraps around the catalog.
    pub fn release(&mut self, len: usize) -> Option<Direction> {
        if !self.is_dragging() {
            return None;
        }
        self.drag = DragState::Idle;

        let moved = if self.current_translate_x < -DRAG_THRESHOLD {
            self.current_index = (self.current_index + 1) % len;
            Some(Direction::Next)
        } else if self.current_translate_x > DRAG_THRESHOLD {
            self.current_index = (self.current_index + len - 1) % len;
            Some(Direction::Previous)
        } else {
            None
        };

        self.current_translate_x = 0.0;
        self.prev_translate_x = 0.0;
        moved
    }
}

impl Default for CarouselState {
    fn default() -> Self {
        Self::new()
    }
}
