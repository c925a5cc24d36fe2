//! Draggable line and fill primitives
//!
//! A [`DragRegion`] knows where it is and whether the pointer is over it or
//! holding it. It does not know what its position means: every drag step is
//! handed to a constraint closure owned by the widget, which converts pixels
//! to values, applies its rules and answers with the placement to show.
//!
//! Coordinates are (along, across) pairs; see [`Orientation::split`].
//!
//! [`Orientation::split`]: crate::Orientation::split

/// Hover/drag flags of one interactive element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    pub hovering: bool,
    pub dragging: bool,
}

impl DragState {
    /// A dragged element is always drawn as hovered
    pub fn highlighted(self) -> bool {
        self.hovering || self.dragging
    }
}

/// Part of a region that was grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grip {
    Line,
    LeftEdge,
    RightEdge,
    Body,
}

/// Current geometry along the axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Line { at: f64 },
    Fill { start: f64, end: f64 },
}

/// Proposed move, before the owner's constraint is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragCandidate {
    Line {
        current: f64,
        cursor: f64,
    },
    LeftEdge {
        start: f64,
        end: f64,
        cursor: f64,
    },
    RightEdge {
        start: f64,
        end: f64,
        cursor: f64,
    },
    /// Whole fill translated by the cursor offset since the press
    Body {
        start: f64,
        end: f64,
        cursor: f64,
        new_start: f64,
        new_end: f64,
    },
}

/// Geometry accepted by the constraint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Line(f64),
    Fill { start: f64, end: f64 },
}

impl From<Placement> for Shape {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Line(at) => Shape::Line { at },
            Placement::Fill { start, end } => Shape::Fill { start, end },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Grab {
    grip: Grip,
    anchor: f64,
    origin: Shape,
}

/// A draggable line or fill
#[derive(Debug, Clone)]
pub struct DragRegion {
    shape: Shape,
    top: f64,
    bottom: f64,
    /// Half-width of the grabbable band around lines and fill edges
    grab_margin: f64,
    enabled: bool,
    state: DragState,
    grab: Option<Grab>,
}

impl DragRegion {
    pub fn line(at: f64, top: f64, bottom: f64, grab_margin: f64) -> Self {
        Self::with_shape(Shape::Line { at }, top, bottom, grab_margin)
    }

    pub fn fill(start: f64, end: f64, top: f64, bottom: f64, grab_margin: f64) -> Self {
        Self::with_shape(Shape::Fill { start, end }, top, bottom, grab_margin)
    }

    fn with_shape(shape: Shape, top: f64, bottom: f64, grab_margin: f64) -> Self {
        Self {
            shape,
            top,
            bottom,
            grab_margin,
            enabled: true,
            state: DragState::default(),
            grab: None,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Disabling drops any hover or drag in progress
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = DragState::default();
            self.grab = None;
        }
    }

    pub fn set_extent(&mut self, top: f64, bottom: f64) {
        self.top = top;
        self.bottom = bottom;
    }

    /// Move without going through a constraint. Returns false if nothing changed.
    pub fn place(&mut self, placement: Placement) -> bool {
        let shape = Shape::from(placement);
        if shape == self.shape {
            return false;
        }
        self.shape = shape;
        true
    }

    /// Which grip is under the point, if any
    pub fn hit(&self, along: f64, across: f64) -> Option<Grip> {
        if across < self.top || across > self.bottom {
            return None;
        }
        match self.shape {
            Shape::Line { at } => ((along - at).abs() <= self.grab_margin).then_some(Grip::Line),
            Shape::Fill { start, end } => {
                if (along - start).abs() <= self.grab_margin {
                    Some(Grip::LeftEdge)
                } else if (along - end).abs() <= self.grab_margin {
                    Some(Grip::RightEdge)
                } else if start < along && along < end {
                    Some(Grip::Body)
                } else {
                    None
                }
            }
        }
    }

    /// Set the hover flag explicitly. Returns true if it changed.
    pub fn set_hovering(&mut self, hovering: bool) -> bool {
        let hovering = hovering && self.enabled;
        if self.state.hovering == hovering {
            return false;
        }
        self.state.hovering = hovering;
        true
    }

    /// Update hover from a pointer position. Returns true if it changed.
    pub fn hover(&mut self, along: f64, across: f64) -> bool {
        let over = self.hit(along, across).is_some();
        self.set_hovering(over)
    }

    /// Start a drag if the point hits the region
    pub fn pointer_down(&mut self, along: f64, across: f64) -> Option<Grip> {
        if !self.enabled {
            return None;
        }
        let grip = self.hit(along, across)?;
        self.grab = Some(Grab {
            grip,
            anchor: along,
            origin: self.shape,
        });
        self.state.dragging = true;
        self.state.hovering = true;
        Some(grip)
    }

    /// Propose a move to `constrain` and apply whatever it accepts.
    ///
    /// Returns the new placement only if the region actually moved.
    pub fn pointer_move<F>(&mut self, along: f64, constrain: F) -> Option<Placement>
    where
        F: FnOnce(DragCandidate) -> Option<Placement>,
    {
        let candidate = self.candidate(along)?;
        let placement = constrain(candidate)?;
        self.place(placement).then_some(placement)
    }

    /// Finish a drag. Hover is recomputed from the release point.
    pub fn pointer_up(&mut self, along: f64, across: f64) {
        self.grab = None;
        self.state.dragging = false;
        self.hover(along, across);
    }

    fn candidate(&self, cursor: f64) -> Option<DragCandidate> {
        let grab = self.grab?;
        let candidate = match (grab.grip, self.shape) {
            (Grip::Line, Shape::Line { at }) => DragCandidate::Line {
                current: at,
                cursor,
            },
            (Grip::LeftEdge, Shape::Fill { start, end }) => DragCandidate::LeftEdge {
                start,
                end,
                cursor,
            },
            (Grip::RightEdge, Shape::Fill { start, end }) => DragCandidate::RightEdge {
                start,
                end,
                cursor,
            },
            (Grip::Body, Shape::Fill { start, end }) => {
                let Shape::Fill {
                    start: origin_start,
                    end: origin_end,
                } = grab.origin
                else {
                    return None;
                };
                let offset = cursor - grab.anchor;
                DragCandidate::Body {
                    start,
                    end,
                    cursor,
                    new_start: origin_start + offset,
                    new_end: origin_end + offset,
                }
            }
            _ => return None,
        };
        Some(candidate)
    }
}
