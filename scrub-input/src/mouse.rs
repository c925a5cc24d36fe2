//! Terminal mouse events to widget pointer events
//!
//! A widget drawn into a block of terminal cells still thinks in pixels. The
//! mapper places each cell's centre at `(column - left + 0.5) * cell_width`
//! and tracks enter/leave and drags so the widget sees a normal pointer.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use scrub_widgets::PointerEvent;

use crate::error::InputError;

/// A rectangle of terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (column, row) = (u32::from(column), u32::from(row));
        let (left, top) = (u32::from(self.left), u32::from(self.top));
        column >= left
            && column < left + u32::from(self.width)
            && row >= top
            && row < top + u32::from(self.height)
    }
}

/// Maps mouse events inside a cell rectangle to pixel pointer events
#[derive(Debug, Clone)]
pub struct CellMapper {
    area: CellRect,
    cell_width: f64,
    cell_height: f64,
    inside: bool,
    dragging: bool,
}

impl CellMapper {
    pub fn new(cell_width: f64, cell_height: f64) -> Result<Self, InputError> {
        if !(cell_width > 0.0 && cell_height > 0.0) {
            return Err(InputError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }
        Ok(Self {
            area: CellRect::default(),
            cell_width,
            cell_height,
            inside: false,
            dragging: false,
        })
    }

    pub fn area(&self) -> CellRect {
        self.area
    }

    pub fn set_area(&mut self, area: CellRect) {
        self.area = area;
    }

    /// Widget size in pixels for the current area
    pub fn pixel_size(&self) -> (f64, f64) {
        (
            f64::from(self.area.width) * self.cell_width,
            f64::from(self.area.height) * self.cell_height,
        )
    }

    /// Pixel centre of a cell, relative to the area; negative outside it
    pub fn to_pixels(&self, column: u16, row: u16) -> (f64, f64) {
        let dx = f64::from(column) - f64::from(self.area.left) + 0.5;
        let dy = f64::from(row) - f64::from(self.area.top) + 0.5;
        (dx * self.cell_width, dy * self.cell_height)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Translate one mouse event into zero or more pointer events
    pub fn translate(&mut self, event: &MouseEvent) -> Vec<PointerEvent> {
        let inside = self.area.contains(event.column, event.row);
        let (x, y) = self.to_pixels(event.column, event.row);
        let mut out = Vec::new();

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.cross(inside, &mut out);
                if inside {
                    out.push(PointerEvent::Down { x, y });
                    self.dragging = true;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.cross(inside, &mut out);
                // a drag that started here keeps going outside the area
                if self.dragging || inside {
                    out.push(PointerEvent::Move { x, y });
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.dragging {
                    out.push(PointerEvent::Up { x, y });
                    self.dragging = false;
                }
                self.cross(inside, &mut out);
            }
            MouseEventKind::Moved => {
                self.cross(inside, &mut out);
                if inside {
                    out.push(PointerEvent::Move { x, y });
                }
            }
            MouseEventKind::ScrollUp if inside => out.push(PointerEvent::Wheel { steps: 1.0 }),
            MouseEventKind::ScrollDown if inside => out.push(PointerEvent::Wheel { steps: -1.0 }),
            _ => {}
        }
        out
    }

    fn cross(&mut self, inside: bool, out: &mut Vec<PointerEvent>) {
        if inside != self.inside {
            out.push(if inside {
                PointerEvent::Enter
            } else {
                PointerEvent::Leave
            });
            self.inside = inside;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn mapper() -> CellMapper {
        let mut mapper = CellMapper::new(8.0, 16.0).unwrap();
        mapper.set_area(CellRect::new(2, 5, 40, 4));
        mapper
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        assert!(CellMapper::new(0.0, 16.0).is_err());
        assert!(CellMapper::new(8.0, -1.0).is_err());
        assert!(CellMapper::new(f64::NAN, 16.0).is_err());
    }

    #[test]
    fn test_cell_centre_mapping() {
        let m = mapper();
        assert_eq!(m.to_pixels(2, 5), (4.0, 8.0));
        assert_eq!(m.to_pixels(12, 7), (84.0, 40.0));
        assert_eq!(m.pixel_size(), (320.0, 64.0));
    }

    #[test]
    fn test_motion_synthesises_enter_and_leave() {
        let mut m = mapper();
        assert_eq!(
            m.translate(&mouse(MouseEventKind::Moved, 3, 5)),
            vec![PointerEvent::Enter, PointerEvent::Move { x: 12.0, y: 8.0 }]
        );
        assert_eq!(
            m.translate(&mouse(MouseEventKind::Moved, 4, 5)),
            vec![PointerEvent::Move { x: 20.0, y: 8.0 }]
        );
        assert_eq!(m.translate(&mouse(MouseEventKind::Moved, 4, 0)), vec![PointerEvent::Leave]);
        assert!(m.translate(&mouse(MouseEventKind::Moved, 4, 1)).is_empty());
    }

    #[test]
    fn test_drag_continues_outside() {
        let mut m = mapper();
        let down = m.translate(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 5));
        assert_eq!(down, vec![PointerEvent::Enter, PointerEvent::Down { x: 4.0, y: 8.0 }]);
        assert!(m.is_dragging());

        let drag = m.translate(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 5));
        assert_eq!(drag, vec![PointerEvent::Leave, PointerEvent::Move { x: -12.0, y: 8.0 }]);

        let up = m.translate(&mouse(MouseEventKind::Up(MouseButton::Left), 0, 5));
        assert_eq!(up, vec![PointerEvent::Up { x: -12.0, y: 8.0 }]);
        assert!(!m.is_dragging());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut m = mapper();
        assert!(m
            .translate(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0))
            .is_empty());
        assert!(m
            .translate(&mouse(MouseEventKind::Drag(MouseButton::Left), 1, 0))
            .is_empty());
        assert!(m
            .translate(&mouse(MouseEventKind::Up(MouseButton::Left), 1, 0))
            .is_empty());
    }

    #[test]
    fn test_wheel_inside_only() {
        let mut m = mapper();
        assert_eq!(
            m.translate(&mouse(MouseEventKind::ScrollUp, 5, 6)),
            vec![PointerEvent::Wheel { steps: 1.0 }]
        );
        assert_eq!(
            m.translate(&mouse(MouseEventKind::ScrollDown, 5, 6)),
            vec![PointerEvent::Wheel { steps: -1.0 }]
        );
        assert!(m.translate(&mouse(MouseEventKind::ScrollUp, 50, 6)).is_empty());
    }
}
