//! Two stacked scrollbars for coarse and fine seeking
//!
//! The main bar spans the whole range and carries an active region. The
//! secondary bar underneath spans exactly that region, so dragging on it
//! moves through the same frames with more pixels per frame. Both bars
//! always show the same frame.

use tracing::{debug, warn};

use crate::error::WidgetError;
use crate::palette::Palette;
use crate::pointer::{Interaction, PointerEvent};
use crate::scrollbar::{FrameCallback, ScrollBar, ScrollBarConfig, ScrollUpdate};
use crate::squeeze::{centered_region, settle, FrameRange, Region};
use crate::surface::{Offset, Surface};

/// Double scrollbar configuration
#[derive(Debug, Clone)]
pub struct DoubleScrollBarConfig {
    /// Axis label under the secondary bar
    pub label: Option<String>,
    /// Preferred heights; [`DoubleScrollBar::resize`] splits the height in this ratio
    pub main_height: f64,
    pub secondary_height: f64,
    pub padx: f64,
    pub frame_rate: f64,
    pub palette: Palette,
    pub fill_text: String,
    pub wheel_steps: i64,
    /// Width of the active region as a fraction of the full range
    pub secondary_width_fraction: f64,
    pub confine_to_active_region: bool,
    /// Let the user drag the main bar's active region
    pub active_fill: bool,
    pub max_ticks: usize,
    pub enabled: bool,
}

impl Default for DoubleScrollBarConfig {
    fn default() -> Self {
        Self {
            label: None,
            main_height: 60.0,
            secondary_height: 60.0,
            padx: 0.04,
            frame_rate: 29.97,
            palette: Palette::default(),
            fill_text: String::new(),
            wheel_steps: 1,
            secondary_width_fraction: 0.2,
            confine_to_active_region: false,
            active_fill: true,
            max_ticks: 15,
            enabled: true,
        }
    }
}

/// One of the two stacked bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Main,
    Secondary,
}

/// Main scrollbar with a zoomed secondary scrollbar beneath it
pub struct DoubleScrollBar {
    config: DoubleScrollBarConfig,
    main: ScrollBar,
    secondary: ScrollBar,
    /// Laid-out `(width, main height, total height)`
    layout: Option<(f64, f64, f64)>,
    hovered: Option<Part>,
    dragged: Option<Part>,
    on_frame: Option<FrameCallback>,
}

impl std::fmt::Debug for DoubleScrollBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoubleScrollBar")
            .field("main", &self.main)
            .field("secondary", &self.secondary)
            .field("hovered", &self.hovered)
            .field("dragged", &self.dragged)
            .finish_non_exhaustive()
    }
}

/// Active region centred on `position`, settled inside `range`
fn default_region(range: FrameRange, position: i64, fraction: f64) -> Region {
    settle(range, position, centered_region(range, position, fraction))
}

impl DoubleScrollBar {
    pub fn new(range: FrameRange, start: i64, config: DoubleScrollBarConfig) -> Result<Self, WidgetError> {
        let fraction = config.secondary_width_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(WidgetError::InvalidFraction(fraction));
        }

        let position = range.clamp_position(start);
        let region = default_region(range, position, fraction);
        let main = ScrollBar::new(
            range,
            position,
            ScrollBarConfig {
                label: None,
                frame_rate: config.frame_rate,
                padx: config.padx,
                show_fill: true,
                active_fill: config.active_fill,
                confine_to_active_region: config.confine_to_active_region,
                active_region: Some(region),
                fill_text: config.fill_text.clone(),
                wheel_steps: config.wheel_steps,
                max_ticks: config.max_ticks,
                palette: config.palette.clone(),
                enabled: config.enabled,
                ..Default::default()
            },
        )?;
        let region = main.active_region().unwrap_or(region);
        let secondary = ScrollBar::new(
            FrameRange::new(region.start, region.end)?,
            position,
            ScrollBarConfig {
                label: config.label.clone(),
                frame_rate: config.frame_rate,
                padx: config.padx,
                wheel_steps: config.wheel_steps,
                max_ticks: config.max_ticks,
                palette: config.palette.clone(),
                enabled: config.enabled,
                ..Default::default()
            },
        )?;

        Ok(Self {
            config,
            main,
            secondary,
            layout: None,
            hovered: None,
            dragged: None,
            on_frame: None,
        })
    }

    pub fn on_frame(mut self, callback: impl FnMut(i64) + 'static) -> Self {
        self.on_frame = Some(Box::new(callback));
        self
    }

    pub fn main(&self) -> &ScrollBar {
        &self.main
    }

    pub fn secondary(&self) -> &ScrollBar {
        &self.secondary
    }

    pub fn position(&self) -> i64 {
        self.main.position()
    }

    pub fn range(&self) -> FrameRange {
        self.main.range()
    }

    /// `(position, min, max)` of the main bar
    pub fn status(&self) -> (i64, i64, i64) {
        self.main.status()
    }

    pub fn active_region(&self) -> Option<Region> {
        self.main.active_region()
    }

    pub fn frame_rate(&self) -> f64 {
        self.main.frame_rate()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Sum of the configured bar heights
    pub fn preferred_height(&self) -> f64 {
        self.config.main_height + self.config.secondary_height
    }

    /// Bar currently holding a drag
    pub fn dragged(&self) -> Option<Part> {
        self.dragged
    }

    /// Lay out both bars. The height is split in the configured ratio.
    pub fn resize(&mut self, width: f64, height: f64) {
        let total = self.preferred_height();
        let main_height = if total > 0.0 {
            height * self.config.main_height / total
        } else {
            height / 2.0
        };
        self.layout = Some((width, main_height, height));
        self.main.resize(width, main_height);
        self.secondary.resize(width, height - main_height);
    }

    /// Change the full range. The active region is re-centred on the
    /// position; the frame callback does not fire.
    pub fn set_range(&mut self, min: i64, max: i64) -> Result<ScrollUpdate, WidgetError> {
        let mut update = self.main.set_range(min, max)?;
        let region = default_region(
            self.main.range(),
            self.main.position(),
            self.config.secondary_width_fraction,
        );
        update.merge(self.main.set_active_region(region.start, region.end)?);
        self.secondary.set_range(region.start, region.end)?;
        self.secondary.set_position(self.main.position(), false);
        Ok(update)
    }

    pub fn set_frame_rate(&mut self, frame_rate: f64) -> Result<(), WidgetError> {
        self.main.set_frame_rate(frame_rate)?;
        self.secondary.set_frame_rate(frame_rate)
    }

    pub fn set_position(&mut self, frame: i64, fire_callback: bool) -> ScrollUpdate {
        let update = self.main.set_position(frame, false);
        self.follow_main(update);
        if fire_callback {
            self.emit(update);
        }
        update
    }

    pub fn set_active_region(&mut self, start: i64, end: i64) -> Result<ScrollUpdate, WidgetError> {
        let update = self.main.set_active_region(start, end)?;
        self.follow_main(update);
        Ok(update)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        self.main.set_enabled(enabled);
        self.secondary.set_enabled(enabled);
        if !enabled {
            self.hovered = None;
            self.dragged = None;
        }
    }

    /// Step by `increment` frames.
    ///
    /// With `looped`, stepping back to or past `min` wraps to `max - 1` and
    /// stepping forward to or past `max` wraps to `min + 1`. Returns whether
    /// the unclamped target stayed within `[min, max]`; playback uses this to
    /// notice the end.
    pub fn increment_frame(&mut self, increment: i64, looped: bool, fire_callback: bool) -> bool {
        let (current, min, max) = self.main.status();
        let target = current + increment;
        let new_frame = if looped && increment < 0 && target <= min {
            max - 1
        } else if looped && increment > 0 && target >= max {
            min + 1
        } else {
            target
        };
        self.set_position(new_frame, fire_callback);
        (min..=max).contains(&new_frame)
    }

    /// Feed a pointer event in the coordinates of the whole widget
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ScrollUpdate {
        if !self.config.enabled {
            debug!(?event, "pointer event on disabled double scrollbar");
            return ScrollUpdate::default();
        }
        let Some((width, main_height, height)) = self.layout else {
            warn!(?event, "pointer event before double scrollbar layout");
            return ScrollUpdate::default();
        };
        let part_at = |y: f64| if y < main_height { Part::Main } else { Part::Secondary };

        let update = match event {
            // children are entered once the pointer position is known
            PointerEvent::Enter => ScrollUpdate::default(),
            PointerEvent::Leave => {
                self.hover(None);
                ScrollUpdate::default()
            }
            PointerEvent::Down { y, .. } => {
                let part = part_at(y);
                self.hover(Some(part));
                let update = self.route(part, event);
                if self.bar(part).interaction() == Interaction::Dragging {
                    self.dragged = Some(part);
                }
                update
            }
            PointerEvent::Move { y, .. } => match self.dragged {
                Some(part) => self.route(part, event),
                None => {
                    let part = part_at(y);
                    self.hover(Some(part));
                    self.route(part, event)
                }
            },
            PointerEvent::Up { x, y } => {
                let part = self.dragged.take().unwrap_or_else(|| part_at(y));
                let update = self.route(part, event);
                let inside = (0.0..=width).contains(&x) && (0.0..=height).contains(&y);
                self.hover(inside.then(|| part_at(y)));
                update
            }
            PointerEvent::Wheel { .. } => self.route(self.hovered.unwrap_or(Part::Main), event),
        };
        self.emit(update);
        update
    }

    fn bar(&self, part: Part) -> &ScrollBar {
        match part {
            Part::Main => &self.main,
            Part::Secondary => &self.secondary,
        }
    }

    /// Move the hover to `part`, sending leave and enter events to the bars
    fn hover(&mut self, part: Option<Part>) {
        if self.hovered == part {
            return;
        }
        if let Some(old) = self.hovered {
            self.route(old, PointerEvent::Leave);
        }
        if let Some(new) = part {
            self.route(new, PointerEvent::Enter);
        }
        self.hovered = part;
    }

    fn route(&mut self, part: Part, event: PointerEvent) -> ScrollUpdate {
        match part {
            Part::Main => {
                let update = self.main.handle_pointer(event);
                self.follow_main(update);
                update
            }
            Part::Secondary => {
                let main_height = self.layout.map_or(0.0, |(_, h, _)| h);
                let update = self.secondary.handle_pointer(event.translated(0.0, main_height));
                self.follow_secondary(update)
            }
        }
    }

    /// Bring the secondary bar in line after the main bar changed
    fn follow_main(&mut self, update: ScrollUpdate) {
        if let Some(region) = update.region {
            if let Err(err) = self.secondary.set_range(region.start, region.end) {
                warn!(%err, "active region cannot become the secondary range");
            }
        }
        self.secondary.set_position(self.main.position(), false);
    }

    /// Push a secondary frame change into the main bar; returns the combined update
    fn follow_secondary(&mut self, update: ScrollUpdate) -> ScrollUpdate {
        let Some(frame) = update.frame else {
            return update;
        };
        let main_update = self.main.set_position(frame, false);
        if let Some(region) = main_update.region {
            if let Err(err) = self.secondary.set_range(region.start, region.end) {
                warn!(%err, "active region cannot become the secondary range");
            }
        }
        ScrollUpdate {
            frame: Some(frame),
            region: main_update.region,
        }
    }

    fn emit(&mut self, update: ScrollUpdate) {
        if let (Some(frame), Some(callback)) = (update.frame, self.on_frame.as_mut()) {
            callback(frame);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some((_, main_height, _)) = self.layout else {
            warn!("draw called before double scrollbar layout");
            return;
        };
        self.main.draw(surface);
        self.secondary.draw(&mut Offset::new(surface, 0.0, main_height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Op, Recorder};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 1000x120 double bar over 0..100; each bar is 60 high
    fn double(start: i64) -> DoubleScrollBar {
        let mut bar = DoubleScrollBar::new(FrameRange::new(0, 100).unwrap(), start, DoubleScrollBarConfig::default())
            .unwrap();
        bar.resize(1000.0, 120.0);
        bar
    }

    fn recorded(bar: DoubleScrollBar) -> (DoubleScrollBar, Rc<RefCell<Vec<i64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (bar.on_frame(move |f| sink.borrow_mut().push(f)), seen)
    }

    fn assert_in_step(bar: &DoubleScrollBar) {
        assert_eq!(bar.secondary().position(), bar.position());
        let region = bar.active_region().unwrap();
        assert_eq!(bar.secondary().range(), FrameRange::new(region.start, region.end).unwrap());
    }

    #[test]
    fn test_new_sets_secondary_to_region() {
        let bar = double(50);
        assert_eq!(bar.active_region(), Some(Region::new(40, 60)));
        assert_in_step(&bar);
    }

    #[test]
    fn test_new_rejects_bad_fraction() {
        for fraction in [0.0, -0.5, 1.5, f64::NAN] {
            let config = DoubleScrollBarConfig {
                secondary_width_fraction: fraction,
                ..Default::default()
            };
            assert!(DoubleScrollBar::new(FrameRange::new(0, 100).unwrap(), 50, config).is_err());
        }
    }

    #[test]
    fn test_tiny_fraction_still_gives_usable_region() {
        let config = DoubleScrollBarConfig {
            secondary_width_fraction: 0.01,
            ..Default::default()
        };
        let bar = DoubleScrollBar::new(FrameRange::new(0, 100).unwrap(), 50, config).unwrap();
        let region = bar.active_region().unwrap();
        assert!(region.width() >= 2);
        assert!(region.surrounds(50));
        assert_in_step(&bar);
    }

    #[test]
    fn test_set_position_keeps_bars_in_step() {
        let (mut bar, seen) = recorded(double(50));
        let update = bar.set_position(90, true);
        assert_eq!(update.region, Some(Region::new(71, 91)));
        assert_in_step(&bar);
        assert_eq!(bar.secondary().position(), 90);

        bar.set_position(90, true);
        assert_eq!(*seen.borrow(), vec![90]);
    }

    #[test]
    fn test_increment_wraps_back_from_first_frame() {
        let mut bar = double(1);
        assert!(bar.increment_frame(-1, true, true));
        assert_eq!(bar.position(), 99);
        assert_in_step(&bar);
    }

    #[test]
    fn test_increment_reports_end_without_loop() {
        let mut bar = double(99);
        assert!(bar.increment_frame(1, false, true));
        assert_eq!(bar.position(), 100);
        assert_in_step(&bar);
        assert!(!bar.increment_frame(1, false, true));
        assert_eq!(bar.position(), 100);
        assert!(bar.increment_frame(1, true, true));
        assert_eq!(bar.position(), 1);
        assert_in_step(&bar);
    }

    #[test]
    fn test_increment_no_op_fires_nothing() {
        let (mut bar, seen) = recorded(double(50));
        assert!(bar.increment_frame(0, false, true));
        assert!(seen.borrow().is_empty());
        bar.increment_frame(3, false, true);
        bar.increment_frame(3, false, false);
        assert_eq!(*seen.borrow(), vec![53]);
    }

    #[test]
    fn test_increment_many_steps_stays_in_step() {
        let mut bar = double(50);
        for _ in 0..250 {
            bar.increment_frame(1, true, false);
            assert_in_step(&bar);
        }
        for _ in 0..250 {
            bar.increment_frame(-7, true, false);
            assert_in_step(&bar);
        }
    }

    #[test]
    fn test_drag_main_line_moves_secondary() {
        let (mut bar, seen) = recorded(double(50));
        let x = bar.main().frame_x(50).unwrap();
        bar.handle_pointer(PointerEvent::Down { x, y: 10.0 });
        assert_eq!(bar.dragged(), Some(Part::Main));
        bar.handle_pointer(PointerEvent::Move {
            x: bar.main().frame_x(20).unwrap(),
            y: 10.0,
        });
        assert_eq!(bar.position(), 20);
        assert_in_step(&bar);
        // releasing over the secondary bar ends the drag there
        bar.handle_pointer(PointerEvent::Up { x, y: 90.0 });
        assert_eq!(bar.dragged(), None);
        assert_eq!(*seen.borrow(), vec![20]);
    }

    #[test]
    fn test_drag_secondary_line_moves_main() {
        let (mut bar, seen) = recorded(double(50));
        let x = bar.secondary().frame_x(50).unwrap();
        bar.handle_pointer(PointerEvent::Down { x, y: 70.0 });
        assert_eq!(bar.dragged(), Some(Part::Secondary));

        bar.handle_pointer(PointerEvent::Move {
            x: bar.secondary().frame_x(55).unwrap(),
            y: 70.0,
        });
        assert_eq!(bar.position(), 55);
        assert_in_step(&bar);

        // dragging to the end of the secondary pushes the region along
        bar.handle_pointer(PointerEvent::Move { x: 5000.0, y: 70.0 });
        assert_eq!(bar.position(), 60);
        assert_eq!(bar.active_region(), Some(Region::new(41, 61)));
        assert_in_step(&bar);
        assert_eq!(*seen.borrow(), vec![55, 60]);
    }

    #[test]
    fn test_drag_region_rescales_secondary() {
        let (mut bar, seen) = recorded(double(50));
        let grab = bar.main().frame_x(55).unwrap();
        bar.handle_pointer(PointerEvent::Down { x: grab, y: 10.0 });
        bar.handle_pointer(PointerEvent::Move { x: grab - 46.0, y: 10.0 });
        assert_eq!(bar.active_region(), Some(Region::new(35, 55)));
        assert_eq!(bar.position(), 50);
        assert_in_step(&bar);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_set_range_recentres_region() {
        let mut bar = double(50);
        bar.set_active_region(45, 80).unwrap();
        assert_in_step(&bar);
        bar.set_range(0, 1000).unwrap();
        assert_eq!(bar.active_region(), Some(Region::new(0, 200)));
        assert_in_step(&bar);
    }

    #[test]
    fn test_pointer_before_layout_is_ignored() {
        let mut bar = DoubleScrollBar::new(FrameRange::new(0, 100).unwrap(), 50, DoubleScrollBarConfig::default())
            .unwrap();
        assert!(bar.handle_pointer(PointerEvent::Down { x: 500.0, y: 10.0 }).is_empty());
        assert_eq!(bar.dragged(), None);
    }

    #[test]
    fn test_hover_moves_between_bars() {
        let mut bar = double(50);
        bar.handle_pointer(PointerEvent::Move { x: 300.0, y: 10.0 });
        assert_eq!(bar.main().interaction(), Interaction::Hovering);
        assert_eq!(bar.secondary().interaction(), Interaction::Idle);
        bar.handle_pointer(PointerEvent::Move { x: 300.0, y: 80.0 });
        assert_eq!(bar.main().interaction(), Interaction::Idle);
        assert_eq!(bar.secondary().interaction(), Interaction::Hovering);
        bar.handle_pointer(PointerEvent::Leave);
        assert_eq!(bar.secondary().interaction(), Interaction::Idle);
    }

    #[test]
    fn test_wheel_on_secondary_moves_both() {
        let mut bar = double(50);
        bar.handle_pointer(PointerEvent::Move { x: 300.0, y: 80.0 });
        bar.handle_pointer(PointerEvent::Wheel { steps: 2.0 });
        assert_eq!(bar.position(), 52);
        assert_in_step(&bar);
    }

    #[test]
    fn test_draw_offsets_secondary() {
        let config = DoubleScrollBarConfig {
            label: Some("Time".into()),
            ..Default::default()
        };
        let mut bar = DoubleScrollBar::new(FrameRange::new(0, 100).unwrap(), 50, config).unwrap();
        bar.resize(1000.0, 120.0);
        let mut surface = Recorder::default();
        bar.draw(&mut surface);

        let label = surface.ops.iter().find_map(|op| match op {
            Op::Text(at, text, _) if text == "Time" => Some(*at),
            _ => None,
        });
        assert_eq!(label.map(|p| p.y), Some(120.0));
        // two main lines, one per bar
        assert_eq!(surface.lines_colored(&Palette::default().line), 2);
    }
}
