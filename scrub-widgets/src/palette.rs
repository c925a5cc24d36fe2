//! Widget colours, consumed as opaque hex strings

/// Colour set for scrollbars and sliders
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Main line when idle
    pub line: String,
    /// Main line under the pointer
    pub line_hover: String,
    /// Main line while dragged
    pub line_drag: String,
    /// Active region fill
    pub fill: String,
    /// Active region edges when highlighted
    pub fill_edge: String,
    /// Axis line and tick marks
    pub axis: String,
    /// Tick labels and axis label
    pub text: String,
    /// Slider track, idle and highlighted
    pub track: String,
    pub track_hover: String,
    /// Slider thumb, idle and highlighted
    pub thumb: String,
    pub thumb_active: String,
    /// Used for every element of a disabled widget
    pub disabled: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            line: "#8a8a8a".into(),
            line_hover: "#ffffff".into(),
            line_drag: "#ffd21f".into(),
            fill: "#004000".into(),
            fill_edge: "#00bf00".into(),
            axis: "#ffffff".into(),
            text: "#ffffff".into(),
            track: "#8a8a8a".into(),
            track_hover: "#a7a7a7".into(),
            thumb: "#ffffff".into(),
            thumb_active: "#ffd21f".into(),
            disabled: "#525252".into(),
        }
    }
}
