//! Toolpath commands and their G-code rendering
//!
//! Paths and groups describe their output as [`MotionCommand`]s. The
//! [`ToolpathEmitter`] turns a command list into G-code text: one unit header,
//! every command in order, then a return to the coordinate origin.

use crate::error::CamToolResult;
use crate::group::Group;
use crate::point::Coord;
use epsplot_core::MeasurementSystem;
use epsplot_settings::PlotSettings;

/// One step of a pen plotter toolpath
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    /// Lift the pen off the surface
    PenUp,
    /// Select the travel feed rate
    TravelFeed,
    /// Rapid move with the pen lifted
    Travel(Coord),
    /// Lower the pen onto the surface
    PenDown,
    /// Linear move with the pen down
    Draw(Coord),
}

/// Renders motion commands as G-code
#[derive(Debug, Clone)]
pub struct ToolpathEmitter {
    units: MeasurementSystem,
    travel_feed: f64,
    pen_up: String,
    pen_down: String,
}

impl ToolpathEmitter {
    /// Create an emitter for the named unit system (`"mm"`, `"in"` or `"inches"`)
    ///
    /// Travel feed and pen commands start from the [`PlotSettings`] defaults.
    pub fn new(units: &str) -> CamToolResult<Self> {
        let defaults = PlotSettings::default();
        Ok(Self {
            units: units.parse()?,
            travel_feed: defaults.travel_feed,
            pen_up: defaults.pen_up,
            pen_down: defaults.pen_down,
        })
    }

    /// Create an emitter from validated plot settings
    pub fn from_settings(settings: &PlotSettings) -> CamToolResult<Self> {
        settings.validate()?;
        Ok(Self::new(&settings.units)?
            .with_travel_feed(settings.travel_feed)
            .with_pen_commands(&settings.pen_up, &settings.pen_down))
    }

    pub fn with_travel_feed(mut self, feed: f64) -> Self {
        self.travel_feed = feed;
        self
    }

    pub fn with_pen_commands(mut self, up: &str, down: &str) -> Self {
        self.pen_up = up.to_string();
        self.pen_down = down.to_string();
        self
    }

    pub fn units(&self) -> MeasurementSystem {
        self.units
    }

    /// Unit selection line
    pub fn header(&self) -> String {
        let name = match self.units {
            MeasurementSystem::Metric => "millimeters",
            MeasurementSystem::Imperial => "inches",
        };
        format!("{} ; Set units to {}", self.units.gcode_word(), name)
    }

    /// Final move back to the coordinate origin
    pub fn footer(&self) -> String {
        "G0 X0 Y0 ; Return to origin".to_string()
    }

    /// Render a single command as one line of G-code
    pub fn render(&self, command: &MotionCommand) -> String {
        match command {
            MotionCommand::PenUp => self.pen_up.clone(),
            MotionCommand::TravelFeed => format!("F{:.0}", self.travel_feed),
            MotionCommand::Travel(at) => format!("G0 X{} Y{}", coord(at.x), coord(at.y)),
            MotionCommand::PenDown => self.pen_down.clone(),
            MotionCommand::Draw(at) => format!("G1 X{} Y{}", coord(at.x), coord(at.y)),
        }
    }

    /// Header, every command, footer
    pub fn emit_lines(&self, commands: &[MotionCommand]) -> Vec<String> {
        let mut lines = Vec::with_capacity(commands.len() + 2);
        lines.push(self.header());
        lines.extend(commands.iter().map(|c| self.render(c)));
        lines.push(self.footer());
        lines
    }

    /// G-code text for a command list, one command per line
    pub fn emit(&self, commands: &[MotionCommand]) -> String {
        let mut gcode = self.emit_lines(commands).join("\n");
        gcode.push('\n');
        gcode
    }

    /// G-code text for every path of a sampled group
    pub fn emit_group(&self, group: &Group) -> CamToolResult<String> {
        let commands = group.toolpath_commands()?;
        tracing::debug!(
            paths = group.len(),
            commands = commands.len(),
            units = %self.units,
            "emitting toolpath"
        );
        Ok(self.emit(&commands))
    }
}

/// Fixed three-decimal coordinate without a negative zero
fn coord(value: f64) -> String {
    let text = format!("{:.3}", value);
    if text == "-0.000" {
        "0.000".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CamToolError;
    use lyon::geom::point;

    fn sample_commands() -> Vec<MotionCommand> {
        vec![
            MotionCommand::PenUp,
            MotionCommand::TravelFeed,
            MotionCommand::Travel(point(1.0, 2.0)),
            MotionCommand::PenDown,
            MotionCommand::Draw(point(3.14159, -0.0001)),
            MotionCommand::PenUp,
        ]
    }

    #[test]
    fn test_render_lines() {
        let emitter = ToolpathEmitter::new("mm").unwrap();
        let lines = emitter.emit_lines(&sample_commands());
        assert_eq!(
            lines,
            vec![
                "G21 ; Set units to millimeters",
                "M5",
                "F3000",
                "G0 X1.000 Y2.000",
                "M3",
                "G1 X3.142 Y0.000",
                "M5",
                "G0 X0 Y0 ; Return to origin",
            ]
        );
    }

    #[test]
    fn test_unit_header_only_difference() {
        let mm = ToolpathEmitter::new("mm").unwrap().emit_lines(&sample_commands());
        let inches = ToolpathEmitter::new("inches")
            .unwrap()
            .emit_lines(&sample_commands());
        assert_eq!(inches[0], "G20 ; Set units to inches");
        assert_ne!(mm[0], inches[0]);
        assert_eq!(mm[1..], inches[1..]);
    }

    #[test]
    fn test_unknown_units_rejected() {
        let err = ToolpathEmitter::new("cm").unwrap_err();
        assert!(matches!(err, CamToolError::Units(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_custom_pen_commands() {
        let emitter = ToolpathEmitter::new("in")
            .unwrap()
            .with_pen_commands("M300 S50", "M300 S30")
            .with_travel_feed(1200.0);
        assert_eq!(emitter.render(&MotionCommand::PenUp), "M300 S50");
        assert_eq!(emitter.render(&MotionCommand::PenDown), "M300 S30");
        assert_eq!(emitter.render(&MotionCommand::TravelFeed), "F1200");
    }

    #[test]
    fn test_from_settings_validates() {
        let settings = PlotSettings {
            units: "furlongs".to_string(),
            ..PlotSettings::default()
        };
        assert!(matches!(
            ToolpathEmitter::from_settings(&settings),
            Err(CamToolError::Settings(_))
        ));

        let settings = PlotSettings {
            pen_up: "G0 Z5".to_string(),
            ..PlotSettings::default()
        };
        let emitter = ToolpathEmitter::from_settings(&settings).unwrap();
        assert_eq!(emitter.render(&MotionCommand::PenUp), "G0 Z5");
    }

    #[test]
    fn test_emit_ends_with_newline() {
        let emitter = ToolpathEmitter::new("mm").unwrap();
        let gcode = emitter.emit(&[]);
        assert_eq!(gcode, "G21 ; Set units to millimeters\nG0 X0 Y0 ; Return to origin\n");
    }
}
