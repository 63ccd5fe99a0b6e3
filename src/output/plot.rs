//! Concentration-time charts with `plotters`
//!
//! The efficacy window is drawn as a shaded band bounded by two horizontal lines;
//! each profile of the session becomes one labeled curve, in session order.
//!
//! ```rust,ignore
//! use multidose::output::plot::{plot_engine, PlotConfig};
//!
//! plot_engine(&engine, "regimens.png", None)?;
//!
//! let mut config = PlotConfig::default();
//! config.title = "Twice daily vs once daily".to_string();
//! plot_engine(&engine, "regimens.svg", Some(&config))?;
//! ```

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::legend_label;
use crate::error::MultiDoseError;
use crate::profile::{EfficacyWindow, Session};
use crate::simulator::MultipleDosing;

/// Chart appearance
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,
    /// Image height in pixels (default: 768)
    pub height: u32,
    /// Chart caption (default: "Multiple dosing profiles")
    pub title: String,
    /// X-axis label (default: "Time (hr)")
    pub xlabel: String,
    /// Y-axis label (default: "Sample Concentration")
    pub ylabel: String,
    /// Curve colors, one per profile; falls back to the default palette
    pub colors: Option<Vec<RGBColor>>,
    /// Fill of the efficacy band (default: light grey)
    pub band_color: RGBColor,
    /// Background color (default: WHITE)
    pub background: RGBColor,
    /// Curve width in pixels (default: 2)
    pub line_width: u32,
    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Multiple dosing profiles".to_string(),
            xlabel: "Time (hr)".to_string(),
            ylabel: "Sample Concentration".to_string(),
            colors: None,
            band_color: RGBColor(128, 128, 128),
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

impl PlotConfig {
    fn color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.colors {
            if index < colors.len() {
                return colors[index];
            }
        }

        let palette = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),
            RGBColor(128, 0, 128),
        ];
        palette[index % palette.len()]
    }
}

/// Plot every profile of the engine's session
pub fn plot_engine(
    engine: &MultipleDosing,
    path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), MultiDoseError> {
    plot_session(engine.efficacy_window(), engine.session(), path, config)
}

/// Plot `session` against the efficacy `window`
///
/// Paths ending in `.svg` use the SVG backend, anything else is rendered as a bitmap.
///
/// # Errors
///
/// [`MultiDoseError::EmptyCollection`] for an empty session, [`MultiDoseError::Plot`]
/// for backend failures.
pub fn plot_session(
    window: EfficacyWindow,
    session: &Session,
    path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), MultiDoseError> {
    session.require_profiles("plot")?;
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);
    let path = path.as_ref();
    let size = (config.width, config.height);

    let result = if path.extension().is_some_and(|ext| ext == "svg") {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_on_area(&root, window, session, config)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_on_area(&root, window, session, config)
    };

    result.map_err(|e| MultiDoseError::Plot(e.to_string()))?;
    tracing::debug!(path = %path.display(), profiles = session.len(), "wrote plot");
    Ok(())
}

/// Vertical extent covering zero, the window and every concentration, padded by 10%
fn y_range(window: EfficacyWindow, session: &Session) -> (f64, f64) {
    let (lo, hi) = session
        .iter()
        .flat_map(|p| p.conc().iter().copied())
        .fold((window.min.min(0.0), window.max), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        });
    if hi > lo {
        (lo, hi + 0.1 * (hi - lo))
    } else {
        (lo, lo + 1.0)
    }
}

fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    window: EfficacyWindow,
    session: &Session,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let times = session.iter().flat_map(|p| p.tobs().iter().copied());
    let (t_min, t_max) = times.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
        (lo.min(t), hi.max(t))
    });
    let t_max = if t_max > t_min { t_max } else { t_min + 1.0 };

    let (y_min, y_max) = y_range(window, session);

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(t_min..t_max, y_min..y_max)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);
    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    chart.draw_series(std::iter::once(Rectangle::new(
        [(t_min, window.min), (t_max, window.max)],
        config.band_color.mix(0.2).filled(),
    )))?;
    for bound in [window.min, window.max] {
        chart.draw_series(LineSeries::new(
            [(t_min, bound), (t_max, bound)],
            BLACK.stroke_width(1),
        ))?;
    }

    let line_width = config.line_width;
    for (i, profile) in session.iter().enumerate() {
        let color = config.color(i);
        chart
            .draw_series(LineSeries::new(
                profile.points(),
                color.stroke_width(line_width),
            ))?
            .label(legend_label(profile))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(line_width))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
