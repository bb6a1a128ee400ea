//! De werkbank: instellingen plus de drie scèneverzamelingen.
//!
//! Elke verzameling (grafieken, doorsneden, omwentelingslichaam) wordt bij
//! opnieuw opbouwen volledig geleegd en vervangen. De assen zijn statisch en
//! hangen alleen af van de grafiekbreedte.

use serde::Deserialize;

use crate::expr::{ExprError, Formula};
use crate::geom::{
    CrossSectionOptions, CrossSectionPolygon, CrossSectionProfile, CurveSamplerOptions,
    GeomMeshDiagnostics, ParseProfileError, Point3, Polyline2, RevolutionMesh, RevolveOptions,
    Segment3, Tolerance, build_cross_sections_for, build_revolution_mesh_for,
    interval_terminates, sample_formula, sort_by_camera_distance,
};
use crate::orientation::{Orientation, ParseOrientationError};

/// Aantal segmenten waaruit elke coördinaatas bestaat.
pub const AXIS_SEGMENTS: usize = 100;

/// Instelbare invoer van de scène.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub function1: String,
    pub function2: String,
    pub orientation: Orientation,
    pub interval_start: f64,
    pub interval_end: f64,
    /// Afstand tussen twee doorsneden.
    pub step: f64,
    pub profile: CrossSectionProfile,
    /// Functiewaarde waarop de omwentelingsas ligt.
    pub rotation_axis: f64,
    pub graph_width: f64,
    pub sample_count: usize,
    #[serde(skip)]
    pub cross_section: CrossSectionOptions,
    #[serde(skip)]
    pub revolve: RevolveOptions,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            function1: "x+6".to_owned(),
            function2: "x^2".to_owned(),
            orientation: Orientation::X,
            interval_start: -2.0,
            interval_end: 3.0,
            step: 0.2,
            profile: CrossSectionProfile::Square,
            rotation_axis: 0.0,
            graph_width: 120.0,
            sample_count: 2000,
            cross_section: CrossSectionOptions::default(),
            revolve: RevolveOptions::default(),
        }
    }
}

impl SceneSettings {
    /// Controleert de numerieke parameters. Formules worden pas bij het
    /// opbouwen gecontroleerd, zoals in de interface.
    pub fn check(&self) -> Result<(), SceneError> {
        check_interval(self.interval_start, self.interval_end)?;
        check_step(self.step)?;
        check_finite("rotation_axis", self.rotation_axis)?;
        if !self.graph_width.is_finite() || self.graph_width <= 0.0 {
            return Err(SceneError::invalid(
                "graph_width",
                format!("moet positief en eindig zijn, kreeg {}", self.graph_width),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("functie {index} is ongeldig: {source}")]
    FormulaRejected { index: usize, source: ExprError },
    #[error("ongeldige parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error(transparent)]
    UnknownProfile(#[from] ParseProfileError),
    #[error(transparent)]
    UnknownOrientation(#[from] ParseOrientationError),
    #[error("functie-index {0} bestaat niet (verwacht 1 of 2)")]
    FunctionIndex(usize),
}

impl SceneError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    settings: SceneSettings,
    curves: Vec<Polyline2>,
    cross_sections: Vec<CrossSectionPolygon>,
    revolution: Option<RevolutionMesh>,
}

impl Scene {
    #[must_use]
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Vervangt alle instellingen. Bestaande geometrie blijft staan tot de
    /// volgende opbouw.
    pub fn load_settings(&mut self, settings: SceneSettings) -> Result<(), SceneError> {
        settings.check()?;
        self.settings = settings;
        Ok(())
    }

    /// Zet functie 1 of 2.
    pub fn set_function(&mut self, index: usize, text: &str) -> Result<(), SceneError> {
        match index {
            1 => self.settings.function1 = text.to_owned(),
            2 => self.settings.function2 = text.to_owned(),
            other => return Err(SceneError::FunctionIndex(other)),
        }
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.settings.orientation = orientation;
    }

    pub fn set_interval(&mut self, start: f64, end: f64) -> Result<(), SceneError> {
        check_interval(start, end)?;
        self.settings.interval_start = start;
        self.settings.interval_end = end;
        Ok(())
    }

    pub fn set_step(&mut self, step: f64) -> Result<(), SceneError> {
        check_step(step)?;
        self.settings.step = step;
        Ok(())
    }

    pub fn set_profile(&mut self, profile: CrossSectionProfile) {
        self.settings.profile = profile;
    }

    pub fn set_rotation_axis(&mut self, value: f64) -> Result<(), SceneError> {
        check_finite("rotation_axis", value)?;
        self.settings.rotation_axis = value;
        Ok(())
    }

    #[must_use]
    pub fn curves(&self) -> &[Polyline2] {
        &self.curves
    }

    #[must_use]
    pub fn cross_sections(&self) -> &[CrossSectionPolygon] {
        &self.cross_sections
    }

    #[must_use]
    pub fn revolution(&self) -> Option<&RevolutionMesh> {
        self.revolution.as_ref()
    }

    /// Tekent beide functies over de grafiekbreedte.
    ///
    /// Doorsneden worden eerst gewist. Is een van beide formules ongeldig, dan
    /// wordt niets getekend.
    pub fn graph(&mut self) -> Result<(), SceneError> {
        self.clear_cross_sections();
        self.clear_graph();

        let (first, second) = self.compile_functions()?;
        let options =
            CurveSamplerOptions::symmetric(self.settings.graph_width, self.settings.sample_count);
        self.curves = vec![sample_formula(&first, options), sample_formula(&second, options)];

        log::debug!(
            "grafiek opgebouwd: {} en {} punten",
            self.curves[0].len(),
            self.curves[1].len()
        );
        Ok(())
    }

    pub fn clear_graph(&mut self) {
        self.curves.clear();
    }

    /// Bouwt de doorsneden over `[interval_start, interval_end)`.
    pub fn graph_cross_sections(&mut self) -> Result<(), SceneError> {
        self.clear_cross_sections();

        let SceneSettings {
            interval_start,
            interval_end,
            step,
            profile,
            cross_section,
            ..
        } = self.settings;
        if !interval_terminates(interval_start, interval_end, step) {
            log::warn!("doorsneden overgeslagen: interval [{interval_start}, {interval_end}) met stap {step}");
            return Err(SceneError::invalid(
                "step",
                format!("stap {step} doorloopt [{interval_start}, {interval_end}) niet"),
            ));
        }

        let (first, second) = self.compile_functions()?;
        self.cross_sections = build_cross_sections_for(
            &first,
            &second,
            interval_start,
            interval_end,
            step,
            profile,
            cross_section,
        );

        let diagnostics =
            GeomMeshDiagnostics::for_cross_sections(&self.cross_sections, Tolerance::ZERO_LENGTH);
        log::debug!("{} doorsneden ({profile}): {diagnostics}", self.cross_sections.len());
        Ok(())
    }

    pub fn clear_cross_sections(&mut self) {
        self.cross_sections.clear();
    }

    /// Bouwt het omwentelingslichaam rond `rotation_axis`.
    pub fn show_rotation(&mut self) -> Result<(), SceneError> {
        self.clear_rotation();

        let (first, second) = self.compile_functions()?;
        let settings = &self.settings;
        let mesh = build_revolution_mesh_for(
            &first,
            &second,
            settings.interval_start,
            settings.interval_end,
            settings.rotation_axis,
            settings.revolve,
        )
        .ok_or_else(|| {
            SceneError::invalid(
                "interval",
                format!(
                    "omwenteling over [{}, {}] rond {} is niet mogelijk",
                    settings.interval_start, settings.interval_end, settings.rotation_axis
                ),
            )
        })?;

        log::debug!("omwentelingslichaam: {}", mesh.diagnostics());
        self.revolution = Some(mesh);
        Ok(())
    }

    pub fn clear_rotation(&mut self) {
        self.revolution = None;
    }

    /// Doorsneden van ver naar dichtbij gezien vanuit `camera`.
    #[must_use]
    pub fn cross_sections_back_to_front(&self, camera: Point3) -> Vec<CrossSectionPolygon> {
        sort_by_camera_distance(self.cross_sections.clone(), camera, self.settings.orientation)
    }

    /// De x- en y-as, elk opgedeeld in [`AXIS_SEGMENTS`] stukken op `z = 0`.
    #[must_use]
    pub fn axis_lines(&self) -> Vec<Segment3> {
        let width = self.settings.graph_width;
        let inc = width / AXIS_SEGMENTS as f64;
        let half = width / 2.0;
        let mut lines = Vec::with_capacity(2 * AXIS_SEGMENTS);
        for orientation in [Orientation::X, Orientation::Y] {
            for i in 0..AXIS_SEGMENTS {
                let from = -half + i as f64 * inc;
                let to = if i + 1 == AXIS_SEGMENTS { half } else { from + inc };
                lines.push(Segment3::new(
                    orientation.to_world(from, 0.0, 0.0),
                    orientation.to_world(to, 0.0, 0.0),
                ));
            }
        }
        lines
    }

    fn compile_functions(&self) -> Result<(Formula, Formula), SceneError> {
        let orientation = self.settings.orientation;
        let compile = |index: usize, text: &str| {
            Formula::parse(text, orientation).map_err(|source| {
                log::warn!("functie {index} `{text}` wordt niet getekend: {source}");
                SceneError::FormulaRejected { index, source }
            })
        };
        let first = compile(1, &self.settings.function1)?;
        let second = compile(2, &self.settings.function2)?;
        Ok((first, second))
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), SceneError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::invalid(name, format!("moet eindig zijn, kreeg {value}")))
    }
}

fn check_interval(start: f64, end: f64) -> Result<(), SceneError> {
    check_finite("interval_start", start)?;
    check_finite("interval_end", end)?;
    if start >= end {
        return Err(SceneError::invalid(
            "interval",
            format!("begin {start} ligt niet voor eind {end}"),
        ));
    }
    Ok(())
}

fn check_step(step: f64) -> Result<(), SceneError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SceneError::invalid(
            "step",
            format!("moet positief en eindig zijn, kreeg {step}"),
        ));
    }
    Ok(())
}
