#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod expr;
pub mod geom;
pub mod orientation;
pub mod scene;

use std::fmt;

pub use orientation::Orientation;
pub use scene::{Scene, SceneError, SceneSettings};

use geom::{CrossSectionPolygon, CrossSectionProfile, Point3, Segment3};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
enum GeometryItem {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    Polygon {
        anchor: [f64; 3],
        vertices: Vec<[f64; 3]>,
    },
    Mesh {
        vertices: Vec<[f64; 3]>,
        faces: Vec<[u32; 3]>,
    },
}

impl From<&Segment3> for GeometryItem {
    fn from(segment: &Segment3) -> Self {
        GeometryItem::Line {
            start: segment.start.to_array(),
            end: segment.end.to_array(),
        }
    }
}

impl From<&CrossSectionPolygon> for GeometryItem {
    fn from(section: &CrossSectionPolygon) -> Self {
        GeometryItem::Polygon {
            anchor: section.polygon.anchor.to_array(),
            vertices: section
                .polygon
                .vertices()
                .into_iter()
                .map(Point3::to_array)
                .collect(),
        }
    }
}

/// Eén scèneverzameling zoals de renderer die tekent.
#[derive(Debug, Serialize, Clone, PartialEq)]
struct GeometryLayer {
    name: &'static str,
    items: Vec<GeometryItem>,
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    scene: Scene,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            scene: Scene::default(),
        }
    }

    /// Geeft terug of de engine de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Vervang alle scène-instellingen door een JS-object.
    #[wasm_bindgen]
    pub fn load_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: SceneSettings = serde_wasm_bindgen::from_value(settings)
            .map_err(|err| js_error(&format!("ongeldige instellingen: {err}")))?;
        self.scene.load_settings(settings).map_err(to_js_error)
    }

    /// Stel functie 1 of 2 in. De formule wordt pas bij het tekenen gecontroleerd.
    #[wasm_bindgen]
    pub fn set_function(&mut self, index: u32, text: &str) -> Result<(), JsValue> {
        self.scene
            .set_function(index as usize, text)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_orientation(&mut self, orientation: &str) -> Result<(), JsValue> {
        let orientation: Orientation = orientation
            .parse()
            .map_err(|err| to_js_error(SceneError::from(err)))?;
        self.scene.set_orientation(orientation);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_interval(&mut self, start: f64, end: f64) -> Result<(), JsValue> {
        self.scene.set_interval(start, end).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_step(&mut self, step: f64) -> Result<(), JsValue> {
        self.scene.set_step(step).map_err(to_js_error)
    }

    /// Kies het doorsnedeprofiel: `square`, `triangle` of `semicircle`.
    #[wasm_bindgen]
    pub fn set_profile(&mut self, profile: &str) -> Result<(), JsValue> {
        let profile: CrossSectionProfile = profile
            .parse()
            .map_err(|err| to_js_error(SceneError::from(err)))?;
        self.scene.set_profile(profile);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_rotation_axis(&mut self, value: f64) -> Result<(), JsValue> {
        self.scene.set_rotation_axis(value).map_err(to_js_error)
    }

    /// Controleer een formule tegen de huidige oriëntatie.
    #[wasm_bindgen]
    pub fn validate_function(&self, text: &str) -> bool {
        expr::validate(text, self.scene.settings().orientation)
    }

    #[wasm_bindgen]
    pub fn graph(&mut self) -> Result<(), JsValue> {
        self.scene.graph().map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn clear_graph(&mut self) {
        self.scene.clear_graph();
    }

    #[wasm_bindgen]
    pub fn graph_cross_sections(&mut self) -> Result<(), JsValue> {
        self.scene.graph_cross_sections().map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn clear_cross_sections(&mut self) {
        self.scene.clear_cross_sections();
    }

    #[wasm_bindgen]
    pub fn show_rotation(&mut self) -> Result<(), JsValue> {
        self.scene.show_rotation().map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn clear_rotation(&mut self) {
        self.scene.clear_rotation();
    }

    /// Haalt alle geometrie op, per verzameling: assen, grafieken, doorsneden
    /// en het omwentelingslichaam.
    #[wasm_bindgen]
    pub fn get_geometry(&self) -> Result<JsValue, JsValue> {
        let layers = collect_layers(&self.scene);
        debug_log!(
            "geometrie: {} items in {} lagen",
            layers.iter().map(|layer| layer.items.len()).sum::<usize>(),
            layers.len()
        );
        serde_wasm_bindgen::to_value(&layers).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Doorsneden van ver naar dichtbij voor de camera op `(cx, cy, cz)`.
    #[wasm_bindgen]
    pub fn get_sorted_cross_sections(&self, cx: f64, cy: f64, cz: f64) -> Result<JsValue, JsValue> {
        let items = sorted_cross_section_items(&self.scene, Point3::new(cx, cy, cz));
        debug_log!("{} doorsneden gesorteerd voor camera ({cx}, {cy}, {cz})", items.len());
        serde_wasm_bindgen::to_value(&items).map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_layers(scene: &Scene) -> Vec<GeometryLayer> {
    let axes = scene.axis_lines().iter().map(GeometryItem::from).collect();
    let curves = scene
        .curves()
        .iter()
        .flat_map(geom::Polyline2::segments)
        .map(|segment| GeometryItem::from(&segment))
        .collect();
    let cross_sections = scene.cross_sections().iter().map(GeometryItem::from).collect();
    let revolution = scene
        .revolution()
        .map(|mesh| {
            let mesh = mesh.to_geom_mesh();
            GeometryItem::Mesh {
                faces: mesh.faces(),
                vertices: mesh.positions,
            }
        })
        .into_iter()
        .collect();

    vec![
        GeometryLayer {
            name: "axes",
            items: axes,
        },
        GeometryLayer {
            name: "graphs",
            items: curves,
        },
        GeometryLayer {
            name: "cross-sections",
            items: cross_sections,
        },
        GeometryLayer {
            name: "revolution",
            items: revolution,
        },
    ]
}

fn sorted_cross_section_items(scene: &Scene, camera: Point3) -> Vec<GeometryItem> {
    scene
        .cross_sections_back_to_front(camera)
        .iter()
        .map(GeometryItem::from)
        .collect()
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, GeometryItem, collect_layers, sorted_cross_section_items};
    use crate::geom::Point3;

    #[test]
    fn engine_starts_with_empty_scene() {
        let engine = Engine::new();
        assert!(engine.is_initialized());

        let layers = collect_layers(&engine.scene);
        let names: Vec<&str> = layers.iter().map(|layer| layer.name).collect();
        assert_eq!(names, ["axes", "graphs", "cross-sections", "revolution"]);
        assert_eq!(layers[0].items.len(), 200);
        assert!(layers[1..].iter().all(|layer| layer.items.is_empty()));
    }

    #[test]
    fn graph_exports_line_segments() {
        let mut engine = Engine::new();
        assert!(engine.graph().is_ok());

        let layers = collect_layers(&engine.scene);
        assert_eq!(layers[1].items.len(), 2 * 1999);
        match &layers[1].items[0] {
            GeometryItem::Line { start, .. } => assert_eq!(start, &[-60.0, -54.0, 0.0]),
            other => panic!("verwacht Line, kreeg {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_names() {
        let mut engine = Engine::new();
        assert!(engine.set_orientation("z").is_err());
        assert!(engine.set_profile("hexagon").is_err());
        assert!(engine.set_function(0, "x").is_err());
        assert!(engine.set_profile("Triangle").is_ok());
        assert!(engine.set_orientation("y").is_ok());
        assert!(engine.validate_function("y^2"));
        assert!(!engine.validate_function("x^2"));
    }

    #[test]
    fn revolution_exports_one_mesh() {
        let mut engine = Engine::new();
        assert!(engine.show_rotation().is_ok());

        let layers = collect_layers(&engine.scene);
        assert_eq!(layers[3].items.len(), 1);
        match &layers[3].items[0] {
            GeometryItem::Mesh { vertices, faces } => {
                assert_eq!(vertices.len(), 2 * 18 * 31);
                assert!(faces.iter().flatten().all(|&i| (i as usize) < vertices.len()));
            }
            other => panic!("verwacht Mesh, kreeg {other:?}"),
        }

        engine.clear_rotation();
        assert!(collect_layers(&engine.scene)[3].items.is_empty());
    }

    #[test]
    fn sorted_cross_sections_are_polygons() {
        let mut engine = Engine::new();
        assert!(engine.set_step(0.5).is_ok());
        assert!(engine.graph_cross_sections().is_ok());

        let items = sorted_cross_section_items(&engine.scene, Point3::new(10.0, 0.0, -50.0));
        assert_eq!(items.len(), 10);
        match &items[0] {
            GeometryItem::Polygon { anchor, vertices } => {
                assert_eq!(anchor[0], -2.0);
                assert_eq!(vertices.len(), 4);
            }
            other => panic!("verwacht Polygon, kreeg {other:?}"),
        }
    }
}
