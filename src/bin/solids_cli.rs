#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("solids_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use solids_engine::Orientation;
    use solids_engine::expr;
    use solids_engine::geom::{
        CrossSectionOptions, CrossSectionProfile, GeomMesh, GeomMeshDiagnostics, Polygon3,
        RevolveOptions, Tolerance, build_cross_sections, build_revolution_mesh,
    };
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"solids_cli (solids-engine)

USAGE:
  solids_cli list
  solids_cli eval <formula> <value> [--y]
  solids_cli run <scenario|all> [options]

SCENARIOS:
  revolve_line_parabola
  revolve_sqrt_offset_axis
  sections_square
  sections_triangle
  sections_semicircle

OPTIONS (eval):
  --y                Use `y` as the variable instead of `x`

OPTIONS (run):
  --out-dir <dir>    Write <scenario>.obj and/or <scenario>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single scenario only)
  --snap <path>      Write snapshot (single scenario only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "eval" => cmd_eval(&mut args),
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            println!("{}", scenario.name());
        }
    }

    fn cmd_eval(args: &mut Args) -> Result<(), String> {
        let formula = args.next().ok_or("missing formula")?;
        let raw_value = args.value("<value>")?;
        let value: f64 = raw_value
            .parse()
            .map_err(|e| format!("invalid value `{raw_value}`: {e}"))?;

        let mut orientation = Orientation::X;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--y" => orientation = Orientation::Y,
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let result = expr::evaluate(&formula, orientation, value).map_err(|e| e.to_string())?;
        println!("{result}");
        Ok(())
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut write_obj = true;
        let mut write_snap = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => overwrite = true,
                "--no-obj" => write_obj = false,
                "--no-snap" => write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !write_obj && !write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            if scenario_name == "all" {
                for scenario in Scenario::ALL {
                    run_one_scenario_to_dir(*scenario, dir, write_obj, write_snap, overwrite)?;
                }
                return Ok(());
            }

            let scenario = Scenario::from_name(scenario_name.as_str())
                .ok_or_else(|| unknown_scenario(&scenario_name))?;
            return run_one_scenario_to_dir(scenario, dir, write_obj, write_snap, overwrite);
        }

        if scenario_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let scenario = Scenario::from_name(scenario_name.as_str())
            .ok_or_else(|| unknown_scenario(&scenario_name))?;
        let output = run_scenario(scenario)?;

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{}", output.snapshot);
        }

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &output.mesh, output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!("{}: {}", output.name, output.diagnostics);
        Ok(())
    }

    fn run_one_scenario_to_dir(
        scenario: Scenario,
        dir: &Path,
        write_obj: bool,
        write_snap: bool,
        overwrite: bool,
    ) -> Result<(), String> {
        let output = run_scenario(scenario)?;

        if write_snap {
            let path = dir.join(format!("{}.snap", output.name));
            write_text_file(&path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        if write_obj {
            let path = dir.join(format!("{}.obj", output.name));
            write_obj_file(&path, &output.mesh, output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        eprintln!("{}: {}", output.name, output.diagnostics);
        Ok(())
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = String::new();
        let _ = write!(msg, "unknown scenario `{name}`\n\navailable scenarios:\n");
        for scenario in Scenario::ALL {
            let _ = writeln!(msg, "  {}", scenario.name());
        }
        msg
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, mesh: &GeomMesh, name: &str, overwrite: bool) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# solids-engine solids_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        for p in mesh.positions.iter().copied() {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
        }

        for [a, b, c] in mesh.faces() {
            writeln!(w, "f {} {} {}", a + 1, b + 1, c + 1).map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let _ = write!(out, "{prefix} ");
        write_f64(out, v[0]);
        out.push(' ');
        write_f64(out, v[1]);
        out.push(' ');
        write_f64(out, v[2]);
        out.push('\n');
    }

    fn write_diagnostics(out: &mut String, diag: &GeomMeshDiagnostics) {
        let _ = writeln!(out, "diag.vertex_count {}", diag.vertex_count);
        let _ = writeln!(out, "diag.triangle_count {}", diag.triangle_count);
        let _ = writeln!(out, "diag.side_quad_count {}", diag.side_quad_count);
        let _ = writeln!(out, "diag.cap_quad_count {}", diag.cap_quad_count);
        let _ = writeln!(out, "diag.non_finite_vertex_count {}", diag.non_finite_vertex_count);
        let _ = writeln!(out, "diag.degenerate_face_count {}", diag.degenerate_face_count);
        let _ = writeln!(out, "diag.warning_count {}", diag.warnings.len());
        for (idx, warning) in diag.warnings.iter().enumerate() {
            let _ = writeln!(out, "diag.warning.{idx} {warning}");
        }
    }

    fn write_mesh(out: &mut String, mesh: &GeomMesh) {
        let _ = writeln!(out, "mesh.positions {}", mesh.vertex_count());
        for p in mesh.positions.iter().copied() {
            write_vec3_line(out, "p", p);
        }

        let _ = writeln!(out, "mesh.indices {}", mesh.indices.len());
        for [a, b, c] in mesh.faces() {
            let _ = writeln!(out, "i {a} {b} {c}");
        }
    }

    fn snapshot(op: &str, sections: impl FnOnce(&mut String)) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# solids-engine snapshot v1");
        let _ = writeln!(out, "op {op}");
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        sections(&mut out);
        normalize_snapshot_text(&out)
    }

    /// Fan-triangulates convex polygons into one mesh.
    fn polygons_to_mesh(polygons: &[Polygon3]) -> GeomMesh {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for polygon in polygons {
            let base = positions.len() as u32;
            positions.extend(polygon.vertices().into_iter().map(|p| p.to_array()));
            for k in 1..polygon.vertex_count().saturating_sub(1) as u32 {
                indices.extend_from_slice(&[base, base + k, base + k + 1]);
            }
        }
        GeomMesh::new(positions, indices)
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scenario {
        RevolveLineParabola,
        RevolveSqrtOffsetAxis,
        SectionsSquare,
        SectionsTriangle,
        SectionsSemicircle,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::RevolveLineParabola,
            Scenario::RevolveSqrtOffsetAxis,
            Scenario::SectionsSquare,
            Scenario::SectionsTriangle,
            Scenario::SectionsSemicircle,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::RevolveLineParabola => "revolve_line_parabola",
                Scenario::RevolveSqrtOffsetAxis => "revolve_sqrt_offset_axis",
                Scenario::SectionsSquare => "sections_square",
                Scenario::SectionsTriangle => "sections_triangle",
                Scenario::SectionsSemicircle => "sections_semicircle",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            Self::ALL.iter().copied().find(|scenario| scenario.name() == name)
        }
    }

    struct ScenarioOutput {
        name: &'static str,
        mesh: GeomMesh,
        diagnostics: GeomMeshDiagnostics,
        snapshot: String,
    }

    fn run_scenario(scenario: Scenario) -> Result<ScenarioOutput, String> {
        match scenario {
            Scenario::RevolveLineParabola => {
                scenario_revolve(scenario, "x+6", "x^2", Orientation::X, -2.0, 3.0, 0.0)
            }
            Scenario::RevolveSqrtOffsetAxis => {
                scenario_revolve(scenario, "sqrt(y)", "0", Orientation::Y, 0.0, 4.0, -1.0)
            }
            Scenario::SectionsSquare => scenario_sections(scenario, CrossSectionProfile::Square),
            Scenario::SectionsTriangle => scenario_sections(scenario, CrossSectionProfile::Triangle),
            Scenario::SectionsSemicircle => {
                scenario_sections(scenario, CrossSectionProfile::Semicircle)
            }
        }
    }

    fn scenario_revolve(
        scenario: Scenario,
        f1: &str,
        f2: &str,
        orientation: Orientation,
        start: f64,
        end: f64,
        axis: f64,
    ) -> Result<ScenarioOutput, String> {
        let revolution =
            build_revolution_mesh(f1, f2, orientation, start, end, axis, RevolveOptions::default())
                .ok_or_else(|| format!("revolution of `{f1}` and `{f2}` failed"))?;
        let mesh = revolution.to_geom_mesh();
        mesh.validate()?;
        let diagnostics = revolution.diagnostics();

        let snap = snapshot(scenario.name(), |out| {
            let _ = writeln!(out, "orientation {orientation}");
            let _ = writeln!(out, "rows {} cols {}", revolution.row_count(), revolution.col_count());
            write_diagnostics(out, &diagnostics);
            write_mesh(out, &mesh);
        });

        Ok(ScenarioOutput {
            name: scenario.name(),
            mesh,
            diagnostics,
            snapshot: snap,
        })
    }

    fn scenario_sections(
        scenario: Scenario,
        profile: CrossSectionProfile,
    ) -> Result<ScenarioOutput, String> {
        let sections = build_cross_sections(
            "x+6",
            "x^2",
            Orientation::X,
            -2.0,
            3.0,
            0.5,
            profile,
            CrossSectionOptions::default(),
        );
        if sections.is_empty() {
            return Err(format!("no {profile} cross-sections were built"));
        }
        let polygons: Vec<Polygon3> = sections.iter().map(|s| s.polygon.clone()).collect();
        let mesh = polygons_to_mesh(&polygons);
        mesh.validate()?;

        let mut diagnostics =
            GeomMeshDiagnostics::for_cross_sections(&sections, Tolerance::ZERO_LENGTH);
        diagnostics.triangle_count = mesh.triangle_count();

        let snap = snapshot(scenario.name(), |out| {
            let _ = writeln!(out, "profile {profile}");
            let _ = writeln!(out, "sections {}", sections.len());
            for section in &sections {
                let _ = write!(out, "section ");
                write_f64(out, section.station);
                out.push(' ');
                write_f64(out, section.half_width);
                out.push('\n');
            }
            write_diagnostics(out, &diagnostics);
            write_mesh(out, &mesh);
        });

        Ok(ScenarioOutput {
            name: scenario.name(),
            mesh,
            diagnostics,
            snapshot: snap,
        })
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }

}
