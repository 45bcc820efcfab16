#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = native::run() {
        eprintln!("icicle_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use icicle_engine::geom::{Point3, Transform, Vec3};
    use icicle_engine::icicle::{CapStyle, Direction, EditMesh, IcicleConfig, run_on_host};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;
    use std::path::{Path, PathBuf};

    const USAGE: &str = r"icicle_cli (icicle-engine)

USAGE:
  icicle_cli list
  icicle_cli config
  icicle_cli run <scenario|all> [options]

SCENARIOS:
  roof_edge
  square_outline
  sloped_gutter
  vertical_post
  rotated_eave

OPTIONS (run):
  --out-dir <dir>          Write <scenario>.obj to this dir (required for `all`)
  --obj <path>             Write OBJ (single scenario only)
  --config <path>          Load settings from a JSON file (other flags override it)
  --seed <n>               Seed the generator (default: random)
  --direction <up|down>    Override the cone direction
  --cap <none|ngon|fan>    Override the cap style
  --subdivisions <n>       Override the maximum bend rings
  --vertices <n>           Override the base ring vertex count
  --all-edges              Ignore the selection and use every edge
  --overwrite              Overwrite existing output files
  -h, --help               Show this help
";

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                for scenario in Scenario::ALL {
                    println!("{}", scenario.name());
                }
                Ok(())
            }
            "config" => {
                let json = IcicleConfig::default()
                    .to_json_pretty()
                    .map_err(|e| e.to_string())?;
                println!("{json}");
                Ok(())
            }
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

    struct RunOptions {
        out_dir: Option<PathBuf>,
        obj_path: Option<PathBuf>,
        overwrite: bool,
        seed: Option<u64>,
        config: IcicleConfig,
        help: bool,
    }

    fn parse_run_options(args: &mut Args) -> Result<RunOptions, String> {
        // --config is the base layer; flag overrides apply on top in any order.
        let config = match args.find_value("--config")? {
            Some(path) => IcicleConfig::from_json_file(&path).map_err(|e| e.to_string())?,
            None => IcicleConfig::default(),
        };
        let mut opts = RunOptions {
            out_dir: None,
            obj_path: None,
            overwrite: false,
            seed: None,
            config,
            help: false,
        };
        let config = &mut opts.config;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => opts.out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => opts.obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--config" => {
                    args.value("--config")?;
                }
                "--seed" => opts.seed = Some(parse_number(&args.value("--seed")?, "--seed")?),
                "--direction" => {
                    config.direction = match args.value("--direction")?.as_str() {
                        "up" => Direction::Up,
                        "down" => Direction::Down,
                        other => return Err(format!("unknown direction `{other}`")),
                    };
                }
                "--cap" => {
                    config.cap_style = match args.value("--cap")?.as_str() {
                        "none" => CapStyle::None,
                        "ngon" => CapStyle::NGon,
                        "fan" => CapStyle::TriangleFan,
                        other => return Err(format!("unknown cap style `{other}`")),
                    };
                }
                "--subdivisions" => {
                    config.max_subdivisions =
                        parse_number(&args.value("--subdivisions")?, "--subdivisions")?;
                }
                "--vertices" => {
                    config.base_vertex_count = parse_number(&args.value("--vertices")?, "--vertices")?;
                }
                "--all-edges" => config.only_selected_edges = false,
                "--overwrite" => opts.overwrite = true,
                "-h" | "--help" => {
                    opts.help = true;
                    return Ok(opts);
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }
        Ok(opts)
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;
        let RunOptions {
            out_dir,
            obj_path,
            overwrite,
            seed,
            config,
            help,
        } = parse_run_options(args)?;
        if help {
            print_usage();
            return Ok(());
        }

        let seed = seed.unwrap_or_else(rand::random);
        log::info!("seed {seed}");

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() {
                return Err("use either --out-dir or --obj (not both)".to_string());
            }
            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            let scenarios: Vec<Scenario> = if scenario_name == "all" {
                Scenario::ALL.to_vec()
            } else {
                vec![Scenario::from_str(&scenario_name).ok_or_else(|| unknown_scenario(&scenario_name))?]
            };
            for scenario in scenarios {
                let path = dir.join(format!("{}.obj", scenario.name()));
                run_scenario(scenario, &config, seed, Some(&path), overwrite)?;
            }
            return Ok(());
        }

        if scenario_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }
        let scenario =
            Scenario::from_str(&scenario_name).ok_or_else(|| unknown_scenario(&scenario_name))?;
        run_scenario(scenario, &config, seed, obj_path.as_deref(), overwrite)
    }

    fn run_scenario(
        scenario: Scenario,
        config: &IcicleConfig,
        seed: u64,
        obj: Option<&Path>,
        overwrite: bool,
    ) -> Result<(), String> {
        let mut host = scenario.build();
        let mut rng = StdRng::seed_from_u64(seed);
        let diagnostics = run_on_host(&mut host, config, &mut rng);

        let size = host.mesh.bbox().map(|b| b.size()).unwrap_or(Vec3::ZERO);
        eprintln!(
            "{}: vertices={} faces={} size={:.3}x{:.3}x{:.3} | {}",
            scenario.name(),
            host.mesh.vertex_count(),
            host.mesh.face_count(),
            size.x,
            size.y,
            size.z,
            diagnostics.summary()
        );
        for line in diagnostics.report_lines() {
            eprintln!("  {line}");
        }

        if let Some(path) = obj {
            if path.exists() && !overwrite {
                return Err(format!(
                    "refusing to overwrite existing file {} (use --overwrite)",
                    path.display()
                ));
            }
            host.write_obj(path, scenario.name())
                .map_err(|e| format!("write {}: {e}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        Ok(())
    }

    fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T, String> {
        value
            .parse()
            .map_err(|_| format!("invalid value `{value}` for {flag}"))
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = format!("unknown scenario `{name}`\n\navailable scenarios:\n");
        for scenario in Scenario::ALL {
            msg.push_str("  ");
            msg.push_str(scenario.name());
            msg.push('\n');
        }
        msg
    }

    #[derive(Debug, Clone, Copy)]
    enum Scenario {
        RoofEdge,
        SquareOutline,
        SlopedGutter,
        VerticalPost,
        RotatedEave,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::RoofEdge,
            Scenario::SquareOutline,
            Scenario::SlopedGutter,
            Scenario::VerticalPost,
            Scenario::RotatedEave,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::RoofEdge => "roof_edge",
                Scenario::SquareOutline => "square_outline",
                Scenario::SlopedGutter => "sloped_gutter",
                Scenario::VerticalPost => "vertical_post",
                Scenario::RotatedEave => "rotated_eave",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            Self::ALL.iter().copied().find(|s| s.name() == name)
        }

        fn build(self) -> EditMesh {
            match self {
                Scenario::RoofEdge => {
                    let mut mesh = EditMesh::new();
                    mesh.add_polyline(&[Point3::new(0.0, 0.0, 3.0), Point3::new(4.0, 0.0, 3.0)], false);
                    mesh
                }
                Scenario::SquareOutline => {
                    let mut mesh = EditMesh::new();
                    mesh.add_polyline(
                        &[
                            Point3::new(0.0, 0.0, 2.5),
                            Point3::new(2.0, 0.0, 2.5),
                            Point3::new(2.0, 2.0, 2.5),
                            Point3::new(0.0, 2.0, 2.5),
                        ],
                        true,
                    );
                    mesh
                }
                Scenario::SlopedGutter => {
                    let mut mesh = EditMesh::new();
                    mesh.add_polyline(&[Point3::new(0.0, 0.0, 3.0), Point3::new(3.0, 1.0, 2.2)], false);
                    mesh
                }
                Scenario::VerticalPost => {
                    let mut mesh = EditMesh::new();
                    mesh.add_polyline(&[Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 3.0)], false);
                    mesh.add_polyline(&[Point3::new(0.0, 0.0, 3.0), Point3::new(0.03, 0.0, 3.0)], false);
                    mesh.add_polyline(&[Point3::new(0.0, 0.0, 3.0), Point3::new(2.0, 0.0, 3.0)], false);
                    mesh
                }
                Scenario::RotatedEave => {
                    let world = Transform::translate(Vec3::new(1.0, 1.0, 2.0))
                        * Transform::rotate_z(std::f64::consts::FRAC_PI_4);
                    let mut mesh = EditMesh::with_world(world);
                    mesh.add_polyline(&[Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)], false);
                    mesh
                }
            }
        }
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
            self.next().ok_or_else(|| format!("missing value for {flag}"))
        }

        /// Value of the last `flag` among the remaining args, without consuming them.
        fn find_value(&self, flag: &str) -> Result<Option<String>, String> {
            let rest = &self.args[self.pos.min(self.args.len())..];
            let mut found = None;
            let mut i = 0;
            while i < rest.len() {
                if rest[i] == flag {
                    let value = rest.get(i + 1).ok_or_else(|| format!("missing value for {flag}"))?;
                    found = Some(value.clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            Ok(found)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Args {
            Args::new(list.iter().map(|s| s.to_string()).collect())
        }

        #[test]
        fn flags_override_config_file_in_any_position() {
            let dir = std::env::temp_dir().join(format!("icicle-cli-{}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            let path = dir.join("settings.json");
            fs::write(&path, r#"{ "direction": "up", "maxSubdivisions": 0, "baseVertexCount": 12 }"#)
                .unwrap();
            let path = path.display().to_string();

            let mut before = args(&["--direction", "down", "--config", &path, "--vertices", "5"]);
            let opts = parse_run_options(&mut before).unwrap();
            assert_eq!(opts.config.direction, Direction::Down);
            assert_eq!(opts.config.base_vertex_count, 5);
            assert_eq!(opts.config.max_subdivisions, 0);

            let mut only_file = args(&["--config", &path, "--seed", "3"]);
            let opts = parse_run_options(&mut only_file).unwrap();
            assert_eq!(opts.config.direction, Direction::Up);
            assert_eq!(opts.config.base_vertex_count, 12);
            assert_eq!(opts.seed, Some(3));

            let _ = fs::remove_dir_all(&dir);
        }

        #[test]
        fn missing_config_value_is_an_error() {
            assert!(parse_run_options(&mut args(&["--config"])).is_err());
            assert!(parse_run_options(&mut args(&[])).unwrap().config == IcicleConfig::default());
        }
    }
}
