//! Schematica CLI - validate, lay out and render model-generated circuit designs.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use schematica::{
    layout, parse_design, route_connections, CircuitDesign, CircuitDesigner, CircuitGraph,
    CircuitPlan, DesignOptions, LayoutConfig, OpenAiClient, RouteConfig, SvgRenderer,
    DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

#[derive(Parser)]
#[command(name = "schematica")]
#[command(about = "Circuit design assistant: validate, lay out and render schematics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a raw model completion into a circuit plan
    Validate {
        /// Path to a completion dump, or "-" for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Compute canvas positions for a validated plan
    Layout {
        /// Path to a completion dump, or "-" for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Override the maximum canvas width
        #[arg(long)]
        max_width: Option<f64>,

        /// Override the maximum canvas height
        #[arg(long)]
        max_height: Option<f64>,
    },

    /// Render a validated plan to an SVG schematic
    Render {
        /// Path to a completion dump, or "-" for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output SVG file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Ask the model for a circuit design and validate the result
    Design {
        /// Natural-language circuit request
        prompt: String,

        /// OpenAI API key (falls back to OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Sampling temperature
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
        temperature: f64,

        /// Extra completion attempts after a failed request
        #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
        max_retries: u32,

        /// Write the rendered schematic here as well
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Validate { file, format } => handle_validate(&file, format),
        Commands::Layout {
            file,
            format,
            max_width,
            max_height,
        } => handle_layout(&file, format, max_width, max_height),
        Commands::Render { file, output } => handle_render(&file, &output),
        Commands::Design {
            prompt,
            api_key,
            model,
            temperature,
            max_retries,
            svg,
        } => {
            let options = DesignOptions {
                model,
                temperature,
                max_retries,
            };
            handle_design(&prompt, api_key, options, svg).await
        }
    };

    process::exit(exit_code);
}

fn read_input(file: &Path) -> std::io::Result<String> {
    if file == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(file)
    }
}

fn load_design(file: &Path) -> Result<CircuitDesign, i32> {
    let raw = read_input(file).map_err(|e| {
        eprintln!("Error: cannot read {}: {}", file.display(), e);
        1
    })?;
    parse_design(&raw).map_err(|e| {
        eprintln!("Error: {}", e);
        1
    })
}

fn handle_validate(file: &Path, format: OutputFormat) -> i32 {
    let design = match load_design(file) {
        Ok(design) => design,
        Err(code) => return code,
    };

    match format {
        OutputFormat::Human => print_plan_summary(&design.circuit),
        OutputFormat::Json => match serde_json::to_string_pretty(&design) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
    }
    0
}

fn handle_layout(
    file: &Path,
    format: OutputFormat,
    max_width: Option<f64>,
    max_height: Option<f64>,
) -> i32 {
    let design = match load_design(file) {
        Ok(design) => design,
        Err(code) => return code,
    };

    let mut config = LayoutConfig::default();
    if let Some(width) = max_width {
        config.max_width = width.max(config.min_width);
    }
    if let Some(height) = max_height {
        config.max_height = height.max(config.min_height);
    }

    let placed = layout(&design.circuit.components, &config);

    match format {
        OutputFormat::Human => {
            println!(
                "Canvas: {} x {} (scale {:.3})",
                placed.width, placed.height, placed.scale
            );
            let mut ids: Vec<&String> = placed.positions.keys().collect();
            ids.sort();
            for id in ids {
                let position = placed.positions[id];
                println!("  {:<16} ({:.1}, {:.1})", id, position.x, position.y);
            }
            let routed = route_connections(&design.circuit, &placed, &RouteConfig::default());
            println!("{} connection(s) routed", routed.len());
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&placed) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
    }
    0
}

fn handle_render(file: &Path, output: &Path) -> i32 {
    let design = match load_design(file) {
        Ok(design) => design,
        Err(code) => return code,
    };

    let svg = SvgRenderer::new().render(&design.circuit);
    if let Err(e) = fs::write(output, svg) {
        eprintln!("Error: cannot write {}: {}", output.display(), e);
        return 1;
    }
    println!("Wrote {}", output.display());
    0
}

async fn handle_design(
    prompt: &str,
    api_key: Option<String>,
    options: DesignOptions,
    svg: Option<PathBuf>,
) -> i32 {
    let api_key = match api_key.or_else(|| std::env::var("OPENAI_API_KEY").ok()) {
        Some(key) if !key.is_empty() => key,
        _ => {
            eprintln!("Error: no API key; pass --api-key or set OPENAI_API_KEY");
            return 1;
        }
    };

    let provider = OpenAiClient::from_options(api_key, &options);
    let designer = CircuitDesigner::new(Arc::new(provider));

    let design = match designer.design(prompt, &[]).await {
        Ok(design) => design,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    println!("{}\n", design.response);
    print_plan_summary(&design.circuit);

    if let Some(path) = svg {
        let document = SvgRenderer::new().render(&design.circuit);
        if let Err(e) = fs::write(&path, document) {
            eprintln!("Error: cannot write {}: {}", path.display(), e);
            return 1;
        }
        println!("Wrote {}", path.display());
    }
    0
}

fn print_plan_summary(plan: &CircuitPlan) {
    let graph = CircuitGraph::from_plan(plan);
    let stats = graph.stats();

    println!("{}", plan.title);
    println!("{}", "─".repeat(60));
    println!("{}", plan.summary);
    println!(
        "\n{} component(s), {} connection(s), {} isolated",
        stats.components, stats.connections, stats.isolated
    );

    for component in &plan.components {
        let pins = component
            .pins
            .map(|n| format!(", {} pins", n))
            .unwrap_or_default();
        println!("  [{}] {} - {}{}", component.id, component.label, component.kind, pins);
    }

    print_list("Notes", &plan.notes);
    print_list("Assumptions", &plan.assumptions);
    print_list("Warnings", &plan.warnings);
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}:", heading);
    for item in items {
        println!("  - {}", item);
    }
}
