use std::io::Read;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use isomap_engine::Rule;
use isomap_messages::{detect, Family};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "isomapctl", version, about = "ISO 20022 document <-> model conversion")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, global = true, default_value_t = Output::Human)]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Output { Human, Json }

#[derive(Subcommand, Debug)]
enum Commands {
    /// Identify the family and version of a payload from its namespace
    Detect {
        /// XML file, or "-" for stdin
        input: String,
    },
    /// Parse a payload into its family's JSON model
    Parse {
        /// XML file, or "-" for stdin
        input: String,
        /// Family name (default: detected from the namespace)
        #[arg(long = "family")]
        family: Option<String>,
    },
    /// Render a JSON model as XML
    Render {
        /// Family name, e.g. "AccountReport" or "camt.052"
        #[arg(long = "family")]
        family: String,
        /// Version tag, e.g. "camt.052.001.08" or "08" (default: latest)
        #[arg(long = "version")]
        version: Option<String>,
        /// JSON model file, or "-" for stdin
        input: String,
    },
    /// Check document facets and required model fields
    Validate {
        /// XML file, or "-" for stdin
        input: String,
    },
    /// Show a version's path map, or the flat entries a payload resolves to
    Map {
        #[arg(long = "family")]
        family: String,
        #[arg(long = "version")]
        version: Option<String>,
        /// Resolve against this XML payload instead of printing the rules
        #[arg(long = "input")]
        input: Option<String>,
    },
    /// List model fields with their ISO types
    Fields {
        #[arg(long = "family")]
        family: String,
    },
    /// List supported families and versions
    Versions,
}

/// Logging and metrics settings, read once from `ISOMAP_LOG` and `ISOMAP_METRICS_ADDR`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Telemetry {
    log: String,
    metrics_addr: Option<String>,
}

impl Telemetry {
    fn from_env() -> Self { Self::from_vars(|key| std::env::var(key).ok()) }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Telemetry {
            log: var("ISOMAP_LOG").filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "info".to_string()),
            metrics_addr: var("ISOMAP_METRICS_ADDR").filter(|v| !v.trim().is_empty()),
        }
    }

    /// Logs go to stderr; stdout carries XML and JSON only.
    fn install(&self) {
        let filter = tracing_subscriber::EnvFilter::from_str(&self.log)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();

        if let Some(addr) = &self.metrics_addr {
            match install_exporter(addr) {
                Ok(sock) => info!(addr = %sock, "Prometheus metrics exporter listening"),
                Err(e) => warn!(addr = %addr, error = %e, "metrics exporter not installed"),
            }
        }
    }
}

fn install_exporter(addr: &str) -> Result<std::net::SocketAddr> {
    let sock: std::net::SocketAddr = addr.parse().with_context(|| format!("expected host:port, got '{}'", addr))?;
    metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(sock).install()?;
    Ok(sock)
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read(input).with_context(|| format!("reading {}", input))
}

fn family_of(name: Option<&str>, raw: &[u8]) -> Result<Family> {
    match name {
        Some(n) => Ok(Family::from_str(n)?),
        None => Ok(detect(raw)?.family),
    }
}

fn print_rules(rules: &[Rule], depth: usize) {
    for rule in rules {
        let pad = "  ".repeat(depth);
        match rule {
            Rule::Flat { document, model } => println!("{}{:<60} -> {}", pad, document.to_string(), model),
            Rule::Expand { document, model, children } => {
                println!("{}{:<60} => {}[]", pad, document.to_string(), model);
                print_rules(children, depth + 1);
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    Telemetry::from_env().install();

    match cli.command {
        Commands::Detect { input } => {
            let raw = read_input(&input)?;
            let found = detect(&raw)?;
            info!(family = %found.family, version = %found.version, "detect invoked");
            match cli.output {
                Output::Human => println!("{} • {} • {}", found.family, found.version, found.message.as_deref().unwrap_or("-")),
                Output::Json => println!("{}", serde_json::to_string_pretty(&found)?),
            }
        }
        Commands::Parse { input, family } => {
            let raw = read_input(&input)?;
            let family = family_of(family.as_deref(), &raw)?;
            let (model, version) = family.parse_json(&raw).with_context(|| format!("parsing {} as {}", input, family))?;
            info!(family = %family, version = %version, "parse invoked");
            match cli.output {
                Output::Human => {
                    println!("# {} {}", family, version);
                    println!("{}", serde_json::to_string_pretty(&model)?);
                }
                Output::Json => {
                    let out = serde_json::json!({ "family": family, "version": version, "model": model });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
            }
        }
        Commands::Render { family, version, input } => {
            let family = Family::from_str(&family)?;
            let json = read_input(&input)?;
            let xml = family.render_json(&json, version.as_deref())?;
            info!(family = %family, bytes = xml.len(), "render invoked");
            print!("{}", xml);
        }
        Commands::Validate { input } => {
            let raw = read_input(&input)?;
            let found = detect(&raw)?;
            match found.family.validate(&raw) {
                Ok(version) => match cli.output {
                    Output::Human => println!("ok • {} • {}", found.family, version),
                    Output::Json => {
                        println!("{}", serde_json::json!({ "family": found.family, "version": version, "valid": true }))
                    }
                },
                Err(e) => {
                    warn!(family = %found.family, error = %e, "validation failed");
                    match cli.output {
                        Output::Human => eprintln!("invalid • {} • {}", found.family, e),
                        Output::Json => println!(
                            "{}",
                            serde_json::json!({ "family": found.family, "version": found.version, "valid": false, "error": e.to_string() })
                        ),
                    }
                    std::process::exit(1);
                }
            }
        }
        Commands::Map { family, version, input } => {
            let family = Family::from_str(&family)?;
            match input {
                Some(path) => {
                    let raw = read_input(&path)?;
                    let (version, entries) = family.resolve(&raw)?;
                    info!(family = %family, version = %version, entries = entries.len(), "map resolved");
                    match cli.output {
                        Output::Human => {
                            for e in &entries {
                                println!("{:<60} -> {}", e.source.to_string(), e.target);
                            }
                        }
                        Output::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                    }
                }
                None => {
                    let version = match version {
                        Some(v) => v,
                        None => family.latest()?,
                    };
                    let map = family.path_map(&version)?;
                    match cli.output {
                        Output::Human => {
                            println!("# {} {}", family, version);
                            print_rules(map.rules(), 0);
                        }
                        Output::Json => println!("{}", serde_json::to_string_pretty(&map)?),
                    }
                }
            }
        }
        Commands::Fields { family } => {
            let family = Family::from_str(&family)?;
            match cli.output {
                Output::Human => {
                    println!("{:<40} {:<28} REQUIRED", "FIELD", "TYPE");
                    for f in family.fields() {
                        let required = if family.required().contains(&f.name) { "yes" } else { "" };
                        println!("{:<40} {:<28} {}", f.name, f.type_name, required);
                    }
                }
                Output::Json => println!("{}", serde_json::to_string_pretty(family.fields())?),
            }
        }
        Commands::Versions => {
            let mut all = Vec::new();
            for family in Family::ALL {
                all.push((family, family.versions()?));
            }
            match cli.output {
                Output::Human => {
                    for (family, versions) in &all {
                        println!("{:<26} {}", family.to_string(), versions.join(", "));
                    }
                }
                Output::Json => {
                    let out: serde_json::Map<String, serde_json::Value> =
                        all.into_iter().map(|(f, v)| (f.name().to_string(), serde_json::json!(v))).collect();
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
            }
        }
    }
    metrics::counter!("cli_commands_total", 1u64);
    Ok(())
}
