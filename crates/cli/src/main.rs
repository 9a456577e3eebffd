use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scraper_api::HttpTransport;
use scraper_engine::config::{default_config_path, load_catalog_from_path};
use scraper_engine::{Endpoint, EndpointRegistry};
use scraper_types::{FieldValue, Parameters};
use scraper_util::template_placeholders;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "scraper", version, about = "Query fields of remote JSON endpoints")]
struct Cli {
    /// Catalog file (JSON, or YAML by extension)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List endpoints, their templates and attributes
    List,
    /// Print the resolved request URL
    Url(RequestArgs),
    /// Fetch and print the endpoint document
    Store(RequestArgs),
    /// Query one attribute of an endpoint
    Query {
        #[command(flatten)]
        request: RequestArgs,

        /// Attribute name from the endpoint's catalog
        attribute: String,

        /// Write image values into this directory instead of summarizing them
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// Endpoint name in the catalog
    endpoint: String,

    /// Template parameter, repeatable
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    params: Vec<(String, String)>,

    /// Use the endpoint's default parameters when no --param is given
    #[arg(long)]
    defaults: bool,
}

impl RequestArgs {
    fn parameters(&self, endpoint: &Endpoint) -> Parameters {
        if self.defaults && self.params.is_empty() {
            return endpoint.default_parameters().clone();
        }
        Parameters::new(self.params.iter().cloned())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    debug!(path = %config_path.display(), "loading catalog");
    let catalog = load_catalog_from_path(&config_path)?;
    let transport = Arc::new(HttpTransport::new()?);
    let registry = EndpointRegistry::from_catalog(&catalog, transport);

    run_command(&registry, cli.command).await
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_command(registry: &EndpointRegistry, command: Command) -> Result<()> {
    match command {
        Command::List => {
            if registry.is_empty() {
                println!("No endpoints configured");
            }
            for (name, endpoint) in registry.iter() {
                print_endpoint(name, endpoint);
            }
        }
        Command::Url(request) => {
            let endpoint = registry.get(&request.endpoint)?;
            println!("{}", endpoint.resolved_url(&request.parameters(endpoint)));
        }
        Command::Store(request) => {
            let endpoint = registry.get(&request.endpoint)?;
            let document = endpoint.store(&request.parameters(endpoint)).await?;
            println!("{}", serde_json::to_string_pretty(document.as_ref())?);
        }
        Command::Query {
            request,
            attribute,
            out_dir,
        } => {
            let endpoint = registry.get(&request.endpoint)?;
            let values = endpoint
                .query_field_by_attribute_name(&attribute, &request.parameters(endpoint))
                .await?;
            print_values(&attribute, &values, out_dir.as_deref()).await?;
        }
    }
    Ok(())
}

fn print_endpoint(name: &str, endpoint: &Endpoint) {
    println!("{name}: {}", endpoint.title());
    let template = match endpoint.api_base() {
        Some(api_base) => format!("{api_base}{}", endpoint.endpoint()),
        None => endpoint.endpoint().to_string(),
    };
    println!("  url:        {template}");
    let placeholders = template_placeholders(&template);
    if !placeholders.is_empty() {
        println!("  parameters: {}", placeholders.join(", "));
    }
    for attribute in endpoint.attributes() {
        println!("  - {} = {}", attribute.name, attribute.path);
    }
}

async fn print_values(attribute: &str, values: &[FieldValue], out_dir: Option<&Path>) -> Result<()> {
    for (index, value) in values.iter().enumerate() {
        match (value, out_dir) {
            (FieldValue::Image(bytes), Some(dir)) => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("create {}", dir.display()))?;
                let path = dir.join(image_file_name(attribute, index, bytes));
                tokio::fs::write(&path, bytes)
                    .await
                    .with_context(|| format!("write {}", path.display()))?;
                println!("{}", path.display());
            }
            _ => println!("{value}"),
        }
    }
    Ok(())
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn image_file_name(attribute: &str, index: usize, bytes: &[u8]) -> String {
    let stem: String = attribute
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{stem}-{index}.{}", image_extension(bytes))
}

fn image_extension(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        "jpg"
    } else {
        "bin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_parameters() {
        assert_eq!(parse_key_value("id=42"), Ok(("id".to_string(), "42".to_string())));
        assert_eq!(parse_key_value("q=a=b"), Ok(("q".to_string(), "a=b".to_string())));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn query_arguments_parse_in_order() {
        let cli = Cli::try_parse_from([
            "scraper", "--config", "cat.yaml", "query", "users", "Avatar", "-p", "id=7", "--out-dir", "out",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("cat.yaml")));
        match cli.command {
            Command::Query {
                request,
                attribute,
                out_dir,
            } => {
                assert_eq!(request.endpoint, "users");
                assert_eq!(request.params, vec![("id".to_string(), "7".to_string())]);
                assert_eq!(attribute, "Avatar");
                assert_eq!(out_dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn image_files_are_named_after_the_attribute() {
        assert_eq!(image_file_name("Profile Photo", 2, &[0x89, b'P', b'N', b'G']), "profile_photo-2.png");
        assert_eq!(image_file_name("x", 0, &[0xff, 0xd8, 0xff, 0xe0]), "x-0.jpg");
        assert_eq!(image_file_name("x", 1, &[]), "x-1.bin");
    }
}
