//! Magento 2 product attribute generator
//!
//! Usage:
//!   magegen generate --manifest attributes.yaml --output app/code
//!   magegen attribute --package Vendor --module Catalog --label Color \
//!       --input select --options "Red, Blue" --source-model --output app/code
//!   magegen params

mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use magegen_codegen::generators::GeneratorConfig;
use magegen_codegen::parser::{params, OptionsInput};
use magegen_codegen::{generate_module, generate_module_from_manifest, ExtraParams, Manifest, RawAttribute};
use magegen_module::ModuleIdentity;
use serde_json::json;

#[derive(Parser, Debug)]
#[clap(name = "magegen")]
#[clap(about = "Generate Magento 2 product attribute modules", version)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[clap(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[clap(long, global = true)]
    log_json: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every attribute listed in a manifest file
    Generate {
        /// Manifest file (YAML, or JSON with a .json extension)
        #[clap(short, long)]
        manifest: PathBuf,

        /// Directory receiving `<Package>/<Module>/...`, usually app/code
        #[clap(short, long)]
        output: PathBuf,

        /// Replacement installer template
        #[clap(short, long)]
        template: Option<PathBuf>,
    },

    /// Generate a single attribute from command line flags
    Attribute(AttributeArgs),

    /// Print the accepted parameters as JSON
    Params,
}

#[derive(Args, Debug)]
struct AttributeArgs {
    /// Vendor package, e.g. Vendor
    #[clap(long)]
    package: String,

    /// Module name, e.g. Catalog
    #[clap(long)]
    module: String,

    #[clap(long)]
    label: String,

    /// Frontend input (text, textarea, date, boolean, multiselect, select, price, static)
    #[clap(long)]
    input: Option<String>,

    /// Comma separated option values for select inputs
    #[clap(long)]
    options: Option<String>,

    /// Generate a source model for the options
    #[clap(long)]
    source_model: bool,

    /// Scope (SCOPE_STORE, SCOPE_GLOBAL or SCOPE_WEBSITE)
    #[clap(long)]
    scope: Option<String>,

    #[clap(long)]
    required: bool,

    /// Attribute code, derived from the label when omitted
    #[clap(long)]
    code: Option<String>,

    /// Product types the attribute applies to (-1 for all)
    #[clap(long, value_delimiter = ',')]
    apply_to: Vec<String>,

    #[clap(long)]
    searchable: bool,

    #[clap(long)]
    filterable: bool,

    #[clap(long)]
    visible_on_front: bool,

    #[clap(long)]
    comparable: bool,

    #[clap(long)]
    used_in_product_listing: bool,

    #[clap(long)]
    unique: bool,

    #[clap(long)]
    transport_to_quote_item: bool,

    /// Directory receiving `<Package>/<Module>/...`, usually app/code
    #[clap(short, long)]
    output: PathBuf,

    /// Replacement installer template
    #[clap(short, long)]
    template: Option<PathBuf>,
}

impl AttributeArgs {
    fn manifest(&self) -> Manifest {
        let mut manifest = Manifest::new(ModuleIdentity::new(&self.package, &self.module));
        manifest.attributes.push(RawAttribute {
            attribute_label: Some(self.label.clone()),
            frontend_input: self.input.clone(),
            options: self.options.clone().map(OptionsInput::Csv),
            source_model: Some(self.source_model),
            scope: self.scope.clone(),
            required: Some(self.required),
            extra: ExtraParams {
                attribute_code: self.code.clone(),
                apply_to: self.apply_to.clone(),
                searchable: self.searchable,
                filterable: self.filterable,
                visible_on_front: self.visible_on_front,
                comparable: self.comparable,
                used_in_product_listing: self.used_in_product_listing,
                unique: self.unique,
                transport_to_quote_item: self.transport_to_quote_item,
            },
        });
        manifest
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_json).context("initializing logging")?;

    match cli.command {
        Command::Generate {
            manifest,
            output,
            template,
        } => {
            let config = GeneratorConfig {
                template_path: template,
            };
            let written = generate_module_from_manifest(&manifest, &output, &config)?;
            tracing::info!(files = written, "Done");
        }
        Command::Attribute(args) => {
            let config = GeneratorConfig {
                template_path: args.template.clone(),
            };
            let manifest = args.manifest();
            let module = generate_module(&manifest, &config).context("generating attribute")?;
            let written = module
                .write_to(&args.output)
                .with_context(|| format!("writing module to {}", args.output.display()))?;
            tracing::info!(files = written, "Done");
        }
        Command::Params => {
            let descriptors = json!({
                "params": params::params(),
                "extra_params": params::extra_params(),
            });
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
    }

    Ok(())
}
