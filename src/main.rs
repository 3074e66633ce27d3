//! Render a Quill template or a single code expression from the command line.
//!
//! ```sh
//! quill --var name=Ada 'Hello {{ upper $name }}!'
//! echo "concat 'foo' suffix='bar'" | quill --expr
//! ```

use clap::Parser;
use quill_runtime::{Bindings, RegistryError, RenderError, Runtime};
use quill_stdlib::RuntimeBuilderExt;
use quill_syntax::{Expression, SyntaxError, Template};
use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process,
    time::Duration,
};

mod config;
mod logger;
mod paths;

use config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "quill", version, about = "Render prompt templates with inline code expressions")]
struct Options {
    /// Template to render. Read from --file or standard input when absent.
    template: Option<String>,

    /// Read the template from a file.
    #[arg(short, long, conflicts_with = "template")]
    file: Option<PathBuf>,

    /// Treat the input as a single code expression instead of a template.
    #[arg(short, long)]
    expr: bool,

    /// Set a variable (repeatable).
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable)]
    variables: Vec<(String, String)>,

    /// Configuration file to use instead of the default one.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail any function call that takes longer than this many milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Enable verbose logging (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Do not log anything.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_variable(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, _)) if name.is_empty() => Err(format!("missing variable name in `{}`", s)),
        Some((name, value)) => Ok((name.to_owned(), value.to_owned())),
        None => Err(format!("expected NAME=VALUE, found `{}`", s)),
    }
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("could not read input: {0}")]
    Input(#[source] io::Error),

    #[error("could not write output: {0}")]
    Output(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

impl Error {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Error::Input(_) => exitcode::NOINPUT,
            Error::Output(_) => exitcode::IOERR,
            Error::Config(_) => exitcode::CONFIG,
            Error::Registry(_) => exitcode::SOFTWARE,
            Error::Syntax(_) => exitcode::DATAERR,
            Error::Render(_) => exitcode::SOFTWARE,
        }
    }
}

#[tokio::main]
async fn main() {
    logger::init();

    let options = Options::parse();

    if options.quiet {
        logger::quiet();
    } else {
        logger::verbose(options.verbose);
    }

    log::debug!("{:?}", options);

    process::exit(match run(options).await {
        Ok(()) => exitcode::OK,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    });
}

async fn run(options: Options) -> Result<(), Error> {
    let config = Config::load(options.config.as_deref())?;

    let mut bindings = config.bindings();
    bindings.extend(options.variables.iter().cloned());

    let timeout = options.timeout_ms.map(Duration::from_millis).or_else(|| config.timeout());

    let mut builder = Runtime::builder().with_stdlib();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let runtime = builder.build()?;

    let input = read_input(&options).map_err(Error::Input)?;
    let output = render(&runtime, &input, options.expr, &bindings).await?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes()).map_err(Error::Output)?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n").map_err(Error::Output)?;
    }
    stdout.flush().map_err(Error::Output)
}

fn read_input(options: &Options) -> io::Result<String> {
    if let Some(template) = options.template.as_ref() {
        return Ok(template.clone());
    }

    if let Some(path) = options.file.as_ref() {
        return fs::read_to_string(path);
    }

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

async fn render(runtime: &Runtime, input: &str, expr: bool, bindings: &Bindings) -> Result<String, Error> {
    if expr {
        let expression = Expression::from_source(input)?;
        Ok(runtime.render(&expression, bindings).await?)
    } else {
        let template = Template::parse(input)?;
        Ok(runtime.render_template(&template, bindings).await?)
    }
}
