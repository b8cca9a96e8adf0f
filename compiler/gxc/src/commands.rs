//! Command implementations.
//!
//! Each command has a pure core that returns its output as a string
//! (`eval_source`, `modulate_text`, ...), used by the integration tests, and
//! a `run_*` wrapper for the binary that reads files, prints, and exits with
//! status 1 on failure.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use gx_eval::{
    interact, shared_audit_log, Data, EvalError, Frame, InteractConfig, OfflineTransport,
    Program, SendRecord, Transport, Value,
};
use gx_modem::SignalError;
use gx_parse::{parse_environment, parse_expr, ParseError};

use crate::render::render_pictures;
use crate::report::render_parse_error;
use crate::transport::StdioTransport;

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Raised on an expression given on the command line.
    #[error("in expression: {0}")]
    ParseExpr(ParseError),

    #[error("{0}")]
    Eval(#[from] EvalError),

    #[error("{0}")]
    Signal(#[from] SignalError),

    #[error("{0}")]
    Usage(String),
}

/// Options for `gx interact`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractOptions {
    pub config: InteractConfig,
    /// Program text for the starting state; nil when absent.
    pub state: Option<String>,
    /// Click coordinates passed as the first input.
    pub point: (i64, i64),
}

impl Default for InteractOptions {
    fn default() -> Self {
        InteractOptions {
            config: InteractConfig::default(),
            state: None,
            point: (0, 0),
        }
    }
}

/// Parse `gx interact` flags.
pub fn parse_interact_options(args: &[String]) -> Result<InteractOptions, CommandError> {
    let mut options = InteractOptions::default();
    for arg in args {
        if let Some(protocol) = arg.strip_prefix("--protocol=") {
            options.config.protocol = protocol.to_string();
        } else if let Some(state) = arg.strip_prefix("--state=") {
            options.state = Some(state.to_string());
        } else if let Some(point) = arg.strip_prefix("--point=") {
            options.point = parse_point(point)?;
        } else if let Some(limit) = arg.strip_prefix("--max-sends=") {
            let limit = limit
                .parse()
                .map_err(|_| CommandError::Usage(format!("invalid --max-sends value '{limit}'")))?;
            options.config.max_sends = Some(limit);
        } else if arg == "--profile" {
            options.config.profile = true;
        } else {
            return Err(CommandError::Usage(format!("unknown option '{arg}'")));
        }
    }
    Ok(options)
}

fn parse_point(text: &str) -> Result<(i64, i64), CommandError> {
    let invalid = || CommandError::Usage(format!("invalid --point value '{text}', expected X,Y"));
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

/// Render a value for display: data as program text, anything else as is.
fn show(program: &mut Program, id: gx_ir::ExprId, value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Picture(picture) => render_pictures(std::slice::from_ref(picture)),
        Value::Function(_) => match program.evaluator(&mut OfflineTransport).reify(id) {
            Ok(data) => data.to_program_text(),
            Err(_) => value.to_string(),
        },
    }
}

/// Evaluate `expr` over the bindings in `source`.
pub fn eval_source(source: &str, expr: &str) -> Result<String, CommandError> {
    let mut program = parse_environment(source)?;
    let id = parse_expr(&mut program.arena, &mut program.interner, expr)
        .map_err(CommandError::ParseExpr)?;
    let value = program.evaluator(&mut OfflineTransport).evaluate_root(id)?;
    Ok(show(&mut program, id, &value))
}

/// Modulate an expression over the standard library.
pub fn modulate_text(expr: &str) -> Result<String, CommandError> {
    let mut program = Program::standard();
    let id = parse_expr(&mut program.arena, &mut program.interner, expr)
        .map_err(CommandError::ParseExpr)?;
    Ok(program.evaluator(&mut OfflineTransport).modulate(id)?)
}

/// Demodulate a bit string and print it as program text.
pub fn demodulate_text(bits: &str) -> Result<String, CommandError> {
    let data = gx_modem::demodulate(bits.trim())?;
    Ok(data.to_program_text())
}

/// The outcome of one interaction step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractOutput {
    pub frame: Frame,
    pub sends: Vec<SendRecord>,
}

impl InteractOutput {
    /// Pictures, then the state to resume from.
    pub fn display(&self) -> String {
        let mut out = render_pictures(&self.frame.pictures);
        out.push_str(&format!("state: {}\n", self.frame.state.to_program_text()));
        out
    }
}

/// Run one interaction step of the protocol bound in `source`.
pub fn interact_source(
    source: &str,
    options: &InteractOptions,
    transport: &mut dyn Transport,
) -> Result<InteractOutput, CommandError> {
    let mut program = parse_environment(source)?;
    let state = match &options.state {
        Some(text) => {
            let id = parse_expr(&mut program.arena, &mut program.interner, text)
                .map_err(CommandError::ParseExpr)?;
            program.evaluator(&mut OfflineTransport).reify(id)?
        }
        None => Data::Nil,
    };
    let input = Data::pair(options.point.0, options.point.1);
    let log = shared_audit_log();
    let frame = interact(
        &mut program,
        &options.config,
        transport,
        Some(Arc::clone(&log)),
        &state,
        &input,
    )?;
    Ok(InteractOutput {
        frame,
        sends: log.drain(),
    })
}

// Binary entry points

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(Path::new(path)) {
        Ok(content) => {
            debug!(path, bytes = content.len(), "read source");
            content
        }
        Err(source) => {
            let err = CommandError::Io {
                path: path.to_string(),
                source,
            };
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Print a failure, with source context for parse errors, and exit.
fn fail(path: &str, source: &str, expr: &str, err: &CommandError) -> ! {
    match err {
        CommandError::Parse(parse) => eprint!("{}", render_parse_error(path, source, parse)),
        CommandError::ParseExpr(parse) => eprint!("{}", render_parse_error("<expr>", expr, parse)),
        other => eprintln!("error: {other}"),
    }
    std::process::exit(1);
}

#[tracing::instrument(level = "debug")]
pub fn run_eval(path: &str, expr: &str) {
    let source = read_file(path);
    match eval_source(&source, expr) {
        Ok(out) => println!("{}", out.trim_end()),
        Err(err) => fail(path, &source, expr, &err),
    }
}

pub fn run_modulate(expr: &str) {
    match modulate_text(expr) {
        Ok(bits) => println!("{bits}"),
        Err(err) => fail("<expr>", expr, expr, &err),
    }
}

pub fn run_demodulate(bits: &str) {
    match demodulate_text(bits) {
        Ok(text) => println!("{text}"),
        Err(err) => fail("<bits>", bits, "", &err),
    }
}

#[tracing::instrument(level = "debug", skip(options))]
pub fn run_interact(path: &str, options: &InteractOptions) {
    let source = read_file(path);
    let mut transport = StdioTransport::stdio();
    match interact_source(&source, options, &mut transport) {
        Ok(output) => {
            print!("{}", output.display());
            if let Some(counters) = &output.frame.counters {
                eprintln!("{}", counters.report());
            }
        }
        Err(err) => {
            let state = options.state.as_deref().unwrap_or_default();
            fail(path, &source, state, &err)
        }
    }
}
