//! Host-side interaction loop.
//!
//! A protocol is a two-argument function `protocol state input` returning
//! `[flag, new_state, data]`. Flag 0 means "draw `data` and wait for the
//! next input"; flag 1 means "send `data` and call me again with the reply".
//! [`interact`] runs that loop until the protocol asks to draw.

use gx_ir::{BigInt, Data, ExprId, Picture};
use tracing::debug;

use crate::audit::SharedAuditLog;
use crate::diagnostics::EvalCounters;
use crate::errors::{
    send_limit_exceeded, type_mismatch, undefined_reference, unsupported_flag, EvalError,
};
use crate::picture::pictures_from_data;
use crate::program::Program;
use crate::transport::Transport;
use crate::Evaluator;

/// Interaction settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractConfig {
    /// Binding that holds the protocol function.
    pub protocol: String,
    /// Upper bound on sends within one step. `None` is unbounded.
    pub max_sends: Option<usize>,
    /// Collect evaluation counters into the returned frame.
    pub profile: bool,
}

impl Default for InteractConfig {
    fn default() -> Self {
        InteractConfig {
            protocol: "galaxy".to_string(),
            max_sends: None,
            profile: false,
        }
    }
}

impl InteractConfig {
    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    #[must_use]
    pub fn with_max_sends(mut self, limit: usize) -> Self {
        self.max_sends = Some(limit);
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }
}

/// What a finished step hands back to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// State to pass to the next step.
    pub state: Data,
    /// Pictures to render, in order.
    pub pictures: Vec<Picture>,
    /// Round trips made during the step.
    pub sends: usize,
    /// Present when profiling was requested.
    pub counters: Option<EvalCounters>,
}

/// Run one interaction step: call the protocol until it asks to draw.
///
/// Everything the step allocates or forces in the arena is discarded when
/// it returns, so the program is the same size for every step of a long
/// session. Only the returned [`Frame`] carries over.
#[tracing::instrument(level = "debug", skip_all, fields(protocol = %config.protocol))]
pub fn interact(
    program: &mut Program,
    config: &InteractConfig,
    transport: &mut dyn Transport,
    audit: Option<SharedAuditLog>,
    state: &Data,
    input: &Data,
) -> Result<Frame, EvalError> {
    let pristine = program.arena.clone();
    let frame = run_step(program, config, transport, audit, state, input);
    debug!(discarded = program.arena.len() - pristine.len(), "step finished");
    program.arena = pristine;
    frame
}

fn run_step(
    program: &mut Program,
    config: &InteractConfig,
    transport: &mut dyn Transport,
    audit: Option<SharedAuditLog>,
    state: &Data,
    input: &Data,
) -> Result<Frame, EvalError> {
    let protocol = program
        .lookup(&config.protocol)
        .ok_or_else(|| undefined_reference(&config.protocol))?;

    let mut evaluator = program.evaluator(transport);
    if let Some(log) = audit {
        evaluator = evaluator.with_audit_log(log);
    }
    if config.profile {
        evaluator = evaluator.with_counters();
    }

    let mut state = state.clone();
    let mut input = input.clone();
    let mut sends = 0;
    loop {
        let response = call_protocol(&mut evaluator, protocol, &state, &input).map_err(|err| {
            err.with_note(format!("while calling `{}` after {sends} sends", config.protocol))
        })?;
        state = response.state;
        debug!(flag = %response.flag, %state, sends, "protocol step");

        if response.flag == BigInt::from(0) {
            let data = evaluator.reify(response.data)?;
            let pictures = pictures_from_data(&data)?;
            return Ok(Frame {
                state,
                pictures,
                sends,
                counters: evaluator.counters().cloned(),
            });
        }
        if response.flag != BigInt::from(1) {
            return Err(unsupported_flag(&response.flag.to_string()));
        }
        if let Some(limit) = config.max_sends {
            if sends >= limit {
                return Err(send_limit_exceeded(limit));
            }
        }
        let request = evaluator.reify(response.data)?;
        input = evaluator.send(request).map_err(|err| {
            err.with_note(format!("in request {} from `{}`", sends + 1, config.protocol))
        })?;
        sends += 1;
    }
}

struct ProtocolResponse {
    flag: BigInt,
    state: Data,
    /// Left unevaluated until the flag says what it is for.
    data: ExprId,
}

fn call_protocol(
    evaluator: &mut Evaluator<'_>,
    protocol: ExprId,
    state: &Data,
    input: &Data,
) -> Result<ProtocolResponse, EvalError> {
    let arena = evaluator.arena_mut();
    let state_id = arena.alloc_data(state);
    let input_id = arena.alloc_data(input);
    let call = arena.apply2(protocol, state_id, input_id);

    let parts = evaluator.list_elements(call)?;
    let [flag, state, data] = parts[..] else {
        return Err(type_mismatch(
            "[flag, state, data]",
            &format!("list of {} elements", parts.len()),
        ));
    };
    let flag = match evaluator.evaluate(flag)? {
        gx_ir::Value::Number(n) => n,
        other => return Err(type_mismatch("number flag", other.kind_name())),
    };
    let state = evaluator.reify(state)?;
    Ok(ProtocolResponse { flag, state, data })
}
