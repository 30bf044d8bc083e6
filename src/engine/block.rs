//! Block node: `init` / `body` / `error` / `finally` / `dispose`
//!
//! ## Execution
//!
//! 1. `init` runs once, when the context is bound
//! 2. `body` runs in order; its last value is the result
//! 3. An error escaping `body` runs `error` (when non-empty), whose last
//!    value becomes the result. Signals are never caught here.
//! 4. `finally` runs exactly once on every exit path
//! 5. `dispose` runs when the tree is torn down

use tracing::{debug, warn};

use super::builder::Builder;
use super::expr::Expr;
use super::lifecycle::Teardown;
use super::settings::FinallySignal;
use super::types::{
    Args, Call, ConfigError, Context, Control, DisposeError, PerformResult, SerializeError, Value,
};
use crate::tree::Element;

const STEP: &str = "step";
const CATCH_AS: &str = "catchAs";

/* ===================== Sections ===================== */

/// The five named step lists of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Init,
    Body,
    Error,
    Finally,
    Dispose,
}

impl Section {
    /// Document order, used for both configure and serialize
    pub const ALL: [Section; 5] = [
        Section::Init,
        Section::Body,
        Section::Error,
        Section::Finally,
        Section::Dispose,
    ];

    /// Release order on teardown
    const RELEASE: [Section; 5] = [
        Section::Dispose,
        Section::Finally,
        Section::Error,
        Section::Body,
        Section::Init,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Init => "init",
            Section::Body => "body",
            Section::Error => "error",
            Section::Finally => "finally",
            Section::Dispose => "dispose",
        }
    }
}

#[derive(Debug, Default)]
pub struct Sections {
    pub init: Vec<Expr>,
    pub body: Vec<Expr>,
    pub error: Vec<Expr>,
    pub finally: Vec<Expr>,
    pub dispose: Vec<Expr>,
}

impl Sections {
    pub fn get(&self, section: Section) -> &[Expr] {
        match section {
            Section::Init => &self.init,
            Section::Body => &self.body,
            Section::Error => &self.error,
            Section::Finally => &self.finally,
            Section::Dispose => &self.dispose,
        }
    }

    pub fn get_mut(&mut self, section: Section) -> &mut Vec<Expr> {
        match section {
            Section::Init => &mut self.init,
            Section::Body => &mut self.body,
            Section::Error => &mut self.error,
            Section::Finally => &mut self.finally,
            Section::Dispose => &mut self.dispose,
        }
    }
}

/* ===================== Block ===================== */

#[derive(Debug)]
pub struct Block {
    sections: Sections,
    /// Argument name receiving the recovered error message
    catch_as: Option<String>,
    finally_signal: FinallySignal,
    bound: bool,
    disposed: bool,
}

impl Block {
    pub fn new(sections: Sections, catch_as: Option<String>, finally_signal: FinallySignal) -> Self {
        Self {
            sections,
            catch_as,
            finally_signal,
            bound: false,
            disposed: false,
        }
    }

    pub fn configure(implementor: &Element, builder: &Builder<'_>) -> Result<Self, ConfigError> {
        let mut sections = Sections::default();
        for section in Section::ALL {
            if let Some(list) = implementor.element(section.name()) {
                *sections.get_mut(section) = list
                    .elements(STEP)
                    .map(|step| builder.build_expr(step))
                    .collect::<Result<Vec<_>, _>>()?;
            }
        }

        let catch_as = implementor.attribute(CATCH_AS).map(str::to_string);
        Ok(Self::new(sections, catch_as, builder.settings().finally_signal))
    }

    pub fn serialize(&self, implementor: &mut Element) -> Result<(), SerializeError> {
        if let Some(name) = &self.catch_as {
            implementor.set_attribute_value(CATCH_AS, name.as_str());
        }

        for section in Section::ALL {
            let steps = self.sections.get(section);
            if steps.is_empty() {
                continue;
            }
            let list = implementor.new_element(section.name());
            for step in steps {
                step.serialize(list.new_element(STEP))?;
            }
        }
        Ok(())
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /* ===================== Execution ===================== */

    pub fn perform(&self, call: &mut Call<'_>) -> PerformResult {
        let outcome = match run_steps(&self.sections.body, call) {
            Err(Control::Throw(err)) if !self.sections.error.is_empty() => {
                debug!(error = %err, "block: running error section");
                if let Some(name) = &self.catch_as {
                    call.args.put(name.as_str(), Value::String(err.to_string()));
                }
                run_steps(&self.sections.error, call)
            }
            other => other,
        };

        self.run_finally(call, outcome)
    }

    /// Run `finally` and decide which outcome leaves the block
    fn run_finally(&self, call: &mut Call<'_>, outcome: PerformResult) -> PerformResult {
        match run_steps(&self.sections.finally, call) {
            Ok(_) => outcome,
            Err(Control::Throw(err)) => Err(Control::Throw(err)),
            Err(signal) => match self.finally_signal {
                FinallySignal::Propagate => Err(signal),
                FinallySignal::Discard => {
                    warn!(?signal, "block: discarding control signal raised in finally");
                    outcome
                }
            },
        }
    }

    /* ===================== Lifecycle ===================== */

    /// Bind every step, then run `init` against a scratch dictionary
    pub fn bind(&mut self, context: &Context) -> Result<(), ConfigError> {
        if self.disposed {
            return Err(ConfigError::Disposed);
        }
        if self.bound {
            return Err(ConfigError::AlreadyBound);
        }

        for section in Section::ALL {
            for step in self.sections.get_mut(section).iter_mut() {
                step.bind(context)?;
            }
        }
        self.bound = true;

        let mut scratch = Args::new();
        match run_steps(&self.sections.init, &mut Call::new(&mut scratch)) {
            Ok(_) => Ok(()),
            Err(control) => Err(match control.into_signal() {
                Ok(signal) => ConfigError::InitSignal(signal),
                Err(err) => ConfigError::Init(err),
            }),
        }
    }

    /// Run `dispose` (only if bound), then release every section; idempotent
    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;

        let mut teardown = Teardown::new();

        if self.bound {
            let mut scratch = Args::new();
            let mut call = Call::new(&mut scratch);
            for step in &self.sections.dispose {
                if let Err(control) = step.perform(&mut call) {
                    teardown.record(match control.into_signal() {
                        Ok(signal) => DisposeError::StepSignal(signal),
                        Err(err) => DisposeError::Step(err),
                    });
                }
            }
        } else {
            debug!("block: never bound, skipping dispose section");
        }

        for section in Section::RELEASE {
            for step in self.sections.get_mut(section).iter_mut() {
                teardown.release(step.dispose());
            }
        }

        teardown.finish()
    }
}

/// Perform steps in order, yielding the last value (null when empty)
fn run_steps(steps: &[Expr], call: &mut Call<'_>) -> PerformResult {
    let mut last = Value::Null;
    for step in steps {
        last = step.perform(call)?;
    }
    Ok(last)
}
