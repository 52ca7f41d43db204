//! Path evaluation.
//!
//! [`eval_path`] walks a path left to right. The head is resolved first (a
//! word is looked up in the binding context, a group is evaluated, anything
//! else stands for itself), then each later element picks into the current
//! value through the handler registered for the current value's kind.
//!
//! # Setting
//!
//! In [`PathMode::Set`] the last step pokes instead of picking. Heap
//! containers change in place. Immediate values (tuples, pairs) cannot be
//! changed through a shared reference, so their handler updates a temporary
//! copy and reports [`PokeOutcome::Updated`]; the walker then pokes that
//! temporary back into the container it was picked from, and so on up to the
//! variable named by the head word. A head with no variable behind it (a
//! group result or a literal) has nowhere to receive the update: the set
//! reports success but only the temporary saw the change.
//!
//! # Groups
//!
//! Group elements are evaluated through the [`Evaluator`] collaborator,
//! strictly in element order. A throw or error from a group ends the walk
//! immediately and propagates unchanged. [`GroupPolicy::Forbid`] refuses
//! groups up front, for contexts that must not run code.
//!
//! A group may allocate and collect. The head value, each picker and each
//! intermediate container are pushed onto the heap's guard stack as they
//! are produced, so a collection inside a later group cannot free them.
//! The guards are released when `eval_path` returns, on success or error.

use ren_cell::sequence::{is_refinement, is_slash_form, path_at, path_len};
use ren_cell::{
    bad_path_head, bad_path_set, bad_pick, bad_poke, fatal, groups_disallowed, not_bound, Cell,
    EvalResult, Heap, Kind, RuntimeConfig, RuntimeError, Symbol,
};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::dispatch::{PathDispatch, PokeOutcome};
use crate::stack::ensure_sufficient_stack;

/// The external evaluator, as far as paths need it.
pub trait Evaluator {
    /// Evaluate a group element to a single value.
    fn eval_group(&mut self, rt: &mut Runtime, group: &Cell) -> EvalResult<Cell>;
}

/// State shared by every path evaluation.
#[derive(Debug)]
pub struct Runtime {
    pub heap: Heap,
    pub config: RuntimeConfig,
    pub dispatch: PathDispatch,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Runtime {
            heap: Heap::new(&config),
            config,
            dispatch: PathDispatch::new(),
        }
    }

    /// Collect if enough has been allocated since the last collection.
    ///
    /// Returns whether a collection ran.
    pub fn maybe_collect<'a>(&mut self, roots: impl IntoIterator<Item = &'a Cell>) -> bool {
        if !self.heap.should_collect() {
            return false;
        }
        self.heap.collect(roots);
        true
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(RuntimeConfig::default())
    }
}

/// Whether group elements may run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GroupPolicy {
    #[default]
    Evaluate,
    /// Raise `GroupsDisallowed` on the first group element.
    Forbid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct PathOptions {
    pub groups: GroupPolicy,
}

impl PathOptions {
    /// Options for side-effect-free reads.
    pub const NO_GROUPS: PathOptions = PathOptions {
        groups: GroupPolicy::Forbid,
    };
}

/// Read, or assign the given value.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum PathMode {
    #[default]
    Get,
    Set(Cell),
}

/// One completed pick: the container and what was picked from it.
#[derive(Copy, Clone, Debug)]
struct Step {
    container: Cell,
    picker: Cell,
}

type Steps = SmallVec<[Step; 8]>;

/// Evaluate `path` against the object `context`.
///
/// Get returns the value reached; Set returns the value assigned.
#[tracing::instrument(level = "trace", skip_all)]
pub fn eval_path(
    rt: &mut Runtime,
    evaluator: &mut dyn Evaluator,
    path: &Cell,
    context: &Cell,
    mode: PathMode,
    options: PathOptions,
) -> EvalResult<Cell> {
    if !path.kind().is_any_path() {
        fatal(format_args!("eval_path on {}", path.kind()));
    }
    if context.kind() != Kind::Object {
        fatal(format_args!("path context must be object!, got {}", context.kind()));
    }

    // Refinements and `/` are inert values
    if is_slash_form(path) || is_refinement(&rt.heap, path) {
        return match mode {
            PathMode::Get => Ok(*path),
            PathMode::Set(_) => Err(bad_path_set().into()),
        };
    }

    let base = rt.heap.guard_height();
    let result = walk(rt, evaluator, path, context, mode, options);
    rt.heap.release_guards(base);
    result
}

/// The step loop. Every value it holds across a group evaluation is guarded
/// on the heap; the caller releases the guards however this returns.
fn walk(
    rt: &mut Runtime,
    evaluator: &mut dyn Evaluator,
    path: &Cell,
    context: &Cell,
    mode: PathMode,
    options: PathOptions,
) -> EvalResult<Cell> {
    rt.heap.guard(*path);
    rt.heap.guard(*context);
    if let PathMode::Set(value) = mode {
        rt.heap.guard(value);
    }

    let len = path_len(&rt.heap, path);
    let elements: SmallVec<[Cell; 8]> = (0..len).map(|i| path_at(&rt.heap, path, i)).collect();

    let (mut current, head_var) = resolve_head(rt, evaluator, &elements[0], context, options)?;
    rt.heap.guard(current);
    let mut steps = Steps::new();

    for (index, element) in elements.iter().enumerate().skip(1) {
        let picker = resolve_picker(rt, evaluator, element, options)?;
        rt.heap.guard(picker);
        #[cfg(feature = "provenance")]
        ren_cell::bump_tick();
        trace!(
            index,
            current = %current.kind(),
            picker = %picker.kind(),
            "path step"
        );

        let last = index + 1 == len;
        match mode {
            PathMode::Set(value) if last => {
                poke_final(rt, &steps, head_var, context, current, &picker, &value)?;
                return Ok(value);
            }
            _ => {
                let next = pick(rt, &current, &picker)?;
                if next.is_null() && matches!(mode, PathMode::Set(_)) {
                    return Err(bad_pick(current.kind(), picker.mold(&rt.heap)).into());
                }
                rt.heap.guard(next);
                steps.push(Step {
                    container: current,
                    picker,
                });
                current = next;
            }
        }
    }

    Ok(current)
}

/// The head's value, plus the variable it came from when it is a word.
fn resolve_head(
    rt: &mut Runtime,
    evaluator: &mut dyn Evaluator,
    head: &Cell,
    context: &Cell,
    options: PathOptions,
) -> EvalResult<(Cell, Option<Symbol>)> {
    match head.kind() {
        Kind::Word => {
            let symbol = head.as_symbol();
            match rt.heap.varlist(context.as_node()).get(symbol) {
                Some(value) => Ok((*value, Some(symbol))),
                None => Err(not_bound(symbol.as_str()).into()),
            }
        }
        Kind::Group => Ok((eval_group(rt, evaluator, head, options)?, None)),
        Kind::Blank => Err(bad_path_head(Kind::Blank).into()),
        _ => Ok((*head, None)),
    }
}

fn resolve_picker(
    rt: &mut Runtime,
    evaluator: &mut dyn Evaluator,
    element: &Cell,
    options: PathOptions,
) -> EvalResult<Cell> {
    if element.kind() == Kind::Group {
        eval_group(rt, evaluator, element, options)
    } else {
        Ok(*element)
    }
}

fn eval_group(
    rt: &mut Runtime,
    evaluator: &mut dyn Evaluator,
    group: &Cell,
    options: PathOptions,
) -> EvalResult<Cell> {
    if options.groups == GroupPolicy::Forbid {
        return Err(groups_disallowed().into());
    }
    ensure_sufficient_stack(|| evaluator.eval_group(rt, group))
}

fn pick(rt: &Runtime, current: &Cell, picker: &Cell) -> Result<Cell, RuntimeError> {
    match rt.dispatch.get(current.kind()) {
        Some(handler) => handler.pick(&rt.heap, current, picker),
        None => Err(bad_pick(current.kind(), picker.mold(&rt.heap))),
    }
}

fn poke(
    rt: &mut Runtime,
    current: &mut Cell,
    picker: &Cell,
    value: &Cell,
) -> Result<PokeOutcome, RuntimeError> {
    match rt.dispatch.get(current.kind()) {
        Some(handler) => handler.poke(&mut rt.heap, current, picker, value),
        None => Err(bad_poke(current.kind(), picker.mold(&rt.heap))),
    }
}

/// Poke the last step, then carry any updated immediate value back up
/// through the recorded steps.
fn poke_final(
    rt: &mut Runtime,
    steps: &Steps,
    head_var: Option<Symbol>,
    context: &Cell,
    target: Cell,
    picker: &Cell,
    value: &Cell,
) -> Result<(), RuntimeError> {
    let mut updated = target;
    if poke(rt, &mut updated, picker, value)? == PokeOutcome::Done {
        return Ok(());
    }

    for step in steps.iter().rev() {
        let mut container = step.container;
        debug!(
            container = %container.kind(),
            value = %updated.kind(),
            "writing back updated value"
        );
        if poke(rt, &mut container, &step.picker, &updated)? == PokeOutcome::Done {
            return Ok(());
        }
        updated = container;
    }

    match head_var {
        Some(symbol) => {
            let vars = rt.heap.varlist_mut(context.as_node());
            match vars.get_mut(symbol) {
                Some(slot) => *slot = updated,
                None => vars.bind(symbol, updated),
            }
            debug!(word = symbol.as_str(), "updated value stored in variable");
        }
        None => {
            warn!(
                kind = %updated.kind(),
                "set-path changed an immediate value with no variable behind it; \
                 only a temporary was updated"
            );
        }
    }
    Ok(())
}
