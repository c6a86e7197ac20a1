//! Invocation adapter synthesis
//!
//! A host function is stored as a `HostFunction`, a tagged variant over the
//! supported signature shapes. `synthesize` turns it into a shared
//! `Invoker` closure that maps a dynamic call `(ctx, self, args, block)`
//! onto the host function's parameter list.
//!
//! Fixed-arity shapes only go up to three positional slots; wider fixed
//! arities bind through the slice shapes (`Args`, `ContextArgs`).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use garnet_core::{ArityError, Block, CallContext, HostResult, Invoker, Value};

use crate::arity::ArityPolicy;
use crate::error::DescriptorError;

// ============================================================================
// Host function signatures
// ============================================================================

/// `fn(self)`
pub type ReceiverFn = fn(&Value) -> HostResult;
/// `fn(self, a)`
pub type Fixed1Fn = fn(&Value, &Value) -> HostResult;
/// `fn(self, a, b)`
pub type Fixed2Fn = fn(&Value, &Value, &Value) -> HostResult;
/// `fn(self, a, b, c)`
pub type Fixed3Fn = fn(&Value, &Value, &Value, &Value) -> HostResult;
/// `fn(self, args)`
pub type ArgsFn = fn(&Value, &[Value]) -> HostResult;
/// `fn(ctx, self)`
pub type ContextReceiverFn = fn(&CallContext<'_>, &Value) -> HostResult;
/// `fn(ctx, self, a)`
pub type ContextFixed1Fn = fn(&CallContext<'_>, &Value, &Value) -> HostResult;
/// `fn(ctx, self, a, b)`
pub type ContextFixed2Fn = fn(&CallContext<'_>, &Value, &Value, &Value) -> HostResult;
/// `fn(ctx, self, a, b, c)`
pub type ContextFixed3Fn = fn(&CallContext<'_>, &Value, &Value, &Value, &Value) -> HostResult;
/// `fn(ctx, self, args)`
pub type ContextArgsFn = fn(&CallContext<'_>, &Value, &[Value]) -> HostResult;
/// `fn(ctx, self, args, block)`
pub type ContextArgsBlockFn =
    fn(&CallContext<'_>, &Value, &[Value], Option<&Block>) -> HostResult;

/// A host function together with its signature shape
#[derive(Clone, Copy)]
pub enum HostFunction {
    /// Receiver only
    Receiver(ReceiverFn),
    /// Receiver + one positional slot
    Fixed1(Fixed1Fn),
    /// Receiver + two positional slots
    Fixed2(Fixed2Fn),
    /// Receiver + three positional slots
    Fixed3(Fixed3Fn),
    /// Receiver + the full argument slice
    Args(ArgsFn),
    /// Context + receiver
    ContextReceiver(ContextReceiverFn),
    /// Context + receiver + one positional slot
    ContextFixed1(ContextFixed1Fn),
    /// Context + receiver + two positional slots
    ContextFixed2(ContextFixed2Fn),
    /// Context + receiver + three positional slots
    ContextFixed3(ContextFixed3Fn),
    /// Context + receiver + the full argument slice
    ContextArgs(ContextArgsFn),
    /// Context + receiver + argument slice + block
    ContextArgsBlock(ContextArgsBlockFn),
}

impl HostFunction {
    /// Signature shape of this function
    pub fn shape(&self) -> AdapterShape {
        match self {
            HostFunction::Receiver(_) => AdapterShape::Receiver,
            HostFunction::Fixed1(_) => AdapterShape::Fixed1,
            HostFunction::Fixed2(_) => AdapterShape::Fixed2,
            HostFunction::Fixed3(_) => AdapterShape::Fixed3,
            HostFunction::Args(_) => AdapterShape::Args,
            HostFunction::ContextReceiver(_) => AdapterShape::ContextReceiver,
            HostFunction::ContextFixed1(_) => AdapterShape::ContextFixed1,
            HostFunction::ContextFixed2(_) => AdapterShape::ContextFixed2,
            HostFunction::ContextFixed3(_) => AdapterShape::ContextFixed3,
            HostFunction::ContextArgs(_) => AdapterShape::ContextArgs,
            HostFunction::ContextArgsBlock(_) => AdapterShape::ContextArgsBlock,
        }
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostFunction::{}", self.shape())
    }
}

// ============================================================================
// Adapter shape
// ============================================================================

/// Data-only tag naming a host signature shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterShape {
    /// `receiver`
    Receiver,
    /// `fixed1`
    Fixed1,
    /// `fixed2`
    Fixed2,
    /// `fixed3`
    Fixed3,
    /// `args`
    Args,
    /// `context-receiver`
    ContextReceiver,
    /// `context-fixed1`
    ContextFixed1,
    /// `context-fixed2`
    ContextFixed2,
    /// `context-fixed3`
    ContextFixed3,
    /// `context-args`
    ContextArgs,
    /// `context-args-block`
    ContextArgsBlock,
}

impl AdapterShape {
    /// Every shape, in declaration order
    pub const ALL: [AdapterShape; 11] = [
        AdapterShape::Receiver,
        AdapterShape::Fixed1,
        AdapterShape::Fixed2,
        AdapterShape::Fixed3,
        AdapterShape::Args,
        AdapterShape::ContextReceiver,
        AdapterShape::ContextFixed1,
        AdapterShape::ContextFixed2,
        AdapterShape::ContextFixed3,
        AdapterShape::ContextArgs,
        AdapterShape::ContextArgsBlock,
    ];

    /// Name used in binding manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterShape::Receiver => "receiver",
            AdapterShape::Fixed1 => "fixed1",
            AdapterShape::Fixed2 => "fixed2",
            AdapterShape::Fixed3 => "fixed3",
            AdapterShape::Args => "args",
            AdapterShape::ContextReceiver => "context-receiver",
            AdapterShape::ContextFixed1 => "context-fixed1",
            AdapterShape::ContextFixed2 => "context-fixed2",
            AdapterShape::ContextFixed3 => "context-fixed3",
            AdapterShape::ContextArgs => "context-args",
            AdapterShape::ContextArgsBlock => "context-args-block",
        }
    }

    /// Whether the host function takes the call context
    pub fn takes_context(&self) -> bool {
        matches!(
            self,
            AdapterShape::ContextReceiver
                | AdapterShape::ContextFixed1
                | AdapterShape::ContextFixed2
                | AdapterShape::ContextFixed3
                | AdapterShape::ContextArgs
                | AdapterShape::ContextArgsBlock
        )
    }

    /// Number of positional slots for fixed shapes, `None` for slice shapes
    pub fn fixed_slots(&self) -> Option<usize> {
        match self {
            AdapterShape::Receiver | AdapterShape::ContextReceiver => Some(0),
            AdapterShape::Fixed1 | AdapterShape::ContextFixed1 => Some(1),
            AdapterShape::Fixed2 | AdapterShape::ContextFixed2 => Some(2),
            AdapterShape::Fixed3 | AdapterShape::ContextFixed3 => Some(3),
            AdapterShape::Args | AdapterShape::ContextArgs | AdapterShape::ContextArgsBlock => None,
        }
    }

    /// Check that this shape can carry the declared counts.
    ///
    /// Returns the reason when it cannot.
    pub fn check_counts(&self, required: usize, optional: usize, rest: bool) -> Result<(), String> {
        let Some(slots) = self.fixed_slots() else {
            return Ok(());
        };
        if optional > 0 || rest {
            return Err("cannot accept optional or rest arguments".to_string());
        }
        if required != slots {
            return Err(format!(
                "takes exactly {} argument(s) but {} are required",
                slots, required
            ));
        }
        Ok(())
    }
}

impl fmt::Display for AdapterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterShape {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdapterShape::ALL
            .iter()
            .copied()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| DescriptorError::UnknownShape(s.to_string()))
    }
}

// ============================================================================
// Synthesis
// ============================================================================

fn slot_error(args: &[Value], slots: usize) -> HostResult {
    Err(ArityError {
        observed: args.len(),
        min: slots,
        max: Some(slots),
    }
    .into())
}

/// Wrap a repacking closure with the arity check when the policy asks for it.
fn checked<F>(policy: ArityPolicy, repack: F) -> Invoker
where
    F: for<'a> Fn(&CallContext<'a>, &Value, &[Value], Option<&Block>) -> HostResult
        + Send
        + Sync
        + 'static,
{
    if !policy.check_arity {
        return Arc::new(repack);
    }
    let arity = policy.arity;
    Arc::new(move |ctx: &CallContext<'_>, recv: &Value, args: &[Value], block: Option<&Block>| {
        if !arity.accepts(args.len()) {
            return Err(ArityError {
                observed: args.len(),
                min: arity.min,
                max: arity.max,
            }
            .into());
        }
        repack(ctx, recv, args, block)
    })
}

/// Build the invoker for a host function under the given arity policy.
///
/// The arity check, when enabled, runs before anything else. Fixed shapes
/// draw exactly their slot count from the arguments and never pad.
pub fn synthesize(host: HostFunction, policy: ArityPolicy) -> Invoker {
    match host {
        HostFunction::Receiver(f) => checked(policy, move |_, recv, _, _| f(recv)),
        HostFunction::Fixed1(f) => checked(policy, move |_, recv, args, _| match args {
            [a] => f(recv, a),
            _ => slot_error(args, 1),
        }),
        HostFunction::Fixed2(f) => checked(policy, move |_, recv, args, _| match args {
            [a, b] => f(recv, a, b),
            _ => slot_error(args, 2),
        }),
        HostFunction::Fixed3(f) => checked(policy, move |_, recv, args, _| match args {
            [a, b, c] => f(recv, a, b, c),
            _ => slot_error(args, 3),
        }),
        HostFunction::Args(f) => checked(policy, move |_, recv, args, _| f(recv, args)),
        HostFunction::ContextReceiver(f) => checked(policy, move |ctx, recv, _, _| f(ctx, recv)),
        HostFunction::ContextFixed1(f) => checked(policy, move |ctx, recv, args, _| match args {
            [a] => f(ctx, recv, a),
            _ => slot_error(args, 1),
        }),
        HostFunction::ContextFixed2(f) => checked(policy, move |ctx, recv, args, _| match args {
            [a, b] => f(ctx, recv, a, b),
            _ => slot_error(args, 2),
        }),
        HostFunction::ContextFixed3(f) => checked(policy, move |ctx, recv, args, _| match args {
            [a, b, c] => f(ctx, recv, a, b, c),
            _ => slot_error(args, 3),
        }),
        HostFunction::ContextArgs(f) => checked(policy, move |ctx, recv, args, _| f(ctx, recv, args)),
        HostFunction::ContextArgsBlock(f) => checked(policy, move |ctx, recv, args, block| {
            f(ctx, recv, args, block)
        }),
    }
}
