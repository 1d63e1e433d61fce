//! Scope tracking and name resolution.
//!
//! [`Scope`] combines the lexical stack of locals with the generation
//! [`Cursor`] (which function, class or method is being emitted). Together
//! with the [`Catalogue`] it answers the two questions expression synthesis
//! asks: which names of a given type are visible here, and which already
//! emitted function or method returns a given type.

use std::fmt;

use crate::catalogue::Catalogue;
use crate::types::{DartType, Signature};

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Where in the program the emitter currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Outside any function or class.
    Idle,
    /// Inside the body of global function `foo<i>`.
    Function(usize),
    /// Inside class `X<c>`, outside its numbered methods (fields and `run`).
    Class(usize),
    /// Inside method `foo<class>_<method>`.
    Method { class: usize, method: usize },
}

impl Cursor {
    pub fn class(self) -> Option<usize> {
        match self {
            Cursor::Class(class) | Cursor::Method { class, .. } => Some(class),
            Cursor::Idle | Cursor::Function(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Bindings and call sites
// ---------------------------------------------------------------------------

/// A name that can appear in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// `var<i>`
    Global(usize),
    /// `loc<i>`; the index is the local's stack slot.
    Local(usize),
    /// `fld<class>_<index>`
    Field { class: usize, index: usize },
    /// `par<i>`, with `i >= 1` indexing into the current signature.
    Param(usize),
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Global(i) => write!(f, "var{i}"),
            Binding::Local(i) => write!(f, "loc{i}"),
            Binding::Field { class, index } => write!(f, "fld{class}_{index}"),
            Binding::Param(i) => write!(f, "par{i}"),
        }
    }
}

/// The target of a backward call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// `foo<i>`
    Function(usize),
    /// `foo<class>_<method>`, called on the implicit receiver.
    Method { class: usize, method: usize },
}

impl CallSite {
    pub fn signature(self, catalogue: &Catalogue) -> &Signature {
        match self {
            CallSite::Function(i) => &catalogue.functions[i],
            CallSite::Method { class, method } => &catalogue.class_methods[class][method],
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallSite::Function(i) => write!(f, "foo{i}"),
            CallSite::Method { class, method } => write!(f, "foo{class}_{method}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Local {
    ty: DartType,
    /// Loop counters are read-only so emitted loops always terminate.
    assignable: bool,
}

/// Lexical locals plus the generation cursor.
#[derive(Debug, Clone)]
pub struct Scope {
    locals: Vec<Local>,
    cursor: Cursor,
    pushes: usize,
    pops: usize,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            locals: Vec::new(),
            cursor: Cursor::Idle,
            pushes: 0,
            pops: 0,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn depth(&self) -> usize {
        self.locals.len()
    }

    /// Total `(pushes, pops)` of locals since creation.
    pub fn push_pop_counts(&self) -> (usize, usize) {
        (self.pushes, self.pops)
    }

    /// No locals in scope and the cursor is idle.
    pub fn is_settled(&self) -> bool {
        self.locals.is_empty() && self.cursor == Cursor::Idle
    }
}

// ---------------------------------------------------------------------------
// Locals
// ---------------------------------------------------------------------------

impl Scope {
    /// Bring a new local into scope and return its binding.
    pub fn push_local(&mut self, ty: DartType, assignable: bool) -> Binding {
        let slot = self.locals.len();
        self.locals.push(Local { ty, assignable });
        self.pushes += 1;
        Binding::Local(slot)
    }

    pub fn pop_local(&mut self) {
        assert!(self.locals.pop().is_some(), "popped an empty local stack");
        self.pops += 1;
    }
}

// ---------------------------------------------------------------------------
// Cursor transitions
// ---------------------------------------------------------------------------

impl Scope {
    pub fn enter_function(&mut self, index: usize) {
        self.transition(Cursor::Idle, Cursor::Function(index));
    }

    pub fn exit_function(&mut self) {
        let Cursor::Function(_) = self.cursor else {
            panic!("exit_function with cursor {:?}", self.cursor);
        };
        self.transition(self.cursor, Cursor::Idle);
    }

    pub fn enter_class(&mut self, class: usize) {
        self.transition(Cursor::Idle, Cursor::Class(class));
    }

    pub fn exit_class(&mut self) {
        let Cursor::Class(_) = self.cursor else {
            panic!("exit_class with cursor {:?}", self.cursor);
        };
        self.transition(self.cursor, Cursor::Idle);
    }

    pub fn enter_method(&mut self, method: usize) {
        let Cursor::Class(class) = self.cursor else {
            panic!("enter_method with cursor {:?}", self.cursor);
        };
        self.transition(self.cursor, Cursor::Method { class, method });
    }

    pub fn exit_method(&mut self) {
        let Cursor::Method { class, .. } = self.cursor else {
            panic!("exit_method with cursor {:?}", self.cursor);
        };
        self.transition(self.cursor, Cursor::Class(class));
    }

    fn transition(&mut self, from: Cursor, to: Cursor) {
        assert_eq!(
            self.cursor, from,
            "cursor transition to {to:?} from unexpected state"
        );
        assert!(
            self.locals.is_empty(),
            "cursor moved to {to:?} with {} locals in scope",
            self.locals.len()
        );
        tracing::trace!(?from, ?to, "cursor");
        self.cursor = to;
    }
}

// ---------------------------------------------------------------------------
// Name resolution
// ---------------------------------------------------------------------------

impl Scope {
    /// Signature of the function or method being emitted, if any.
    pub fn current_signature<'c>(&self, catalogue: &'c Catalogue) -> Option<&'c Signature> {
        match self.cursor {
            Cursor::Function(i) => Some(&catalogue.functions[i]),
            Cursor::Method { class, method } => Some(&catalogue.class_methods[class][method]),
            Cursor::Idle | Cursor::Class(_) => None,
        }
    }

    /// Every visible binding of exactly type `ty`, in the order globals,
    /// locals, class fields, parameters.
    pub fn candidate_names(&self, catalogue: &Catalogue, ty: DartType) -> Vec<Binding> {
        self.collect_names(catalogue, ty, false)
    }

    /// Like [`candidate_names`](Self::candidate_names) but without read-only
    /// locals; used for assignment and increment targets.
    pub fn assignable_names(&self, catalogue: &Catalogue, ty: DartType) -> Vec<Binding> {
        self.collect_names(catalogue, ty, true)
    }

    fn collect_names(&self, catalogue: &Catalogue, ty: DartType, writable: bool) -> Vec<Binding> {
        let mut names: Vec<Binding> = catalogue
            .globals
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == ty)
            .map(|(i, _)| Binding::Global(i))
            .collect();

        names.extend(
            self.locals
                .iter()
                .enumerate()
                .filter(|(_, local)| local.ty == ty && (local.assignable || !writable))
                .map(|(i, _)| Binding::Local(i)),
        );

        if let Some(class) = self.cursor.class() {
            names.extend(
                catalogue.class_fields[class]
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| **t == ty)
                    .map(|(index, _)| Binding::Field { class, index }),
            );
        }

        if let Some(signature) = self.current_signature(catalogue) {
            names.extend(
                signature
                    .types()
                    .iter()
                    .enumerate()
                    .skip(1)
                    .filter(|(_, t)| **t == ty)
                    .map(|(i, _)| Binding::Param(i)),
            );
        }

        assert!(!names.is_empty(), "no visible name of type {ty:?}");
        names
    }

    /// The type a binding denotes in the current scope, or `None` if it is
    /// not visible here.
    pub fn binding_type(&self, catalogue: &Catalogue, binding: Binding) -> Option<DartType> {
        match binding {
            Binding::Global(i) => catalogue.globals.get(i).copied(),
            Binding::Local(i) => self.locals.get(i).map(|local| local.ty),
            Binding::Field { class, index } => {
                if self.cursor.class() != Some(class) {
                    return None;
                }
                catalogue.class_fields[class].get(index).copied()
            }
            Binding::Param(i) => {
                let signature = self.current_signature(catalogue)?;
                if i == 0 {
                    return None;
                }
                signature.types().get(i).copied()
            }
        }
    }

    /// Find an already emitted function or method returning `ty`.
    ///
    /// Inside a class, the class's own earlier methods are scanned first
    /// (latest first), then every global function. Outside a class only
    /// global functions defined before the current one are eligible.
    pub fn resolve_callable(&self, catalogue: &Catalogue, ty: DartType) -> Option<CallSite> {
        let function_limit = match self.cursor {
            Cursor::Idle | Cursor::Class(_) | Cursor::Method { .. } => catalogue.functions.len(),
            Cursor::Function(i) => i,
        };

        if let Some(class) = self.cursor.class() {
            let method_limit = match self.cursor {
                Cursor::Method { method, .. } => method,
                _ => catalogue.class_methods[class].len(),
            };
            let own = catalogue.class_methods[class][..method_limit]
                .iter()
                .rposition(|sig| sig.return_type() == ty);
            if let Some(method) = own {
                return Some(CallSite::Method { class, method });
            }
        }

        catalogue.functions[..function_limit]
            .iter()
            .rposition(|sig| sig.return_type() == ty)
            .map(CallSite::Function)
    }
}
