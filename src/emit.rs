//! The [`Generator`]: owns one run's catalogue, scope and output buffer, and
//! emits the overall program layout.
//!
//! Statement and expression synthesis live in `stmt` and `expr` as further
//! `impl Generator` blocks; this module handles the fixed skeleton around
//! them: header, globals, functions, the class chain and `main`.

use crate::catalogue::Catalogue;
use crate::config::GenConfig;
use crate::literal::literal;
use crate::random::Dice;
use crate::scope::Scope;
use crate::seed::Seed;
use crate::types::Signature;

/// Version of the emission logic, printed in every program header.
///
/// Bump whenever a change alters the program any seed maps to.
pub const EMITTER_VERSION: &str = "1.0";

/// Number of spaces per indentation level.
const INDENT_WIDTH: usize = 2;

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// One generation run.
///
/// The catalogue is planned in [`Generator::new`]; [`Generator::run`] emits
/// the program into an in-memory buffer. Every random decision is drawn from
/// the borrowed [`Dice`], so a seeded source makes the output reproducible.
pub struct Generator<'a> {
    pub(crate) dice: &'a mut dyn Dice,
    pub(crate) config: &'a GenConfig,
    pub(crate) catalogue: Catalogue,
    pub(crate) scope: Scope,
    /// Whether the most recently completed statement was a `return`.
    pub(crate) last_was_return: bool,
    seed: Seed,
    out: String,
    indent: usize,
}

impl<'a> Generator<'a> {
    /// Plan a fresh catalogue from `dice`.
    ///
    /// `seed` is only recorded in the header; the caller is responsible for
    /// seeding `dice` from it.
    pub fn new(dice: &'a mut dyn Dice, seed: Seed, config: &'a GenConfig) -> Self {
        let catalogue = Catalogue::plan(&mut *dice);
        Self {
            dice,
            config,
            catalogue,
            scope: Scope::new(),
            last_was_return: false,
            seed,
            out: String::new(),
            indent: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl Generator<'_> {
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn into_output(self) -> String {
        self.out
    }
}

// ---------------------------------------------------------------------------
// Program layout
// ---------------------------------------------------------------------------

impl Generator<'_> {
    /// Emit the whole program.
    ///
    /// Panics if the scope or cursor is left unbalanced, which would mean a
    /// generator bug.
    #[tracing::instrument(skip_all, fields(seed = %self.seed))]
    pub fn run(&mut self) {
        self.emit_header();
        self.emit_globals();
        self.emit_functions();
        self.emit_classes();
        self.emit_main();

        assert!(
            self.scope.is_settled(),
            "generation ended with unbalanced scope: {:?}",
            self.scope
        );
        let (pushes, pops) = self.scope.push_pop_counts();
        assert_eq!(pushes, pops, "local pushes and pops differ");
        tracing::debug!(bytes = self.out.len(), locals = pushes, "program emitted");
    }

    fn emit_header(&mut self) {
        self.line(&format!("// The Dart Project Fuzz Tester ({EMITTER_VERSION})."));
        self.line("// Program generated as:");
        self.line(&format!("//   dartfuzz --seed {}", self.seed));
        self.blank();
    }

    fn emit_globals(&mut self) {
        for i in 0..self.catalogue.globals.len() {
            let ty = self.catalogue.globals[i];
            let value = literal(self.dice, ty);
            self.line(&format!("{ty} var{i} = {value};"));
        }
        self.blank();
    }

    fn emit_functions(&mut self) {
        for i in 0..self.catalogue.functions.len() {
            self.scope.enter_function(i);
            let signature = self.catalogue.functions[i].clone();
            self.emit_routine(&format!("foo{i}"), &signature);
            self.scope.exit_function();
        }
    }

    fn emit_classes(&mut self) {
        for class in 0..self.catalogue.class_count() {
            self.scope.enter_class(class);
            if class == 0 {
                self.line("class X0 {");
            } else {
                self.line(&format!("class X{class} extends X{} {{", class - 1));
            }
            self.indented(|g| {
                g.emit_fields(class);
                g.emit_methods(class);
                g.emit_run(class);
            });
            self.line("}");
            self.blank();
            self.scope.exit_class();
        }
    }

    fn emit_fields(&mut self, class: usize) {
        for i in 0..self.catalogue.class_fields[class].len() {
            let ty = self.catalogue.class_fields[class][i];
            let value = literal(self.dice, ty);
            self.line(&format!("{ty} fld{class}_{i} = {value};"));
        }
        self.blank();
    }

    fn emit_methods(&mut self, class: usize) {
        for method in 0..self.catalogue.class_methods[class].len() {
            self.scope.enter_method(method);
            let signature = self.catalogue.class_methods[class][method].clone();
            self.emit_routine(&format!("foo{class}_{method}"), &signature);
            self.scope.exit_method();
        }
    }

    /// `run` chains to the superclass first, then runs its own statements.
    fn emit_run(&mut self, class: usize) {
        self.line("void run() {");
        self.indented(|g| {
            if class > 0 {
                g.line("super.run();");
            }
            g.synthesize_statements(0);
        });
        self.line("}");
    }

    /// Emit a function or method definition.
    ///
    /// A trailing `return` follows the body unless its last top-level
    /// statement already is one. Dart's flow analysis treats one-armed `if`s
    /// and loop bodies as skippable, so a body whose fall-through flag is
    /// false for any other reason still gets it.
    fn emit_routine(&mut self, name: &str, signature: &Signature) {
        let params: Vec<String> = signature
            .params()
            .iter()
            .enumerate()
            .map(|(k, ty)| format!("{ty} par{}", k + 1))
            .collect();
        self.line(&format!(
            "{} {name}({}) {{",
            signature.return_type(),
            params.join(", ")
        ));
        self.indented(|g| {
            g.synthesize_statements(0);
            if !g.last_was_return {
                let value = g.synthesize_expr(0, signature.return_type());
                g.line(&format!("return {value};"));
            }
        });
        self.line("}");
        self.blank();
    }

    /// Entry point: run the last class inside a guard, then print every
    /// global whatever happened.
    fn emit_main(&mut self) {
        let last = self.catalogue.class_count() - 1;
        let globals = self.catalogue.globals.len();
        self.line("void main() {");
        self.indented(|g| {
            g.line("try {");
            g.indented(|g| g.line(&format!("new X{last}().run();")));
            g.line("} catch (e) {");
            g.indented(|g| g.line("print('throws');"));
            g.line("} finally {");
            g.indented(|g| {
                for i in 0..globals {
                    g.line(&format!("print('$var{i}');"));
                }
            });
            g.line("}");
        });
        self.line("}");
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

impl Generator<'_> {
    /// Append one line at the current indentation.
    pub(crate) fn line(&mut self, text: &str) {
        self.out.push_str(&" ".repeat(self.indent * INDENT_WIDTH));
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Execute `f` at one deeper indentation level, then restore.
    pub(crate) fn indented<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    /// Abort if recursion went past the configured ceiling.
    pub(crate) fn check_depth(&self, depth: usize) {
        assert!(
            depth <= self.config.depth_ceiling,
            "nesting depth {depth} exceeds ceiling {}",
            self.config.depth_ceiling
        );
    }
}
