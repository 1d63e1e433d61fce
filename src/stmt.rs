//! Statement synthesis.
//!
//! Every synthesis method returns whether control may fall through to the
//! next statement. A `return` yields `false`, and a statement list stops at
//! the first statement that cannot fall through so no dead code is emitted
//! after it.

use crate::emit::Generator;
use crate::ops::{assign_ops, pick_op};
use crate::random::pick;
use crate::types::DartType;

/// Maximum number of statements in one block.
const MAX_STATEMENTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StmtKind {
    If,
    IfElse,
    For,
    Block,
    Print,
    Return,
    Assign,
}

/// Uniform slots; assignment takes two of eight to bias towards the
/// non-recursive case.
const STMT_SLOTS: [StmtKind; 8] = [
    StmtKind::If,
    StmtKind::IfElse,
    StmtKind::For,
    StmtKind::Block,
    StmtKind::Print,
    StmtKind::Return,
    StmtKind::Assign,
    StmtKind::Assign,
];

impl Generator<'_> {
    /// Emit one to four statements at the current indentation.
    pub fn synthesize_statements(&mut self, depth: usize) -> bool {
        let count = 1 + self.dice.below(MAX_STATEMENTS);
        for _ in 0..count {
            if !self.synthesize_statement(depth) {
                return false;
            }
        }
        true
    }

    /// Emit a single statement.
    ///
    /// The deeper the nesting, the likelier the depth gate forces a plain
    /// assignment, which ends the recursion.
    pub fn synthesize_statement(&mut self, depth: usize) -> bool {
        self.check_depth(depth);
        let kind = if self.dice.below(depth + 1) > self.config.stmt_depth_threshold {
            StmtKind::Assign
        } else {
            *pick(self.dice, &STMT_SLOTS)
        };
        let falls = match kind {
            StmtKind::If => self.emit_if(depth),
            StmtKind::IfElse => self.emit_if_else(depth),
            StmtKind::For => self.emit_for(depth),
            StmtKind::Block => self.emit_block(depth),
            StmtKind::Print => self.emit_print(),
            StmtKind::Return => self.emit_return(),
            StmtKind::Assign => self.emit_assignment(),
        };
        // Set after the nested bodies so it describes this statement.
        self.last_was_return = kind == StmtKind::Return;
        falls
    }

    fn emit_if(&mut self, depth: usize) -> bool {
        let condition = self.synthesize_expr(0, DartType::Bool);
        self.line(&format!("if ({condition}) {{"));
        let falls = self.indented(|g| g.synthesize_statements(depth + 1));
        self.line("}");
        falls
    }

    fn emit_if_else(&mut self, depth: usize) -> bool {
        let condition = self.synthesize_expr(0, DartType::Bool);
        self.line(&format!("if ({condition}) {{"));
        let then_falls = self.indented(|g| g.synthesize_statements(depth + 1));
        self.line("} else {");
        let else_falls = self.indented(|g| g.synthesize_statements(depth + 1));
        self.line("}");
        then_falls || else_falls
    }

    /// Counting loop; the counter is read-only to the body.
    fn emit_for(&mut self, depth: usize) -> bool {
        let counter = self.scope.push_local(DartType::Int, false);
        self.line(&format!(
            "for (int {counter} = 0; {counter} < {}; {counter}++) {{",
            self.config.loop_limit
        ));
        let falls = self.indented(|g| g.synthesize_statements(depth + 1));
        self.scope.pop_local();
        self.line("}");
        falls
    }

    /// Nested block introducing one local of a random type.
    fn emit_block(&mut self, depth: usize) -> bool {
        let ty = DartType::pick(self.dice);
        let init = self.synthesize_expr(0, ty);
        self.line("{");
        let falls = self.indented(|g| {
            let local = g.scope.push_local(ty, true);
            g.line(&format!("{ty} {local} = {init};"));
            let falls = g.synthesize_statements(depth + 1);
            g.scope.pop_local();
            falls
        });
        self.line("}");
        falls
    }

    fn emit_print(&mut self) -> bool {
        let ty = DartType::pick(self.dice);
        let value = self.synthesize_expr(0, ty);
        self.line(&format!("print({value});"));
        true
    }

    fn emit_return(&mut self) -> bool {
        let return_type = self
            .scope
            .current_signature(&self.catalogue)
            .map(|signature| signature.return_type());
        match return_type {
            Some(ty) => {
                let value = self.synthesize_expr(0, ty);
                self.line(&format!("return {value};"));
            }
            None => self.line("return;"),
        }
        false
    }

    fn emit_assignment(&mut self) -> bool {
        let ty = DartType::pick(self.dice);
        let targets = self.scope.assignable_names(&self.catalogue, ty);
        let target = *pick(self.dice, &targets);
        let op = pick_op(self.dice, assign_ops(ty));
        let value = self.synthesize_expr(0, ty);
        self.line(&format!("{target} {op} {value};"));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenConfig;
    use crate::random::ScriptedDice;
    use crate::seed::Seed;
    use crate::types::Signature;

    /// Catalogue planned from a fixed script: globals
    /// `[int, bool, int, double, String?, List<int>?, Map]`, one function
    /// `double foo0(int par1)` and one class with a `bool` field and
    /// `int foo0_0()`.
    const PLAN: [usize; 12] = [0, 1, 0, 1, 2, 1, 0, 0, 0, 0, 0, 1];

    fn with_generator<T>(
        draws: &[usize],
        f: impl FnOnce(&mut Generator<'_>) -> T,
    ) -> (T, String, usize) {
        let config = GenConfig::default();
        let mut dice = ScriptedDice::new(PLAN.iter().chain(draws).copied());
        let (result, text) = {
            let mut generator = Generator::new(&mut dice, Seed::resolve(1), &config);
            assert_eq!(
                generator.catalogue().functions,
                vec![Signature::new(vec![DartType::Double, DartType::Int])]
            );
            let result = f(&mut generator);
            (result, generator.into_output())
        };
        (result, text, dice.remaining())
    }

    #[test]
    fn return_inside_function_uses_return_type() {
        let (falls, text, left) = with_generator(
            &[
                0, 5, // gate, return slot
                0, 5, 0, 5, 1, // double expr: gate, terminal, literal, fraction 0.25
            ],
            |g| {
                g.scope.enter_function(0);
                let falls = g.synthesize_statement(0);
                g.scope.exit_function();
                falls
            },
        );
        assert!(!falls);
        assert_eq!(text, "return 0.25;\n");
        assert_eq!(left, 0);
    }

    #[test]
    fn return_inside_run_is_bare() {
        let (falls, text, left) = with_generator(&[0, 5], |g| {
            g.scope.enter_class(0);
            let falls = g.synthesize_statement(0);
            g.scope.exit_class();
            falls
        });
        assert!(!falls);
        assert_eq!(text, "return;\n");
        assert_eq!(left, 0);
    }

    #[test]
    fn statement_list_stops_after_return() {
        // Four statements requested, the second is a return.
        let (falls, text, left) = with_generator(
            &[
                3, // four statements
                0, 4, 0, 0, 5, 0, 0, // print(true);
                0, 5, // return;
            ],
            |g| {
                g.scope.enter_class(0);
                let falls = g.synthesize_statements(0);
                g.scope.exit_class();
                falls
            },
        );
        assert!(!falls);
        assert_eq!(text, "print(true);\nreturn;\n");
        assert_eq!(left, 0);
    }

    /// Run a four-statement list in `X0.run` and check it stopped after the
    /// first statement.
    fn list_ending_in(draws: &[usize], expected: &str) {
        let (falls, text, left) = with_generator(draws, |g| {
            g.scope.enter_class(0);
            let falls = g.synthesize_statements(0);
            assert_eq!(g.scope.depth(), 0);
            assert!(!g.last_was_return, "nested return counted as top-level");
            g.scope.exit_class();
            falls
        });
        assert!(!falls);
        assert_eq!(text, expected);
        assert_eq!(left, 0);
    }

    #[test]
    fn one_armed_if_ending_in_return_ends_the_list() {
        list_ending_in(
            &[
                3, // four statements
                0, 0, // gate, if
                0, 5, 1, 0, // condition: var1
                0, 0, 5, // body: return;
            ],
            "if (var1) {\n  return;\n}\n",
        );
    }

    #[test]
    fn loop_ending_in_return_ends_the_list() {
        list_ending_in(
            &[
                3, // four statements
                0, 2, // gate, for loop
                0, 0, 5, // body: return;
            ],
            "for (int loc0 = 0; loc0 < 5; loc0++) {\n  return;\n}\n",
        );
    }

    #[test]
    fn block_ending_in_return_ends_the_list() {
        list_ending_in(
            &[
                3, // four statements
                0, 3, // gate, block
                0, 0, 5, 0, 0, // bool local initialised to true
                0, 0, 5, // body: return;
            ],
            "{\n  bool loc0 = true;\n  return;\n}\n",
        );
    }

    #[test]
    fn deep_statements_are_forced_to_assignments() {
        // Gate draw 6 at depth 6 exceeds the threshold of 5.
        let (falls, text, left) = with_generator(
            &[
                6, // gate
                0, 1, 0, // bool type, second target (fld0_0), `=`
                0, 5, 0, 1, // expr: gate, terminal, literal, false
            ],
            |g| {
                g.scope.enter_class(0);
                let falls = g.synthesize_statement(6);
                g.scope.exit_class();
                falls
            },
        );
        assert!(falls);
        assert_eq!(text, "fld0_0 = false;\n");
        assert_eq!(left, 0);
    }

    #[test]
    fn if_else_falls_through_if_either_branch_does() {
        let (falls, text, left) = with_generator(
            &[
                0, 1, // gate, if-else
                0, 5, 1, 0, // condition: terminal name var1
                0, 0, 5, // then: one statement, return;
                0, 0, 5, // else: one statement, return;
            ],
            |g| {
                g.scope.enter_class(0);
                let falls = g.synthesize_statement(0);
                g.scope.exit_class();
                falls
            },
        );
        assert!(!falls);
        assert_eq!(
            text,
            "if (var1) {\n  return;\n} else {\n  return;\n}\n"
        );
        assert_eq!(left, 0);

        let (falls, _, _) = with_generator(
            &[
                0, 1, 0, 5, 1, 0, // if-else on var1
                0, 0, 5, // then: return;
                0, 0, 4, 0, 0, 5, 0, 0, // else: print(true);
            ],
            |g| {
                g.scope.enter_class(0);
                let falls = g.synthesize_statement(0);
                g.scope.exit_class();
                falls
            },
        );
        assert!(falls);
    }

    #[test]
    fn loop_counter_is_scoped_and_read_only() {
        let (falls, text, left) = with_generator(
            &[
                0, 2, // gate, for loop
                0, // one statement in the body
                0, 6, // gate, assignment
                1, 1, 0, // int, second writable int (var2, not loc0), `=`
                0, 5, 1, 2, // expr: terminal name, third readable int (loc0)
            ],
            |g| {
                g.scope.enter_class(0);
                let falls = g.synthesize_statement(0);
                assert_eq!(g.scope.depth(), 0);
                g.scope.exit_class();
                falls
            },
        );
        assert!(falls);
        assert_eq!(
            text,
            "for (int loc0 = 0; loc0 < 5; loc0++) {\n  var2 = loc0;\n}\n"
        );
        assert_eq!(left, 0);
    }

    #[test]
    fn block_local_is_initialised_before_it_is_visible() {
        let (falls, text, left) = with_generator(
            &[
                0, 3, // gate, block
                1, // int local
                0, 5, 1, 1, // init: terminal name, var2 (loc0 not yet visible)
                0, // one statement
                0, 4, // gate, print
                1, 0, 5, 1, 2, // print an int name: loc0
            ],
            |g| {
                g.scope.enter_class(0);
                let falls = g.synthesize_statement(0);
                g.scope.exit_class();
                falls
            },
        );
        assert!(falls);
        assert_eq!(text, "{\n  int loc0 = var2;\n  print(loc0);\n}\n");
        assert_eq!(left, 0);
    }
}
