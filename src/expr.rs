//! Expression synthesis.
//!
//! [`Generator::synthesize_expr`] produces text whose static Dart type is
//! exactly the requested [`DartType`]. Compound forms recurse with
//! `depth + 1`; past the depth gate, or when a form does not apply to the
//! requested type, a terminal (literal or visible name) is emitted instead.

use crate::emit::Generator;
use crate::literal::literal;
use crate::ops::{binary_ops, increment_ops, pick_op, relational_ops, unary_ops};
use crate::random::pick;
use crate::types::DartType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprKind {
    Unary,
    Binary,
    Increment,
    Conversion,
    Call,
    Terminal,
}

const EXPR_SLOTS: [ExprKind; 6] = [
    ExprKind::Unary,
    ExprKind::Binary,
    ExprKind::Increment,
    ExprKind::Conversion,
    ExprKind::Call,
    ExprKind::Terminal,
];

impl Generator<'_> {
    /// Synthesize an expression of type `ty` at nesting `depth`.
    pub fn synthesize_expr(&mut self, depth: usize, ty: DartType) -> String {
        self.check_depth(depth);
        if self.dice.below(depth + 1) > self.config.expr_depth_threshold {
            return self.terminal(ty);
        }
        match *pick(self.dice, &EXPR_SLOTS) {
            ExprKind::Unary => self.unary_expr(depth, ty),
            ExprKind::Binary => self.binary_expr(depth, ty),
            ExprKind::Increment => self.increment_expr(ty),
            ExprKind::Conversion => self.conversion_expr(depth, ty),
            ExprKind::Call => self.call_expr(depth, ty),
            ExprKind::Terminal => self.terminal(ty),
        }
    }

    /// A literal or a visible name, with equal probability.
    pub fn terminal(&mut self, ty: DartType) -> String {
        if self.dice.below(2) == 0 {
            literal(self.dice, ty)
        } else {
            self.name_of(ty)
        }
    }

    fn name_of(&mut self, ty: DartType) -> String {
        let names = self.scope.candidate_names(&self.catalogue, ty);
        pick(self.dice, &names).to_string()
    }

    fn unary_expr(&mut self, depth: usize, ty: DartType) -> String {
        let ops = unary_ops(ty);
        if ops.is_empty() {
            return self.terminal(ty);
        }
        let op = pick_op(self.dice, ops);
        let operand = self.synthesize_expr(depth + 1, ty);
        // The inner parentheses keep `-` from fusing with a negative literal
        // into `--`.
        format!("({op}({operand}))")
    }

    fn binary_expr(&mut self, depth: usize, ty: DartType) -> String {
        let ops = binary_ops(ty);
        if ops.is_empty() {
            return self.terminal(ty);
        }
        let op = pick_op(self.dice, ops);
        let lhs = self.synthesize_expr(depth + 1, ty);
        let rhs = self.synthesize_expr(depth + 1, ty);
        format!("({lhs} {op} {rhs})")
    }

    fn increment_expr(&mut self, ty: DartType) -> String {
        let ops = increment_ops(ty);
        if ops.is_empty() {
            return self.terminal(ty);
        }
        let targets = self.scope.assignable_names(&self.catalogue, ty);
        let target = *pick(self.dice, &targets);
        let op = pick_op(self.dice, ops);
        if self.dice.below(2) == 0 {
            format!("({op}{target})")
        } else {
            format!("({target}{op})")
        }
    }

    fn conversion_expr(&mut self, depth: usize, ty: DartType) -> String {
        match ty {
            DartType::Bool => {
                let operand_ty = DartType::pick(self.dice);
                let op = pick_op(self.dice, relational_ops(operand_ty));
                let lhs = self.synthesize_expr(depth + 1, operand_ty);
                let rhs = self.synthesize_expr(depth + 1, operand_ty);
                format!("({lhs} {op} {rhs})")
            }
            DartType::Int => {
                let operand = self.synthesize_expr(depth + 1, DartType::Double);
                format!("({operand}).toInt()")
            }
            DartType::Double => {
                let operand = self.synthesize_expr(depth + 1, DartType::Int);
                format!("({operand}).toDouble()")
            }
            DartType::String | DartType::IntList | DartType::IntStringMap => self.terminal(ty),
        }
    }

    fn call_expr(&mut self, depth: usize, ty: DartType) -> String {
        let Some(site) = self.scope.resolve_callable(&self.catalogue, ty) else {
            return self.terminal(ty);
        };
        let params = site.signature(&self.catalogue).params().to_vec();
        let args: Vec<String> = params
            .into_iter()
            .map(|param| self.synthesize_expr(depth + 1, param))
            .collect();
        format!("{site}({})", args.join(", "))
    }
}
