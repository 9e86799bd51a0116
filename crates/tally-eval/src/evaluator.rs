//! Expression and condition evaluation against a [`VariableStore`].

use crate::store::VariableStore;
use tally_types::ast::*;
use tally_types::{ExprFault, Result, TallyError};

/// Evaluates operands and conditions. Holds a shared borrow of the store,
/// so evaluation can never bind variables.
pub struct Evaluator<'s> {
    store: &'s VariableStore,
}

impl<'s> Evaluator<'s> {
    pub fn new(store: &'s VariableStore) -> Self {
        Self { store }
    }

    /// Evaluate an expression slot.
    ///
    /// Every identifier is resolved left to right before any arithmetic
    /// happens, so an undefined name is reported ahead of a division by
    /// zero or a syntax fault elsewhere in the same expression.
    pub fn eval_operand(&self, operand: &Operand) -> Result<i64> {
        match &operand.kind {
            OperandKind::Parsed(expr) => {
                for ident in expr.identifiers() {
                    self.lookup(ident)?;
                }
                self.eval_expr(expr, &operand.text)
            }
            OperandKind::Malformed { fault, names } => {
                for ident in names {
                    self.lookup(ident)?;
                }
                Err(TallyError::invalid_expression(&operand.text, fault.clone()))
            }
        }
    }

    /// Evaluate both sides of a condition, left first, and compare.
    pub fn eval_condition(&self, condition: &Condition) -> Result<bool> {
        let left = self.eval_operand(&condition.left)?;
        let right = self.eval_operand(&condition.right)?;
        Ok(condition.op.compare(left, right))
    }

    fn lookup(&self, ident: &Ident) -> Result<i64> {
        self.store
            .get(&ident.name)
            .ok_or_else(|| TallyError::UndefinedVariable {
                name: ident.name.clone(),
            })
    }

    // ══════════════════════════════════════════════════════════════════════
    // Arithmetic
    // ══════════════════════════════════════════════════════════════════════

    fn eval_expr(&self, expr: &Expr, text: &str) -> Result<i64> {
        match &expr.kind {
            ExprKind::IntLit(n) => Ok(*n),
            ExprKind::Identifier(ident) => self.lookup(ident),
            ExprKind::Paren(inner) => self.eval_expr(inner, text),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand, text)?;
                match op {
                    UnaryOp::Plus => Ok(value),
                    UnaryOp::Neg => value.checked_neg().ok_or_else(|| fault(text, ExprFault::Overflow)),
                }
            }
            ExprKind::Chain { first, rest } => {
                rest.iter().try_fold(self.eval_expr(first, text)?, |acc, (op, operand)| {
                    let value = self.eval_expr(operand, text)?;
                    arithmetic(*op, acc, value).map_err(|cause| fault(text, cause))
                })
            }
        }
    }
}

/// Checked integer arithmetic. Division truncates toward zero.
pub fn arithmetic(op: BinOp, l: i64, r: i64) -> std::result::Result<i64, ExprFault> {
    let value = match op {
        BinOp::Add => l.checked_add(r),
        BinOp::Sub => l.checked_sub(r),
        BinOp::Mul => l.checked_mul(r),
        BinOp::Div => {
            if r == 0 {
                return Err(ExprFault::DivisionByZero);
            }
            l.checked_div(r)
        }
    };
    value.ok_or(ExprFault::Overflow)
}

fn fault(text: &str, cause: ExprFault) -> TallyError {
    TallyError::invalid_expression(text, cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(arithmetic(BinOp::Div, 7, 2), Ok(3));
        assert_eq!(arithmetic(BinOp::Div, -7, 2), Ok(-3));
        assert_eq!(arithmetic(BinOp::Div, 7, -2), Ok(-3));
        assert_eq!(arithmetic(BinOp::Div, -7, -2), Ok(3));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(arithmetic(BinOp::Div, 1, 0), Err(ExprFault::DivisionByZero));
        assert_eq!(arithmetic(BinOp::Div, 0, 0), Err(ExprFault::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(arithmetic(BinOp::Add, i64::MAX, 1), Err(ExprFault::Overflow));
        assert_eq!(arithmetic(BinOp::Sub, i64::MIN, 1), Err(ExprFault::Overflow));
        assert_eq!(arithmetic(BinOp::Mul, i64::MAX, 2), Err(ExprFault::Overflow));
        assert_eq!(arithmetic(BinOp::Div, i64::MIN, -1), Err(ExprFault::Overflow));
    }
}
