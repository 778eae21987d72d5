//! Arena-allocated expression trees.
//!
//! An expression is parsed once into an [`ExprArena`]: a flat vector of [`Node`]s
//! addressed by [`Idx`] handles. Every node remembers where its token was found
//! and which parenthesized scope encloses it, so that the reducer can replay the
//! reduction order of the textual algorithm without ever touching the text again.
//!
//! Operator precedence, from tightest to loosest: `not`, `and`, `or`, `<=`, `==`.
//! Binary operators associate to the left.

use std::fmt::{self, Display, Formatter};

use crate::error::FormatError;
use crate::lexer::{tokenize, Token, TokenKind};
use crate::ops::Op;
use crate::types::{ColumnId, Operand, Var};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Idx(usize);

impl Idx {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    Var(Var),
    /// Reference to an already evaluated column.
    Column(ColumnId),
    Not(Idx),
    Binary(Op, Idx, Idx),
    /// Explicit pair of parentheses around the child.
    Group(Idx),
}

impl Node {
    /// The operator of this node, if any.
    pub fn op(&self) -> Option<Op> {
        match self {
            Node::Not(_) => Some(Op::Not),
            Node::Binary(op, _, _) => Some(*op),
            _ => None,
        }
    }
}

/// Source location of a node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Site {
    /// Character offset of the node's token (the operator, the letter, or the `(`).
    pub position: usize,
    /// Offset of the `(` of the innermost enclosing group, `None` at top level.
    pub scope: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ExprArena {
    nodes: Vec<Node>,
    sites: Vec<Site>,
    root: Idx,
}

impl ExprArena {
    /// Parses an expression.
    ///
    /// Rejects empty input, unbalanced parentheses, invalid characters and any
    /// token sequence that does not form an expression.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(FormatError::Empty);
        }

        let open = tokens.iter().filter(|t| t.kind == TokenKind::LParen).count();
        let close = tokens.iter().filter(|t| t.kind == TokenKind::RParen).count();
        if open != close {
            return Err(FormatError::UnbalancedParentheses { open, close });
        }

        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            scopes: Vec::new(),
            nodes: Vec::new(),
            sites: Vec::new(),
        };
        let root = parser.parse_expr()?;
        if let Some(token) = parser.peek() {
            return Err(unexpected(token));
        }

        Ok(Self {
            nodes: parser.nodes,
            sites: parser.sites,
            root,
        })
    }

    pub fn root(&self) -> Idx {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, idx: Idx) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn site(&self, idx: Idx) -> Site {
        self.sites[idx.0]
    }

    /// Replaces the subtree at `idx` with a reference to an evaluated column.
    ///
    /// The children of the replaced node stay in the arena but become unreachable.
    pub fn replace_with_column(&mut self, idx: Idx, id: ColumnId) {
        self.nodes[idx.0] = Node::Column(id);
    }

    /// Iterates over all nodes together with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (Idx, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (Idx(i), node))
    }

    /// Resolves the node to a single operand, looking through parentheses.
    ///
    /// Returns `None` if the subtree still contains an operator.
    pub fn operand(&self, mut idx: Idx) -> Option<Operand> {
        loop {
            match *self.get(idx) {
                Node::Var(var) => return Some(Operand::Var(var)),
                Node::Column(id) => return Some(Operand::Column(id)),
                Node::Group(inner) => idx = inner,
                Node::Not(_) | Node::Binary(..) => return None,
            }
        }
    }

    /// Number of operators reachable from the root.
    pub fn count_operators(&self) -> usize {
        self.count_operators_in(self.root)
    }

    fn count_operators_in(&self, idx: Idx) -> usize {
        match *self.get(idx) {
            Node::Var(_) | Node::Column(_) => 0,
            Node::Group(inner) => self.count_operators_in(inner),
            Node::Not(a) => 1 + self.count_operators_in(a),
            Node::Binary(_, a, b) => 1 + self.count_operators_in(a) + self.count_operators_in(b),
        }
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, idx: Idx) -> fmt::Result {
        match *self.get(idx) {
            Node::Var(var) => write!(f, "{}", var),
            Node::Column(id) => write!(f, "{}", id),
            Node::Not(a) => {
                write!(f, "not ")?;
                self.fmt_node(f, a)
            }
            Node::Binary(op, a, b) => {
                self.fmt_node(f, a)?;
                write!(f, " {} ", op)?;
                self.fmt_node(f, b)
            }
            Node::Group(inner) => {
                // Parentheses disappear once nothing inside is left to reduce.
                if self.operand(inner).is_some() {
                    self.fmt_node(f, inner)
                } else {
                    write!(f, "(")?;
                    self.fmt_node(f, inner)?;
                    write!(f, ")")
                }
            }
        }
    }
}

impl Display for ExprArena {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Offsets of the currently open parentheses.
    scopes: Vec<usize>,
    nodes: Vec<Node>,
    sites: Vec<Site>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn push(&mut self, node: Node, position: usize) -> Idx {
        let idx = Idx(self.nodes.len());
        self.nodes.push(node);
        self.sites.push(Site {
            position,
            scope: self.scopes.last().copied(),
        });
        idx
    }

    fn parse_expr(&mut self) -> Result<Idx, FormatError> {
        self.parse_binary(Op::BINARY.len() - 1)
    }

    /// Parses a left-associative chain of `Op::BINARY[level]`.
    fn parse_binary(&mut self, level: usize) -> Result<Idx, FormatError> {
        let op = Op::BINARY[level];
        let mut lhs = self.parse_operand(level)?;
        while let Some(token) = self.peek() {
            if token.kind != TokenKind::Op(op) {
                break;
            }
            self.advance();
            let rhs = self.parse_operand(level)?;
            lhs = self.push(Node::Binary(op, lhs, rhs), token.position);
        }
        Ok(lhs)
    }

    fn parse_operand(&mut self, level: usize) -> Result<Idx, FormatError> {
        if level == 0 {
            self.parse_unary()
        } else {
            self.parse_binary(level - 1)
        }
    }

    fn parse_unary(&mut self) -> Result<Idx, FormatError> {
        let token = self.advance().ok_or(FormatError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Op(Op::Not) => {
                let inner = self.parse_unary()?;
                Ok(self.push(Node::Not(inner), token.position))
            }
            TokenKind::Var(var) => Ok(self.push(Node::Var(var), token.position)),
            TokenKind::LParen => {
                self.scopes.push(token.position);
                let inner = self.parse_expr()?;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => {}
                    Some(other) => return Err(unexpected(other)),
                    None => return Err(FormatError::UnexpectedEnd),
                }
                self.scopes.pop();
                Ok(self.push(Node::Group(inner), token.position))
            }
            TokenKind::RParen | TokenKind::Op(_) => Err(unexpected(token)),
        }
    }
}

fn unexpected(token: Token) -> FormatError {
    FormatError::UnexpectedToken {
        token: token.kind.to_string(),
        position: token.position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op_at(arena: &ExprArena, idx: Idx) -> Option<Op> {
        arena.get(idx).op()
    }

    #[test]
    fn test_parse_single_variable() {
        let arena = ExprArena::parse("a").unwrap();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.operand(arena.root()), Some(Operand::Var(Var::new('a'))));
        assert_eq!(arena.count_operators(), 0);
    }

    #[test]
    fn test_parse_precedence() {
        // `and` binds tighter than `or`, so `or` ends up at the root.
        let arena = ExprArena::parse("a or b and c").unwrap();
        assert_eq!(op_at(&arena, arena.root()), Some(Op::Or));
        match *arena.get(arena.root()) {
            Node::Binary(Op::Or, lhs, rhs) => {
                assert_eq!(arena.operand(lhs), Some(Operand::Var(Var::new('a'))));
                assert_eq!(op_at(&arena, rhs), Some(Op::And));
            }
            ref other => panic!("unexpected root {:?}", other),
        }
    }

    #[test]
    fn test_parse_left_associative() {
        let arena = ExprArena::parse("a <= b <= c").unwrap();
        match *arena.get(arena.root()) {
            Node::Binary(Op::Implies, lhs, rhs) => {
                assert_eq!(op_at(&arena, lhs), Some(Op::Implies));
                assert_eq!(arena.operand(rhs), Some(Operand::Var(Var::new('c'))));
            }
            ref other => panic!("unexpected root {:?}", other),
        }
    }

    #[test]
    fn test_parse_not_binds_tightest() {
        let arena = ExprArena::parse("not a == b").unwrap();
        match *arena.get(arena.root()) {
            Node::Binary(Op::Equiv, lhs, _) => assert_eq!(op_at(&arena, lhs), Some(Op::Not)),
            ref other => panic!("unexpected root {:?}", other),
        }
    }

    #[test]
    fn test_sites_record_scopes() {
        let arena = ExprArena::parse("(a and b) or (not a)").unwrap();
        let mut ops: Vec<(Op, Site)> = arena
            .iter()
            .filter_map(|(idx, node)| node.op().map(|op| (op, arena.site(idx))))
            .collect();
        ops.sort_by_key(|(_, site)| site.position);
        assert_eq!(
            ops,
            vec![
                (Op::And, Site { position: 3, scope: Some(0) }),
                (Op::Or, Site { position: 10, scope: None }),
                (Op::Not, Site { position: 14, scope: Some(13) }),
            ]
        );
    }

    #[test]
    fn test_display_normalizes_whitespace() {
        let arena = ExprArena::parse("(a  and b)or(nota)").unwrap();
        assert_eq!(arena.to_string(), "(a and b) or (not a)");
    }

    #[test]
    fn test_display_drops_redundant_parentheses() {
        let arena = ExprArena::parse("((a)) or b").unwrap();
        assert_eq!(arena.to_string(), "a or b");
    }

    #[test]
    fn test_replace_with_column() {
        let mut arena = ExprArena::parse("(a and b) or c").unwrap();
        let and = arena
            .iter()
            .find(|(_, node)| node.op() == Some(Op::And))
            .map(|(idx, _)| idx)
            .unwrap();
        arena.replace_with_column(and, ColumnId::new(0));
        assert_eq!(arena.to_string(), "0 or c");
        assert_eq!(arena.count_operators(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ExprArena::parse("   ").unwrap_err(), FormatError::Empty);
        assert_eq!(
            ExprArena::parse("(a and b").unwrap_err(),
            FormatError::UnbalancedParentheses { open: 1, close: 0 }
        );
        assert_eq!(ExprArena::parse("a and").unwrap_err(), FormatError::UnexpectedEnd);
        assert_eq!(
            ExprArena::parse("a b").unwrap_err(),
            FormatError::UnexpectedToken {
                token: "b".to_string(),
                position: 2
            }
        );
        assert_eq!(
            ExprArena::parse("and a").unwrap_err(),
            FormatError::UnexpectedToken {
                token: "and".to_string(),
                position: 0
            }
        );
        assert_eq!(
            ExprArena::parse(")a(").unwrap_err(),
            FormatError::UnexpectedToken {
                token: ")".to_string(),
                position: 0
            }
        );
        assert_eq!(
            ExprArena::parse("()").unwrap_err(),
            FormatError::UnexpectedToken {
                token: ")".to_string(),
                position: 1
            }
        );
    }
}
