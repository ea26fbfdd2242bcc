//! The stock grammar.

use super::forms::{
    AbsForm, BlockForm, EndForm, ForForm, GroupForm, IdentForm, IfForm, MatrixForm, NumberForm,
    PrefixForm, SelectAllForm, StringForm, WhileForm,
};
use super::transforms::{Comment, LineContinuation, Newline, Whitespace};
use super::{operators, ExpressionForm, Grammar};

/// Form priorities of the standard grammar, highest tried first. Keywords
/// precede identifiers; the select-all `:` precedes everything that could
/// read a `:`.
pub mod priority {
    pub const IF: u16 = 1000;
    pub const WHILE: u16 = 990;
    pub const FOR: u16 = 980;
    pub const END: u16 = 900;
    pub const SELECT_ALL: u16 = 850;
    pub const NUMBER: u16 = 800;
    pub const STRING: u16 = 700;
    pub const IDENT: u16 = 600;
    pub const GROUP: u16 = 500;
    pub const MATRIX: u16 = 400;
    pub const ABS: u16 = 300;
    pub const PREFIX: u16 = 200;
    pub const BLOCK: u16 = 100;
}

impl Grammar {
    /// Grammar of the standard language.
    ///
    /// Extensions register on top of it with the `register_*` methods.
    pub fn standard() -> Self {
        let mut grammar = Grammar::new();

        for trigger in [' ', '\t', '\r'] {
            grammar.transforms.insert(trigger, Box::new(Whitespace));
        }
        grammar.transforms.insert('\n', Box::new(Newline));
        grammar.transforms.insert('/', Box::new(Comment));
        grammar.transforms.insert('\\', Box::new(LineContinuation));

        let forms: [(u16, Box<dyn ExpressionForm>); 13] = [
            (priority::IF, Box::new(IfForm)),
            (priority::WHILE, Box::new(WhileForm)),
            (priority::FOR, Box::new(ForForm)),
            (priority::END, Box::new(EndForm)),
            (priority::SELECT_ALL, Box::new(SelectAllForm)),
            (priority::NUMBER, Box::new(NumberForm)),
            (priority::STRING, Box::new(StringForm)),
            (priority::IDENT, Box::new(IdentForm)),
            (priority::GROUP, Box::new(GroupForm)),
            (priority::MATRIX, Box::new(MatrixForm)),
            (priority::ABS, Box::new(AbsForm)),
            (priority::PREFIX, Box::new(PrefixForm)),
            (priority::BLOCK, Box::new(BlockForm)),
        ];
        for (priority, form) in forms {
            grammar.insert_form(priority, form);
        }

        for def in operators::standard() {
            debug_assert!(grammar.operator(def.symbol()).is_none());
            grammar.insert_operator(def);
        }
        grammar
    }
}
