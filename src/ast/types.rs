use std::fmt::Display;

use crate::Span;

use super::ast::{all_well_formed, render_list, ErrorNode, Ident, Node};

/// Type
///
/// Parenthesised types are unwrapped while parsing, so `(int)` is `Named`.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Named(Ident),
    /// `package.Name`
    Qualified(Ident, Ident),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Error(ErrorNode),
}

impl Node for Type {
    fn well_formed(&self) -> bool {
        match self {
            Type::Named(name) => name.well_formed(),
            Type::Qualified(package, name) => package.well_formed() && name.well_formed(),
            Type::Pointer(base) => base.well_formed(),
            Type::Slice(elem) => elem.well_formed(),
            Type::Error(_) => false,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Named(name) => write!(f, "{}", name),
            Type::Qualified(package, name) => write!(f, "{}.{}", package, name),
            Type::Pointer(base) => write!(f, "*{}", base),
            Type::Slice(elem) => write!(f, "[]{}", elem),
            Type::Error(err) => write!(f, "{}", err),
        }
    }
}

/// Parameter Declaration
/// A group of parameters sharing a type. Unnamed parameters have no names.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub names: Vec<Ident>,
    pub variadic: bool,
    pub ty: Type,
    pub span: Span,
}

impl Node for ParameterDecl {
    fn well_formed(&self) -> bool {
        all_well_formed(&self.names) && self.ty.well_formed()
    }
}

impl Display for ParameterDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.names.is_empty() {
            write!(f, "{} ", render_list(&self.names, ", "))?;
        }
        if self.variadic {
            write!(f, "...")?;
        }
        write!(f, "{}", self.ty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub decls: Vec<ParameterDecl>,
    pub span: Span,
}

impl Node for Parameters {
    fn well_formed(&self) -> bool {
        all_well_formed(&self.decls)
    }
}

impl Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", render_list(&self.decls, ", "))
    }
}

/// The result part of a signature: a bare type or a parameter list.
#[derive(Debug, Clone, PartialEq)]
pub enum FuncResult {
    Params(Parameters),
    Type(Type),
}

impl Node for FuncResult {
    fn well_formed(&self) -> bool {
        match self {
            FuncResult::Params(params) => params.well_formed(),
            FuncResult::Type(ty) => ty.well_formed(),
        }
    }
}

impl Display for FuncResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FuncResult::Params(params) => write!(f, "{}", params),
            FuncResult::Type(ty) => write!(f, "{}", ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub params: Parameters,
    pub result: Option<FuncResult>,
}

impl Node for Signature {
    fn well_formed(&self) -> bool {
        self.params.well_formed() && self.result.as_ref().map_or(true, |r| r.well_formed())
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.params)?;
        if let Some(result) = &self.result {
            write!(f, " {}", result)?;
        }
        Ok(())
    }
}
