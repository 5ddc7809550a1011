use std::fmt::Display;

use crate::Span;

use super::{
    ast::{all_well_formed, render_list, ErrorNode, Ident, Node},
    expressions::Expr,
    statements::Block,
    types::{Signature, Type},
};

/// Declaration
///
/// Top-level declarations, and the const/type/var declarations that can also
/// appear as statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Package(PackageClause),
    Import(GenDecl),
    Const(GenDecl),
    Type(GenDecl),
    Var(GenDecl),
    Func(FuncDecl),
    Error(ErrorNode),
}

impl Node for Decl {
    fn well_formed(&self) -> bool {
        match self {
            Decl::Package(package) => package.name.well_formed(),
            Decl::Import(decl) | Decl::Const(decl) | Decl::Type(decl) | Decl::Var(decl) => {
                decl.well_formed()
            }
            Decl::Func(func) => func.well_formed(),
            Decl::Error(_) => false,
        }
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decl::Package(package) => write!(f, "package {}", package.name),
            Decl::Import(decl) => write!(f, "import {}", decl),
            Decl::Const(decl) => write!(f, "const {}", decl),
            Decl::Type(decl) => write!(f, "type {}", decl),
            Decl::Var(decl) => write!(f, "var {}", decl),
            Decl::Func(func) => write!(f, "{}", func),
            Decl::Error(err) => write!(f, "{}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageClause {
    pub name: Ident,
    pub span: Span,
}

/// Generic Declaration
/// One spec, or a parenthesised group of them.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub specs: Vec<Spec>,
    pub grouped: bool,
    pub span: Span,
}

impl Node for GenDecl {
    fn well_formed(&self) -> bool {
        all_well_formed(&self.specs)
    }
}

impl Display for GenDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.grouped {
            write!(f, "({})", render_list(&self.specs, "; "))
        } else {
            write!(f, "{}", render_list(&self.specs, "; "))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Const(ConstSpec),
    Type(TypeSpec),
    Var(VarSpec),
    Error(ErrorNode),
}

impl Node for Spec {
    fn well_formed(&self) -> bool {
        match self {
            Spec::Import(spec) => {
                !spec.path.is_empty() && spec.alias.as_ref().map_or(true, |a| a.well_formed())
            }
            // A type is only allowed together with values.
            Spec::Const(spec) => {
                !spec.names.is_empty()
                    && all_well_formed(&spec.names)
                    && spec.ty.as_ref().map_or(true, |t| t.well_formed())
                    && all_well_formed(&spec.values)
                    && (spec.ty.is_none() || !spec.values.is_empty())
            }
            Spec::Type(spec) => spec.name.well_formed() && spec.ty.well_formed(),
            Spec::Var(spec) => {
                !spec.names.is_empty()
                    && all_well_formed(&spec.names)
                    && spec.ty.as_ref().map_or(true, |t| t.well_formed())
                    && all_well_formed(&spec.values)
                    && (spec.ty.is_some() || !spec.values.is_empty())
            }
            Spec::Error(_) => false,
        }
    }
}

fn write_value_spec(
    f: &mut std::fmt::Formatter<'_>,
    names: &[Ident],
    ty: &Option<Type>,
    values: &[Expr],
) -> std::fmt::Result {
    write!(f, "{}", render_list(names, ", "))?;
    if let Some(ty) = ty {
        write!(f, " {}", ty)?;
    }
    if !values.is_empty() {
        write!(f, " = {}", render_list(values, ", "))?;
    }
    Ok(())
}

impl Display for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Spec::Import(spec) => match &spec.alias {
                Some(alias) => write!(f, "{} \"{}\"", alias, spec.path),
                None => write!(f, "\"{}\"", spec.path),
            },
            Spec::Const(spec) => write_value_spec(f, &spec.names, &spec.ty, &spec.values),
            Spec::Type(spec) => write!(f, "{} {}", spec.name, spec.ty),
            Spec::Var(spec) => write_value_spec(f, &spec.names, &spec.ty, &spec.values),
            Spec::Error(err) => write!(f, "{}", err),
        }
    }
}

/// Import Spec
/// The alias is an identifier or `.`; the path is the raw literal text.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub alias: Option<Ident>,
    pub path: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Type>,
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Type>,
    pub values: Vec<Expr>,
    pub span: Span,
}

/// Function Declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    pub signature: Signature,
    pub body: Block,
    pub span: Span,
}

impl Node for FuncDecl {
    fn well_formed(&self) -> bool {
        self.name.well_formed() && self.signature.well_formed() && self.body.well_formed()
    }
}

impl Display for FuncDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "func {}{} {}", self.name, self.signature, self.body)
    }
}
