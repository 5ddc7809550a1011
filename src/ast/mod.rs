/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The Node trait, Error nodes, identifiers and the root Tree
/// - declarations: Package, import, const, type, var and func declarations
/// - expressions: Operands, operators and primary-expression suffix chains
/// - statements: Blocks, simple statements and control flow
/// - types: Type expressions and function signatures
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
