//! Function, callback and global variable extraction.
//!
//! Every extractor is a pure function of the tree. Candidates that are
//! missing a name are skipped rather than reported: half-typed declarations
//! are normal while editing.

use smol_str::SmolStr;

use crate::base::{LineIndex, Span};
use crate::parser::ast::{self, AstNode, SourceFile};

use super::types::{Type, parse_type};

/// One parameter of a function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Argument {
    pub name: SmolStr,
    pub ty: Type,
    /// Source text after `=`, unevaluated
    pub default_value: Option<String>,
}

/// A routine declared by the plugin itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionDefinition {
    pub range: Span,
    pub return_type: Type,
    pub name: SmolStr,
    pub args: Vec<Argument>,
}

/// A `public` function the host invokes, e.g. `OnPluginStart`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallbackImplementation {
    pub range: Span,
    pub return_type: Type,
    pub name: SmolStr,
    pub args: Vec<Argument>,
}

/// A variable declared at file scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    pub range: Span,
    pub ty: Type,
    pub name: SmolStr,
    pub has_initial_value: bool,
}

/// Fields shared by every function-shaped record
struct Signature {
    range: Span,
    return_type: Type,
    name: SmolStr,
    args: Vec<Argument>,
}

impl From<Signature> for FunctionDefinition {
    fn from(sig: Signature) -> Self {
        Self {
            range: sig.range,
            return_type: sig.return_type,
            name: sig.name,
            args: sig.args,
        }
    }
}

impl From<Signature> for CallbackImplementation {
    fn from(sig: Signature) -> Self {
        Self {
            range: sig.range,
            return_type: sig.return_type,
            name: sig.name,
            args: sig.args,
        }
    }
}

/// Functions with a body declared anywhere in the file.
pub fn function_definitions(file: &SourceFile, index: &LineIndex) -> Vec<FunctionDefinition> {
    file.functions()
        .filter(|f| matches!(f, ast::Function::Declaration(_)))
        .filter_map(|f| signature(&f, index))
        .map(FunctionDefinition::from)
        .collect()
}

/// `public` functions declared anywhere in the file.
pub fn callback_implementations(
    file: &SourceFile,
    index: &LineIndex,
) -> Vec<CallbackImplementation> {
    file.functions()
        .filter(|f| matches!(f, ast::Function::Callback(_)))
        .filter_map(|f| signature(&f, index))
        .map(CallbackImplementation::from)
        .collect()
}

/// `native` and `forward` declarations, and other functions without a body.
///
/// Include files are mostly made of these.
pub fn function_prototypes(file: &SourceFile, index: &LineIndex) -> Vec<FunctionDefinition> {
    file.functions()
        .filter(|f| matches!(f, ast::Function::Prototype(_)))
        .filter_map(|f| signature(&f, index))
        .map(FunctionDefinition::from)
        .collect()
}

fn signature(function: &ast::Function, index: &LineIndex) -> Option<Signature> {
    let name = function.name()?.text()?;
    // Return types ignore declared dimensions
    let return_type = parse_type(function.return_type().and_then(|t| t.name()).as_deref());
    let args = function
        .arguments()
        .iter()
        .filter_map(argument)
        .collect();

    Some(Signature {
        range: index.span(function.syntax().text_range()),
        return_type,
        name,
        args,
    })
}

fn argument(arg: &ast::Argument) -> Option<Argument> {
    let name = arg.name()?.text()?;
    let ty = parse_type(arg.ty().and_then(|t| t.name()).as_deref())
        .with_dimensions(arg.dimension_count());

    Some(Argument {
        name,
        ty,
        default_value: arg.default_value().and_then(|d| d.text()),
    })
}

/// Variables declared at file scope; locals inside function bodies are not
/// included.
///
/// A statement declaring one variable reports the whole statement as its
/// range. With several declarators, each reports only its own declarator.
pub fn global_variables(file: &SourceFile, index: &LineIndex) -> Vec<Variable> {
    file.variable_declarations()
        .flat_map(|decl| variables(&decl, index))
        .collect()
}

fn variables(decl: &ast::VariableDeclaration, index: &LineIndex) -> Vec<Variable> {
    let declarators: Vec<_> = decl.declarators().collect();
    let shared_type = decl.ty();
    let single = declarators.len() == 1;

    declarators
        .iter()
        .filter_map(|declarator| {
            let name = declarator.name()?.text()?;
            let type_ref = declarator.ty().or_else(|| shared_type.clone());
            let base = parse_type(type_ref.as_ref().and_then(|t| t.name()).as_deref());
            let depth = type_ref.map_or(0, |t| t.dimension_count()) + declarator.dimension_count();
            let node = if single {
                decl.syntax()
            } else {
                declarator.syntax()
            };

            Some(Variable {
                range: index.span(node.text_range()),
                ty: base.with_dimensions(depth),
                name,
                has_initial_value: declarator.initializer().is_some(),
            })
        })
        .collect()
}
