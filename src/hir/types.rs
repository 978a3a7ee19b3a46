//! Types attached to functions, arguments and variables.

use std::fmt;

use smol_str::SmolStr;

/// The fixed set of types the compiler knows natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltInType {
    Void,
    Int,
    Float,
    Char,
    Bool,
}

impl BuiltInType {
    /// Resolve a type keyword or legacy tag, including the old aliases
    /// (`Float`, `String`, `_`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "void" => Some(Self::Void),
            "int" | "_" => Some(Self::Int),
            "float" | "Float" => Some(Self::Float),
            "char" | "String" => Some(Self::Char),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Int => "int",
            Self::Float => "float",
            Self::Char => "char",
            Self::Bool => "bool",
        }
    }
}

/// A non-array type: either built in or an opaque named type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    BuiltIn(BuiltInType),
    Custom(SmolStr),
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn(ty) => f.write_str(ty.as_str()),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// The type of a declaration.
///
/// Arrays never nest: `Dimensional` always wraps an element type, and each
/// bracket group adds one to `depth`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    BuiltIn(BuiltInType),
    Custom(SmolStr),
    Dimensional { depth: usize, element: ElementType },
}

impl Type {
    pub const INT: Type = Type::BuiltIn(BuiltInType::Int);

    pub fn custom(name: impl Into<SmolStr>) -> Self {
        Type::Custom(name.into())
    }

    pub fn dimensional(depth: usize, element: ElementType) -> Self {
        Type::Dimensional { depth, element }
    }

    /// Add `count` bracket groups to this type.
    ///
    /// An already dimensional type keeps its element type and grows in depth.
    pub fn with_dimensions(self, count: usize) -> Type {
        if count == 0 {
            return self;
        }
        match self {
            Type::BuiltIn(ty) => Type::dimensional(count, ElementType::BuiltIn(ty)),
            Type::Custom(name) => Type::dimensional(count, ElementType::Custom(name)),
            Type::Dimensional { depth, element } => Type::dimensional(depth + count, element),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Type::Dimensional { depth, .. } => *depth,
            _ => 0,
        }
    }

    /// The type without any array dimensions.
    pub fn element(&self) -> ElementType {
        match self {
            Type::BuiltIn(ty) => ElementType::BuiltIn(*ty),
            Type::Custom(name) => ElementType::Custom(name.clone()),
            Type::Dimensional { element, .. } => element.clone(),
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Type::INT
    }
}

impl From<ElementType> for Type {
    fn from(element: ElementType) -> Self {
        match element {
            ElementType::BuiltIn(ty) => Type::BuiltIn(ty),
            ElementType::Custom(name) => Type::Custom(name),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::BuiltIn(ty) => f.write_str(ty.as_str()),
            Type::Custom(name) => f.write_str(name),
            Type::Dimensional { depth, element } => {
                write!(f, "{element}")?;
                for _ in 0..*depth {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

/// Classify a type name. A missing name is the legacy untyped `int`.
pub fn parse_type(name: Option<&str>) -> Type {
    match name {
        None => Type::INT,
        Some(name) => match BuiltInType::from_name(name) {
            Some(ty) => Type::BuiltIn(ty),
            None => Type::custom(name),
        },
    }
}
