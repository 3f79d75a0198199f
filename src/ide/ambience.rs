//! Ambience: how Cobra spells type names and comments.

use smol_str::SmolStr;

use super::type_outline::TypeKind;

/// Line comment marker.
pub const COMMENT_TAG: &str = "#";

/// .NET type name (without `System.`) → Cobra spelling.
const INTRINSIC_TYPES: &[(&str, &str)] = &[
    ("Void", ""),
    ("Object", "Object"),
    ("Boolean", "bool"),
    ("Char", "char"),
    ("String", "String"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("Double", "float"),
    ("Decimal", "decimal"),
    ("SByte", "int8"),
    ("Byte", "uint8"),
    ("Int16", "int16"),
    ("UInt16", "uint16"),
    ("Int64", "int64"),
    ("UInt64", "uint64"),
    ("Single", "float32"),
    ("Enum", "enum"),
];

fn intrinsic(name: &str) -> Option<&'static str> {
    INTRINSIC_TYPES
        .iter()
        .find(|(net, _)| *net == name)
        .map(|(_, cobra)| *cobra)
}

/// Cobra name for a reflection type name such as `System.Int32`.
///
/// Names without a Cobra spelling come back unchanged.
///
/// ```
/// use cobra::ide::ambience::intrinsic_type_name;
///
/// assert_eq!(intrinsic_type_name("System.Int32"), "int");
/// assert_eq!(intrinsic_type_name("System.Void"), "");
/// assert_eq!(intrinsic_type_name("Acme.Widget"), "Acme.Widget");
/// ```
pub fn intrinsic_type_name(reflection_name: &str) -> String {
    let key = reflection_name.replace("System.", "");
    match intrinsic(&key) {
        Some(cobra) => cobra.to_string(),
        None => reflection_name.to_string(),
    }
}

/// Declaration keyword for a kind of type, if Cobra has one.
pub fn type_kind_keyword(kind: TypeKind) -> Option<&'static str> {
    match kind {
        TypeKind::Class => Some("class"),
        TypeKind::Enum => Some("enum"),
        TypeKind::Interface => Some("interface"),
        TypeKind::Struct => Some("struct"),
        TypeKind::Delegate => Some("sig"),
        TypeKind::Mixin | TypeKind::TypeParameter | TypeKind::Unknown => None,
    }
}

pub fn single_line_comment(text: &str) -> String {
    format!("{COMMENT_TAG}{text}")
}

/// Rendering switches for [`namespace_string`] and [`type_string`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputSettings {
    pub include_keywords: bool,
    /// Keep `Int32` instead of `int`
    pub use_net_type_names: bool,
}

pub fn namespace_string(namespace: &str, settings: OutputSettings) -> String {
    if settings.include_keywords {
        format!("namespace {namespace}")
    } else {
        namespace.to_string()
    }
}

/// A reference to a type, as handed over by a type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub namespace: SmolStr,
    pub name: SmolStr,
    pub kind: TypeKind,
    pub type_arguments: Vec<TypeRef>,
    pub nilable: bool,
}

impl TypeRef {
    pub fn new(namespace: impl Into<SmolStr>, name: impl Into<SmolStr>, kind: TypeKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
            type_arguments: Vec::new(),
            nilable: false,
        }
    }

    pub fn with_argument(mut self, argument: TypeRef) -> Self {
        self.type_arguments.push(argument);
        self
    }

    pub fn nilable(mut self) -> Self {
        self.nilable = true;
        self
    }

    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Render a type the way it is written in Cobra source.
pub fn type_string(ty: &TypeRef, settings: OutputSettings) -> String {
    let mut out = match ty.kind {
        TypeKind::Unknown => return ty.name.to_string(),
        TypeKind::TypeParameter => ty.full_name(),
        _ => {
            let cobra = (!settings.use_net_type_names
                && ty.type_arguments.is_empty()
                && ty.namespace == "System")
                .then(|| intrinsic(&ty.name))
                .flatten();

            match cobra {
                Some(cobra) => cobra.to_string(),
                None if ty.type_arguments.is_empty() => ty.name.to_string(),
                None => {
                    let arguments: Vec<String> = ty
                        .type_arguments
                        .iter()
                        .map(|arg| type_string(arg, settings))
                        .collect();
                    format!("{}<of {}>", ty.name, arguments.join(", "))
                }
            }
        }
    };

    if ty.nilable {
        out.push('?');
    }
    out
}
