//! Target syntaxes the generator can emit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target language of the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// C#
    #[serde(alias = "c#", alias = "cs")]
    CSharp,
    /// Visual Basic
    #[serde(alias = "vb", alias = "vbnet")]
    VisualBasic,
    /// F#
    #[serde(alias = "f#", alias = "fs")]
    FSharp,
}

impl TargetLanguage {
    /// All supported languages, in display order.
    pub const ALL: [TargetLanguage; 3] = [
        TargetLanguage::CSharp,
        TargetLanguage::VisualBasic,
        TargetLanguage::FSharp,
    ];

    /// Lower-case identifiers accepted when parsing this language.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            TargetLanguage::CSharp => &["c#", "cs", "csharp"],
            TargetLanguage::VisualBasic => &["vb", "visualbasic", "vbnet"],
            TargetLanguage::FSharp => &["f#", "fs", "fsharp"],
        }
    }

    /// Whether `word` is a reserved keyword of this language, and so cannot
    /// name a generated member without escaping. VB keywords match
    /// case-insensitively.
    pub fn is_reserved_word(&self, word: &str) -> bool {
        match self {
            TargetLanguage::CSharp => CSHARP_KEYWORDS.contains(&word),
            TargetLanguage::VisualBasic => VB_KEYWORDS
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(word)),
            TargetLanguage::FSharp => FSHARP_KEYWORDS.contains(&word),
        }
    }

    /// Conventional file extension for generated files.
    pub fn file_extension(&self) -> &'static str {
        match self {
            TargetLanguage::CSharp => "cs",
            TargetLanguage::VisualBasic => "vb",
            TargetLanguage::FSharp => "fs",
        }
    }
}

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

const VB_KEYWORDS: &[&str] = &[
    "AddHandler", "AddressOf", "Alias", "And", "AndAlso", "As", "Boolean", "ByRef", "Byte",
    "ByVal", "Call", "Case", "Catch", "CBool", "CByte", "CChar", "CDate", "CDbl", "CDec",
    "Char", "CInt", "Class", "CLng", "CObj", "Const", "Continue", "CSByte", "CShort", "CSng",
    "CStr", "CType", "CUInt", "CULng", "CUShort", "Date", "Decimal", "Declare", "Default",
    "Delegate", "Dim", "DirectCast", "Do", "Double", "Each", "Else", "ElseIf", "End", "EndIf",
    "Enum", "Erase", "Error", "Event", "Exit", "False", "Finally", "For", "Friend", "Function",
    "Get", "GetType", "GetXMLNamespace", "Global", "GoSub", "GoTo", "Handles", "If",
    "Implements", "Imports", "In", "Inherits", "Integer", "Interface", "Is", "IsNot", "Let",
    "Lib", "Like", "Long", "Loop", "Me", "Mod", "Module", "MustInherit", "MustOverride",
    "MyBase", "MyClass", "NameOf", "Namespace", "Narrowing", "New", "Next", "Not", "Nothing",
    "NotInheritable", "NotOverridable", "Object", "Of", "On", "Operator", "Option", "Optional",
    "Or", "OrElse", "Out", "Overloads", "Overridable", "Overrides", "ParamArray", "Partial",
    "Private", "Property", "Protected", "Public", "RaiseEvent", "ReadOnly", "ReDim", "REM",
    "RemoveHandler", "Resume", "Return", "SByte", "Select", "Set", "Shadows", "Shared",
    "Short", "Single", "Static", "Step", "Stop", "String", "Structure", "Sub", "SyncLock",
    "Then", "Throw", "To", "True", "Try", "TryCast", "TypeOf", "UInteger", "ULong", "UShort",
    "Using", "Variant", "Wend", "When", "While", "Widening", "With", "WithEvents", "WriteOnly",
    "Xor",
];

const FSHARP_KEYWORDS: &[&str] = &[
    "abstract", "and", "as", "asr", "assert", "base", "begin", "break", "checked", "class",
    "component", "const", "constraint", "continue", "default", "delegate", "do", "done",
    "downcast", "downto", "elif", "else", "end", "event", "exception", "extern", "external",
    "false", "finally", "fixed", "for", "fun", "function", "global", "if", "in", "include",
    "inherit", "inline", "interface", "internal", "land", "lazy", "let", "lor", "lsl", "lsr",
    "lxor", "match", "member", "mixin", "mod", "module", "mutable", "namespace", "new", "not",
    "null", "of", "open", "or", "override", "parallel", "private", "process", "protected",
    "public", "pure", "rec", "return", "sealed", "select", "sig", "static", "struct",
    "tailcall", "then", "to", "trait", "true", "try", "type", "upcast", "use", "val",
    "virtual", "void", "when", "while", "with", "yield",
];

impl FromStr for TargetLanguage {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TargetLanguage::ALL
            .into_iter()
            .find(|lang| lang.aliases().contains(&lower.as_str()))
            .ok_or_else(|| LanguageParseError(s.to_string()))
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetLanguage::CSharp => "C#",
            TargetLanguage::VisualBasic => "VB",
            TargetLanguage::FSharp => "F#",
        };
        write!(f, "{}", name)
    }
}

/// Error returned when parsing an unrecognized language identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized language '{0}', valid values: c#, cs, csharp, vb, visualbasic, vbnet, f#, fs, fsharp")]
pub struct LanguageParseError(pub String);
