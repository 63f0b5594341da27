//! Renderer builtin functions and the identifier subscript transform.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinForm {
    /// Emitted as `\operatorname{name}`.
    NamedOperator,
    /// Emitted as the LaTeX command `\name`.
    Command,
}

/// Renderer functions with no LaTeX command of their own.
const NAMED_OPERATORS: &[&str] = &[
    "polygon",
    "hsv",
    "rgb",
    "mean",
    "median",
    "quartile",
    "quantile",
    "stdev",
    "stdevp",
    "var",
    "varp",
    "mad",
    "cov",
    "covp",
    "corr",
    "spearman",
    "stats",
    "count",
    "total",
    "join",
    "sort",
    "shuffle",
    "unique",
    "histogram",
    "dotplot",
    "boxplot",
    "random",
    "tone",
    "lcm",
    "gcd",
    "mod",
    "floor",
    "ceil",
    "round",
    "sign",
];

/// Functions the renderer reads as LaTeX commands.
const COMMANDS: &[&str] = &[
    "sin", "cos", "tan", "csc", "sec", "cot", "arcsin", "arccos", "arctan", "arccsc", "arcsec",
    "arccot", "sinh", "cosh", "tanh", "exp", "ln", "log", "min", "max", "sqrt", "sum", "prod",
    "int",
];

pub fn lookup(name: &str) -> Option<BuiltinForm> {
    if NAMED_OPERATORS.contains(&name) {
        Some(BuiltinForm::NamedOperator)
    } else if COMMANDS.contains(&name) {
        Some(BuiltinForm::Command)
    } else {
        None
    }
}

/// Every builtin name, for seeding the global scope.
pub fn names() -> impl Iterator<Item = &'static str> {
    NAMED_OPERATORS.iter().chain(COMMANDS.iter()).copied()
}

/// Call head for a builtin, without the argument list.
pub fn call_head(name: &str, form: BuiltinForm) -> String {
    match form {
        BuiltinForm::NamedOperator => format!("\\operatorname{{{}}}", name),
        BuiltinForm::Command => format!("\\{}", name),
    }
}

/// `abc` -> `a_{bc}`; single characters pass through.
pub fn subscriptify(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if chars.as_str().is_empty() => first.to_string(),
        Some(first) => format!("{}_{{{}}}", first, chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscript_transform() {
        assert_eq!(subscriptify("x"), "x");
        assert_eq!(subscriptify("fa"), "f_{a}");
        assert_eq!(subscriptify("radius"), "r_{adius}");
        assert_eq!(subscriptify(""), "");
    }

    #[test]
    fn builtin_forms() {
        assert_eq!(lookup("polygon"), Some(BuiltinForm::NamedOperator));
        assert_eq!(lookup("sin"), Some(BuiltinForm::Command));
        assert_eq!(lookup("area"), None);
        assert_eq!(call_head("rgb", BuiltinForm::NamedOperator), "\\operatorname{rgb}");
        assert_eq!(call_head("cos", BuiltinForm::Command), "\\cos");
    }

    #[test]
    fn big_operators_are_commands() {
        for name in ["sum", "prod", "int"] {
            assert_eq!(lookup(name), Some(BuiltinForm::Command), "{}", name);
        }
        assert_eq!(call_head("sum", BuiltinForm::Command), "\\sum");
    }

    #[test]
    fn names_cover_both_tables() {
        let all: Vec<_> = names().collect();
        assert!(all.contains(&"hsv"));
        assert!(all.contains(&"sqrt"));
    }
}
