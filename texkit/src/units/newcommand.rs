use texkit_core::{DigitMode, FormatSpec, Serializable, Target, TexValue, make_tex_identifier};

/// A TeX constant defined with `\newcommand`.
///
/// Serializes to `\newcommand{\<label>}{<value>}` where the label is
/// sanitized into a valid command name and the value is formatted, suffixed
/// with its unit and, in math mode, wrapped in `$...$`.
///
/// # Example
///
/// ```
/// use texkit::{FormatSpec, NewCommand, Serializable};
///
/// let cmd = NewCommand::new("accuracy", 93.12)
///     .format(FormatSpec::parse(".1f").unwrap())
///     .unit(r"\%")
///     .math(false)
///     .comment("held-out set");
///
/// assert_eq!(
///     cmd.serialize(),
///     r"\newcommand{\accuracy}{93.1\%} % held-out set"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct NewCommand {
    label: String,
    value: TexValue,
    comment: Option<String>,
    math: bool,
    unit: String,
    format: FormatSpec,
    digits: DigitMode,
    capitalize_words: bool,
    target: Target,
}

impl NewCommand {
    /// Create a new constant definition with default options
    /// (math mode, no unit, empty format spec, digits dropped from the label).
    pub fn new(label: impl Into<String>, value: impl Into<TexValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            comment: None,
            math: true,
            unit: String::new(),
            format: FormatSpec::default(),
            digits: DigitMode::Off,
            capitalize_words: false,
            target: Target::Default,
        }
    }

    /// Append a TeX comment (` % <comment>`) to the definition.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Wrap the value in `$...$` (enabled by default).
    pub fn math(mut self, math: bool) -> Self {
        self.math = math;
        self
    }

    /// Suffix appended to the formatted value (e.g. `\,\mathrm{ms}`).
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Format spec used to render the value.
    pub fn format(mut self, format: FormatSpec) -> Self {
        self.format = format;
        self
    }

    /// How digits in the label are turned into the command name.
    pub fn digits(mut self, digits: DigitMode) -> Self {
        self.digits = digits;
        self
    }

    /// Capitalize every word of the label.
    pub fn capitalize_words(mut self, capitalize: bool) -> Self {
        self.capitalize_words = capitalize;
        self
    }

    /// Route this definition somewhere other than the default output.
    pub fn to(mut self, target: impl Into<Target>) -> Self {
        self.target = target.into();
        self
    }

    /// Get the raw label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the value.
    pub fn value(&self) -> &TexValue {
        &self.value
    }

    /// The sanitized command name (without the backslash).
    pub fn command_name(&self) -> String {
        make_tex_identifier(&self.label, self.digits, self.capitalize_words)
    }
}

impl Serializable for NewCommand {
    fn key(&self) -> &str {
        &self.label
    }

    fn serialize(&self) -> String {
        let mut value = format!("{}{}", self.value.format(&self.format), self.unit);
        if self.math {
            value = format!("${}$", value);
        }

        let suffix = match self.comment.as_deref() {
            Some(comment) if !comment.is_empty() => format!(" % {}", comment),
            _ => String::new(),
        };

        format!(
            "\\newcommand{{\\{}}}{{{}}}{}",
            self.command_name(),
            value,
            suffix
        )
    }

    fn target(&self) -> &Target {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cmd = NewCommand::new("constantOne", 1);
        assert_eq!(cmd.serialize(), r"\newcommand{\constantOne}{$1$}");
    }

    #[test]
    fn test_spelled_digits() {
        let cmd = NewCommand::new("constant2", 2).digits(DigitMode::Spell);
        assert_eq!(cmd.serialize(), r"\newcommand{\constanttwo}{$2$}");
    }

    #[test]
    fn test_no_math() {
        let cmd = NewCommand::new("const", 3).math(false);
        assert_eq!(cmd.serialize(), r"\newcommand{\const}{3}");
    }

    #[test]
    fn test_unit_inside_math() {
        let cmd = NewCommand::new("latency", 12.5).unit(r"\,\mathrm{ms}");
        assert_eq!(
            cmd.serialize(),
            r"\newcommand{\latency}{$12.5\,\mathrm{ms}$}"
        );
    }

    #[test]
    fn test_comment() {
        let cmd = NewCommand::new("n", 10).comment("number of runs");
        assert_eq!(cmd.serialize(), r"\newcommand{\n}{$10$} % number of runs");

        let empty = NewCommand::new("n", 10).comment("");
        assert_eq!(empty.serialize(), r"\newcommand{\n}{$10$}");
    }

    #[test]
    fn test_format_and_capitalization() {
        let cmd = NewCommand::new("mean error 2", 0.123456)
            .format(FormatSpec::fixed(3))
            .digits(DigitMode::SpellCapitalized)
            .capitalize_words(true);
        assert_eq!(
            cmd.serialize(),
            r"\newcommand{\MeanErrorTwo}{$0.123$}"
        );
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let cmd = NewCommand::new("x", 1.5).comment("c");
        assert_eq!(cmd.serialize(), cmd.serialize());
    }

    #[test]
    fn test_key_is_raw_label() {
        let cmd = NewCommand::new("constant 2", 2);
        assert_eq!(cmd.key(), "constant 2");
        assert_eq!(cmd.command_name(), "constant");
    }

    #[test]
    fn test_target() {
        let cmd = NewCommand::new("x", 1).to("other.tex");
        assert!(matches!(cmd.target(), Target::File(p) if p.as_os_str() == "other.tex"));
        assert!(NewCommand::new("x", 1).target().is_default());
    }
}
