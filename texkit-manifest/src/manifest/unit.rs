//! `[[unit]]` entries.

use std::{fmt, ops::Range};

use serde::Deserialize;
use texkit::{
    DigitMode, FormatSpec, NewCommand, Serializable, Target, TexString, TexValue,
    make_tex_identifier,
};
use toml::Spanned;

use crate::{Handlers, Result, error::SourceContext};

/// Kind of unit an entry declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum UnitKind {
    /// A `\newcommand` constant.
    #[serde(rename = "newcommand", alias = "constant")]
    NewCommand,
    /// A verbatim TeX snippet.
    #[serde(rename = "texstring", alias = "text")]
    TexString,
}

impl UnitKind {
    /// Returns the kind identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::NewCommand => "newcommand",
            UnitKind::TexString => "texstring",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `[[unit]]` entry.
///
/// Fields that only apply to one kind are optional here and checked by
/// validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitSpec {
    pub kind: Spanned<UnitKind>,

    // newcommand
    pub label: Option<Spanned<String>>,
    pub value: Option<Spanned<toml::Value>>,
    pub comment: Option<String>,
    pub math: Option<bool>,
    pub unit: Option<String>,
    pub format: Option<Spanned<String>>,
    pub digits: Option<DigitMode>,
    pub capitalize: Option<bool>,

    // texstring
    pub key: Option<Spanned<String>>,
    pub text: Option<String>,

    pub target: Option<Spanned<toml::Value>>,
}

impl UnitSpec {
    /// The declared kind.
    pub fn kind(&self) -> UnitKind {
        *self.kind.get_ref()
    }

    /// Key of the unit and the span to report it at.
    ///
    /// Falls back to the `kind` span when the key is missing, which only
    /// happens before validation.
    pub fn identity(&self) -> (&str, Range<usize>) {
        let key = match self.kind() {
            UnitKind::NewCommand => self.label.as_ref(),
            UnitKind::TexString => self.key.as_ref(),
        };
        match key {
            Some(key) => (key.get_ref().as_str(), key.span()),
            None => ("", self.kind.span()),
        }
    }

    /// Check that the entry is complete and consistent for its kind.
    pub fn validate(&self, ctx: &SourceContext) -> Result<()> {
        match self.kind() {
            UnitKind::NewCommand => self.validate_newcommand(ctx)?,
            UnitKind::TexString => self.validate_texstring(ctx)?,
        }

        if let Some(target) = &self.target {
            // handler names are only known when building
            match Target::from_toml(target.get_ref(), |_| None) {
                Ok(_) | Err(texkit::Error::UnknownHandler { .. }) => {}
                Err(e) => return Err(ctx.bad_target(e, target.span())),
            }
        }
        Ok(())
    }

    fn validate_newcommand(&self, ctx: &SourceContext) -> Result<()> {
        self.forbid(ctx, "key", self.key.is_some())?;
        self.forbid(ctx, "text", self.text.is_some())?;

        let label = self.require(ctx, "label", self.label.as_ref())?;
        let digits = self.digits.unwrap_or_default();
        let capitalize = self.capitalize.unwrap_or(false);
        if make_tex_identifier(label.get_ref(), digits, capitalize).is_empty() {
            return Err(ctx.invalid_at(
                format!(
                    "label '{}' has no letters left after sanitizing (digits: {})",
                    label.get_ref(),
                    digits
                ),
                label.span(),
            ));
        }

        let value = self.require(ctx, "value", self.value.as_ref())?;
        if TexValue::from_toml(value.get_ref()).is_none() {
            return Err(ctx.invalid_at(
                format!(
                    "unsupported value type '{}', expected integer, float or string",
                    value.get_ref().type_str()
                ),
                value.span(),
            ));
        }

        if let Some(format) = &self.format {
            FormatSpec::parse(format.get_ref())
                .map_err(|e| ctx.invalid_at(e.to_string(), format.span()))?;
        }
        Ok(())
    }

    fn validate_texstring(&self, ctx: &SourceContext) -> Result<()> {
        for (field, present) in [
            ("label", self.label.is_some()),
            ("value", self.value.is_some()),
            ("comment", self.comment.is_some()),
            ("math", self.math.is_some()),
            ("unit", self.unit.is_some()),
            ("format", self.format.is_some()),
            ("digits", self.digits.is_some()),
            ("capitalize", self.capitalize.is_some()),
        ] {
            self.forbid(ctx, field, present)?;
        }

        let key = self.require(ctx, "key", self.key.as_ref())?;
        if key.get_ref().is_empty() {
            return Err(ctx.invalid_at("key must not be empty", key.span()));
        }
        if self.text.is_none() {
            return Err(ctx.invalid_at(
                "texstring units need a 'text' field",
                self.kind.span(),
            ));
        }
        Ok(())
    }

    fn require<'a, T>(
        &self,
        ctx: &SourceContext,
        field: &str,
        value: Option<&'a Spanned<T>>,
    ) -> Result<&'a Spanned<T>> {
        value.ok_or_else(|| {
            ctx.invalid_at(
                format!("{} units need a '{}' field", self.kind(), field),
                self.kind.span(),
            )
        })
    }

    fn forbid(&self, ctx: &SourceContext, field: &str, present: bool) -> Result<()> {
        if present {
            return Err(ctx.invalid_at(
                format!("'{}' is not a valid field for {} units", field, self.kind()),
                self.kind.span(),
            ));
        }
        Ok(())
    }

    /// Turn a validated entry into a unit.
    pub fn build(&self, ctx: &SourceContext, handlers: &Handlers) -> Result<Box<dyn Serializable>> {
        let target = match &self.target {
            None => Target::Default,
            Some(target) => Target::from_toml(target.get_ref(), |name| handlers.get(name))
                .map_err(|e| ctx.bad_target(e, target.span()))?,
        };

        let (key, span) = self.identity();
        let unit: Box<dyn Serializable> = match self.kind() {
            UnitKind::NewCommand => {
                let value = self
                    .value
                    .as_ref()
                    .and_then(|v| TexValue::from_toml(v.get_ref()))
                    .ok_or_else(|| ctx.invalid_at("missing or unsupported value", span))?;

                let mut cmd = NewCommand::new(key, value)
                    .math(self.math.unwrap_or(true))
                    .digits(self.digits.unwrap_or_default())
                    .capitalize_words(self.capitalize.unwrap_or(false))
                    .to(target);
                if let Some(comment) = &self.comment {
                    cmd = cmd.comment(comment);
                }
                if let Some(unit) = &self.unit {
                    cmd = cmd.unit(unit);
                }
                if let Some(format) = &self.format {
                    let spec = FormatSpec::parse(format.get_ref())
                        .map_err(|e| ctx.invalid_at(e.to_string(), format.span()))?;
                    cmd = cmd.format(spec);
                }
                Box::new(cmd)
            }
            UnitKind::TexString => Box::new(
                TexString::new(key, self.text.clone().unwrap_or_default()).to(target),
            ),
        };
        Ok(unit)
    }
}
