use clap::Args;
use eyre::{Result, bail};
use texkit::{DigitMode, make_tex_identifier};

#[derive(Args)]
pub struct IdentCommand {
    /// Label to sanitize
    pub text: String,

    /// How digits are handled: off, spell or spell-capitalized
    #[arg(short, long, default_value = "off")]
    pub digits: DigitMode,

    /// Uppercase the first letter of every word
    #[arg(long)]
    pub capitalize: bool,
}

impl IdentCommand {
    pub fn run(&self) -> Result<()> {
        let ident = make_tex_identifier(&self.text, self.digits, self.capitalize);
        if ident.is_empty() {
            bail!(
                "'{}' has no letters left after sanitizing (digits: {})",
                self.text,
                self.digits
            );
        }
        println!("\\{}", ident);
        Ok(())
    }
}
