//! `passvault generate` — create a random password without storing it.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{copy_to_clipboard, resolve_generator, Cli, GeneratorArgs};
use crate::config::Settings;
use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, gen_args: &GeneratorArgs, copy: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let (length, classes) = resolve_generator(gen_args, &settings);

    let password = Zeroizing::new(generator::generate(length, classes)?);

    crate::audit::log_audit(cli, "generate", None, Some(&format!("length={length}")));

    if copy {
        copy_to_clipboard(&password)?;
        output::success(&format!(
            "Generated {length}-character password copied to the clipboard"
        ));
    } else {
        // Print to stdout so the value can be piped.
        println!("{}", password.as_str());
    }

    Ok(())
}
