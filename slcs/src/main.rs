use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use log::*;
use slcs::{compile_file, Mode};

/// Translates an SLCS formula into a modal mu-calculus formula (.mcf).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The spatial logic formula, in .slcs format
    formula: PathBuf,

    /// Translate for the mCRL2 specification of an image
    #[arg(long)]
    mcrl2: bool,

    /// Single channel propositions, for monochromatic images
    #[arg(long)]
    greyscale: bool,

    /// Where to write the formula, defaults to the input with a .mcf extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print the formula to stdout
    #[arg(long)]
    print: bool,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if self.greyscale && !self.mcrl2 {
            bail!("--greyscale only applies to the mCRL2 translation, add --mcrl2");
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    args.validate()?;

    let mode = Mode::from_flags(args.mcrl2, args.greyscale);
    debug!("Translation mode: {mode:?}");

    let now = std::time::Instant::now();

    let (_, formula) = compile_file(&args.formula, args.output.as_deref(), mode)?;

    info!("Translation took {:?}", now.elapsed());

    if args.print {
        println!("{formula}");
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::Args;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn greyscale_needs_mcrl2() {
        assert!(args(&["slcs", "f.slcs", "--greyscale"]).validate().is_err());
        assert!(args(&["slcs", "f.slcs", "--greyscale", "--mcrl2"]).validate().is_ok());
        assert!(args(&["slcs", "f.slcs", "--mcrl2"]).validate().is_ok());
        assert!(args(&["slcs", "f.slcs"]).validate().is_ok());
    }

    #[test]
    fn output_and_print_flags() {
        let args = args(&["slcs", "f.slcs", "-o", "out.mcf", "--print"]);

        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.mcf")));
        assert!(args.print);
        assert!(!args.mcrl2);
    }
}
