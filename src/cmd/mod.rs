mod generate;
mod page;
mod verify;
mod view;

pub use self::generate::{cmd_generate, GenerateOptions};
pub use self::page::cmd_page;
pub use self::verify::cmd_verify;
pub use self::view::cmd_view;

use anyhow::{bail, Result};
use clap::CommandFactory;
use clap_complete::{generate as generate_completions, Shell};

use crate::cli::{Cli, ViewArgs};
use crate::config::{self, Config};
use crate::date_utils::{parse_timestamp, parse_utc_offset};
use crate::view::{Clock, FixedClock, SystemClock, ViewOptions};

/// Config-derived view options with command-line overrides applied.
pub(crate) fn resolve_view_options(config: &Config, args: &ViewArgs) -> Result<ViewOptions> {
    let mut options = config.view_options()?;
    if args.hour24 {
        options.hour12 = false;
    }
    if args.no_footer {
        options.show_footer = false;
    }
    if let Some(ref offset) = args.utc_offset {
        let Some(parsed) = parse_utc_offset(offset) else {
            bail!("invalid --utc-offset: {:?}", offset);
        };
        options.offset = parsed;
    }
    Ok(options)
}

/// The system clock, or a fixed clock when `--now` is given.
pub(crate) fn resolve_clock(args: &ViewArgs, options: &ViewOptions) -> Result<Box<dyn Clock>> {
    match args.now {
        Some(ref text) => match parse_timestamp(text, options.offset) {
            Some(now) => Ok(Box::new(FixedClock(now))),
            None => bail!("invalid --now timestamp: {:?}", text),
        },
        None => Ok(Box::new(SystemClock)),
    }
}

pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate_completions(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

pub fn cmd_schema() -> Result<()> {
    println!("{}", config::schema_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    fn args() -> ViewArgs {
        ViewArgs {
            receipt: "abc123".into(),
            keydate: "2021-03-01T10:00:00Z".into(),
            now: None,
            hour24: false,
            utc_offset: Some("UTC".into()),
            no_footer: false,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut a = args();
        a.hour24 = true;
        a.no_footer = true;
        a.utc_offset = Some("-03:00".into());
        let options = resolve_view_options(&Config::default(), &a).unwrap();
        assert!(!options.hour12);
        assert!(!options.show_footer);
        assert_eq!(options.offset, offset!(-3));
    }

    #[test]
    fn bad_offset_flag_is_rejected() {
        let mut a = args();
        a.utc_offset = Some("somewhere".into());
        assert!(resolve_view_options(&Config::default(), &a).is_err());
    }

    #[test]
    fn now_flag_fixes_the_clock() {
        let mut a = args();
        a.now = Some("2021-03-02T10:00:00Z".into());
        let options = resolve_view_options(&Config::default(), &a).unwrap();
        let clock = resolve_clock(&a, &options).unwrap();
        assert_eq!(clock.now(), datetime!(2021-03-02 10:00:00 UTC));
    }

    #[test]
    fn bad_now_flag_is_rejected() {
        let mut a = args();
        a.now = Some("tomorrow".into());
        let options = resolve_view_options(&Config::default(), &a).unwrap();
        assert!(resolve_clock(&a, &options).is_err());
    }
}
