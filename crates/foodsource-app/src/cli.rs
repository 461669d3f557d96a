// Command-line overrides for the board view.
//
// Usage: foodsource [nfl|nba|all] [POSITION|all] [--json|--csv|--text]

use anyhow::bail;

use foodsource_core::board::{LeagueFilter, PositionFilter};
use foodsource_core::config::{DisplayConfig, OutputFormat};

/// Resolved view settings after applying arguments over display.toml.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub league: LeagueFilter,
    pub position: PositionFilter,
    pub format: OutputFormat,
}

pub const USAGE: &str = "usage: foodsource [nfl|nba|all] [POSITION|all] [--json|--csv|--text]";

/// Build the view from config defaults, then apply positional league and
/// position arguments and a format flag.
pub fn resolve_view<I, S>(display: &DisplayConfig, args: I) -> anyhow::Result<View>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Some(mut league) = LeagueFilter::parse(&display.league) else {
        bail!("invalid league `{}` in display config", display.league);
    };
    let Some(mut position) = PositionFilter::parse(&display.position) else {
        bail!("invalid position `{}` in display config", display.position);
    };
    let mut format = display.format;

    let mut positionals = 0;
    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "--json" => format = OutputFormat::Json,
            "--csv" => format = OutputFormat::Csv,
            "--text" => format = OutputFormat::Text,
            flag if flag.starts_with("--") => bail!("unknown flag `{flag}`\n{USAGE}"),
            value => {
                match positionals {
                    0 => match LeagueFilter::parse(value) {
                        Some(l) => league = l,
                        None => bail!("unknown league `{value}`\n{USAGE}"),
                    },
                    1 => match PositionFilter::parse(value) {
                        Some(p) => position = p,
                        None => bail!("unknown position `{value}`\n{USAGE}"),
                    },
                    _ => bail!("unexpected argument `{value}`\n{USAGE}"),
                }
                positionals += 1;
            }
        }
    }

    Ok(View {
        league,
        position,
        format,
    })
}
