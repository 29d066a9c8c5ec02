use lodestone_core::{CatalogError, OreConfig};
use thiserror::Error;

/// Command root as registered with the host.
pub const ROOT: &str = "lodestone";

/// Alternative names for [`ROOT`].
pub const ALIASES: &[&str] = &["ore", "veins"];

/// Whether `name` addresses this command tree.
pub fn is_root(name: &str) -> bool {
    name == ROOT || ALIASES.contains(&name)
}

/// Everything an operator command can fail with. Each variant is shown to
/// the operator as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown subcommand '{0}'. Try /{ROOT} help")]
    UnknownSubcommand(String),

    #[error("'{value}' is not a valid integer for {arg}")]
    InvalidInteger { arg: &'static str, value: String },

    #[error("You do not have permission to spawn ore")]
    NotPermitted,

    #[error("Could not get your position")]
    PositionUnavailable,

    #[error("The world is not accepting ore jobs right now")]
    WorldUnavailable,

    #[error("Ore generation unavailable: {0}")]
    Catalog(#[from] CatalogError),
}

/// A parsed operator command with its arguments already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VeinCommand {
    /// One vein just below the operator.
    Spawn { size: i32 },
    /// `count` veins scattered within `radius` of the operator.
    Generate { radius: i32, count: i32 },
    Help,
}

impl VeinCommand {
    /// Parse the words following the command root.
    ///
    /// Missing arguments take their configured default; out-of-range values
    /// are clamped rather than rejected. Trailing words are ignored.
    pub fn parse(args: &[&str], config: &OreConfig) -> Result<Self, CommandError> {
        let Some((&sub, rest)) = args.split_first() else {
            return Ok(Self::Help);
        };
        match sub {
            "spawn" => {
                let size = int_arg(rest, 0, "size", config.spawn_size.default)?;
                Ok(Self::Spawn {
                    size: config.spawn_size.apply(size),
                })
            }
            "generate" => {
                let radius = int_arg(rest, 0, "radius", config.generate_radius.default)?;
                let count = int_arg(rest, 1, "count", config.generate_count.default)?;
                Ok(Self::Generate {
                    radius: config.generate_radius.apply(radius),
                    count: config.generate_count.apply(count),
                })
            }
            "help" => Ok(Self::Help),
            other => Err(CommandError::UnknownSubcommand(other.to_string())),
        }
    }
}

fn int_arg(
    args: &[&str],
    index: usize,
    arg: &'static str,
    default: i32,
) -> Result<i32, CommandError> {
    match args.get(index) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| CommandError::InvalidInteger {
            arg,
            value: raw.to_string(),
        }),
    }
}

/// Usage listing for both subcommands.
pub fn help_text(config: &OreConfig) -> String {
    let s = config.spawn_size;
    let r = config.generate_radius;
    let c = config.generate_count;
    format!(
        "/{ROOT} (aliases: {aliases}) - place {ore} veins\n  \
         spawn [size={}]  one vein at your location, size {}-{}\n  \
         generate [radius={}] [count={}]  scatter veins around you, radius {}-{}, count {}-{}",
        s.default,
        s.min,
        s.max,
        r.default,
        c.default,
        r.min,
        r.max,
        c.min,
        c.max,
        aliases = ALIASES.join(", "),
        ore = config.ore_material,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<VeinCommand, CommandError> {
        VeinCommand::parse(args, &OreConfig::default())
    }

    #[test]
    fn test_root_and_aliases() {
        assert!(is_root("lodestone"));
        assert!(is_root("ore"));
        assert!(is_root("veins"));
        assert!(!is_root("bronzeage"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&["spawn"]), Ok(VeinCommand::Spawn { size: 5 }));
        assert_eq!(
            parse(&["generate"]),
            Ok(VeinCommand::Generate {
                radius: 32,
                count: 10
            })
        );
        assert_eq!(
            parse(&["generate", "64"]),
            Ok(VeinCommand::Generate {
                radius: 64,
                count: 10
            })
        );
        assert_eq!(parse(&[]), Ok(VeinCommand::Help));
        assert_eq!(parse(&["help"]), Ok(VeinCommand::Help));
    }

    #[test]
    fn test_arguments_clamped() {
        assert_eq!(parse(&["spawn", "999"]), Ok(VeinCommand::Spawn { size: 15 }));
        assert_eq!(parse(&["spawn", "-3"]), Ok(VeinCommand::Spawn { size: 1 }));
        assert_eq!(
            parse(&["generate", "0", "500"]),
            Ok(VeinCommand::Generate {
                radius: 1,
                count: 100
            })
        );
        assert_eq!(
            parse(&["generate", "4000", "0"]),
            Ok(VeinCommand::Generate {
                radius: 128,
                count: 1
            })
        );
    }

    #[test]
    fn test_bad_input_rejected() {
        assert_eq!(
            parse(&["spawn", "big"]),
            Err(CommandError::InvalidInteger {
                arg: "size",
                value: "big".into()
            })
        );
        assert_eq!(
            parse(&["generate", "10", "x"]),
            Err(CommandError::InvalidInteger {
                arg: "count",
                value: "x".into()
            })
        );
        assert_eq!(
            parse(&["dig"]),
            Err(CommandError::UnknownSubcommand("dig".into()))
        );
    }

    #[test]
    fn test_help_lists_subcommands() {
        let text = help_text(&OreConfig::default());
        assert!(text.contains("spawn [size=5]"));
        assert!(text.contains("generate [radius=32] [count=10]"));
        assert!(text.contains("ore, veins"));
    }
}
